pub const POSITION_COMPONENTS: usize = 3;
pub const COLOR_COMPONENTS: usize = 3;
pub const VERTEX_STRIDE: usize = POSITION_COMPONENTS + COLOR_COMPONENTS;

/// Interleaved position and color, one red, one green and one blue corner.
#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 3 * VERTEX_STRIDE] = [
    -0.5, -0.5, 0.0,    1.0, 0.0, 0.0,
    0.5, -0.5, 0.0,     0.0, 1.0, 0.0,
    0.0, 0.5, 0.0,      0.0, 0.0, 1.0,
];

pub const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];
