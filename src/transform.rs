use cgmath::{Deg, Matrix4};

use crate::animation::AnimationState;

/// Builds `T * R * S`: scale and rotation act in the triangle's local frame,
/// translation places it in clip space.
pub fn compose(state: &AnimationState) -> Matrix4<f32> {
    Matrix4::from_translation(state.position)
        * Matrix4::from_angle_z(Deg(state.angle))
        * Matrix4::from_nonuniform_scale(state.scale, state.scale, 1.0)
}

/// Column-major layout expected by `glUniformMatrix4fv` without transposing.
pub fn to_columns(transform: &Matrix4<f32>) -> [[f32; 4]; 4] {
    (*transform).into()
}
