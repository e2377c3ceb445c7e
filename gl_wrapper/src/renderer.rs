use std::ffi::c_void;

use crate::geometry::Geometry;
use crate::program::{Program, UniformLocation};

pub struct GlRenderer {
    current_program: u32,
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    /// Uploads a column-major 4x4 matrix to `location` of `program`.
    pub fn set_uniform_mat4(
        &mut self,
        program: &Program,
        location: UniformLocation,
        matrix: &[[f32; 4]; 4],
    ) {
        self.use_program(program);

        unsafe {
            gl::UniformMatrix4fv(location.0, 1, gl::FALSE, matrix.as_ptr() as *const f32);
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            match geometry.indices() {
                Some(count) => gl::DrawElements(
                    gl::TRIANGLES,
                    count as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null::<c_void>(),
                ),
                None => gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertices() as i32),
            }
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}
