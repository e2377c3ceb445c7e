use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, CString};
use thiserror::Error;

const LOG_CAPACITY: usize = 1024;

pub struct ProgramBuilder<'a> {
    vert: &'a str,
    frag: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert_src = CString::new(self.vert).map_err(|_| PBError::InvalidSource("vertex"))?;
        let frag_src = CString::new(self.frag).map_err(|_| PBError::InvalidSource("fragment"))?;

        let vert = compile(gl::VERTEX_SHADER, &vert_src)?;
        let frag = match compile(gl::FRAGMENT_SHADER, &frag_src) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            let mut success: GLint = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let mut buf = [0_u8; LOG_CAPACITY];

                gl::GetProgramInfoLog(
                    program,
                    LOG_CAPACITY as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                return Err(PBError::Linking(info_log(&buf)));
            }

            Ok(Program { id: program })
        }
    }
}

fn compile(kind: GLenum, src: &CString) -> Result<GLuint, PBError> {
    let mut success: GLint = 0;

    unsafe {
        let shader = gl::CreateShader(kind);

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
        if success != 1 {
            let mut buf = [0_u8; LOG_CAPACITY];

            gl::GetShaderInfoLog(
                shader,
                LOG_CAPACITY as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            return Err(PBError::Compilation(info_log(&buf)));
        }

        Ok(shader)
    }
}

/// Log text up to the first NUL, or the whole buffer if the driver filled it.
fn info_log(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());

    String::from_utf8_lossy(&buf[..end]).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(&'static str),
    #[error("{0}")]
    Compilation(String),
    #[error("{0}")]
    Linking(String),
    #[error("uniform '{0}' not found in program")]
    MissingUniform(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformLocation(pub(crate) GLint);

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn uniform_location(&self, name: &str) -> Result<UniformLocation, PBError> {
        let c_name = CString::new(name).map_err(|_| PBError::MissingUniform(name.to_string()))?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        if location < 0 {
            return Err(PBError::MissingUniform(name.to_string()));
        }

        Ok(UniformLocation(location))
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
