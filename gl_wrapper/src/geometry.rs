use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Checks the layout without touching GL, returns the vertex count.
    pub fn validate(&self) -> Result<usize, GBError> {
        let stride = self.stride();

        if stride == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.len() % stride != 0 {
            return Err(GBError::InvalidDataLength);
        }

        let vertices = self.data.len() / stride;

        if let Some(indices) = self.indices {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices) {
                return Err(GBError::IndexOutOfRange { index, vertices });
            }
        }

        Ok(vertices)
    }

    fn stride(&self) -> usize {
        self.attributes.iter().map(|a| a.size()).sum()
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let vertices = self.validate()?;
        let stride = self.stride();

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = None;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (stride * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(i as u32);
            }

            if let Some(indices) = self.indices {
                let mut id = 0;
                gl::GenBuffers(1, (&mut id) as *mut u32);

                // element buffer binding is VAO state, keep the VAO bound
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );

                ebo = Some((id, indices.len()));
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(Geometry { vao, vbo, ebo, vertices })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("Geometry needs at least one vertex attribute")]
    NoAttributes,
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: Option<(u32, usize)>,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Number of indices when the geometry is drawn with an element buffer.
    pub fn indices(&self) -> Option<usize> {
        self.ebo.map(|(_, count)| count)
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some((ebo, _)) = self.ebo {
                gl::DeleteBuffers(1, (&ebo) as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [f32; 12] = [0.0; 12];

    #[test]
    fn counts_interleaved_vertices() {
        let builder = GeometryBuilder::new(&DATA)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3);

        assert_eq!(builder.validate(), Ok(2));
    }

    #[test]
    fn rejects_missing_attributes() {
        let builder = GeometryBuilder::new(&DATA);

        assert_eq!(builder.validate(), Err(GBError::NoAttributes));
    }

    #[test]
    fn rejects_partial_vertex() {
        let builder = GeometryBuilder::new(&DATA[..10])
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3);

        assert_eq!(builder.validate(), Err(GBError::InvalidDataLength));
    }

    #[test]
    fn rejects_index_past_last_vertex() {
        let indices = [0, 1, 4];
        let builder = GeometryBuilder::new(&DATA)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Float)
            .with_indices(&indices);

        assert_eq!(
            builder.validate(),
            Err(GBError::IndexOutOfRange {
                index: 4,
                vertices: 4
            })
        );
    }
}
