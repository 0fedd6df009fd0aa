use glam::{Vec2, Vec3};
use glow::{
    Context, HasContext as _, NativeBuffer, NativeProgram, NativeVertexArray, ARRAY_BUFFER,
    ELEMENT_ARRAY_BUFFER, FLOAT, STATIC_DRAW, TRIANGLES, UNSIGNED_INT,
};
use log::warn;

use crate::error::{Error, Result};

/// The triangle the shader demos draw, one vertex per corner.
pub const TRIANGLE: [Vec3; 3] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
];

/// Background of the triangle demos, opaque black.
pub const TRIANGLE_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Vertex array with its buffers, uploaded once with `STATIC_DRAW`.
///
/// [Mesh::delete] consumes the mesh, so it cannot be copied:
///
/// ```compile_fail
/// fn copyable<T: Copy>() {}
/// copyable::<glsteps::Mesh>();
/// ```
#[derive(Debug)]
pub struct Mesh {
    vertex_array: NativeVertexArray,
    vertex_buffer: NativeBuffer,
    texture_coordinate_buffer: Option<NativeBuffer>,
    index_buffer: Option<NativeBuffer>,
    num_vertices: u32,
    num_indices: u32,
}

impl Mesh {
    pub fn new(
        gl: &Context,
        positions: &[Vec3],
        texture_coordinates: Option<&[Vec2]>,
        indices: Option<&[u32]>,
    ) -> Result<Self> {
        let vertex_array = unsafe { gl.create_vertex_array() }
            .map_err(|e| Error::Resource(format!("vertex array: {e}")))?;

        // A failed creation releases every object created before it.
        let release = |buffers: &[Option<NativeBuffer>]| unsafe {
            for buffer in buffers.iter().flatten() {
                gl.delete_buffer(*buffer);
            }
            gl.delete_vertex_array(vertex_array);
        };
        let vertex_buffer = create_buffer(gl).inspect_err(|_| release(&[]))?;
        let texture_coordinate_buffer = texture_coordinates
            .map(|_| create_buffer(gl).inspect_err(|_| release(&[Some(vertex_buffer)])))
            .transpose()?;
        let index_buffer = indices
            .map(|_| {
                create_buffer(gl)
                    .inspect_err(|_| release(&[Some(vertex_buffer), texture_coordinate_buffer]))
            })
            .transpose()?;

        let mesh = Mesh {
            vertex_array,
            vertex_buffer,
            texture_coordinate_buffer,
            index_buffer,
            num_vertices: positions.len() as u32,
            num_indices: indices.map_or(0, |i| i.len() as u32),
        };
        unsafe {
            gl.bind_vertex_array(Some(mesh.vertex_array));
            gl.bind_buffer(ARRAY_BUFFER, Some(mesh.vertex_buffer));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, bytemuck::cast_slice(positions), STATIC_DRAW);

            if let (Some(buffer), Some(data)) = (mesh.texture_coordinate_buffer, texture_coordinates)
            {
                gl.bind_buffer(ARRAY_BUFFER, Some(buffer));
                gl.buffer_data_u8_slice(ARRAY_BUFFER, bytemuck::cast_slice(data), STATIC_DRAW);
            }

            // The element buffer binding is recorded in the vertex array.
            if let (Some(buffer), Some(data)) = (mesh.index_buffer, indices) {
                gl.bind_buffer(ELEMENT_ARRAY_BUFFER, Some(buffer));
                gl.buffer_data_u8_slice(
                    ELEMENT_ARRAY_BUFFER,
                    bytemuck::cast_slice(data),
                    STATIC_DRAW,
                );
            }

            gl.bind_vertex_array(None);
        }
        Ok(mesh)
    }

    /// Points the program's attributes at this mesh's buffers.
    pub fn bind_attributes(
        &self,
        gl: &Context,
        program: NativeProgram,
        vertex_binding: &str,
        texture_binding: Option<&str>,
    ) -> Result<()> {
        unsafe {
            gl.bind_vertex_array(Some(self.vertex_array));

            gl.bind_buffer(ARRAY_BUFFER, Some(self.vertex_buffer));
            let loc = gl.get_attrib_location(program, vertex_binding).ok_or_else(|| {
                Error::Resource(format!("attribute {vertex_binding:?} is not active"))
            })?;
            gl.vertex_attrib_pointer_f32(loc, 3, FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(loc);

            if let (Some(texture_binding), Some(buffer)) =
                (texture_binding, self.texture_coordinate_buffer)
            {
                if let Some(loc) = gl.get_attrib_location(program, texture_binding) {
                    gl.bind_buffer(ARRAY_BUFFER, Some(buffer));
                    gl.vertex_attrib_pointer_f32(loc, 2, FLOAT, false, 0, 0);
                    gl.enable_vertex_attrib_array(loc);
                } else {
                    warn!("attribute {texture_binding:?} is not active");
                }
            }

            gl.bind_buffer(ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);
        }
        Ok(())
    }

    pub fn bind(&self, gl: &Context) {
        unsafe { gl.bind_vertex_array(Some(self.vertex_array)) }
    }

    pub fn unbind(gl: &Context) {
        unsafe { gl.bind_vertex_array(None) }
    }

    /// Indexed draw when the mesh has an element buffer, plain otherwise.
    pub fn draw(&self, gl: &Context) {
        unsafe {
            if self.index_buffer.is_some() {
                gl.draw_elements(TRIANGLES, self.num_indices as _, UNSIGNED_INT, 0);
            } else {
                gl.draw_arrays(TRIANGLES, 0, self.num_vertices as _);
            }
        }
    }

    pub fn delete(self, gl: &Context) {
        unsafe {
            gl.delete_vertex_array(self.vertex_array);
            gl.delete_buffer(self.vertex_buffer);
            if let Some(buffer) = self.texture_coordinate_buffer {
                gl.delete_buffer(buffer);
            }
            if let Some(buffer) = self.index_buffer {
                gl.delete_buffer(buffer);
            }
        }
    }
}

fn create_buffer(gl: &Context) -> Result<NativeBuffer> {
    unsafe { gl.create_buffer() }.map_err(|e| Error::Resource(format!("buffer: {e}")))
}
