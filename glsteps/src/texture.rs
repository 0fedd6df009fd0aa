use glow::{
    Context, HasContext as _, NativeTexture, LINEAR, LINEAR_MIPMAP_LINEAR, REPEAT, RGB, RGBA,
    TEXTURE_2D, TEXTURE_MAG_FILTER, TEXTURE_MIN_FILTER, TEXTURE_WRAP_S, TEXTURE_WRAP_T,
    UNPACK_ALIGNMENT, UNSIGNED_BYTE,
};

use crate::check_error;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Texture {
    id: NativeTexture,
}

impl Texture {
    /// Decodes `data` (any format stb_image understands) and uploads it.
    pub fn load(gl: &Context, data: &[u8], gen_mipmap: bool) -> Result<Self> {
        use stb_image::image::{load_from_memory, LoadResult};
        let image = match load_from_memory(data) {
            LoadResult::Error(e) => return Err(Error::Texture(e)),
            LoadResult::ImageU8(image) => image,
            LoadResult::ImageF32(_) => {
                return Err(Error::Texture("hdr images are not supported".into()))
            }
        };
        let format = match image.depth {
            3 => RGB,
            4 => RGBA,
            d => return Err(Error::Texture(format!("unsupported channel count: {d}"))),
        };
        Self::upload(
            gl,
            image.width as u32,
            image.height as u32,
            format,
            &image.data,
            gen_mipmap,
        )
    }

    fn upload(
        gl: &Context,
        width: u32,
        height: u32,
        format: u32,
        pixels: &[u8],
        gen_mipmap: bool,
    ) -> Result<Self> {
        let tex_id = unsafe { gl.create_texture() }
            .map_err(|e| Error::Resource(format!("texture: {e}")))?;
        let configured = unsafe {
            (|| -> Result<()> {
                gl.bind_texture(TEXTURE_2D, Some(tex_id));
                check_error(gl, "texture bind_texture")?;
                gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_S, REPEAT as i32);
                gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_T, REPEAT as i32);
                gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR as i32);
                gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MAG_FILTER, LINEAR as i32);
                check_error(gl, "texture parameters")?;
                // RGB rows are not 4-byte aligned in general.
                gl.pixel_store_i32(UNPACK_ALIGNMENT, 1);
                gl.tex_image_2d(
                    TEXTURE_2D,
                    0,
                    format as _,
                    width as _,
                    height as _,
                    0,
                    format,
                    UNSIGNED_BYTE,
                    Some(pixels),
                );
                check_error(gl, "texture image_2d")?;
                if gen_mipmap {
                    gl.generate_mipmap(TEXTURE_2D);
                    gl.tex_parameter_i32(
                        TEXTURE_2D,
                        TEXTURE_MIN_FILTER,
                        LINEAR_MIPMAP_LINEAR as _,
                    );
                    check_error(gl, "texture gen mipmap")?;
                }
                Ok(())
            })()
        };
        if let Err(e) = configured {
            unsafe { gl.delete_texture(tex_id) };
            return Err(e);
        }
        Ok(Texture { id: tex_id })
    }

    pub fn bind(&self, gl: &Context, unit: u32) {
        unsafe {
            gl.active_texture(unit);
            gl.bind_texture(TEXTURE_2D, Some(self.id));
        }
    }

    pub fn delete(self, gl: &Context) {
        unsafe { gl.delete_texture(self.id) }
    }
}
