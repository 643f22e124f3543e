use std::{fmt, rc::Rc};

use gldemo_data::PixelBuffer;

use crate::{error::Error, gl::GlBackend};

/// An immutable-storage `RGB32F` 2D texture sized to a pixel buffer.
pub struct Texture<G: GlBackend> {
    gl: Rc<G>,
    texture: G::Texture,
    width: u32,
    height: u32,
}

impl<G: GlBackend> Texture<G> {
    pub fn new(gl: &Rc<G>, width: u32, height: u32) -> Result<Self, Error> {
        let texture = gl.create_texture().map_err(|e| {
            log::error!("glCreateTexture: {e}");
            Error::texture_creation_failed()
        })?;

        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_storage_2d(glow::TEXTURE_2D, 1, glow::RGB32F, width as i32, height as i32);
        Self::setup_sampling(gl.as_ref());
        gl.bind_texture(glow::TEXTURE_2D, None);

        Ok(Self { gl: gl.clone(), texture, width, height })
    }

    /// Replaces the whole image with the contents of `pixels`.
    pub fn upload(&self, pixels: &PixelBuffer) -> Result<(), Error> {
        if (pixels.width(), pixels.height()) != (self.width, self.height) {
            return Err(Error::Resource(format!(
                "pixel buffer is {}x{}, texture is {}x{}",
                pixels.width(),
                pixels.height(),
                self.width,
                self.height
            )));
        }

        self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        self.gl.tex_sub_image_2d(
            glow::TEXTURE_2D,
            self.width as i32,
            self.height as i32,
            glow::RGB,
            glow::FLOAT,
            pixels.as_bytes(),
        );
        Ok(())
    }

    pub fn bind(&self, texture_unit: u32) {
        self.gl.active_texture(glow::TEXTURE0 + texture_unit);
        self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
    }

    pub fn unbind(&self) {
        self.gl.bind_texture(glow::TEXTURE_2D, None);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn destroy(self) {}

    fn setup_sampling(gl: &G) {
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
    }
}

impl<G: GlBackend> Drop for Texture<G> {
    fn drop(&mut self) {
        self.gl.delete_texture(self.texture);
    }
}

impl<G: GlBackend> fmt::Debug for Texture<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("texture", &self.texture)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use gldemo_data::{Drand48, NoisePattern};

    use super::*;
    use crate::gl::testing::RecordingGl;

    #[test]
    fn test_storage_and_sampling() {
        let gl = Rc::new(RecordingGl::new());
        let texture = Texture::new(&gl, 4, 2).unwrap();

        assert_eq!(texture.size(), (4, 2));
        assert_eq!(
            gl.count(&format!("tex_storage_2d({:#06x}, 1, {:#06x}, 4, 2)", glow::TEXTURE_2D, glow::RGB32F)),
            1
        );
        assert_eq!(gl.count("tex_parameter_i32"), 4);
    }

    #[test]
    fn test_upload_whole_buffer() {
        let gl = Rc::new(RecordingGl::new());
        let texture = Texture::new(&gl, 640, 480).unwrap();
        let mut pixels = PixelBuffer::new(640, 480);
        pixels.fill(NoisePattern::Rgb, &mut Drand48::new());

        texture.upload(&pixels).unwrap();

        assert_eq!(gl.uploads(), vec![(glow::TEXTURE_2D, 640 * 480 * 12)]);
    }

    #[test]
    fn test_upload_rejects_mismatched_size() {
        let gl = Rc::new(RecordingGl::new());
        let texture = Texture::new(&gl, 640, 480).unwrap();

        let err = texture.upload(&PixelBuffer::new(650, 480)).unwrap_err();
        assert!(matches!(err, Error::Resource(_)));
        assert!(gl.uploads().is_empty());
    }

    #[test]
    fn test_bind_unit() {
        let gl = Rc::new(RecordingGl::new());
        let texture = Texture::new(&gl, 1, 1).unwrap();
        gl.clear_calls();

        texture.bind(0);

        assert_eq!(
            gl.calls(),
            vec![
                format!("active_texture({:#06x})", glow::TEXTURE0),
                format!("bind_texture({:#06x}, Some(1))", glow::TEXTURE_2D),
            ]
        );
    }
}
