//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

/// Picks the upload format for a decoded image: RGB for three channel images, RGBA otherwise.
pub fn pixel_data(image: &DynamicImage) -> (u32, Vec<u8>) {
    if image.color().channel_count() == 3 {
        (glow::RGB, image.to_rgb8().into_raw())
    } else {
        (glow::RGBA, image.to_rgba8().into_raw())
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`].
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, String> {
        let (width, height) = image.dimensions();
        let (format, data) = pixel_data(image);
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            // RGB rows are not necessarily 4-byte aligned.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                width as i32,
                height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Decodes an image file and uploads it, flipped so the first row is the bottom one.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| format!("failed to load texture {}: {}", path.display(), e))?;
        let texture = Self::new(gl, &image.flipv())?;
        log::debug!(
            "loaded texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Like [`Texture::load`], but a failure is logged and yields `None`.
    pub fn load_or_log(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Option<Self> {
        Self::load(gl, path)
            .inspect_err(|e| log::error!("{}", e))
            .ok()
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn three_channel_images_upload_as_rgb() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])));
        let (format, data) = pixel_data(&image);
        assert_eq!(format, glow::RGB);
        assert_eq!(data.len(), 3 * 2 * 3);
        assert_eq!(&data[..3], &[10, 20, 30]);
    }

    #[test]
    fn four_channel_images_upload_as_rgba() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
        let (format, data) = pixel_data(&image);
        assert_eq!(format, glow::RGBA);
        assert_eq!(data.len(), 2 * 2 * 4);
    }

    #[test]
    fn other_layouts_are_widened_to_rgba() {
        let image = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(2, 1, image::Luma([7])));
        let (format, data) = pixel_data(&image);
        assert_eq!(format, glow::RGBA);
        assert_eq!(data, vec![7, 7, 7, 255, 7, 7, 7, 255]);
    }
}
