use std::sync::Arc;

use crate::foundation::{
    core::Canvas,
    error::{FramerError, FramerResult},
};

pub mod decode;
pub mod frame;
pub mod svg_raster;

pub use frame::FrameAsset;

/// Largest side the CPU rasterizer accepts for an image or surface.
pub const MAX_IMAGE_DIM: u32 = u16::MAX as u32;

/// Uniformly downscales `img` so neither side exceeds [`MAX_IMAGE_DIM`].
pub fn fit_within_surface_limit(img: image::RgbaImage) -> image::RgbaImage {
    let (width, height) = img.dimensions();
    if width <= MAX_IMAGE_DIM && height <= MAX_IMAGE_DIM {
        return img;
    }
    let factor = f64::from(MAX_IMAGE_DIM) / f64::from(width.max(height));
    let side = |v: u32| ((f64::from(v) * factor).round() as u32).clamp(1, MAX_IMAGE_DIM);
    let (w, h) = (side(width), side(height));
    tracing::debug!(width, height, w, h, "downscaling oversized image");
    image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle)
}

#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wraps already-premultiplied pixels, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> FramerResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramerError::validation("image must be at least 1x1"));
        }
        if rgba8_premul.len() != Canvas::new(width, height).byte_len() {
            return Err(FramerError::validation(
                "image byte length does not match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Premultiplies a straight-alpha RGBA8 image (e.g. a camera still), downscaling it first
    /// when a side exceeds [`MAX_IMAGE_DIM`].
    pub fn from_rgba_image(img: image::RgbaImage) -> FramerResult<Self> {
        let img = fit_within_surface_limit(img);
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        crate::foundation::core::premultiply_rgba8_in_place(&mut data);
        Self::from_premul(width, height, data)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

#[derive(Clone, Debug)]
pub struct PreparedSvg {
    pub tree: Arc<usvg::Tree>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_images_shrink_to_surface_limit() {
        let img = image::RgbaImage::from_pixel(70_000, 2, image::Rgba([10, 20, 30, 255]));
        let fitted = fit_within_surface_limit(img);
        assert_eq!(fitted.dimensions(), (MAX_IMAGE_DIM, 2));

        let tall = image::RgbaImage::new(3, 140_000);
        assert_eq!(fit_within_surface_limit(tall).dimensions(), (1, MAX_IMAGE_DIM));
    }

    #[test]
    fn images_within_limit_are_untouched() {
        let img = image::RgbaImage::from_pixel(640, 480, image::Rgba([1, 2, 3, 4]));
        let fitted = fit_within_surface_limit(img.clone());
        assert_eq!(fitted, img);
    }

    #[test]
    fn prepared_image_from_oversized_still_fits() {
        let img = image::RgbaImage::from_pixel(2, 66_000, image::Rgba([255, 0, 0, 255]));
        let prepared = PreparedImage::from_rgba_image(img).unwrap();
        assert!(prepared.width <= MAX_IMAGE_DIM && prepared.height <= MAX_IMAGE_DIM);
        assert_eq!(prepared.height, MAX_IMAGE_DIM);
    }
}
