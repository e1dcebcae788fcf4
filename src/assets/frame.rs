use std::path::Path;

use anyhow::Context;

use crate::{
    FramerResult,
    assets::{PreparedImage, decode, svg_raster},
    foundation::core::{Canvas, Rect},
    layout::WindowFractions,
};

/// Decorative overlay with a transparent window the photo shows through.
#[derive(Clone, Debug)]
pub struct FrameAsset {
    image: PreparedImage,
    window: WindowFractions,
}

impl FrameAsset {
    pub fn new(image: PreparedImage, window: WindowFractions) -> Self {
        Self { image, window }
    }

    /// Loads raster artwork, or SVG artwork rasterized at its intrinsic size.
    pub fn from_bytes(bytes: &[u8]) -> FramerResult<Self> {
        let image = if decode::looks_like_svg(bytes) {
            let svg = decode::parse_svg(bytes)?;
            let (w, h) = svg_raster::svg_intrinsic_px(&svg.tree)?;
            let rgba8_premul = svg_raster::rasterize_svg_to_premul_rgba8(&svg.tree, w, h)?;
            PreparedImage::from_premul(w, h, rgba8_premul)?
        } else {
            decode::decode_image(bytes)?
        };
        tracing::debug!(
            width = image.width,
            height = image.height,
            "frame asset prepared"
        );
        Ok(Self::new(image, WindowFractions::HACKSTORM))
    }

    pub fn from_path(path: &Path) -> FramerResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read frame '{}'", path.display()))?;
        Self::from_bytes(&bytes)
    }

    pub fn image(&self) -> &PreparedImage {
        &self.image
    }

    pub fn canvas(&self) -> Canvas {
        self.image.canvas()
    }

    pub fn window_fractions(&self) -> WindowFractions {
        self.window
    }

    pub fn window_rect(&self) -> Rect {
        self.window.window_rect(self.canvas())
    }
}
