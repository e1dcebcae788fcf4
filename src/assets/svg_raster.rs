use crate::foundation::error::{FramerError, FramerResult};

// Frame artwork larger than this is almost certainly a unit mistake in the SVG.
const MAX_DIM: u32 = 16_384;

/// Pixel size an SVG frame is rasterized at: its intrinsic size, rounded up.
pub fn svg_intrinsic_px(tree: &usvg::Tree) -> FramerResult<(u32, u32)> {
    fn to_px(v: f32) -> FramerResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(FramerError::validation("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let w = to_px(size.width())?;
    let h = to_px(size.height())?;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(FramerError::validation(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> FramerResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FramerError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
