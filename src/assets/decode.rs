use std::sync::Arc;

use anyhow::Context;

use crate::{
    FramerError, FramerResult,
    assets::{PreparedImage, PreparedSvg, fit_within_surface_limit},
    foundation::core::premultiply_rgba8_in_place,
};

/// Decodes any format the `image` crate recognizes into premultiplied RGBA8.
///
/// Images with a side over [`crate::assets::MAX_IMAGE_DIM`] are downscaled so they stay renderable.
pub fn decode_image(bytes: &[u8]) -> FramerResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FramerError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(FramerError::decode("image has zero width or height"));
    }
    let rgba = fit_within_surface_limit(rgba);
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub fn parse_svg(bytes: &[u8]) -> FramerResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Cheap sniff for SVG documents; raster formats are left to `image`.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let text = head.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_image_png_dimensions_and_premul() {
        let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
        let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let prepared = decode_image(&buf).unwrap();
        assert_eq!(prepared.width, 1);
        assert_eq!(prepared.height, 1);
        assert_eq!(
            prepared.rgba8_premul.as_slice(),
            &[
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128u8
            ]
        );
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, FramerError::Decode(_)));
    }

    #[test]
    fn decode_svg_parse_ok_and_err() {
        let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
        parse_svg(ok).unwrap();

        let bad = br#"<svg"#;
        assert!(parse_svg(bad).is_err());
    }

    #[test]
    fn svg_sniffing() {
        assert!(looks_like_svg(b"<svg xmlns='http://www.w3.org/2000/svg'/>"));
        assert!(looks_like_svg(
            b"  <?xml version=\"1.0\"?>\n<svg xmlns='http://www.w3.org/2000/svg'/>"
        ));
        assert!(!looks_like_svg(b"\x89PNG\r\n\x1a\n"));
        assert!(!looks_like_svg(b"<html></html>"));
    }
}
