use std::{io::Cursor, path::Path};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    foundation::{
        core::unpremultiply_rgba8_in_place,
        error::{FramerError, FramerResult},
    },
    render::FrameRGBA,
};

/// A finished PNG ready to be offered as a download.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    pub filename: String,
    pub png: Vec<u8>,
}

/// `<prefix>_<YYYY-MM-DDTHH-MM-SS>.png`, in UTC, safe for every filesystem.
pub fn timestamped_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}_{}.png", now.format("%Y-%m-%dT%H-%M-%S"))
}

pub fn encode_png(frame: &FrameRGBA) -> FramerResult<Vec<u8>> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| FramerError::render("frame buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

pub fn write_png(path: &Path, png: &[u8]) -> FramerResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
