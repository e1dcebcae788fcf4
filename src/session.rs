//! The single-writer editor state: loaded photo, transform, camera stream and previews.

use chrono::{DateTime, Utc};

use crate::{
    assets::{FrameAsset, PreparedImage, decode},
    capture::{CameraGuard, CameraSource, SharePayload, ShareTarget},
    config::FramerConfig,
    export::{self, ExportedImage},
    foundation::error::{FramerError, FramerResult},
    input::{self, InputEffect, InputEvent},
    render::{Compositor, FrameRGBA},
    transform::{PhotoTransform, TransformState},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short user-facing message; presentation is up to the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The editable preview and the secondary preview, both redrawn from the same state.
#[derive(Clone, Debug, Default)]
pub struct PreviewSurfaces {
    pub editor: Option<FrameRGBA>,
    pub preview: Option<FrameRGBA>,
    /// Number of recompositions performed so far.
    pub generation: u64,
}

pub struct EditorSession {
    config: FramerConfig,
    compositor: Compositor,
    photo: Option<PreparedImage>,
    transform: TransformState,
    camera: Option<CameraGuard>,
    surfaces: PreviewSurfaces,
    photo_dirty: bool,
    notices: Vec<Notice>,
}

impl EditorSession {
    pub fn new(frame: FrameAsset, config: FramerConfig) -> FramerResult<Self> {
        Ok(Self::with_compositor(Compositor::with_cpu(frame)?, config))
    }

    pub fn with_compositor(compositor: Compositor, config: FramerConfig) -> Self {
        Self {
            config,
            compositor,
            photo: None,
            transform: TransformState::new(),
            camera: None,
            surfaces: PreviewSurfaces::default(),
            photo_dirty: false,
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    pub fn frame(&self) -> &FrameAsset {
        self.compositor.frame()
    }

    pub fn photo(&self) -> Option<&PreparedImage> {
        self.photo.as_ref()
    }

    pub fn transform(&self) -> &PhotoTransform {
        self.transform.current()
    }

    pub fn surfaces(&self) -> &PreviewSurfaces {
        &self.surfaces
    }

    pub fn needs_redraw(&self) -> bool {
        self.photo_dirty || self.transform.is_dirty()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputEffect {
        input::apply(&mut self.transform, event)
    }

    /// Replaces the photo wholesale and returns the transform to identity.
    #[tracing::instrument(skip_all, fields(width = photo.width, height = photo.height))]
    pub fn load_photo(&mut self, photo: PreparedImage) {
        self.photo = Some(photo);
        self.transform.reset();
        self.photo_dirty = true;
        self.notices
            .push(Notice::success("Image loaded! Adjust it to fit perfectly."));
    }

    pub fn load_photo_bytes(&mut self, bytes: &[u8]) -> FramerResult<()> {
        match decode::decode_image(bytes) {
            Ok(photo) => {
                self.load_photo(photo);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn is_camera_active(&self) -> bool {
        self.camera.is_some()
    }

    pub fn start_camera(&mut self, source: &mut dyn CameraSource) -> FramerResult<()> {
        self.cancel_camera();
        match source.start() {
            Ok(stream) => {
                self.camera = Some(CameraGuard::new(stream));
                tracing::debug!("camera stream started");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "camera start failed");
                self.fail(e)
            }
        }
    }

    /// Grabs a still from the live stream and loads it. The stream is stopped on every path.
    pub fn capture_photo(&mut self) -> FramerResult<()> {
        let Some(mut camera) = self.camera.take() else {
            return self.fail(FramerError::validation("camera is not running"));
        };
        let captured = camera.capture_frame();
        camera.stop();

        match captured.and_then(PreparedImage::from_rgba_image) {
            Ok(photo) => {
                self.load_photo(photo);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "camera capture failed");
                self.fail(e)
            }
        }
    }

    pub fn cancel_camera(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            camera.stop();
        }
    }

    /// Recomposes both preview surfaces if anything changed since the last call.
    pub fn render_if_dirty(&mut self) -> FramerResult<bool> {
        if !self.needs_redraw() {
            return Ok(false);
        }

        let composed = self
            .compositor
            .compose(self.photo.as_ref(), self.transform.current())?;
        self.photo_dirty = false;
        self.transform.take_dirty();

        if let Some(frame) = composed {
            self.surfaces.preview = Some(frame.clone());
            self.surfaces.editor = Some(frame);
            self.surfaces.generation += 1;
            tracing::debug!(generation = self.surfaces.generation, "previews redrawn");
        }
        Ok(true)
    }

    /// Encodes the current composition as a timestamped PNG.
    #[tracing::instrument(skip(self))]
    pub fn download(&mut self, now: DateTime<Utc>) -> FramerResult<ExportedImage> {
        match self.export_current(now) {
            Ok(out) => {
                self.notices
                    .push(Notice::success("Image downloaded successfully!"));
                Ok(out)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Hands the share message and the current composition to `target`.
    pub fn share(&mut self, target: &mut dyn ShareTarget, now: DateTime<Utc>) -> FramerResult<()> {
        let exported = match self.export_current(now) {
            Ok(out) => out,
            Err(e) => return self.fail(e),
        };
        let payload = SharePayload {
            message: self.config.share_message.clone(),
            filename: exported.filename,
            png: Some(exported.png),
        };
        match target.share(payload) {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    fn export_current(&mut self, now: DateTime<Utc>) -> FramerResult<ExportedImage> {
        if self.photo.is_none() {
            return Err(FramerError::NoPhotoLoaded);
        }
        self.render_if_dirty()?;
        let frame = self
            .surfaces
            .editor
            .as_ref()
            .ok_or(FramerError::NoPhotoLoaded)?;
        Ok(ExportedImage {
            filename: export::timestamped_filename(&self.config.filename_prefix, now),
            png: export::encode_png(frame)?,
        })
    }

    fn fail<T>(&mut self, err: FramerError) -> FramerResult<T> {
        self.notices.push(Notice::error(err.user_message()));
        Err(err)
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.cancel_camera();
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::layout::WindowFractions;

    fn session() -> EditorSession {
        let frame = PreparedImage::from_premul(20, 20, vec![0u8; 20 * 20 * 4]).unwrap();
        EditorSession::new(
            FrameAsset::new(frame, WindowFractions::HACKSTORM),
            FramerConfig::default(),
        )
        .unwrap()
    }

    fn photo(w: u32, h: u32) -> PreparedImage {
        PreparedImage::from_rgba_image(image::RgbaImage::from_pixel(
            w,
            h,
            image::Rgba([200, 10, 10, 255]),
        ))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn nothing_renders_without_photo() {
        let mut s = session();
        assert!(!s.render_if_dirty().unwrap());
        s.handle_input(InputEvent::FlipHorizontal);
        assert!(s.render_if_dirty().unwrap());
        assert!(s.surfaces().editor.is_none());
        assert_eq!(s.surfaces().generation, 0);
    }

    #[test]
    fn load_marks_dirty_and_notifies() {
        let mut s = session();
        s.load_photo(photo(8, 6));
        assert!(s.needs_redraw());
        assert_eq!(
            s.take_notices(),
            vec![Notice::success("Image loaded! Adjust it to fit perfectly.")]
        );
        assert!(s.render_if_dirty().unwrap());
        assert!(!s.render_if_dirty().unwrap());
        assert_eq!(s.surfaces().generation, 1);
        assert_eq!(s.surfaces().editor, s.surfaces().preview);
    }

    #[test]
    fn bad_bytes_leave_state_alone() {
        let mut s = session();
        assert!(matches!(
            s.load_photo_bytes(b"nope"),
            Err(FramerError::Decode(_))
        ));
        assert!(s.photo().is_none());
        assert_eq!(s.take_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn download_names_file_with_prefix_and_timestamp() {
        let mut s = session();
        s.load_photo(photo(8, 6));
        let out = s.download(now()).unwrap();
        assert_eq!(out.filename, "hackstorm_2024-10-31T12-00-00.png");
        assert!(out.png.starts_with(b"\x89PNG"));
    }
}
