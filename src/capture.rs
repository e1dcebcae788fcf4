//! Contracts for the camera and share collaborators.
//!
//! The crate ships no device or network implementations; the embedding UI provides them.

use crate::foundation::error::FramerResult;

/// Something that can open a live camera stream.
pub trait CameraSource {
    /// Fails with [`crate::FramerError::CameraAccessDenied`] on permission or device errors.
    fn start(&mut self) -> FramerResult<Box<dyn CameraStream>>;
}

pub trait CameraStream {
    /// Grabs the current video frame as straight-alpha RGBA8.
    fn capture_frame(&mut self) -> FramerResult<image::RgbaImage>;

    /// Stops every track of the stream. Must be safe to call more than once.
    fn stop(&mut self);
}

/// Owns a live stream and stops it when dropped, whichever way the capture UI closes.
pub struct CameraGuard {
    stream: Option<Box<dyn CameraStream>>,
}

impl CameraGuard {
    pub fn new(stream: Box<dyn CameraStream>) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    pub fn capture_frame(&mut self) -> FramerResult<image::RgbaImage> {
        match self.stream.as_mut() {
            Some(s) => s.capture_frame(),
            None => Err(crate::FramerError::validation("camera stream already stopped")),
        }
    }

    pub fn stop(&mut self) {
        if let Some(mut s) = self.stream.take() {
            s.stop();
            tracing::debug!("camera stream stopped");
        }
    }
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        self.stop();
    }
}

/// What the share collaborator receives.
#[derive(Clone, Debug)]
pub struct SharePayload {
    pub message: String,
    pub filename: String,
    pub png: Option<Vec<u8>>,
}

pub trait ShareTarget {
    fn share(&mut self, payload: SharePayload) -> FramerResult<()>;
}
