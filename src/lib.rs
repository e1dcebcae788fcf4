//! Framer places a user photo inside a fixed decorative frame and exports the result as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Input**: UI events (`InputEvent`) mutate a `TransformState` (offset, scale, rotation, flips)
//! 2. **Plan**: frame size + photo size + transform -> `CompositionPlan` (photo window, cover-fit, affine)
//! 3. **Render**: `CompositionPlan -> FrameRGBA` on the CPU backend, photo clipped to the window
//!    and the frame drawn on top
//! 4. **Export**: unpremultiply and encode PNG with a timestamped file name
//!
//! `EditorSession` owns all mutable state (photo, transform, camera stream, previews) and redraws
//! both preview surfaces only when something changed.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end until export.
#![forbid(unsafe_code)]

pub mod assets;
pub mod capture;
pub mod config;
pub mod export;
pub mod foundation;
pub mod input;
pub mod layout;
pub mod render;
pub mod session;
pub mod transform;

pub use assets::{FrameAsset, PreparedImage};
pub use capture::{CameraGuard, CameraSource, CameraStream, SharePayload, ShareTarget};
pub use config::FramerConfig;
pub use export::{ExportedImage, encode_png, timestamped_filename};
pub use foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use foundation::error::{FramerError, FramerResult};
pub use input::{InputEffect, InputEvent};
pub use layout::{WindowFractions, cover_fit};
pub use render::{
    BackendKind, CompositionPlan, Compositor, FrameRGBA, RenderBackend, RenderSettings,
    create_backend, plan_composition,
};
pub use session::{EditorSession, Notice, NoticeLevel, PreviewSurfaces};
pub use transform::{PhotoTransform, TransformState};
