use crate::foundation::core::{Canvas, Rect};

/// Placement of the transparent photo window, as fractions of the frame size.
///
/// The default values are tied to the shipped frame artwork and must not drift.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowFractions {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl WindowFractions {
    pub const HACKSTORM: Self = Self {
        left: 0.24,
        top: 0.12,
        width: 0.52,
        height: 0.64,
    };

    /// Photo window in frame pixel space.
    pub fn window_rect(&self, frame: Canvas) -> Rect {
        let fw = f64::from(frame.width);
        let fh = f64::from(frame.height);
        Rect::from_origin_size(
            (fw * self.left, fh * self.top),
            (fw * self.width, fh * self.height),
        )
    }
}

impl Default for WindowFractions {
    fn default() -> Self {
        Self::HACKSTORM
    }
}

/// Size the photo is drawn at (before the user transform) so that it covers `window`.
///
/// Wider-than-window photos are fit by height and overflow horizontally; everything else is
/// fit by width and overflows vertically.
pub fn cover_fit(photo: Canvas, window: Rect) -> (f64, f64) {
    let img_aspect = photo.aspect();
    let area_aspect = window.width() / window.height();

    if img_aspect > area_aspect {
        let h = window.height();
        (h * img_aspect, h)
    } else {
        let w = window.width();
        (w, w / img_aspect)
    }
}
