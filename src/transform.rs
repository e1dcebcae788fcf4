//! Photo placement transform and the state holder that mutates it.
//!
//! [`PhotoTransform`] is plain data: offset, scale, rotation and flips. [`TransformState`]
//! owns one, tracks an in-progress pointer drag and records whether anything changed since
//! the last redraw.

use crate::foundation::core::{Affine, Point, Vec2};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 3.0;
pub const MIN_ROTATION_DEG: f64 = -180.0;
pub const MAX_ROTATION_DEG: f64 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhotoTransform {
    pub offset: Vec2,
    pub scale: f64,        // [MIN_SCALE, MAX_SCALE]
    pub rotation_deg: f64, // [MIN_ROTATION_DEG, MAX_ROTATION_DEG]
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Default for PhotoTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PhotoTransform {
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
        rotation_deg: 0.0,
        flip_h: false,
        flip_v: false,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Signed per-axis scale factors, with flips folded in.
    pub fn axis_scale(&self) -> Vec2 {
        let sx = if self.flip_h { -self.scale } else { self.scale };
        let sy = if self.flip_v { -self.scale } else { self.scale };
        Vec2::new(sx, sy)
    }

    /// Maps photo-local space (origin at the photo's center) into canvas space.
    ///
    /// Order: `T(center + offset) * R(rotation) * S(sx, sy)`.
    pub fn to_affine(&self, center: Point) -> Affine {
        let s = self.axis_scale();
        Affine::translate(center.to_vec2() + self.offset)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(s.x, s.y)
    }
}

pub fn clamp_scale(v: f64) -> f64 {
    v.clamp(MIN_SCALE, MAX_SCALE)
}

pub fn clamp_rotation(deg: f64) -> f64 {
    deg.clamp(MIN_ROTATION_DEG, MAX_ROTATION_DEG)
}

#[derive(Clone, Debug, Default)]
pub struct TransformState {
    current: PhotoTransform,
    drag_anchor: Option<Vec2>,
    dirty: bool,
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &PhotoTransform {
        &self.current
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Returns whether the transform changed since the last call, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Anchors a drag at `pointer`; a non-finite pointer leaves no drag active.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return false;
        }
        self.drag_anchor = Some(pointer.to_vec2() - self.current.offset);
        true
    }

    /// Re-derives the offset from the drag anchor; ignored when no drag is active.
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return false;
        }
        self.current.offset = pointer.to_vec2() - anchor;
        self.mark_dirty();
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    pub fn zoom(&mut self, delta: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        self.current.scale = clamp_scale(self.current.scale + delta);
        self.mark_dirty();
        true
    }

    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            return false;
        }
        self.current.scale = clamp_scale(scale);
        self.mark_dirty();
        true
    }

    pub fn set_rotation(&mut self, deg: f64) -> bool {
        if !deg.is_finite() {
            return false;
        }
        self.current.rotation_deg = clamp_rotation(deg);
        self.mark_dirty();
        true
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.current.flip_h = !self.current.flip_h;
        self.mark_dirty();
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.current.flip_v = !self.current.flip_v;
        self.mark_dirty();
    }

    pub fn reset(&mut self) {
        self.current = PhotoTransform::IDENTITY;
        self.drag_anchor = None;
        self.mark_dirty();
    }

    pub fn fit_to_frame(&mut self) {
        self.current.scale = 1.0;
        self.current.offset = Vec2::ZERO;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        tracing::debug!(transform = ?self.current, "transform updated");
    }
}
