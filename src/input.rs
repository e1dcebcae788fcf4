//! Maps discrete UI events onto [`TransformState`] operations.

use crate::{foundation::core::Point, transform::TransformState};

/// Scale change applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Raw wheel delta; only its sign is used.
    Wheel { delta_y: f64 },
    RotationSlider { degrees: f64 },
    ZoomSlider { scale: f64 },
    FlipHorizontal,
    FlipVertical,
    Reset,
    Fit,
}

/// What the caller should do after an event was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEffect {
    None,
    Redraw,
}

/// Wheel down zooms out, anything else zooms in.
pub fn wheel_zoom_delta(delta_y: f64) -> f64 {
    if delta_y > 0.0 {
        -WHEEL_ZOOM_STEP
    } else {
        WHEEL_ZOOM_STEP
    }
}

pub fn apply(state: &mut TransformState, event: InputEvent) -> InputEffect {
    let changed = match event {
        InputEvent::PointerDown { x, y } => {
            state.begin_drag(Point::new(x, y));
            false
        }
        InputEvent::PointerMove { x, y } => state.update_drag(Point::new(x, y)),
        InputEvent::PointerUp => {
            state.end_drag();
            false
        }
        InputEvent::Wheel { delta_y } => state.zoom(wheel_zoom_delta(delta_y)),
        InputEvent::RotationSlider { degrees } => state.set_rotation(degrees),
        InputEvent::ZoomSlider { scale } => state.set_scale(scale),
        InputEvent::FlipHorizontal => {
            state.toggle_flip_horizontal();
            true
        }
        InputEvent::FlipVertical => {
            state.toggle_flip_vertical();
            true
        }
        InputEvent::Reset => {
            state.reset();
            true
        }
        InputEvent::Fit => {
            state.fit_to_frame();
            true
        }
    };

    if changed {
        InputEffect::Redraw
    } else {
        InputEffect::None
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;

    #[test]
    fn wheel_direction() {
        assert_eq!(wheel_zoom_delta(120.0), -WHEEL_ZOOM_STEP);
        assert_eq!(wheel_zoom_delta(-3.0), WHEEL_ZOOM_STEP);
        assert_eq!(wheel_zoom_delta(0.0), WHEEL_ZOOM_STEP);
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut s = TransformState::new();
        for _ in 0..40 {
            apply(&mut s, InputEvent::Wheel { delta_y: -1.0 });
        }
        assert_eq!(s.current().scale, 3.0);
        for _ in 0..40 {
            apply(&mut s, InputEvent::Wheel { delta_y: 1.0 });
        }
        assert_eq!(s.current().scale, 0.1);
    }

    #[test]
    fn drag_sequence_redraws_only_on_move() {
        let mut s = TransformState::new();
        assert_eq!(
            apply(&mut s, InputEvent::PointerDown { x: 10.0, y: 10.0 }),
            InputEffect::None
        );
        assert_eq!(
            apply(&mut s, InputEvent::PointerMove { x: 25.0, y: 0.0 }),
            InputEffect::Redraw
        );
        assert_eq!(apply(&mut s, InputEvent::PointerUp), InputEffect::None);
        assert_eq!(
            apply(&mut s, InputEvent::PointerMove { x: 99.0, y: 99.0 }),
            InputEffect::None
        );
        assert_eq!(s.current().offset, Vec2::new(15.0, -10.0));
    }

    #[test]
    fn nan_pointer_down_leaves_offset_untouched() {
        let mut s = TransformState::new();
        apply(&mut s, InputEvent::PointerDown { x: f64::NAN, y: 0.0 });
        assert_eq!(
            apply(&mut s, InputEvent::PointerMove { x: 10.0, y: 10.0 }),
            InputEffect::None
        );
        assert_eq!(s.current().offset, Vec2::ZERO);
    }

    #[test]
    fn sliders_set_values_directly() {
        let mut s = TransformState::new();
        apply(&mut s, InputEvent::RotationSlider { degrees: -90.0 });
        apply(&mut s, InputEvent::ZoomSlider { scale: 2.2 });
        assert_eq!(s.current().rotation_deg, -90.0);
        assert_eq!(s.current().scale, 2.2);
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                {"kind": "pointer_down", "x": 1, "y": 2},
                {"kind": "wheel", "delta_y": -100},
                {"kind": "flip_horizontal"},
                {"kind": "rotation_slider", "degrees": 12.5}
            ]"#,
        )
        .unwrap();
        assert_eq!(events[0], InputEvent::PointerDown { x: 1.0, y: 2.0 });
        assert_eq!(events[1], InputEvent::Wheel { delta_y: -100.0 });
        assert_eq!(events[2], InputEvent::FlipHorizontal);
        assert_eq!(events[3], InputEvent::RotationSlider { degrees: 12.5 });
    }
}
