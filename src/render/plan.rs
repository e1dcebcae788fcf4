use crate::{
    foundation::core::{Affine, Canvas, Rect, Vec2},
    layout::{WindowFractions, cover_fit},
    transform::PhotoTransform,
};

/// Everything the rasterizer needs to draw one composition, resolved to canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionPlan {
    /// Output surface size; always the frame's native size.
    pub canvas: Canvas,
    /// Clip rectangle the photo is confined to.
    pub window: Rect,
    /// Cover-fit size of the photo before the user transform.
    pub draw_size: (f64, f64),
    /// Maps photo pixel space `[0,w]x[0,h]` to canvas space.
    pub photo_affine: Affine,
    pub photo: Canvas,
}

pub fn plan_composition(
    frame: Canvas,
    window: WindowFractions,
    photo: Canvas,
    transform: &PhotoTransform,
) -> CompositionPlan {
    let window = window.window_rect(frame);
    let (dw, dh) = cover_fit(photo, window);

    // Photo pixels -> cover-fit box centered on the local origin -> user transform.
    let to_box = Affine::translate(Vec2::new(-dw / 2.0, -dh / 2.0))
        * Affine::scale_non_uniform(dw / f64::from(photo.width), dh / f64::from(photo.height));
    let photo_affine = transform.to_affine(window.center()) * to_box;

    CompositionPlan {
        canvas: frame,
        window,
        draw_size: (dw, dh),
        photo_affine,
        photo,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    fn approx_pt(p: Point, x: f64, y: f64) -> bool {
        (p.x - x).abs() < 1e-6 && (p.y - y).abs() < 1e-6
    }

    #[test]
    fn identity_plan_centers_cover_fit_photo() {
        let plan = plan_composition(
            Canvas::new(1000, 1000),
            WindowFractions::HACKSTORM,
            Canvas::new(800, 600),
            &PhotoTransform::IDENTITY,
        );
        assert_eq!(plan.canvas, Canvas::new(1000, 1000));
        assert!((plan.draw_size.1 - 640.0).abs() < 1e-9);
        assert!((plan.draw_size.0 - 853.333_333).abs() < 1e-3);

        let dw = plan.draw_size.0;
        // Photo top-left lands half a draw size left/up of the window center (500, 440).
        assert!(approx_pt(
            plan.photo_affine * Point::ZERO,
            500.0 - dw / 2.0,
            120.0
        ));
        assert!(approx_pt(
            plan.photo_affine * Point::new(800.0, 600.0),
            500.0 + dw / 2.0,
            760.0
        ));
    }

    #[test]
    fn canvas_follows_frame_not_photo() {
        for photo in [Canvas::new(10, 10), Canvas::new(4000, 3000), Canvas::new(1, 900)] {
            let plan = plan_composition(
                Canvas::new(1080, 1350),
                WindowFractions::HACKSTORM,
                photo,
                &PhotoTransform::IDENTITY,
            );
            assert_eq!(plan.canvas, Canvas::new(1080, 1350));
        }
    }

    #[test]
    fn offset_and_flip_move_photo_corners() {
        let t = PhotoTransform {
            offset: Vec2::new(20.0, 0.0),
            flip_h: true,
            ..PhotoTransform::IDENTITY
        };
        let plan = plan_composition(
            Canvas::new(1000, 1000),
            WindowFractions::HACKSTORM,
            Canvas::new(520, 640),
            &t,
        );
        // Same aspect as the window: photo fills it exactly, then mirrored about the center.
        assert!(approx_pt(plan.photo_affine * Point::ZERO, 780.0, 120.0));
        assert!(approx_pt(
            plan.photo_affine * Point::new(520.0, 640.0),
            260.0,
            760.0
        ));
    }
}
