use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::PreparedImage,
    foundation::{
        core::{Affine, Rect},
        error::{FramerError, FramerResult},
    },
    render::{FrameRGBA, RenderBackend, RenderSettings, plan::CompositionPlan},
};

// Tolerance used when flattening the clip rectangle into a path.
const CLIP_TOLERANCE: f64 = 0.1;

pub struct CpuBackend {
    settings: RenderSettings,
    photo_paint: Option<CachedPaint>,
    frame_paint: Option<CachedPaint>,
}

/// Image paint keyed by the pixel buffer it was built from.
///
/// Holding the `Arc` keeps the buffer alive, so pointer equality cannot alias a newer load.
struct CachedPaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            photo_paint: None,
            frame_paint: None,
        }
    }
}

impl RenderBackend for CpuBackend {
    fn render(
        &mut self,
        plan: &CompositionPlan,
        photo: &PreparedImage,
        frame: &PreparedImage,
    ) -> FramerResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| FramerError::render("surface width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| FramerError::render("surface height exceeds u16"))?;

        let photo_paint = paint_for(&mut self.photo_paint, photo)?;
        let frame_paint = paint_for(&mut self.frame_paint, frame)?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        // Clip is specified in canvas space.
        let clip = rect_to_cpu(plan.window).to_path(CLIP_TOLERANCE);
        ctx.push_clip_layer(&clip);

        ctx.set_transform(affine_to_cpu(plan.photo_affine));
        ctx.set_paint(photo_paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(photo.width),
            f64::from(photo.height),
        ));
        ctx.pop_layer();

        // Frame artwork is stretched over the whole surface.
        let frame_fit = Affine::scale_non_uniform(
            f64::from(plan.canvas.width) / f64::from(frame.width),
            f64::from(plan.canvas.height) / f64::from(frame.height),
        );
        ctx.set_transform(affine_to_cpu(frame_fit));
        ctx.set_paint(frame_paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(frame.width),
            f64::from(frame.height),
        ));

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn paint_for(
    slot: &mut Option<CachedPaint>,
    img: &PreparedImage,
) -> FramerResult<vello_cpu::Image> {
    if let Some(cached) = slot
        && Arc::ptr_eq(&cached.source, &img.rgba8_premul)
    {
        return Ok(cached.paint.clone());
    }

    let pixmap = image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    *slot = Some(CachedPaint {
        source: img.rgba8_premul.clone(),
        paint: paint.clone(),
    });
    Ok(paint)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FramerResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FramerError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FramerError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FramerError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
