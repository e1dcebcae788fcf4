use crate::{
    assets::{FrameAsset, PreparedImage},
    foundation::error::FramerResult,
    transform::PhotoTransform,
};

pub mod cpu;
pub mod plan;

pub use plan::{CompositionPlan, plan_composition};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored (premultiplied when `premultiplied` is set).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub trait RenderBackend {
    fn render(
        &mut self,
        plan: &CompositionPlan,
        photo: &PreparedImage,
        frame: &PreparedImage,
    ) -> FramerResult<FrameRGBA>;
}

#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    #[default]
    Cpu,
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Background painted under everything; `None` leaves uncovered pixels transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> FramerResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(cpu::CpuBackend::new(settings.clone()))),
    }
}

/// Draws the loaded photo into a fixed frame.
pub struct Compositor {
    frame: FrameAsset,
    backend: Box<dyn RenderBackend>,
}

impl Compositor {
    pub fn new(frame: FrameAsset, backend: Box<dyn RenderBackend>) -> Self {
        Self { frame, backend }
    }

    pub fn with_cpu(frame: FrameAsset) -> FramerResult<Self> {
        let backend = create_backend(BackendKind::Cpu, &RenderSettings::default())?;
        Ok(Self::new(frame, backend))
    }

    pub fn frame(&self) -> &FrameAsset {
        &self.frame
    }

    /// Composes the photo into the frame. Returns `Ok(None)` when no photo is loaded.
    #[tracing::instrument(skip_all, fields(frame_w = self.frame.canvas().width, frame_h = self.frame.canvas().height))]
    pub fn compose(
        &mut self,
        photo: Option<&PreparedImage>,
        transform: &PhotoTransform,
    ) -> FramerResult<Option<FrameRGBA>> {
        let Some(photo) = photo else {
            tracing::debug!("no photo loaded, skipping composition");
            return Ok(None);
        };

        let plan = plan_composition(
            self.frame.canvas(),
            self.frame.window_fractions(),
            photo.canvas(),
            transform,
        );
        let out = self.backend.render(&plan, photo, self.frame.image())?;
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_lookup_bounds() {
        let f = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![1, 2, 3, 4, 5, 6, 7, 8],
            premultiplied: true,
        };
        assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(f.pixel(2, 0), None);
        assert_eq!(f.pixel(0, 1), None);
    }

    #[test]
    fn compose_without_photo_is_noop() {
        let frame_img = PreparedImage::from_premul(4, 4, vec![0u8; 64]).unwrap();
        let frame = FrameAsset::new(frame_img, crate::layout::WindowFractions::HACKSTORM);
        let mut c = Compositor::with_cpu(frame).unwrap();
        assert!(c.compose(None, &PhotoTransform::IDENTITY).unwrap().is_none());
    }
}
