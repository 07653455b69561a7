use crate::{
    compile::{arc::ArcArgs, mirror::MirrorMode},
    magick::{
        features::ResourceLimits, image::Rgba, resize::Gravity, virtual_pixel::VirtualPixelMethod,
    },
};

/// Engine work for one frame.
///
/// `width`/`height` describe the working image the plan starts from and must end at; every
/// effect restores the original geometry before the output stage.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    /// Working image width.
    pub width: u32,
    /// Working image height.
    pub height: u32,
    /// Thread limit for engine calls made while executing the plan.
    pub limits: ResourceLimits,
    /// Operations, in execution order.
    pub ops: Vec<Op>,
}

/// A single engine operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// Reverse row order.
    Flip,
    /// Choose how out-of-image samples are resolved.
    SetVirtualPixel(VirtualPixelMethod),
    /// Set the color used for padding and background virtual pixels.
    SetBackground(Rgba),
    /// Drop the alpha channel and re-enable it fully opaque.
    ResetAlpha,
    /// Best-fit arc distortion.
    ArcDistort(ArcArgs),
    /// Shrink to fit `width`, then `height`, keeping the aspect ratio.
    #[allow(missing_docs)]
    FitWithin { width: u32, height: u32 },
    /// Pad or crop to the given size.
    #[allow(missing_docs)]
    Extent {
        width: u32,
        height: u32,
        gravity: Gravity,
    },
    /// Mirror one half or quadrant over the rest of the image.
    Mirror(MirrorMode),
    /// Shrink and repeat the image on a `rows x cols` grid.
    #[allow(missing_docs)]
    Tile { rows: u32, cols: u32 },
}

impl Plan {
    pub(crate) fn new(width: u32, height: u32, limits: ResourceLimits) -> Self {
        Self {
            width,
            height,
            limits,
            ops: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, op: Op) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub(crate) fn push_if(&mut self, cond: bool, op: Op) -> &mut Self {
        if cond {
            self.ops.push(op);
        }
        self
    }

    /// Number of [`Op::Flip`] operations in the plan.
    pub fn flip_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Flip)).count()
    }
}
