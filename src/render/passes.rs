use crate::{
    compile::{
        arc::ArcArgs,
        mirror::MirrorMode,
        plan::{Op, Plan},
    },
    foundation::error::DistortResult,
    magick::{
        features::ResourceLimits, image::Rgba, resize::Gravity, virtual_pixel::VirtualPixelMethod,
    },
};

/// Executes individual plan operations.
pub trait PlanBackend {
    /// Reverse row order.
    fn flip(&mut self) -> DistortResult<()>;

    /// Set the virtual-pixel method.
    fn set_virtual_pixel(&mut self, method: VirtualPixelMethod) -> DistortResult<()>;

    /// Set the background color.
    fn set_background(&mut self, color: Rgba) -> DistortResult<()>;

    /// Deactivate then reactivate alpha.
    fn reset_alpha(&mut self) -> DistortResult<()>;

    /// Best-fit arc distortion.
    fn arc_distort(&mut self, args: &ArcArgs, limits: &ResourceLimits) -> DistortResult<()>;

    /// Shrink to fit within `width x height`.
    fn fit_within(&mut self, width: u32, height: u32) -> DistortResult<()>;

    /// Pad or crop to `width x height`.
    fn extent(&mut self, width: u32, height: u32, gravity: Gravity) -> DistortResult<()>;

    /// Mirror part of the image over the rest.
    fn mirror(&mut self, mode: MirrorMode) -> DistortResult<()>;

    /// Repeat a shrunken copy on a grid.
    fn tile(&mut self, rows: u32, cols: u32) -> DistortResult<()>;
}

/// Run every operation of `plan` on `backend`, stopping at the first error.
pub fn execute_plan<B: PlanBackend + ?Sized>(backend: &mut B, plan: &Plan) -> DistortResult<()> {
    for op in &plan.ops {
        match op {
            Op::Flip => backend.flip()?,
            Op::SetVirtualPixel(m) => backend.set_virtual_pixel(*m)?,
            Op::SetBackground(c) => backend.set_background(*c)?,
            Op::ResetAlpha => backend.reset_alpha()?,
            Op::ArcDistort(args) => backend.arc_distort(args, &plan.limits)?,
            Op::FitWithin { width, height } => backend.fit_within(*width, *height)?,
            Op::Extent {
                width,
                height,
                gravity,
            } => backend.extent(*width, *height, *gravity)?,
            Op::Mirror(mode) => backend.mirror(*mode)?,
            Op::Tile { rows, cols } => backend.tile(*rows, *cols)?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
