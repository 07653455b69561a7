use crate::{
    compile::{arc::ArcArgs, mirror::MirrorMode},
    foundation::error::DistortResult,
    magick::{
        composite::CompositeOp,
        distort::distort_arc,
        features::ResourceLimits,
        image::{MagickImage, Rgba},
        resize::Gravity,
        virtual_pixel::VirtualPixelMethod,
    },
    render::passes::PlanBackend,
};

/// Native backend: applies plan operations to one engine image.
#[derive(Clone, Debug)]
pub struct CpuBackend {
    image: MagickImage,
}

impl CpuBackend {
    /// Backend working on `image`.
    pub fn new(image: MagickImage) -> Self {
        Self { image }
    }

    /// Current working image.
    pub fn image(&self) -> &MagickImage {
        &self.image
    }

    /// Take the working image out of the backend.
    pub fn into_image(self) -> MagickImage {
        self.image
    }
}

impl PlanBackend for CpuBackend {
    fn flip(&mut self) -> DistortResult<()> {
        self.image.flip();
        Ok(())
    }

    fn set_virtual_pixel(&mut self, method: VirtualPixelMethod) -> DistortResult<()> {
        self.image.set_virtual_pixel_method(method);
        Ok(())
    }

    fn set_background(&mut self, color: Rgba) -> DistortResult<()> {
        self.image.set_background(color);
        Ok(())
    }

    fn reset_alpha(&mut self) -> DistortResult<()> {
        self.image.set_alpha(false);
        self.image.set_alpha(true);
        Ok(())
    }

    fn arc_distort(&mut self, args: &ArcArgs, limits: &ResourceLimits) -> DistortResult<()> {
        self.image = distort_arc(&self.image, args.as_slice(), limits)?;
        Ok(())
    }

    fn fit_within(&mut self, width: u32, height: u32) -> DistortResult<()> {
        if self.image.width() > width {
            self.image = self.image.scale_to_width(width)?;
        }
        if self.image.height() > height {
            self.image = self.image.scale_to_height(height)?;
        }
        Ok(())
    }

    fn extent(&mut self, width: u32, height: u32, gravity: Gravity) -> DistortResult<()> {
        if self.image.width() != width || self.image.height() != height {
            self.image = self.image.extent(width, height, gravity)?;
        }
        Ok(())
    }

    fn mirror(&mut self, mode: MirrorMode) -> DistortResult<()> {
        let w = self.image.width();
        let h = self.image.height();

        if let Some(keep_top) = mode.keeps_top() {
            let half = h - h / 2;
            let (y, at) = if keep_top { (0, h - half) } else { (h / 2, 0) };
            let mut part = self.image.crop(0, y, w, half)?;
            part.flip();
            self.image
                .composite(&part, 0, i64::from(at), CompositeOp::Copy);
        }
        if let Some(keep_left) = mode.keeps_left() {
            let half = w - w / 2;
            let (x, at) = if keep_left { (0, w - half) } else { (w / 2, 0) };
            let mut part = self.image.crop(x, 0, half, h)?;
            part.flop();
            self.image
                .composite(&part, i64::from(at), 0, CompositeOp::Copy);
        }
        Ok(())
    }

    fn tile(&mut self, rows: u32, cols: u32) -> DistortResult<()> {
        let w = self.image.width();
        let h = self.image.height();
        let tile_w = w.div_ceil(cols.max(1));
        let tile_h = h.div_ceil(rows.max(1));
        let tile = self.image.scale(tile_w, tile_h)?;

        let mut out = self.image.with_same_state(w, h, self.image.background())?;
        for r in 0..rows {
            for c in 0..cols {
                out.composite(
                    &tile,
                    i64::from(c) * i64::from(tile_w),
                    i64::from(r) * i64::from(tile_h),
                    CompositeOp::Copy,
                );
            }
        }
        tracing::debug!(rows, cols, tile_w, tile_h, "tiled image");
        self.image = out;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
