use crate::magick::image::{MagickImage, Rgba};

/// Compositing operators supported by [`MagickImage::composite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeOp {
    /// Replace destination pixels with source pixels.
    Copy,
    /// Porter-Duff source-over.
    Over,
    /// Replace destination alpha with the source alpha (or source intensity when the source has
    /// no active alpha channel). Destination color is kept.
    CopyAlpha,
}

impl MagickImage {
    /// Composite `src` onto `self` with its top-left corner at `(x, y)`.
    ///
    /// Parts of `src` falling outside `self` are ignored.
    pub fn composite(&mut self, src: &MagickImage, x: i64, y: i64, op: CompositeOp) {
        for sy in 0..src.height() {
            let dy = i64::from(sy) + y;
            if !(0..i64::from(self.height())).contains(&dy) {
                continue;
            }
            for sx in 0..src.width() {
                let dx = i64::from(sx) + x;
                if !(0..i64::from(self.width())).contains(&dx) {
                    continue;
                }
                let s = src.pixel(sx, sy);
                let d = self.pixel(dx as u32, dy as u32);
                let out = match op {
                    CompositeOp::Copy => s,
                    CompositeOp::Over => over(d, s),
                    CompositeOp::CopyAlpha => {
                        let a = if src.alpha_enabled() {
                            s[3]
                        } else {
                            intensity(s)
                        };
                        [d[0], d[1], d[2], a]
                    }
                };
                self.set_pixel(dx as u32, dy as u32, out);
            }
        }
        if op == CompositeOp::CopyAlpha {
            self.set_alpha(true);
        }
    }
}

/// Source-over on non-premultiplied colors.
pub fn over(dst: Rgba, src: Rgba) -> Rgba {
    let sa = src[3].clamp(0.0, 1.0);
    let da = dst[3].clamp(0.0, 1.0);
    let ra = sa + da * (1.0 - sa);
    if ra <= 0.0 {
        return [0.0, 0.0, 0.0, 0.0];
    }
    let mut out = [0.0f32; 4];
    for i in 0..3 {
        out[i] = (src[i] * sa + dst[i] * da * (1.0 - sa)) / ra;
    }
    out[3] = ra;
    out
}

fn intensity(p: Rgba) -> f32 {
    0.212_656 * p[0] + 0.715_158 * p[1] + 0.072_186 * p[2]
}

#[cfg(test)]
#[path = "../../tests/unit/magick/composite.rs"]
mod tests;
