use crate::{
    foundation::error::DistortResult,
    foundation::math::round_half_up,
    magick::image::{MagickImage, Rgba, TRANSPARENT},
};

/// Anchor used when padding or cropping to a new size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gravity {
    /// Anchor at the top-left corner.
    NorthWest,
    /// Center the content.
    #[default]
    Center,
}

impl MagickImage {
    /// Box-filter resample to exactly `width x height`.
    pub fn scale(&self, width: u32, height: u32) -> DistortResult<MagickImage> {
        let mut tmp = self.with_same_state(width, self.height(), TRANSPARENT)?;
        for y in 0..self.height() {
            let src: Vec<Rgba> = self.row(y).to_vec();
            let dst = tmp.row_mut(y);
            resample_line(&src, dst, self.alpha_enabled());
        }

        let mut out = self.with_same_state(width, height, TRANSPARENT)?;
        let mut column = vec![TRANSPARENT; self.height() as usize];
        let mut resampled = vec![TRANSPARENT; height as usize];
        for x in 0..width {
            for (y, px) in column.iter_mut().enumerate() {
                *px = tmp.row(y as u32)[x as usize];
            }
            resample_line(&column, &mut resampled, self.alpha_enabled());
            for (y, px) in resampled.iter().enumerate() {
                out.set_pixel(x, y as u32, *px);
            }
        }
        Ok(out)
    }

    /// Scale to `width` columns, keeping the aspect ratio.
    pub fn scale_to_width(&self, width: u32) -> DistortResult<MagickImage> {
        let height = aspect_len(self.height(), width, self.width());
        self.scale(width, height)
    }

    /// Scale to `height` rows, keeping the aspect ratio.
    pub fn scale_to_height(&self, height: u32) -> DistortResult<MagickImage> {
        let width = aspect_len(self.width(), height, self.height());
        self.scale(width, height)
    }

    /// Pad or crop to `width x height`, filling new area with the background color.
    pub fn extent(&self, width: u32, height: u32, gravity: Gravity) -> DistortResult<MagickImage> {
        let mut out = self.with_same_state(width, height, self.background())?;
        let (off_x, off_y) = match gravity {
            Gravity::NorthWest => (0, 0),
            // Each side is halved separately.
            Gravity::Center => (
                i64::from(width / 2) - i64::from(self.width() / 2),
                i64::from(height / 2) - i64::from(self.height() / 2),
            ),
        };
        for y in 0..self.height() {
            let ty = i64::from(y) + off_y;
            if !(0..i64::from(height)).contains(&ty) {
                continue;
            }
            for (x, px) in self.row(y).iter().enumerate() {
                let tx = x as i64 + off_x;
                if (0..i64::from(width)).contains(&tx) {
                    out.set_pixel(tx as u32, ty as u32, *px);
                }
            }
        }
        Ok(out)
    }
}

fn aspect_len(len: u32, target: u32, reference: u32) -> u32 {
    let v = round_half_up(f64::from(len) * f64::from(target) / f64::from(reference));
    (v as u32).max(1)
}

/// Area-weighted 1D resample, alpha-weighted when the alpha channel is active.
fn resample_line(src: &[Rgba], dst: &mut [Rgba], alpha: bool) {
    let ratio = src.len() as f64 / dst.len() as f64;
    for (i, out) in dst.iter_mut().enumerate() {
        let start = i as f64 * ratio;
        let end = start + ratio;
        let mut acc = [0.0f64; 4];
        let mut weight = 0.0f64;

        let mut k = start.floor() as usize;
        while (k as f64) < end && k < src.len() {
            let overlap = (end.min(k as f64 + 1.0) - start.max(k as f64)).max(0.0);
            if overlap > 0.0 {
                let p = src[k];
                let a = if alpha { f64::from(p[3]) } else { 1.0 };
                for c in 0..3 {
                    acc[c] += f64::from(p[c]) * a * overlap;
                }
                acc[3] += a * overlap;
                weight += overlap;
            }
            k += 1;
        }

        if weight <= 0.0 {
            *out = TRANSPARENT;
            continue;
        }
        let a = acc[3] / weight;
        *out = if acc[3] > 0.0 {
            [
                (acc[0] / acc[3]) as f32,
                (acc[1] / acc[3]) as f32,
                (acc[2] / acc[3]) as f32,
                a as f32,
            ]
        } else {
            TRANSPARENT
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/magick/resize.rs"]
mod tests;
