//! Arc distortion.
//!
//! Bends the image around a circular arc. Arguments follow the engine convention
//! `arc_angle [rotate [top_radius [bottom_radius]]]`, angles in degrees. The output is always
//! auto-sized to the bounding box of the arc.

use std::f64::consts::{FRAC_PI_2, TAU};

use rayon::prelude::*;

use crate::{
    foundation::core::{Point, Rect},
    foundation::error::{DistortError, DistortResult},
    foundation::math::{lerp4, round_half_up, wrap_angle},
    magick::features::ResourceLimits,
    magick::image::{MagickImage, Rgba},
    magick::virtual_pixel::virtual_pixel,
};

const EPSILON: f64 = 1.0e-12;
const MAX_OUTPUT_DIM: f64 = 262_144.0;
const SAMPLE_LIMIT: f64 = 1.0e12;

/// Precomputed coefficients of an arc distortion over a given source size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcCoefficients {
    /// Angle of the arc center, radians, in `[-PI, PI)`.
    pub center_angle: f64,
    /// Angular span, radians.
    pub span: f64,
    /// Outer (top) radius.
    pub outer_radius: f64,
    /// Radial thickness between top and bottom edge.
    pub thickness: f64,
    /// Horizontal center of the source, in pixel-center coordinates.
    pub center_x: f64,
}

impl ArcCoefficients {
    /// Derive coefficients for a `columns x rows` source from 1 to 4 arguments.
    pub fn new(args: &[f64], columns: u32, rows: u32) -> DistortResult<Self> {
        if args.is_empty() || args.len() > 4 {
            return Err(DistortError::engine(format!(
                "arc distortion takes 1 to 4 arguments, got {}",
                args.len()
            )));
        }
        if args.iter().any(|a| !a.is_finite()) {
            return Err(DistortError::engine("arc arguments must be finite"));
        }
        if args[0] < EPSILON {
            return Err(DistortError::engine("arc angle too small"));
        }
        if args.len() >= 3 && args[2] < EPSILON {
            return Err(DistortError::engine("arc outer radius too small"));
        }

        let columns = f64::from(columns);
        let rows = f64::from(rows);

        let span = args[0].to_radians();
        let mut center_angle = -FRAC_PI_2;
        if let Some(rotate) = args.get(1) {
            center_angle += rotate.to_radians();
        }
        let center_angle = wrap_angle(center_angle);

        let mut thickness = rows - 1.0;
        let mut outer_radius = columns / span + thickness / 2.0;
        if let Some(&top) = args.get(2) {
            match args.get(3) {
                Some(&bottom) => thickness = top - bottom,
                None => thickness *= top / outer_radius,
            }
            outer_radius = top;
        }
        if thickness.abs() < EPSILON {
            thickness = EPSILON;
        }

        Ok(Self {
            center_angle,
            span,
            outer_radius,
            thickness,
            center_x: (columns - 1.0) / 2.0,
        })
    }

    /// Bounding box of the distorted image in output space.
    pub fn bounds(&self) -> Rect {
        let start = self.center_angle - self.span / 2.0;
        let end = self.center_angle + self.span / 2.0;
        let inner = self.outer_radius - self.thickness;

        let polar = |r: f64, a: f64| Point::new(r * a.cos(), r * a.sin());
        let mut bounds = Rect::from_points(polar(self.outer_radius, start), polar(inner, start));
        for p in [polar(self.outer_radius, end), polar(inner, end)] {
            bounds = bounds.union_pt(p);
        }

        let mut a = (start / FRAC_PI_2).ceil() * FRAC_PI_2;
        while a < end {
            bounds = bounds.union_pt(polar(self.outer_radius, a));
            a += FRAC_PI_2;
        }
        bounds
    }
}

/// Integer output viewport chosen for a best-fit distortion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge in output space.
    pub x: i64,
    /// Top edge in output space.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Snap a floating-point bounding box to whole pixels.
    pub fn from_bounds(bounds: &Rect) -> DistortResult<Self> {
        let x = (bounds.x0 - 0.5).ceil();
        let y = (bounds.y0 - 0.5).ceil();
        let width = (bounds.x1 - x + 0.5).floor().max(1.0);
        let height = (bounds.y1 - y + 0.5).floor().max(1.0);
        if !(width <= MAX_OUTPUT_DIM && height <= MAX_OUTPUT_DIM) {
            return Err(DistortError::engine(format!(
                "arc output size {width}x{height} is out of range"
            )));
        }
        Ok(Self {
            x: x as i64,
            y: y as i64,
            width: width as u32,
            height: height as u32,
        })
    }
}

/// Arc-distort `src`, returning a new best-fit image.
///
/// Rows are mapped in parallel when `limits` allow more than one thread.
pub fn distort_arc(
    src: &MagickImage,
    args: &[f64],
    limits: &ResourceLimits,
) -> DistortResult<MagickImage> {
    let coeffs = ArcCoefficients::new(args, src.width(), src.height())?;
    let view = Viewport::from_bounds(&coeffs.bounds())?;

    let angle_scale = TAU * f64::from(src.width()) / coeffs.span;
    let radius_scale = f64::from(src.height()) / coeffs.thickness;

    let mut out = src.with_same_state(view.width, view.height, src.background())?;
    out.set_alpha(true);

    let width = view.width as usize;
    let map_row = |(j, row): (usize, &mut [Rgba])| {
        let dy = view.y as f64 + j as f64 + 0.5;
        for (i, px) in row.iter_mut().enumerate() {
            let dx = view.x as f64 + i as f64 + 0.5;
            let mut turn = (dy.atan2(dx) - coeffs.center_angle) / TAU;
            turn -= round_half_up(turn);
            let radius = dx.hypot(dy);

            let sx = turn * angle_scale + coeffs.center_x + 0.5;
            let sy = (coeffs.outer_radius - radius) * radius_scale;
            *px = bilinear(src, sx - 0.5, sy - 0.5);
        }
    };

    let threads = limits.threads();
    if threads > 1 {
        let pool = limits.build_pool()?;
        pool.install(|| {
            out.pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(map_row)
        });
    } else {
        out.pixels_mut()
            .chunks_mut(width)
            .enumerate()
            .for_each(map_row);
    }

    tracing::debug!(
        width = view.width,
        height = view.height,
        threads,
        "arc distortion"
    );
    Ok(out)
}

/// Bilinear sample at continuous coordinates where pixel centers sit on integers.
///
/// Interpolation happens on alpha-weighted color so transparent neighbours do not bleed.
fn bilinear(img: &MagickImage, x: f64, y: f64) -> Rgba {
    let x = x.clamp(-SAMPLE_LIMIT, SAMPLE_LIMIT);
    let y = y.clamp(-SAMPLE_LIMIT, SAMPLE_LIMIT);
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = (x - x0) as f32;
    let ty = (y - y0) as f32;
    let (xi, yi) = (x0 as i64, y0 as i64);

    let premul = |p: Rgba| [p[0] * p[3], p[1] * p[3], p[2] * p[3], p[3]];
    let p00 = premul(virtual_pixel(img, xi, yi));
    let p10 = premul(virtual_pixel(img, xi + 1, yi));
    let p01 = premul(virtual_pixel(img, xi, yi + 1));
    let p11 = premul(virtual_pixel(img, xi + 1, yi + 1));

    let top = lerp4(p00, p10, tx);
    let bottom = lerp4(p01, p11, tx);
    let p = lerp4(top, bottom, ty);

    if p[3] <= f32::EPSILON {
        return [0.0, 0.0, 0.0, 0.0];
    }
    [p[0] / p[3], p[1] / p[3], p[2] / p[3], p[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/magick/distort.rs"]
mod tests;
