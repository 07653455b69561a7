use crate::{
    compile::plan::{Op, Plan},
    foundation::core::RenderScale,
    foundation::error::{DistortError, DistortResult},
    foundation::math::round_half_up,
    magick::{
        features::ResourceLimits, image::TRANSPARENT, resize::Gravity,
        virtual_pixel::VirtualPixelMethod,
    },
};

/// Range of the `angle` parameter, in degrees.
pub const ANGLE_RANGE: (f64, f64) = (1.0, 360.0);
/// Range of the `rotate` parameter, in degrees.
pub const ROTATE_RANGE: (f64, f64) = (0.0, 360.0);
/// Range of the `top` radius parameter, in pixels.
pub const TOP_RADIUS_RANGE: (f64, f64) = (0.0, 700.0);
/// Range of the `bottom` radius parameter, in pixels.
pub const BOTTOM_RADIUS_RANGE: (f64, f64) = (0.0, 350.0);

/// Arc parameters sampled at one time.
///
/// Field names in JSON follow the host parameter names (`top`, `bottom`, `pixel`, `openmp`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArcParams {
    /// Arc span in degrees.
    pub angle: f64,
    /// Rotation of the arc in degrees.
    pub rotate: f64,
    /// Outer radius in full-resolution pixels; 0 lets the engine pick one.
    #[serde(rename = "top")]
    pub top_radius: f64,
    /// Inner radius in full-resolution pixels; 0 lets the engine pick one.
    #[serde(rename = "bottom")]
    pub bottom_radius: f64,
    /// Flip the image around the distortion.
    pub flip: bool,
    /// Discard the source alpha before distorting.
    pub matte: bool,
    /// Out-of-image sampling policy.
    #[serde(rename = "pixel")]
    pub virtual_pixel: VirtualPixelMethod,
    /// Allow the engine to use every host CPU.
    #[serde(rename = "openmp")]
    pub parallel: bool,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            angle: 60.0,
            rotate: 0.0,
            top_radius: 0.0,
            bottom_radius: 0.0,
            flip: false,
            matte: false,
            virtual_pixel: VirtualPixelMethod::Transparent,
            parallel: false,
        }
    }
}

impl ArcParams {
    /// Parse a JSON preset; missing fields take their defaults.
    pub fn from_json(json: &str) -> DistortResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| DistortError::validation(format!("invalid arc preset: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Check every numeric field against its parameter range.
    pub fn validate(&self) -> DistortResult<()> {
        check_range("angle", self.angle, ANGLE_RANGE)?;
        check_range("rotate", self.rotate, ROTATE_RANGE)?;
        check_range("top", self.top_radius, TOP_RADIUS_RANGE)?;
        check_range("bottom", self.bottom_radius, BOTTOM_RADIUS_RANGE)
    }
}

fn check_range(name: &str, v: f64, (min, max): (f64, f64)) -> DistortResult<()> {
    if !v.is_finite() || v < min || v > max {
        return Err(DistortError::validation(format!(
            "{name} must be within [{min}, {max}], got {v}"
        )));
    }
    Ok(())
}

/// Arguments of the engine arc call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArcArgs {
    /// `angle, rotate`: the engine derives both radii from the image size.
    Two([f64; 2]),
    /// `angle, rotate, top, bottom` with radii already scaled to the render.
    Four([f64; 4]),
}

impl ArcArgs {
    /// Arguments as a slice, in engine order.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            ArcArgs::Two(a) => a,
            ArcArgs::Four(a) => a,
        }
    }

    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.as_slice().len()
    }
}

/// Arc arguments for a render at `scale`.
///
/// If either unscaled radius is zero only angle and rotation are passed. Otherwise both radii
/// are scaled by `scale.x` and rounded to whole pixels.
pub fn arc_args(params: &ArcParams, scale: RenderScale) -> ArcArgs {
    if params.top_radius == 0.0 || params.bottom_radius == 0.0 {
        return ArcArgs::Two([params.angle, params.rotate]);
    }
    ArcArgs::Four([
        params.angle,
        params.rotate,
        round_half_up(params.top_radius * scale.x),
        round_half_up(params.bottom_radius * scale.x),
    ])
}

/// Compile the arc pipeline for a `width x height` working image.
///
/// The working image arrives bottom-up and leaves bottom-up; in between it is handled top-down
/// as the engine expects.
pub fn compile_arc(
    params: &ArcParams,
    width: u32,
    height: u32,
    scale: RenderScale,
    limits: ResourceLimits,
) -> Plan {
    let args = arc_args(params, scale);
    tracing::debug!(
        arity = args.arity(),
        threads = limits.threads(),
        "compiled arc plan"
    );

    let mut plan = Plan::new(width, height, limits);
    plan.push(Op::Flip)
        .push(Op::SetVirtualPixel(params.virtual_pixel))
        .push(Op::SetBackground(TRANSPARENT))
        .push_if(params.matte, Op::ResetAlpha)
        .push_if(params.flip, Op::Flip)
        .push(Op::ArcDistort(args))
        .push_if(params.flip, Op::Flip)
        .push(Op::FitWithin { width, height })
        .push(Op::Extent {
            width,
            height,
            gravity: Gravity::Center,
        })
        .push(Op::Flip);
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/compile/arc.rs"]
mod tests;
