use crate::{
    compile::plan::{Op, Plan},
    foundation::error::{DistortError, DistortResult},
    magick::{features::ResourceLimits, image::TRANSPARENT},
};

/// Range shared by the `rows` and `cols` parameters.
pub const GRID_RANGE: (i32, i32) = (1, 100);

/// Tile parameters sampled at one time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileParams {
    /// Tile rows.
    pub rows: u32,
    /// Tile columns.
    pub cols: u32,
    /// Discard the source alpha first.
    pub matte: bool,
}

impl Default for TileParams {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            matte: false,
        }
    }
}

impl TileParams {
    /// Build from raw host integers, clamped to the parameter range.
    pub fn from_host(rows: i32, cols: i32, matte: bool) -> Self {
        let clamp = |v: i32| v.clamp(GRID_RANGE.0, GRID_RANGE.1) as u32;
        Self {
            rows: clamp(rows),
            cols: clamp(cols),
            matte,
        }
    }
}

/// Compile the tile pipeline for a `width x height` working image.
pub fn compile_tile(params: &TileParams, width: u32, height: u32) -> DistortResult<Plan> {
    if params.rows == 0 || params.cols == 0 {
        return Err(DistortError::validation(format!(
            "tile grid must be at least 1x1, got {}x{}",
            params.cols, params.rows
        )));
    }
    let mut plan = Plan::new(width, height, ResourceLimits::single_threaded());
    plan.push(Op::Flip)
        .push(Op::SetBackground(TRANSPARENT))
        .push_if(params.matte, Op::ResetAlpha)
        .push(Op::Tile {
            rows: params.rows,
            cols: params.cols,
        })
        .push(Op::Flip);
    Ok(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/tile.rs"]
mod tests;
