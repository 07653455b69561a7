use crate::{
    compile::plan::{Op, Plan},
    magick::features::ResourceLimits,
};

/// Which part of the image is kept and reflected over the rest.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum MirrorMode {
    /// Leave the image unchanged.
    Undefined,
    /// Top half reflected onto the bottom half.
    #[default]
    North,
    /// Bottom half reflected onto the top half.
    South,
    /// Right half reflected onto the left half.
    East,
    /// Left half reflected onto the right half.
    West,
    /// Top-left quadrant reflected into the other three.
    NorthWest,
    /// Top-right quadrant reflected into the other three.
    NorthEast,
    /// Bottom-left quadrant reflected into the other three.
    SouthWest,
    /// Bottom-right quadrant reflected into the other three.
    SouthEast,
}

/// Choice-parameter order of the mirror modes.
pub const MIRROR_MODES: [MirrorMode; 9] = [
    MirrorMode::Undefined,
    MirrorMode::North,
    MirrorMode::South,
    MirrorMode::East,
    MirrorMode::West,
    MirrorMode::NorthWest,
    MirrorMode::NorthEast,
    MirrorMode::SouthWest,
    MirrorMode::SouthEast,
];

impl MirrorMode {
    /// Mode at a choice index.
    pub fn from_index(index: usize) -> Option<Self> {
        MIRROR_MODES.get(index).copied()
    }

    /// Choice index.
    pub fn index(self) -> usize {
        MIRROR_MODES.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// Host-facing label.
    pub fn label(self) -> &'static str {
        match self {
            MirrorMode::Undefined => "Undefined",
            MirrorMode::North => "North",
            MirrorMode::South => "South",
            MirrorMode::East => "East",
            MirrorMode::West => "West",
            MirrorMode::NorthWest => "NorthWest",
            MirrorMode::NorthEast => "NorthEast",
            MirrorMode::SouthWest => "SouthWest",
            MirrorMode::SouthEast => "SouthEast",
        }
    }

    /// Whether the top rows are the kept ones (`None` when rows are not mirrored).
    pub fn keeps_top(self) -> Option<bool> {
        match self {
            MirrorMode::North | MirrorMode::NorthWest | MirrorMode::NorthEast => Some(true),
            MirrorMode::South | MirrorMode::SouthWest | MirrorMode::SouthEast => Some(false),
            _ => None,
        }
    }

    /// Whether the left columns are the kept ones (`None` when columns are not mirrored).
    pub fn keeps_left(self) -> Option<bool> {
        match self {
            MirrorMode::West | MirrorMode::NorthWest | MirrorMode::SouthWest => Some(true),
            MirrorMode::East | MirrorMode::NorthEast | MirrorMode::SouthEast => Some(false),
            _ => None,
        }
    }
}

/// Mirror parameters sampled at one time.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MirrorParams {
    /// Kept region.
    pub mirror: MirrorMode,
    /// Discard the source alpha first.
    pub matte: bool,
}

/// Compile the mirror pipeline for a `width x height` working image.
pub fn compile_mirror(params: &MirrorParams, width: u32, height: u32) -> Plan {
    let mut plan = Plan::new(width, height, ResourceLimits::single_threaded());
    plan.push(Op::Flip)
        .push_if(params.matte, Op::ResetAlpha)
        .push_if(params.mirror != MirrorMode::Undefined, Op::Mirror(params.mirror))
        .push(Op::Flip);
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/compile/mirror.rs"]
mod tests;
