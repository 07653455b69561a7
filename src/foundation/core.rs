pub use kurbo::{Point, Rect};

/// Host time in frames.
pub type Time = f64;

/// Sentinel used by hosts for the lower edge of an unbounded region.
pub const INFINITE_MIN: f64 = i32::MIN as f64;
/// Sentinel used by hosts for the upper edge of an unbounded region.
pub const INFINITE_MAX: f64 = i32::MAX as f64;

/// Region covering the whole plane, in host sentinel form.
pub fn infinite_rect() -> Rect {
    Rect::new(INFINITE_MIN, INFINITE_MIN, INFINITE_MAX, INFINITE_MAX)
}

/// Return `true` if any edge of `r` sits on a host infinity sentinel.
pub fn is_infinite(r: &Rect) -> bool {
    r.x0 <= INFINITE_MIN || r.y0 <= INFINITE_MIN || r.x1 >= INFINITE_MAX || r.y1 >= INFINITE_MAX
}

/// Integer pixel rectangle, half-open: `[x1, x2) x [y1, y2)`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RectI {
    /// Left edge (inclusive).
    pub x1: i32,
    /// Bottom edge (inclusive).
    pub y1: i32,
    /// Right edge (exclusive).
    pub x2: i32,
    /// Top edge (exclusive).
    pub y2: i32,
}

impl RectI {
    /// Build a rectangle from its edges.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels; zero for inverted rectangles.
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1).max(0) as u32
    }

    /// Height in pixels; zero for inverted rectangles.
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1).max(0) as u32
    }

    /// Return `true` when the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Return `true` when `(x, y)` is inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x1 <= x && x < self.x2 && self.y1 <= y && y < self.y2
    }

    /// Return `true` when `self` is a non-degenerate sub-rectangle of `bounds`.
    pub fn is_window_of(&self, bounds: &RectI) -> bool {
        !self.is_empty()
            && self.x1 >= bounds.x1
            && self.x1 < bounds.x2
            && self.y1 >= bounds.y1
            && self.y1 < bounds.y2
            && self.x2 > bounds.x1
            && self.x2 <= bounds.x2
            && self.y2 > bounds.y1
            && self.y2 <= bounds.y2
    }

    /// Overlap of two rectangles, `None` when they are disjoint.
    pub fn intersect(&self, other: &RectI) -> Option<RectI> {
        let r = RectI::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        if r.is_empty() { None } else { Some(r) }
    }

    /// Convert to a double rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x1),
            f64::from(self.y1),
            f64::from(self.x2),
            f64::from(self.y2),
        )
    }
}

/// Host render scale (proxy/draft factor) along each axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderScale {
    /// Horizontal scale.
    pub x: f64,
    /// Vertical scale.
    pub y: f64,
}

impl RenderScale {
    /// Full-resolution rendering.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Build a render scale.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return `true` when both axes are exactly 1.
    pub fn is_identity(&self) -> bool {
        self.x == 1.0 && self.y == 1.0
    }
}

impl Default for RenderScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Field a host asks to render (interlaced material).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FieldOrder {
    /// Progressive frame.
    #[default]
    None,
    /// Both fields interleaved.
    Both,
    /// Lower field only.
    Lower,
    /// Upper field only.
    Upper,
}

/// Per-channel storage depth of a host image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BitDepth {
    /// No image / unknown.
    None,
    /// 8-bit unsigned.
    UByte,
    /// 16-bit unsigned.
    UShort,
    /// 16-bit float.
    Half,
    /// 32-bit float.
    Float,
}

/// Channel layout of a host image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelComponents {
    /// No image / unknown.
    None,
    /// Red, green, blue, alpha.
    Rgba,
    /// Red, green, blue.
    Rgb,
    /// Alpha only.
    Alpha,
}

impl PixelComponents {
    /// Number of interleaved channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::None => 0,
            Self::Rgba => 4,
            Self::Rgb => 3,
            Self::Alpha => 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
