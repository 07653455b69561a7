use crate::{
    foundation::math::coord_hash,
    magick::image::{MagickImage, Rgba, TRANSPARENT},
};

const RANDOM_SEED: u64 = 0x5EED_0F_A7C;
const DITHER_SEED: u64 = 0xD17E_7;

/// Policy for samples requested outside an image's pixel grid.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum VirtualPixelMethod {
    /// Engine default; behaves like [`VirtualPixelMethod::Edge`].
    Undefined,
    /// The image background color.
    Background,
    /// Opaque black.
    Black,
    /// Tiled copies, with every other tile replaced by the background color.
    CheckerTile,
    /// Nearby edge pixel picked with a pseudo-random offset.
    Dither,
    /// Nearest edge pixel.
    Edge,
    /// Opaque mid gray.
    Gray,
    /// Tiled horizontally, background above and below.
    HorizontalTile,
    /// Tiled horizontally, edge pixels above and below.
    HorizontalTileEdge,
    /// Reflected copies.
    Mirror,
    /// Pseudo-random pixel from anywhere in the image.
    Random,
    /// Repeated copies.
    Tile,
    /// Fully transparent black.
    #[default]
    Transparent,
    /// Tiled vertically, background left and right.
    VerticalTile,
    /// Tiled vertically, edge pixels left and right.
    VerticalTileEdge,
    /// Opaque white.
    White,
}

/// Choice-parameter order of the virtual-pixel methods, with their host-facing labels.
pub const VIRTUAL_PIXEL_TABLE: [(VirtualPixelMethod, &str); 16] = [
    (VirtualPixelMethod::Undefined, "Undefined"),
    (VirtualPixelMethod::Background, "Background"),
    (VirtualPixelMethod::Black, "Black"),
    (VirtualPixelMethod::CheckerTile, "CheckerTile"),
    (VirtualPixelMethod::Dither, "Dither"),
    (VirtualPixelMethod::Edge, "Edge"),
    (VirtualPixelMethod::Gray, "Gray"),
    (VirtualPixelMethod::HorizontalTile, "HorizontalTile"),
    (VirtualPixelMethod::HorizontalTileEdge, "HorizontalTileEdge"),
    (VirtualPixelMethod::Mirror, "Mirror"),
    (VirtualPixelMethod::Random, "Random"),
    (VirtualPixelMethod::Tile, "Tile"),
    (VirtualPixelMethod::Transparent, "Transparent"),
    (VirtualPixelMethod::VerticalTile, "VerticalTile"),
    (VirtualPixelMethod::VerticalTileEdge, "VerticalTileEdge"),
    (VirtualPixelMethod::White, "White"),
];

impl VirtualPixelMethod {
    /// Position in [`VIRTUAL_PIXEL_TABLE`].
    pub fn index(self) -> usize {
        VIRTUAL_PIXEL_TABLE
            .iter()
            .position(|(m, _)| *m == self)
            .unwrap_or(0)
    }

    /// Method at a choice index, `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        VIRTUAL_PIXEL_TABLE.get(index).map(|(m, _)| *m)
    }

    /// Host-facing label.
    pub fn label(self) -> &'static str {
        VIRTUAL_PIXEL_TABLE[self.index()].1
    }

    /// Parse a label, ignoring ASCII case, `-` and `_`.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted: String = label
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        VIRTUAL_PIXEL_TABLE
            .iter()
            .find(|(_, l)| l.to_ascii_lowercase() == wanted)
            .map(|(m, _)| *m)
    }
}

/// Resolve the pixel at integer coordinates `(x, y)`, consulting the image's virtual-pixel
/// method when the coordinates fall outside the grid.
pub fn virtual_pixel(img: &MagickImage, x: i64, y: i64) -> Rgba {
    let w = i64::from(img.width());
    let h = i64::from(img.height());
    let inside_x = (0..w).contains(&x);
    let inside_y = (0..h).contains(&y);
    if inside_x && inside_y {
        return img.pixel(x as u32, y as u32);
    }

    let at = |px: i64, py: i64| img.pixel(px as u32, py as u32);
    match img.virtual_pixel_method() {
        VirtualPixelMethod::Undefined | VirtualPixelMethod::Edge => at(clamp(x, w), clamp(y, h)),
        VirtualPixelMethod::Background => img.background(),
        VirtualPixelMethod::Transparent => TRANSPARENT,
        VirtualPixelMethod::Black => [0.0, 0.0, 0.0, 1.0],
        VirtualPixelMethod::Gray => [0.5, 0.5, 0.5, 1.0],
        VirtualPixelMethod::White => [1.0, 1.0, 1.0, 1.0],
        VirtualPixelMethod::Tile => at(x.rem_euclid(w), y.rem_euclid(h)),
        VirtualPixelMethod::Mirror => at(reflect(x, w), reflect(y, h)),
        VirtualPixelMethod::HorizontalTile => {
            if inside_y {
                at(x.rem_euclid(w), y)
            } else {
                img.background()
            }
        }
        VirtualPixelMethod::HorizontalTileEdge => at(x.rem_euclid(w), clamp(y, h)),
        VirtualPixelMethod::VerticalTile => {
            if inside_x {
                at(x, y.rem_euclid(h))
            } else {
                img.background()
            }
        }
        VirtualPixelMethod::VerticalTileEdge => at(clamp(x, w), y.rem_euclid(h)),
        VirtualPixelMethod::CheckerTile => {
            if (x.div_euclid(w) + y.div_euclid(h)) & 1 != 0 {
                img.background()
            } else {
                at(x.rem_euclid(w), y.rem_euclid(h))
            }
        }
        VirtualPixelMethod::Random => {
            let n = (coord_hash(x, y, RANDOM_SEED) % ((w * h) as u64)) as i64;
            at(n % w, n / w)
        }
        VirtualPixelMethod::Dither => {
            let bits = coord_hash(x, y, DITHER_SEED);
            let dx = (bits & 63) as i64 - 32;
            let dy = ((bits >> 6) & 63) as i64 - 32;
            at(clamp(x + dx, w), clamp(y + dy, h))
        }
    }
}

fn clamp(v: i64, len: i64) -> i64 {
    v.clamp(0, len - 1)
}

fn reflect(v: i64, len: i64) -> i64 {
    let m = v.rem_euclid(2 * len);
    if m >= len { 2 * len - 1 - m } else { m }
}

#[cfg(test)]
#[path = "../../tests/unit/magick/virtual_pixel.rs"]
mod tests;
