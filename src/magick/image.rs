use crate::{
    foundation::error::{DistortError, DistortResult},
    magick::virtual_pixel::VirtualPixelMethod,
};

/// Non-premultiplied RGBA sample.
pub type Rgba = [f32; 4];

/// `rgba(0,0,0,0)`.
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];
/// `rgba(0,0,0,1)`.
pub const OPAQUE_BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// In-memory raster in the engine's conventions.
///
/// Rows are stored top-down, pixels are non-premultiplied RGBA `f32`. Besides pixels the image
/// carries the sampling state distortion operators consult: the virtual-pixel method, the
/// background color and whether the alpha channel is active.
#[derive(Clone, Debug, PartialEq)]
pub struct MagickImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    virtual_pixel: VirtualPixelMethod,
    background: Rgba,
    alpha: bool,
}

impl MagickImage {
    /// Allocate a `width x height` image filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba) -> DistortResult<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; len],
            virtual_pixel: VirtualPixelMethod::Undefined,
            background: TRANSPARENT,
            alpha: true,
        })
    }

    /// Build an image from tightly packed, top-down RGBA `f32` data.
    pub fn from_rgba_f32(width: u32, height: u32, data: &[f32]) -> DistortResult<Self> {
        let len = checked_len(width, height)?;
        if data.len() != len * 4 {
            return Err(DistortError::engine(format!(
                "rgba buffer holds {} floats, expected {}",
                data.len(),
                len * 4
            )));
        }
        let mut img = Self::new(width, height, TRANSPARENT)?;
        for (dst, src) in img.pixels.iter_mut().zip(data.chunks_exact(4)) {
            dst.copy_from_slice(src);
        }
        Ok(img)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel storage, top-down.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel as seen by readers: alpha reads as opaque while the channel is inactive.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let mut p = self.pixels[self.index(x, y)];
        if !self.alpha {
            p[3] = 1.0;
        }
        p
    }

    /// Overwrite one pixel.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: Rgba) {
        let i = self.index(x, y);
        self.pixels[i] = value;
    }

    /// One row of raw pixels.
    pub fn row(&self, y: u32) -> &[Rgba] {
        let start = (y as usize) * (self.width as usize);
        &self.pixels[start..start + self.width as usize]
    }

    /// One mutable row of raw pixels.
    pub fn row_mut(&mut self, y: u32) -> &mut [Rgba] {
        let start = (y as usize) * (self.width as usize);
        let w = self.width as usize;
        &mut self.pixels[start..start + w]
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Current virtual-pixel method.
    pub fn virtual_pixel_method(&self) -> VirtualPixelMethod {
        self.virtual_pixel
    }

    /// Select how out-of-bounds samples are resolved.
    pub fn set_virtual_pixel_method(&mut self, method: VirtualPixelMethod) {
        self.virtual_pixel = method;
    }

    /// Current background color.
    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Set the color used for padding and for background-based virtual pixels.
    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    /// Whether the alpha channel is active.
    pub fn alpha_enabled(&self) -> bool {
        self.alpha
    }

    /// Deactivate or activate the alpha channel.
    ///
    /// Re-activating a deactivated channel resets every pixel to fully opaque, which is how a
    /// matte is discarded and regenerated.
    pub fn set_alpha(&mut self, on: bool) {
        if on && !self.alpha {
            for p in &mut self.pixels {
                p[3] = 1.0;
            }
        }
        self.alpha = on;
    }

    /// Mirror top to bottom.
    pub fn flip(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        for y in 0..h / 2 {
            let (top, bottom) = self.pixels.split_at_mut((h - 1 - y) * w);
            top[y * w..(y + 1) * w].swap_with_slice(&mut bottom[..w]);
        }
    }

    /// Mirror left to right.
    pub fn flop(&mut self) {
        let w = self.width as usize;
        for row in self.pixels.chunks_exact_mut(w.max(1)) {
            row.reverse();
        }
    }

    /// Copy out the `w x h` region at `(x, y)`.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> DistortResult<Self> {
        if x.saturating_add(w) > self.width || y.saturating_add(h) > self.height {
            return Err(DistortError::engine(format!(
                "crop {w}x{h}+{x}+{y} exceeds image {}x{}",
                self.width, self.height
            )));
        }
        let mut out = self.with_same_state(w, h, TRANSPARENT)?;
        for row in 0..h {
            let src = &self.row(y + row)[x as usize..(x + w) as usize];
            out.row_mut(row).copy_from_slice(src);
        }
        Ok(out)
    }

    /// Allocate a new image that shares this image's sampling state.
    pub(crate) fn with_same_state(&self, width: u32, height: u32, fill: Rgba) -> DistortResult<Self> {
        let mut out = Self::new(width, height, fill)?;
        out.virtual_pixel = self.virtual_pixel;
        out.background = self.background;
        out.alpha = self.alpha;
        Ok(out)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

fn checked_len(width: u32, height: u32) -> DistortResult<usize> {
    if width == 0 || height == 0 {
        return Err(DistortError::engine(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| DistortError::engine("image size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/magick/image.rs"]
mod tests;
