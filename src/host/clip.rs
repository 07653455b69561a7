use crate::foundation::core::{
    BitDepth, FieldOrder, PixelComponents, Rect, RectI, RenderScale, Time,
};

/// Properties a host attaches to a fetched image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageProps {
    /// Rectangle covered by the pixel data.
    pub bounds: RectI,
    /// Region over which the image has defined values.
    pub region_of_definition: RectI,
    /// Render scale the image was produced at.
    pub render_scale: RenderScale,
    /// Field the image holds.
    pub field: FieldOrder,
    /// Channel storage depth.
    pub depth: BitDepth,
    /// Channel layout.
    pub components: PixelComponents,
}

impl ImageProps {
    /// Properties of a full-resolution, progressive RGBA float image covering `bounds`.
    pub fn rgba_f32(bounds: RectI) -> Self {
        Self {
            bounds,
            region_of_definition: bounds,
            render_scale: RenderScale::IDENTITY,
            field: FieldOrder::None,
            depth: BitDepth::Float,
            components: PixelComponents::Rgba,
        }
    }

    /// Number of `f32` values a tightly packed buffer over `bounds` holds.
    pub fn float_len(&self) -> usize {
        (self.bounds.width() as usize)
            * (self.bounds.height() as usize)
            * self.components.channels()
    }

    /// Offset of pixel `(x, y)` (canvas coordinates) in a tightly packed buffer, if inside.
    pub fn offset_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let row = (y - self.bounds.y1) as usize;
        let col = (x - self.bounds.x1) as usize;
        Some((row * self.bounds.width() as usize + col) * self.components.channels())
    }
}

/// Read access to a host image.
///
/// Pixel data is interleaved, row-major over `props().bounds`, starting with the bottom row.
pub trait HostImage {
    /// Image properties.
    fn props(&self) -> ImageProps;
    /// Interleaved pixel data.
    fn pixels(&self) -> &[f32];
}

/// Write access to a host image.
pub trait HostImageMut: HostImage {
    /// Interleaved pixel data, writable.
    fn pixels_mut(&mut self) -> &mut [f32];
}

/// An input clip.
pub trait SourceClip: Send + Sync {
    /// Whether anything is plugged into the clip.
    fn is_connected(&self) -> bool;
    /// Components the clip delivers.
    fn pixel_components(&self) -> PixelComponents;
    /// Region of definition at `time`.
    fn region_of_definition(&self, time: Time) -> Rect;
    /// Fetch the image at `time`; `None` when the host cannot provide one.
    fn fetch_image(&self, time: Time) -> Option<Box<dyn HostImage + '_>>;
}

/// The output clip.
pub trait OutputClip: Send + Sync {
    /// Whether the output is consumed.
    fn is_connected(&self) -> bool;
    /// Components the clip accepts.
    fn pixel_components(&self) -> PixelComponents;
    /// Fetch the writable image at `time`; `None` when the host cannot provide one.
    fn fetch_image_mut(&self, time: Time) -> Option<Box<dyn HostImageMut + '_>>;
}
