//! Native image engine.
//!
//! Implements the ImageMagick operations the effects rely on (virtual-pixel sampling, arc
//! distortion, box scaling, extent, compositing) over non-premultiplied RGBA `f32` rasters.

pub mod composite;
pub mod distort;
pub mod features;
pub mod image;
pub mod resize;
pub mod virtual_pixel;
