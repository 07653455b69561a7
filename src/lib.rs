//! distortfx implements image-effect plugins that bend, mirror and tile video frames.
//!
//! Each plugin follows the usual host protocol: a factory describes it, the host creates an
//! instance bound to its clips and parameters, then asks the instance to render windows of the
//! output frame. Pixel work is done by a native engine that follows ImageMagick's distortion
//! semantics (virtual pixels, best-fit arc output, centered extent).
//!
//! # Pipeline overview
//!
//! 1. **Validate**: check the host images (scale, field, depth, components, render window).
//! 2. **Compile**: sample parameters at the frame time and build a [`Plan`] of engine ops.
//! 3. **Execute**: run the plan on a [`PlanBackend`] ([`CpuBackend`] for pixels).
//! 4. **Write back**: composite over opaque black, restore alpha, copy the render window out.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No global state**: engine capabilities are an [`EngineFeatures`] value detected once and
//!   passed to every instance; thread limits are per call.
//! - **Host agnostic**: hosts are traits ([`EffectHost`], [`SourceClip`], [`ParamSet`], ...);
//!   [`MemoryHost`] is an in-process implementation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod foundation;
mod host;
mod magick;
mod plugin;
mod render;

pub use compile::arc::{
    ANGLE_RANGE, ArcArgs, ArcParams, BOTTOM_RADIUS_RANGE, ROTATE_RANGE, TOP_RADIUS_RANGE,
    arc_args, compile_arc,
};
pub use compile::mirror::{MIRROR_MODES, MirrorMode, MirrorParams, compile_mirror};
pub use compile::plan::{Op, Plan};
pub use compile::tile::{GRID_RANGE, TileParams, compile_tile};
pub use foundation::core::{
    BitDepth, FieldOrder, INFINITE_MAX, INFINITE_MIN, PixelComponents, Point, Rect, RectI,
    RenderScale, Time, infinite_rect, is_infinite,
};
pub use foundation::error::{DistortError, DistortResult, OfxStatus};
pub use host::clip::{HostImage, HostImageMut, ImageProps, OutputClip, SourceClip};
pub use host::memory::{FrameBuffer, MemoryClip, MemoryHost, MemoryParam, MemoryParamSet};
pub use host::params::{BooleanParam, ChoiceParam, DoubleParam, IntParam, ParamSet};
pub use host::{EffectHost, MessageLevel};
pub use magick::composite::{CompositeOp, over};
pub use magick::distort::{ArcCoefficients, Viewport, distort_arc};
pub use magick::features::{EngineFeatures, PARALLEL_FEATURE, ResourceLimits};
pub use magick::image::{MagickImage, OPAQUE_BLACK, Rgba, TRANSPARENT};
pub use magick::resize::Gravity;
pub use magick::virtual_pixel::{VIRTUAL_PIXEL_TABLE, VirtualPixelMethod, virtual_pixel};
pub use plugin::adapter::WRONG_PROPERTIES_MESSAGE;
pub use plugin::arc::{ARC_IDENTIFIER, ArcEffect, ArcFactory};
pub use plugin::descriptor::{
    ClipDescriptor, Context, OUTPUT_CLIP, PageDescriptor, ParamDescriptor, ParamKind,
    PluginDescriptor, RenderThreadSafety, SOURCE_CLIP,
};
pub use plugin::effect::{
    ImageEffect, PluginFactory, RegionOfDefinitionArguments, RenderArguments,
};
pub use plugin::mirror::{MIRROR_IDENTIFIER, MirrorEffect, MirrorFactory};
pub use plugin::tile::{TILE_IDENTIFIER, TileEffect, TileFactory};
pub use plugin::{PluginBundle, plugin_factories};
pub use render::cpu::CpuBackend;
pub use render::passes::{PlanBackend, execute_plan};
