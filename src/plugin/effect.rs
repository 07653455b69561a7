use std::sync::Arc;

use crate::{
    foundation::core::{FieldOrder, Rect, RectI, RenderScale, Time},
    foundation::error::DistortResult,
    host::EffectHost,
    magick::features::EngineFeatures,
    plugin::descriptor::PluginDescriptor,
};

/// One render request.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderArguments {
    /// Frame time.
    pub time: Time,
    /// Proxy scale the host renders at.
    pub render_scale: RenderScale,
    /// Sub-rectangle of the output this call must produce, in canvas pixels.
    pub render_window: RectI,
    /// Field to render.
    pub field: FieldOrder,
}

impl RenderArguments {
    /// Full-resolution, progressive request for `window` at `time`.
    pub fn new(time: Time, render_window: RectI) -> Self {
        Self {
            time,
            render_scale: RenderScale::IDENTITY,
            render_window,
            field: FieldOrder::None,
        }
    }
}

/// A region-of-definition request.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionOfDefinitionArguments {
    /// Frame time.
    pub time: Time,
    /// Proxy scale.
    pub render_scale: RenderScale,
}

/// A live effect instance.
///
/// `render` takes `&self` and may be called from several host threads at once.
pub trait ImageEffect: Send + Sync {
    /// Produce the render window into the host output image.
    fn render(&self, args: &RenderArguments) -> DistortResult<()>;

    /// Region over which the output is defined.
    fn region_of_definition(&self, args: &RegionOfDefinitionArguments) -> DistortResult<Rect>;
}

/// Describes and instantiates one effect.
pub trait PluginFactory: Send + Sync {
    /// Reverse-DNS identifier.
    fn identifier(&self) -> &'static str;

    /// `(major, minor)` version.
    fn version(&self) -> (u32, u32);

    /// Full description, given the engine build.
    fn describe(&self, features: &EngineFeatures) -> PluginDescriptor;

    /// Create an instance bound to `host`.
    fn create_instance(
        &self,
        host: Arc<dyn EffectHost>,
        features: EngineFeatures,
    ) -> DistortResult<Box<dyn ImageEffect>>;
}
