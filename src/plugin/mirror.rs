use std::sync::Arc;

use crate::{
    compile::mirror::{MIRROR_MODES, MirrorMode, MirrorParams, compile_mirror},
    foundation::core::{Rect, Time},
    foundation::error::DistortResult,
    host::{
        EffectHost,
        params::{BooleanParam, ChoiceParam, require_boolean, require_choice},
    },
    magick::features::EngineFeatures,
    plugin::{
        adapter::{passthrough_region_of_definition, render_with_plan},
        descriptor::{ParamDescriptor, PluginDescriptor, powered_by},
        effect::{ImageEffect, PluginFactory, RegionOfDefinitionArguments, RenderArguments},
        require_rgba_clips,
    },
};

/// Mirror plugin identifier.
pub const MIRROR_IDENTIFIER: &str = "net.fxarena.openfx.MagickMirror";
const VERSION: (u32, u32) = (1, 0);

/// Reflects one half or quadrant of the source over the rest.
pub struct MirrorEffect {
    host: Arc<dyn EffectHost>,
    mode: Arc<dyn ChoiceParam>,
    matte: Arc<dyn BooleanParam>,
}

impl MirrorEffect {
    /// Bind to `host`.
    pub fn new(host: Arc<dyn EffectHost>) -> DistortResult<Self> {
        require_rgba_clips(host.as_ref())?;
        let params = host.params();
        Ok(Self {
            mode: require_choice(params, "mirror")?,
            matte: require_boolean(params, "matte")?,
            host,
        })
    }

    /// Parameter values at `time`.
    pub fn params_at(&self, time: Time) -> MirrorParams {
        MirrorParams {
            mirror: MirrorMode::from_index(self.mode.value_at_time(time)).unwrap_or_default(),
            matte: self.matte.value_at_time(time),
        }
    }
}

impl ImageEffect for MirrorEffect {
    #[tracing::instrument(skip(self), fields(effect = "mirror"))]
    fn render(&self, args: &RenderArguments) -> DistortResult<()> {
        render_with_plan(self.host.as_ref(), args, true, |width, height| {
            Ok(compile_mirror(&self.params_at(args.time), width, height))
        })
    }

    fn region_of_definition(&self, args: &RegionOfDefinitionArguments) -> DistortResult<Rect> {
        passthrough_region_of_definition(self.host.as_ref(), args, true)
    }
}

/// Factory for [`MirrorEffect`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MirrorFactory;

impl PluginFactory for MirrorFactory {
    fn identifier(&self) -> &'static str {
        MIRROR_IDENTIFIER
    }

    fn version(&self) -> (u32, u32) {
        VERSION
    }

    fn describe(&self, features: &EngineFeatures) -> PluginDescriptor {
        let options: Vec<&str> = MIRROR_MODES.iter().map(|m| m.label()).collect();
        PluginDescriptor::filter(
            MIRROR_IDENTIFIER,
            VERSION,
            "MirrorOFX",
            "Extra/Distort",
            powered_by("Mirror transform node.", &features.version),
        )
        .with_page(vec![
            ParamDescriptor::choice(
                "mirror",
                "Region",
                "Region of the image to keep and mirror",
                &options,
                MirrorMode::default().index(),
            ),
            ParamDescriptor::boolean("matte", "Matte", "Merge Alpha before applying effect", false),
        ])
    }

    fn create_instance(
        &self,
        host: Arc<dyn EffectHost>,
        _features: EngineFeatures,
    ) -> DistortResult<Box<dyn ImageEffect>> {
        Ok(Box::new(MirrorEffect::new(host)?))
    }
}
