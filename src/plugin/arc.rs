use std::sync::Arc;

use crate::{
    compile::arc::{
        ANGLE_RANGE, ArcParams, BOTTOM_RADIUS_RANGE, ROTATE_RANGE, TOP_RADIUS_RANGE, compile_arc,
    },
    foundation::core::{Rect, Time},
    foundation::error::DistortResult,
    host::{
        EffectHost,
        params::{
            BooleanParam, ChoiceParam, DoubleParam, require_boolean, require_choice,
            require_double,
        },
    },
    magick::{
        features::{EngineFeatures, ResourceLimits},
        virtual_pixel::{VIRTUAL_PIXEL_TABLE, VirtualPixelMethod},
    },
    plugin::{
        adapter::{passthrough_region_of_definition, render_with_plan},
        descriptor::{ParamDescriptor, PluginDescriptor, powered_by},
        effect::{ImageEffect, PluginFactory, RegionOfDefinitionArguments, RenderArguments},
        require_rgba_clips,
    },
};

/// Arc plugin identifier.
pub const ARC_IDENTIFIER: &str = "net.fxarena.openfx.Arc";
const VERSION: (u32, u32) = (4, 2);
const LABEL: &str = "ArcOFX";
const GROUPING: &str = "Extra/Distort";
const SUPPORTS_RENDER_SCALE: bool = true;

/// Bends the source along a circular arc.
pub struct ArcEffect {
    host: Arc<dyn EffectHost>,
    features: EngineFeatures,
    angle: Arc<dyn DoubleParam>,
    rotate: Arc<dyn DoubleParam>,
    top_radius: Arc<dyn DoubleParam>,
    bottom_radius: Arc<dyn DoubleParam>,
    flip: Arc<dyn BooleanParam>,
    matte: Arc<dyn BooleanParam>,
    virtual_pixel: Arc<dyn ChoiceParam>,
    parallel: Arc<dyn BooleanParam>,
}

impl ArcEffect {
    /// Bind to `host`, fetching every parameter handle up front.
    pub fn new(host: Arc<dyn EffectHost>, features: EngineFeatures) -> DistortResult<Self> {
        require_rgba_clips(host.as_ref())?;
        let params = host.params();
        Ok(Self {
            angle: require_double(params, "angle")?,
            rotate: require_double(params, "rotate")?,
            top_radius: require_double(params, "top")?,
            bottom_radius: require_double(params, "bottom")?,
            flip: require_boolean(params, "flip")?,
            matte: require_boolean(params, "matte")?,
            virtual_pixel: require_choice(params, "pixel")?,
            parallel: require_boolean(params, "openmp")?,
            features,
            host,
        })
    }

    /// Parameter values at `time`.
    pub fn params_at(&self, time: Time) -> ArcParams {
        ArcParams {
            angle: self.angle.value_at_time(time),
            rotate: self.rotate.value_at_time(time),
            top_radius: self.top_radius.value_at_time(time),
            bottom_radius: self.bottom_radius.value_at_time(time),
            flip: self.flip.value_at_time(time),
            matte: self.matte.value_at_time(time),
            virtual_pixel: VirtualPixelMethod::from_index(self.virtual_pixel.value_at_time(time))
                .unwrap_or(VirtualPixelMethod::Undefined),
            parallel: self.parallel.value_at_time(time),
        }
    }

    /// Engine thread limit for a render with `params`.
    pub fn limits_for(&self, params: &ArcParams) -> ResourceLimits {
        ResourceLimits::for_render(&self.features, params.parallel, self.host.cpu_count())
    }
}

impl ImageEffect for ArcEffect {
    #[tracing::instrument(skip(self), fields(effect = "arc"))]
    fn render(&self, args: &RenderArguments) -> DistortResult<()> {
        render_with_plan(
            self.host.as_ref(),
            args,
            SUPPORTS_RENDER_SCALE,
            |width, height| {
                let params = self.params_at(args.time);
                let limits = self.limits_for(&params);
                Ok(compile_arc(
                    &params,
                    width,
                    height,
                    args.render_scale,
                    limits,
                ))
            },
        )
    }

    fn region_of_definition(&self, args: &RegionOfDefinitionArguments) -> DistortResult<Rect> {
        passthrough_region_of_definition(self.host.as_ref(), args, SUPPORTS_RENDER_SCALE)
    }
}

/// Factory for [`ArcEffect`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ArcFactory;

impl PluginFactory for ArcFactory {
    fn identifier(&self) -> &'static str {
        ARC_IDENTIFIER
    }

    fn version(&self) -> (u32, u32) {
        VERSION
    }

    #[tracing::instrument(skip_all, fields(plugin = ARC_IDENTIFIER))]
    fn describe(&self, features: &EngineFeatures) -> PluginDescriptor {
        let defaults = ArcParams::default();
        let pixel_options: Vec<&str> = VIRTUAL_PIXEL_TABLE.iter().map(|(_, l)| *l).collect();
        PluginDescriptor::filter(
            ARC_IDENTIFIER,
            VERSION,
            LABEL,
            GROUPING,
            powered_by("Arc Distort transform node.", &features.version),
        )
        .with_page(vec![
            ParamDescriptor::double("angle", "Angle", "Arc angle", ANGLE_RANGE, defaults.angle),
            ParamDescriptor::double(
                "rotate",
                "Rotate",
                "Arc rotate",
                ROTATE_RANGE,
                defaults.rotate,
            ),
            ParamDescriptor::double(
                "top",
                "Top radius",
                "Arc top radius",
                TOP_RADIUS_RANGE,
                defaults.top_radius,
            ),
            ParamDescriptor::double(
                "bottom",
                "Bottom radius",
                "Arc bottom radius",
                BOTTOM_RADIUS_RANGE,
                defaults.bottom_radius,
            ),
            ParamDescriptor::boolean("flip", "Flip", "Flip image", defaults.flip),
            ParamDescriptor::boolean(
                "matte",
                "Matte",
                "Merge Alpha before applying effect",
                defaults.matte,
            ),
            ParamDescriptor::choice(
                "pixel",
                "Virtual Pixel",
                "Virtual Pixel Method",
                &pixel_options,
                defaults.virtual_pixel.index(),
            )
            .divider(),
            ParamDescriptor::boolean(
                "openmp",
                "OpenMP",
                "Enable/Disable multithreading. This will enable the plugin to use as many \
                 threads as allowed by host.",
                defaults.parallel,
            )
            .enabled(features.has_parallel_filters())
            .divider(),
        ])
    }

    fn create_instance(
        &self,
        host: Arc<dyn EffectHost>,
        features: EngineFeatures,
    ) -> DistortResult<Box<dyn ImageEffect>> {
        Ok(Box::new(ArcEffect::new(host, features)?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/arc.rs"]
mod tests;
