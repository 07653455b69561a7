use std::sync::Arc;

use crate::{
    compile::tile::{GRID_RANGE, TileParams, compile_tile},
    foundation::core::{Rect, Time},
    foundation::error::DistortResult,
    host::{
        EffectHost,
        params::{BooleanParam, IntParam, require_boolean, require_int},
    },
    magick::features::EngineFeatures,
    plugin::{
        adapter::{passthrough_region_of_definition, render_with_plan},
        descriptor::{ParamDescriptor, PluginDescriptor, powered_by},
        effect::{ImageEffect, PluginFactory, RegionOfDefinitionArguments, RenderArguments},
        require_rgba_clips,
    },
};

/// Tile plugin identifier.
pub const TILE_IDENTIFIER: &str = "net.fxarena.openfx.MagickTile";
const VERSION: (u32, u32) = (1, 0);

/// Repeats a shrunken copy of the source on a grid.
pub struct TileEffect {
    host: Arc<dyn EffectHost>,
    rows: Arc<dyn IntParam>,
    cols: Arc<dyn IntParam>,
    matte: Arc<dyn BooleanParam>,
}

impl TileEffect {
    /// Bind to `host`.
    pub fn new(host: Arc<dyn EffectHost>) -> DistortResult<Self> {
        require_rgba_clips(host.as_ref())?;
        let params = host.params();
        Ok(Self {
            rows: require_int(params, "rows")?,
            cols: require_int(params, "cols")?,
            matte: require_boolean(params, "matte")?,
            host,
        })
    }

    /// Parameter values at `time`, clamped to the grid range.
    pub fn params_at(&self, time: Time) -> TileParams {
        TileParams::from_host(
            self.rows.value_at_time(time),
            self.cols.value_at_time(time),
            self.matte.value_at_time(time),
        )
    }
}

impl ImageEffect for TileEffect {
    #[tracing::instrument(skip(self), fields(effect = "tile"))]
    fn render(&self, args: &RenderArguments) -> DistortResult<()> {
        render_with_plan(self.host.as_ref(), args, true, |width, height| {
            compile_tile(&self.params_at(args.time), width, height)
        })
    }

    fn region_of_definition(&self, args: &RegionOfDefinitionArguments) -> DistortResult<Rect> {
        passthrough_region_of_definition(self.host.as_ref(), args, true)
    }
}

/// Factory for [`TileEffect`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TileFactory;

impl PluginFactory for TileFactory {
    fn identifier(&self) -> &'static str {
        TILE_IDENTIFIER
    }

    fn version(&self) -> (u32, u32) {
        VERSION
    }

    fn describe(&self, features: &EngineFeatures) -> PluginDescriptor {
        let defaults = TileParams::default();
        PluginDescriptor::filter(
            TILE_IDENTIFIER,
            VERSION,
            "TileOFX",
            "Extra/Distort",
            powered_by("Tile transform node.", &features.version),
        )
        .with_page(vec![
            ParamDescriptor::int("rows", "Rows", "Number of tile rows", GRID_RANGE, defaults.rows as i32),
            ParamDescriptor::int(
                "cols",
                "Columns",
                "Number of tile columns",
                GRID_RANGE,
                defaults.cols as i32,
            ),
            ParamDescriptor::boolean(
                "matte",
                "Matte",
                "Merge Alpha before applying effect",
                defaults.matte,
            ),
        ])
    }

    fn create_instance(
        &self,
        host: Arc<dyn EffectHost>,
        _features: EngineFeatures,
    ) -> DistortResult<Box<dyn ImageEffect>> {
        Ok(Box::new(TileEffect::new(host)?))
    }
}
