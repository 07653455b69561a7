//! Effect plugins: descriptors, factories and instances.
//!
//! A host discovers the bundle through [`plugin_factories`], asks each factory to
//! [`describe`](effect::PluginFactory::describe) itself, then creates instances bound to an
//! [`EffectHost`](crate::host::EffectHost). [`PluginBundle`] does the engine feature detection
//! once and hands the result to every description and instance.

pub mod adapter;
pub mod arc;
pub mod descriptor;
pub mod effect;
pub mod mirror;
pub mod tile;

use std::sync::Arc;

use crate::{
    foundation::core::PixelComponents,
    foundation::error::{DistortError, DistortResult},
    host::EffectHost,
    magick::features::EngineFeatures,
    plugin::{
        descriptor::PluginDescriptor,
        effect::{ImageEffect, PluginFactory},
    },
};

/// Every factory in the bundle, in registration order.
pub fn plugin_factories() -> Vec<Box<dyn PluginFactory>> {
    vec![
        Box::new(arc::ArcFactory),
        Box::new(mirror::MirrorFactory),
        Box::new(tile::TileFactory),
    ]
}

/// The plugin bundle with its engine features detected once.
pub struct PluginBundle {
    features: EngineFeatures,
    factories: Vec<Box<dyn PluginFactory>>,
}

impl PluginBundle {
    /// Bundle for the current engine build.
    pub fn new() -> Self {
        Self::with_features(EngineFeatures::detect())
    }

    /// Bundle reporting `features`.
    pub fn with_features(features: EngineFeatures) -> Self {
        Self {
            features,
            factories: plugin_factories(),
        }
    }

    /// Engine features shared by all plugins.
    pub fn features(&self) -> &EngineFeatures {
        &self.features
    }

    /// Identifiers of every plugin.
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.identifier()).collect()
    }

    /// Describe one plugin.
    pub fn describe(&self, identifier: &str) -> DistortResult<PluginDescriptor> {
        Ok(self.factory(identifier)?.describe(&self.features))
    }

    /// Describe every plugin.
    pub fn describe_all(&self) -> Vec<PluginDescriptor> {
        self.factories
            .iter()
            .map(|f| f.describe(&self.features))
            .collect()
    }

    /// Instantiate a plugin on `host`.
    pub fn create_instance(
        &self,
        identifier: &str,
        host: Arc<dyn EffectHost>,
    ) -> DistortResult<Box<dyn ImageEffect>> {
        tracing::debug!(identifier, "creating effect instance");
        self.factory(identifier)?
            .create_instance(host, self.features.clone())
    }

    fn factory(&self, identifier: &str) -> DistortResult<&dyn PluginFactory> {
        self.factories
            .iter()
            .find(|f| f.identifier() == identifier)
            .map(|f| f.as_ref())
            .ok_or_else(|| DistortError::validation(format!("unknown plugin '{identifier}'")))
    }
}

impl Default for PluginBundle {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject hosts whose clips deliver something other than RGBA.
pub(crate) fn require_rgba_clips(host: &dyn EffectHost) -> DistortResult<()> {
    let source = host.source_clip().map(|c| c.pixel_components());
    let output = host.output_clip().map(|c| c.pixel_components());
    for (name, components) in [("source", source), ("output", output)] {
        if let Some(c) = components
            && c != PixelComponents::Rgba
        {
            return Err(DistortError::format(format!(
                "{name} clip delivers {c:?}, only RGBA is supported"
            )));
        }
    }
    Ok(())
}
