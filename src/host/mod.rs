//! Host interface.
//!
//! Effects never talk to a host directly; they are constructed with an [`EffectHost`] and fetch
//! typed parameter handles and clips through it. [`memory`] provides an in-process host.

pub mod clip;
pub mod memory;
pub mod params;

use crate::host::{
    clip::{OutputClip, SourceClip},
    params::ParamSet,
};

/// Severity of a persistent host message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MessageLevel {
    /// Informational.
    Message,
    /// Something looks off but rendering continues.
    Warning,
    /// Rendering failed.
    Error,
}

/// Services a host offers to one effect instance.
pub trait EffectHost: Send + Sync {
    /// The `Source` clip, if the context defines one.
    fn source_clip(&self) -> Option<&dyn SourceClip>;
    /// The `Output` clip, if the context defines one.
    fn output_clip(&self) -> Option<&dyn OutputClip>;
    /// Parameters of this instance.
    fn params(&self) -> &dyn ParamSet;
    /// Number of CPUs the host lets plugins use.
    fn cpu_count(&self) -> usize;
    /// Post a message that stays visible on the instance until cleared.
    fn set_persistent_message(&self, level: MessageLevel, message: &str);
    /// Remove any persistent message.
    fn clear_persistent_message(&self) {}
}
