use std::sync::Arc;

use crate::{
    foundation::core::Time,
    foundation::error::{DistortError, DistortResult},
};

/// Floating-point parameter.
pub trait DoubleParam: Send + Sync {
    /// Value at `time`.
    fn value_at_time(&self, time: Time) -> f64;
}

/// Integer parameter.
pub trait IntParam: Send + Sync {
    /// Value at `time`.
    fn value_at_time(&self, time: Time) -> i32;
}

/// Boolean parameter.
pub trait BooleanParam: Send + Sync {
    /// Value at `time`.
    fn value_at_time(&self, time: Time) -> bool;
}

/// Choice parameter; values are option indices.
pub trait ChoiceParam: Send + Sync {
    /// Selected option index at `time`.
    fn value_at_time(&self, time: Time) -> usize;
}

/// Host parameter set, looked up by parameter name.
pub trait ParamSet: Send + Sync {
    /// Fetch a double parameter.
    fn fetch_double(&self, name: &str) -> Option<Arc<dyn DoubleParam>>;
    /// Fetch an integer parameter.
    fn fetch_int(&self, name: &str) -> Option<Arc<dyn IntParam>>;
    /// Fetch a boolean parameter.
    fn fetch_boolean(&self, name: &str) -> Option<Arc<dyn BooleanParam>>;
    /// Fetch a choice parameter.
    fn fetch_choice(&self, name: &str) -> Option<Arc<dyn ChoiceParam>>;
}

pub(crate) fn require_double(set: &dyn ParamSet, name: &str) -> DistortResult<Arc<dyn DoubleParam>> {
    set.fetch_double(name)
        .ok_or_else(|| missing("double", name))
}

pub(crate) fn require_int(set: &dyn ParamSet, name: &str) -> DistortResult<Arc<dyn IntParam>> {
    set.fetch_int(name).ok_or_else(|| missing("integer", name))
}

pub(crate) fn require_boolean(
    set: &dyn ParamSet,
    name: &str,
) -> DistortResult<Arc<dyn BooleanParam>> {
    set.fetch_boolean(name)
        .ok_or_else(|| missing("boolean", name))
}

pub(crate) fn require_choice(set: &dyn ParamSet, name: &str) -> DistortResult<Arc<dyn ChoiceParam>> {
    set.fetch_choice(name)
        .ok_or_else(|| missing("choice", name))
}

fn missing(kind: &str, name: &str) -> DistortError {
    DistortError::validation(format!("host did not provide {kind} parameter '{name}'"))
}
