use crate::foundation::error::{DistortError, DistortResult};

/// Feature token advertising parallel filter support.
pub const PARALLEL_FEATURE: &str = "Rayon";

/// Engine build information, captured once when a plugin is described.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineFeatures {
    /// Human readable engine version.
    pub version: String,
    /// Feature tokens compiled into this build.
    pub features: Vec<String>,
}

impl EngineFeatures {
    /// Inspect the current build.
    pub fn detect() -> Self {
        let mut features = vec!["HDRI".to_string()];
        if cfg!(feature = "parallel") {
            features.push(PARALLEL_FEATURE.to_string());
        }
        Self {
            version: format!("distortfx engine {}", env!("CARGO_PKG_VERSION")),
            features,
        }
    }

    /// Build from a whitespace-separated feature list, e.g. `"HDRI OpenMP"`.
    pub fn from_feature_list(version: impl Into<String>, list: &str) -> Self {
        Self {
            version: version.into(),
            features: list.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Whether filters can spread work over several threads.
    ///
    /// `OpenMP` is accepted as an alias so feature lists from other engines keep working.
    pub fn has_parallel_filters(&self) -> bool {
        self.features
            .iter()
            .any(|f| f == PARALLEL_FEATURE || f == "OpenMP")
    }
}

/// Per-call engine resource limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceLimits {
    threads: usize,
}

impl ResourceLimits {
    /// Limits that keep every filter on the calling thread.
    pub const fn single_threaded() -> Self {
        Self { threads: 1 }
    }

    /// Limits allowing `threads` workers.
    pub fn with_threads(threads: usize) -> DistortResult<Self> {
        if threads == 0 {
            return Err(DistortError::validation("engine thread limit must be >= 1"));
        }
        Ok(Self { threads })
    }

    /// Thread limit for one render call: the host CPU count when the engine supports parallel
    /// filters and the user enabled them, otherwise 1.
    pub fn for_render(features: &EngineFeatures, enabled: bool, host_cpus: usize) -> Self {
        if features.has_parallel_filters() && enabled {
            Self {
                threads: host_cpus.max(1),
            }
        } else {
            Self::single_threaded()
        }
    }

    /// Maximum worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Build a call-scoped pool honoring the limit.
    pub fn build_pool(&self) -> DistortResult<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| DistortError::engine(format!("failed to build rayon thread pool: {e}")))
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::single_threaded()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/magick/features.rs"]
mod tests;
