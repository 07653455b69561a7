use crate::foundation::core::{BitDepth, PixelComponents};

/// Name of the mandated source clip.
pub const SOURCE_CLIP: &str = "Source";
/// Name of the mandated output clip.
pub const OUTPUT_CLIP: &str = "Output";

/// Contexts an effect can be instantiated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Context {
    /// Arbitrary clip set.
    General,
    /// One source, one output.
    Filter,
}

/// How many render calls a host may issue at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RenderThreadSafety {
    /// One render at a time across all instances.
    Unsafe,
    /// One render at a time per instance.
    InstanceSafe,
    /// Any number of concurrent renders.
    FullySafe,
}

/// Typed part of a parameter description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    /// Floating-point slider.
    Double {
        /// Hard range.
        min: f64,
        /// Hard range.
        max: f64,
        /// Slider range.
        display_min: f64,
        /// Slider range.
        display_max: f64,
        /// Initial value.
        default: f64,
    },
    /// Integer slider.
    Int {
        /// Hard range.
        min: i32,
        /// Hard range.
        max: i32,
        /// Initial value.
        default: i32,
    },
    /// Checkbox.
    Boolean {
        /// Initial value.
        default: bool,
    },
    /// Drop-down menu.
    Choice {
        /// Option labels, in index order.
        options: Vec<String>,
        /// Initial option index.
        default: usize,
    },
}

/// Description of one parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamDescriptor {
    /// Script name used to fetch the parameter.
    pub name: String,
    /// UI label.
    pub label: String,
    /// Tooltip.
    pub hint: String,
    /// Type, range and default.
    pub kind: ParamKind,
    /// Whether the value can be keyframed.
    pub animates: bool,
    /// Whether the UI control is editable.
    pub enabled: bool,
    /// Draw a divider after the control.
    pub layout_divider: bool,
}

impl ParamDescriptor {
    fn new(name: &str, label: &str, hint: &str, kind: ParamKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            hint: hint.to_string(),
            kind,
            animates: true,
            enabled: true,
            layout_divider: false,
        }
    }

    /// Double parameter with identical hard and display ranges.
    pub fn double(name: &str, label: &str, hint: &str, range: (f64, f64), default: f64) -> Self {
        Self::new(
            name,
            label,
            hint,
            ParamKind::Double {
                min: range.0,
                max: range.1,
                display_min: range.0,
                display_max: range.1,
                default,
            },
        )
    }

    /// Integer parameter.
    pub fn int(name: &str, label: &str, hint: &str, range: (i32, i32), default: i32) -> Self {
        Self::new(
            name,
            label,
            hint,
            ParamKind::Int {
                min: range.0,
                max: range.1,
                default,
            },
        )
    }

    /// Non-animating boolean parameter.
    pub fn boolean(name: &str, label: &str, hint: &str, default: bool) -> Self {
        let mut p = Self::new(name, label, hint, ParamKind::Boolean { default });
        p.animates = false;
        p
    }

    /// Choice parameter.
    pub fn choice(name: &str, label: &str, hint: &str, options: &[&str], default: usize) -> Self {
        Self::new(
            name,
            label,
            hint,
            ParamKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
                default,
            },
        )
    }

    /// Builder-style `enabled` setter.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder-style divider setter.
    pub fn divider(mut self) -> Self {
        self.layout_divider = true;
        self
    }
}

/// Description of one clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipDescriptor {
    /// Clip name.
    pub name: String,
    /// Accepted components.
    pub components: Vec<PixelComponents>,
    /// Whether the effect fetches frames at other times.
    pub temporal_access: bool,
    /// Whether the clip accepts tiles.
    pub supports_tiles: bool,
    /// Whether the clip is a mask input.
    pub is_mask: bool,
}

impl ClipDescriptor {
    /// RGBA-only clip.
    pub fn rgba(name: &str, supports_tiles: bool) -> Self {
        Self {
            name: name.to_string(),
            components: vec![PixelComponents::Rgba],
            temporal_access: false,
            supports_tiles,
            is_mask: false,
        }
    }
}

/// UI page grouping parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageDescriptor {
    /// Page name.
    pub name: String,
    /// Parameter names in display order.
    pub children: Vec<String>,
}

/// Everything a host learns about a plugin at description time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PluginDescriptor {
    /// Reverse-DNS identifier.
    pub identifier: String,
    /// Major version.
    pub version_major: u32,
    /// Minor version.
    pub version_minor: u32,
    /// Menu label.
    pub label: String,
    /// Menu grouping.
    pub grouping: String,
    /// Long description.
    pub description: String,
    /// Supported contexts.
    pub contexts: Vec<Context>,
    /// Supported pixel depths.
    pub bit_depths: Vec<BitDepth>,
    /// Whether the effect renders arbitrary tiles.
    pub supports_tiles: bool,
    /// Whether inputs and output may differ in resolution.
    pub supports_multi_resolution: bool,
    /// Concurrency the effect tolerates.
    pub render_thread_safety: RenderThreadSafety,
    /// Whether the host should split frames across threads itself.
    pub host_frame_threading: bool,
    /// Whether the host may apply a mask after render.
    pub host_masking: bool,
    /// Whether the host may mix output with the source after render.
    pub host_mixing: bool,
    /// Clips.
    pub clips: Vec<ClipDescriptor>,
    /// Pages.
    pub pages: Vec<PageDescriptor>,
    /// Parameters.
    pub params: Vec<ParamDescriptor>,
}

impl PluginDescriptor {
    /// Descriptor pre-filled with the flags shared by every distortion effect: General and
    /// Filter contexts, float only, no tiles, multi-resolution, fully thread safe, no host frame
    /// threading, and RGBA `Source`/`Output` clips.
    pub fn filter(
        identifier: &str,
        version: (u32, u32),
        label: &str,
        grouping: &str,
        description: String,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            version_major: version.0,
            version_minor: version.1,
            label: label.to_string(),
            grouping: grouping.to_string(),
            description,
            contexts: vec![Context::General, Context::Filter],
            bit_depths: vec![BitDepth::Float],
            supports_tiles: false,
            supports_multi_resolution: true,
            render_thread_safety: RenderThreadSafety::FullySafe,
            host_frame_threading: false,
            host_masking: true,
            host_mixing: true,
            clips: vec![
                ClipDescriptor::rgba(SOURCE_CLIP, false),
                ClipDescriptor::rgba(OUTPUT_CLIP, false),
            ],
            pages: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Append parameters to a page named after the plugin label.
    pub fn with_page(mut self, params: Vec<ParamDescriptor>) -> Self {
        self.pages.push(PageDescriptor {
            name: self.label.clone(),
            children: params.iter().map(|p| p.name.clone()).collect(),
        });
        self.params.extend(params);
        self
    }

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Look up a clip by name.
    pub fn clip(&self, name: &str) -> Option<&ClipDescriptor> {
        self.clips.iter().find(|c| c.name == name)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> crate::foundation::error::DistortResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::foundation::error::DistortError::validation(e.to_string()))
    }
}

/// Standard description suffix crediting the engine build.
pub(crate) fn powered_by(summary: &str, engine_version: &str) -> String {
    format!("{summary}\n\nPowered by {engine_version}.")
}
