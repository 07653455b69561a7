//! In-process host used by tests and the command-line driver.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    foundation::core::{PixelComponents, Rect, RectI, Time, infinite_rect},
    foundation::error::{DistortError, DistortResult},
    host::{
        EffectHost, MessageLevel,
        clip::{HostImage, HostImageMut, ImageProps, OutputClip, SourceClip},
        params::{BooleanParam, ChoiceParam, DoubleParam, IntParam, ParamSet},
    },
    plugin::descriptor::{ParamKind, PluginDescriptor},
};

/// Owned pixel buffer with host image properties.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    props: ImageProps,
    data: Vec<f32>,
}

impl FrameBuffer {
    /// Zero-filled buffer for `props`.
    pub fn new(props: ImageProps) -> Self {
        Self {
            data: vec![0.0; props.float_len()],
            props,
        }
    }

    /// Zero-filled RGBA float buffer covering `bounds`.
    pub fn rgba_f32(bounds: RectI) -> Self {
        Self::new(ImageProps::rgba_f32(bounds))
    }

    /// Build from top-down RGBA float rows (the usual file layout), anchored at the origin.
    pub fn from_rgba_top_down(width: u32, height: u32, data: &[f32]) -> DistortResult<Self> {
        let row_len = width as usize * 4;
        if row_len == 0 || data.len() != row_len * height as usize {
            return Err(DistortError::validation(format!(
                "expected {} floats for a {width}x{height} RGBA image, got {}",
                row_len * height as usize,
                data.len()
            )));
        }
        let bounds = RectI::from_size(width as i32, height as i32);
        let mut out = Self::rgba_f32(bounds);
        for (dst, src) in out
            .data
            .chunks_exact_mut(row_len)
            .zip(data.chunks_exact(row_len).rev())
        {
            dst.copy_from_slice(src);
        }
        Ok(out)
    }

    /// Export as top-down RGBA float rows.
    pub fn to_rgba_top_down(&self) -> Vec<f32> {
        let row_len = (self.props.bounds.width() as usize * 4).max(1);
        self.data
            .chunks_exact(row_len)
            .rev()
            .flatten()
            .copied()
            .collect()
    }

    /// Image properties.
    pub fn props(&self) -> &ImageProps {
        &self.props
    }

    /// Mutable image properties, for simulating misbehaving hosts.
    pub fn props_mut(&mut self) -> &mut ImageProps {
        &mut self.props
    }

    /// Raw interleaved data, bottom row first.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// RGBA value at canvas coordinates.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[f32; 4]> {
        let i = self.props.offset_of(x, y)?;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite the RGBA value at canvas coordinates; returns `false` outside the bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: [f32; 4]) -> bool {
        let Some(i) = self.props.offset_of(x, y) else {
            return false;
        };
        match self.data.get_mut(i..i + 4) {
            Some(px) => {
                px.copy_from_slice(&value);
                true
            }
            None => false,
        }
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: [f32; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&value);
        }
    }
}

impl HostImage for FrameBuffer {
    fn props(&self) -> ImageProps {
        self.props
    }

    fn pixels(&self) -> &[f32] {
        &self.data
    }
}

impl HostImageMut for FrameBuffer {
    fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

struct ReadFrame<'a>(RwLockReadGuard<'a, FrameBuffer>);

impl HostImage for ReadFrame<'_> {
    fn props(&self) -> ImageProps {
        self.0.props
    }

    fn pixels(&self) -> &[f32] {
        &self.0.data
    }
}

struct WriteFrame<'a>(RwLockWriteGuard<'a, FrameBuffer>);

impl HostImage for WriteFrame<'_> {
    fn props(&self) -> ImageProps {
        self.0.props
    }

    fn pixels(&self) -> &[f32] {
        &self.0.data
    }
}

impl HostImageMut for WriteFrame<'_> {
    fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.0.data
    }
}

/// Clip backed by a single frame, returned for every time.
#[derive(Debug)]
pub struct MemoryClip {
    connected: bool,
    components: PixelComponents,
    frame: Option<RwLock<FrameBuffer>>,
}

impl MemoryClip {
    /// Connected clip delivering `frame`.
    pub fn new(frame: FrameBuffer) -> Self {
        Self {
            connected: true,
            components: frame.props.components,
            frame: Some(RwLock::new(frame)),
        }
    }

    /// Clip with nothing plugged in.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            components: PixelComponents::Rgba,
            frame: None,
        }
    }

    /// Unconnected clip that still hands out `frame` as an output buffer.
    pub fn detached(frame: FrameBuffer) -> Self {
        Self {
            connected: false,
            ..Self::new(frame)
        }
    }

    /// Connected clip for which the host fails to produce an image.
    pub fn without_image() -> Self {
        Self {
            connected: true,
            components: PixelComponents::Rgba,
            frame: None,
        }
    }

    /// Copy of the current frame.
    pub fn frame(&self) -> Option<FrameBuffer> {
        let lock = self.frame.as_ref()?;
        lock.read().ok().map(|f| f.clone())
    }
}

impl SourceClip for MemoryClip {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn pixel_components(&self) -> PixelComponents {
        self.components
    }

    fn region_of_definition(&self, _time: Time) -> Rect {
        self.frame()
            .map(|f| f.props.region_of_definition.to_rect())
            .unwrap_or_else(infinite_rect)
    }

    fn fetch_image(&self, _time: Time) -> Option<Box<dyn HostImage + '_>> {
        if !self.connected {
            return None;
        }
        let guard = self.frame.as_ref()?.read().ok()?;
        Some(Box::new(ReadFrame(guard)))
    }
}

impl OutputClip for MemoryClip {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn pixel_components(&self) -> PixelComponents {
        self.components
    }

    fn fetch_image_mut(&self, _time: Time) -> Option<Box<dyn HostImageMut + '_>> {
        let guard = self.frame.as_ref()?.write().ok()?;
        Some(Box::new(WriteFrame(guard)))
    }
}

/// Value-holding parameter, optionally keyframed for doubles.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryParam<T> {
    keys: Vec<(Time, T)>,
}

impl<T: Copy> MemoryParam<T> {
    /// Parameter holding `value` at all times.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![(0.0, value)],
        }
    }

    /// Parameter with explicit keys; keys are sorted by time.
    pub fn keyed(mut keys: Vec<(Time, T)>) -> DistortResult<Self> {
        if keys.is_empty() {
            return Err(DistortError::validation(
                "keyed parameter needs at least one key",
            ));
        }
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { keys })
    }

    /// Value of the last key at or before `time` (first key before the range).
    fn step(&self, time: Time) -> T {
        let idx = self.keys.partition_point(|(t, _)| *t <= time);
        self.keys[idx.saturating_sub(1)].1
    }
}

impl DoubleParam for MemoryParam<f64> {
    fn value_at_time(&self, time: Time) -> f64 {
        let idx = self.keys.partition_point(|(t, _)| *t <= time);
        if idx == 0 {
            return self.keys[0].1;
        }
        if idx == self.keys.len() {
            return self.keys[idx - 1].1;
        }
        let (t0, v0) = self.keys[idx - 1];
        let (t1, v1) = self.keys[idx];
        if t1 <= t0 {
            return v1;
        }
        v0 + (v1 - v0) * (time - t0) / (t1 - t0)
    }
}

impl IntParam for MemoryParam<i32> {
    fn value_at_time(&self, time: Time) -> i32 {
        self.step(time)
    }
}

impl BooleanParam for MemoryParam<bool> {
    fn value_at_time(&self, time: Time) -> bool {
        self.step(time)
    }
}

impl ChoiceParam for MemoryParam<usize> {
    fn value_at_time(&self, time: Time) -> usize {
        self.step(time)
    }
}

#[derive(Clone, Debug)]
enum Slot {
    Double(Arc<MemoryParam<f64>>),
    Int(Arc<MemoryParam<i32>>),
    Boolean(Arc<MemoryParam<bool>>),
    Choice(Arc<MemoryParam<usize>>),
}

/// Name-indexed parameter storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryParamSet {
    slots: BTreeMap<String, Slot>,
}

impl MemoryParamSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set populated with every parameter default a plugin describes.
    pub fn from_descriptor(desc: &PluginDescriptor) -> Self {
        let mut set = Self::new();
        for p in &desc.params {
            match &p.kind {
                ParamKind::Double { default, .. } => set.set_double(&p.name, *default),
                ParamKind::Int { default, .. } => set.set_int(&p.name, *default),
                ParamKind::Boolean { default } => set.set_boolean(&p.name, *default),
                ParamKind::Choice { default, .. } => set.set_choice(&p.name, *default),
            }
        }
        set
    }

    /// Set a constant double.
    pub fn set_double(&mut self, name: &str, value: f64) {
        self.slots.insert(
            name.to_string(),
            Slot::Double(Arc::new(MemoryParam::constant(value))),
        );
    }

    /// Set a keyframed double (linear interpolation, held outside the key range).
    pub fn set_double_keys(&mut self, name: &str, keys: Vec<(Time, f64)>) -> DistortResult<()> {
        let param = MemoryParam::keyed(keys)?;
        self.slots
            .insert(name.to_string(), Slot::Double(Arc::new(param)));
        Ok(())
    }

    /// Set a constant integer.
    pub fn set_int(&mut self, name: &str, value: i32) {
        self.slots.insert(
            name.to_string(),
            Slot::Int(Arc::new(MemoryParam::constant(value))),
        );
    }

    /// Set a constant boolean.
    pub fn set_boolean(&mut self, name: &str, value: bool) {
        self.slots.insert(
            name.to_string(),
            Slot::Boolean(Arc::new(MemoryParam::constant(value))),
        );
    }

    /// Set a constant choice index.
    pub fn set_choice(&mut self, name: &str, index: usize) {
        self.slots.insert(
            name.to_string(),
            Slot::Choice(Arc::new(MemoryParam::constant(index))),
        );
    }

    /// Remove a parameter.
    pub fn remove(&mut self, name: &str) {
        self.slots.remove(name);
    }
}

impl ParamSet for MemoryParamSet {
    fn fetch_double(&self, name: &str) -> Option<Arc<dyn DoubleParam>> {
        match self.slots.get(name)? {
            Slot::Double(p) => Some(p.clone()),
            _ => None,
        }
    }

    fn fetch_int(&self, name: &str) -> Option<Arc<dyn IntParam>> {
        match self.slots.get(name)? {
            Slot::Int(p) => Some(p.clone()),
            _ => None,
        }
    }

    fn fetch_boolean(&self, name: &str) -> Option<Arc<dyn BooleanParam>> {
        match self.slots.get(name)? {
            Slot::Boolean(p) => Some(p.clone()),
            _ => None,
        }
    }

    fn fetch_choice(&self, name: &str) -> Option<Arc<dyn ChoiceParam>> {
        match self.slots.get(name)? {
            Slot::Choice(p) => Some(p.clone()),
            _ => None,
        }
    }
}

/// In-process [`EffectHost`].
#[derive(Debug)]
pub struct MemoryHost {
    source: Option<MemoryClip>,
    output: Option<MemoryClip>,
    params: MemoryParamSet,
    cpus: usize,
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl MemoryHost {
    /// Host with the given parameters and no clips.
    pub fn new(params: MemoryParamSet) -> Self {
        Self {
            source: None,
            output: None,
            params,
            cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Attach the source clip.
    pub fn with_source(mut self, clip: MemoryClip) -> Self {
        self.source = Some(clip);
        self
    }

    /// Attach the output clip.
    pub fn with_output(mut self, clip: MemoryClip) -> Self {
        self.output = Some(clip);
        self
    }

    /// Override the reported CPU count.
    pub fn with_cpu_count(mut self, cpus: usize) -> Self {
        self.cpus = cpus;
        self
    }

    /// Mutable access to the parameters.
    pub fn params_mut(&mut self) -> &mut MemoryParamSet {
        &mut self.params
    }

    /// Copy of the output frame.
    pub fn output_frame(&self) -> Option<FrameBuffer> {
        self.output.as_ref()?.frame()
    }

    /// Persistent messages posted so far.
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl EffectHost for MemoryHost {
    fn source_clip(&self) -> Option<&dyn SourceClip> {
        self.source.as_ref().map(|c| c as &dyn SourceClip)
    }

    fn output_clip(&self) -> Option<&dyn OutputClip> {
        self.output.as_ref().map(|c| c as &dyn OutputClip)
    }

    fn params(&self) -> &dyn ParamSet {
        &self.params
    }

    fn cpu_count(&self) -> usize {
        self.cpus
    }

    fn set_persistent_message(&self, level: MessageLevel, message: &str) {
        if let Ok(mut m) = self.messages.lock() {
            m.push((level, message.to_string()));
        }
    }

    fn clear_persistent_message(&self) {
        if let Ok(mut m) = self.messages.lock() {
            m.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
