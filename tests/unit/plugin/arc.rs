use super::*;
use crate::{
    foundation::core::RectI,
    host::memory::{FrameBuffer, MemoryClip, MemoryHost, MemoryParamSet},
    plugin::descriptor::ParamKind,
};

fn features(list: &str) -> EngineFeatures {
    EngineFeatures::from_feature_list("test engine", list)
}

fn host_with(params: MemoryParamSet, cpus: usize) -> Arc<dyn EffectHost> {
    let frame = FrameBuffer::rgba_f32(RectI::from_size(4, 4));
    Arc::new(
        MemoryHost::new(params)
            .with_source(MemoryClip::new(frame.clone()))
            .with_output(MemoryClip::new(frame))
            .with_cpu_count(cpus),
    )
}

fn default_params(f: &EngineFeatures) -> MemoryParamSet {
    MemoryParamSet::from_descriptor(&ArcFactory.describe(f))
}

#[test]
fn descriptor_matches_registration() {
    let desc = ArcFactory.describe(&features("HDRI Rayon"));
    assert_eq!(desc.identifier, "net.fxarena.openfx.Arc");
    assert_eq!((desc.version_major, desc.version_minor), (4, 2));
    assert_eq!(desc.label, "ArcOFX");
    assert_eq!(desc.grouping, "Extra/Distort");
    assert!(desc.description.contains("test engine"));

    let names: Vec<&str> = desc.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["angle", "rotate", "top", "bottom", "flip", "matte", "pixel", "openmp"]
    );
    assert_eq!(desc.pages.len(), 1);
    assert_eq!(desc.pages[0].children.len(), 8);

    match &desc.param("pixel").unwrap().kind {
        ParamKind::Choice { options, default } => {
            assert_eq!(options.len(), 16);
            assert_eq!(options[*default], "Transparent");
        }
        other => panic!("unexpected kind {other:?}"),
    }
    match desc.param("bottom").unwrap().kind {
        ParamKind::Double { min, max, .. } => assert_eq!((min, max), (0.0, 350.0)),
        ref other => panic!("unexpected kind {other:?}"),
    }
    assert!(!desc.param("flip").unwrap().animates);
}

#[test]
fn openmp_param_follows_engine_features() {
    let with = ArcFactory.describe(&features("HDRI OpenMP"));
    let without = ArcFactory.describe(&features("HDRI"));
    assert!(with.param("openmp").unwrap().enabled);
    assert!(!without.param("openmp").unwrap().enabled);
}

#[test]
fn params_are_sampled_at_time() {
    let f = features("");
    let mut params = default_params(&f);
    params
        .set_double_keys("angle", vec![(0.0, 10.0), (10.0, 110.0)])
        .unwrap();
    params.set_choice("pixel", 9);
    let effect = ArcEffect::new(host_with(params, 1), f).unwrap();

    let p = effect.params_at(5.0);
    assert_eq!(p.angle, 60.0);
    assert_eq!(p.virtual_pixel, VirtualPixelMethod::Mirror);
}

#[test]
fn out_of_range_choice_leaves_method_undefined() {
    let f = features("");
    let mut params = default_params(&f);
    params.set_choice("pixel", 99);
    let effect = ArcEffect::new(host_with(params, 1), f).unwrap();
    assert_eq!(
        effect.params_at(0.0).virtual_pixel,
        VirtualPixelMethod::Undefined
    );
}

#[test]
fn thread_limit_needs_feature_and_param() {
    let cases = [
        ("HDRI Rayon", true, 8),
        ("HDRI Rayon", false, 1),
        ("HDRI", true, 1),
        ("HDRI", false, 1),
    ];
    for (list, enabled, expected) in cases {
        let f = features(list);
        let mut params = default_params(&f);
        params.set_boolean("openmp", enabled);
        let effect = ArcEffect::new(host_with(params, 8), f).unwrap();
        let p = effect.params_at(0.0);
        assert_eq!(
            effect.limits_for(&p).threads(),
            expected,
            "features {list:?}, enabled {enabled}"
        );
    }
}

#[test]
fn missing_parameter_fails_construction() {
    let f = features("");
    let mut params = default_params(&f);
    params.remove("bottom");
    let err = ArcEffect::new(host_with(params, 1), f).err().unwrap();
    assert!(err.to_string().contains("bottom"));
}
