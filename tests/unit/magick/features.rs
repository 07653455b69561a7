use super::*;

#[test]
fn feature_list_parsing() {
    let f = EngineFeatures::from_feature_list("test 1.0", "Cipher DPC  HDRI OpenMP");
    assert_eq!(f.features, vec!["Cipher", "DPC", "HDRI", "OpenMP"]);
    assert!(f.has_parallel_filters());

    let f = EngineFeatures::from_feature_list("test 1.0", "Cipher DPC");
    assert!(!f.has_parallel_filters());
}

#[test]
fn detect_reports_build_feature() {
    let f = EngineFeatures::detect();
    assert!(f.version.starts_with("distortfx engine "));
    assert_eq!(f.has_parallel_filters(), cfg!(feature = "parallel"));
}

#[test]
fn render_limits_use_cpu_count_only_when_both_flags_are_on() {
    let with = EngineFeatures::from_feature_list("t", PARALLEL_FEATURE);
    let without = EngineFeatures::from_feature_list("t", "");

    assert_eq!(ResourceLimits::for_render(&with, true, 12).threads(), 12);
    assert_eq!(ResourceLimits::for_render(&with, false, 12).threads(), 1);
    assert_eq!(ResourceLimits::for_render(&without, true, 12).threads(), 1);
    assert_eq!(ResourceLimits::for_render(&without, false, 12).threads(), 1);
    assert_eq!(ResourceLimits::for_render(&with, true, 0).threads(), 1);
}

#[test]
fn zero_threads_is_rejected() {
    assert!(ResourceLimits::with_threads(0).is_err());
    assert_eq!(ResourceLimits::with_threads(3).unwrap().threads(), 3);
    assert_eq!(ResourceLimits::default().threads(), 1);
}

#[test]
fn pool_has_requested_size() {
    let pool = ResourceLimits::with_threads(2).unwrap().build_pool().unwrap();
    assert_eq!(pool.current_num_threads(), 2);
}
