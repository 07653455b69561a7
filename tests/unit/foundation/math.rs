use super::*;

#[test]
fn round_half_up_matches_floor_plus_half() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(2.49), 2.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(0.0), 0.0);
}

#[test]
fn wrap_angle_stays_in_half_open_range() {
    let pi = std::f64::consts::PI;
    assert!((wrap_angle(3.0 * pi) - pi).abs() < 1e-9 || (wrap_angle(3.0 * pi) + pi).abs() < 1e-9);
    assert!((wrap_angle(-pi / 2.0) + pi / 2.0).abs() < 1e-12);
    assert!((wrap_angle(2.0 * pi)).abs() < 1e-12);
}

#[test]
fn coord_hash_is_deterministic_and_seeded() {
    assert_eq!(coord_hash(3, 7, 1), coord_hash(3, 7, 1));
    assert_ne!(coord_hash(3, 7, 1), coord_hash(7, 3, 1));
    assert_ne!(coord_hash(3, 7, 1), coord_hash(3, 7, 2));
}

#[test]
fn lerp4_endpoints() {
    let a = [0.0, 0.2, 0.4, 1.0];
    let b = [1.0, 0.2, 0.0, 0.0];
    assert_eq!(lerp4(a, b, 0.0), a);
    assert_eq!(lerp4(a, b, 1.0), b);
}
