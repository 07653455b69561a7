use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Round to nearest with ties toward positive infinity: `floor(x + 0.5)`.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Wrap an angle in radians into `[-PI, PI)`.
pub(crate) fn wrap_angle(rad: f64) -> f64 {
    let tau = std::f64::consts::TAU;
    let turns = rad / tau;
    (turns - round_half_up(turns)) * tau
}

/// Deterministic per-pixel hash used by randomized sampling policies.
pub(crate) fn coord_hash(x: i64, y: i64, seed: u64) -> u64 {
    let mut buf = [0u8; 16];
    buf[..8].copy_from_slice(&x.to_le_bytes());
    buf[8..].copy_from_slice(&y.to_le_bytes());
    xxh3_64_with_seed(&buf, seed)
}

/// Linear interpolation between two RGBA values.
pub(crate) fn lerp4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = a[i] + (b[i] - a[i]) * t;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
