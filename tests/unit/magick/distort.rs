use super::*;
use crate::magick::{
    image::TRANSPARENT, virtual_pixel::VirtualPixelMethod,
};

fn solid(w: u32, h: u32, color: Rgba) -> MagickImage {
    let mut img = MagickImage::new(w, h, color).unwrap();
    img.set_virtual_pixel_method(VirtualPixelMethod::Transparent);
    img.set_background(TRANSPARENT);
    img
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn two_argument_coefficients_derive_radius_from_width() {
    let c = ArcCoefficients::new(&[60.0, 0.0], 100, 50).unwrap();
    assert!(approx(c.span, std::f64::consts::FRAC_PI_3));
    assert!(approx(c.center_angle, -FRAC_PI_2));
    assert!(approx(c.thickness, 49.0));
    assert!(approx(c.outer_radius, 100.0 / c.span + 24.5));
    assert!(approx(c.center_x, 49.5));
}

#[test]
fn four_argument_coefficients_use_explicit_radii() {
    let c = ArcCoefficients::new(&[90.0, 45.0, 200.0, 120.0], 100, 50).unwrap();
    assert!(approx(c.outer_radius, 200.0));
    assert!(approx(c.thickness, 80.0));
    assert!(approx(c.center_angle, -std::f64::consts::FRAC_PI_4));
}

#[test]
fn three_argument_coefficients_scale_thickness() {
    let two = ArcCoefficients::new(&[60.0, 0.0], 100, 50).unwrap();
    let three = ArcCoefficients::new(&[60.0, 0.0, 300.0], 100, 50).unwrap();
    assert!(approx(three.outer_radius, 300.0));
    assert!(approx(three.thickness, 49.0 * 300.0 / two.outer_radius));
}

#[test]
fn invalid_arguments_are_rejected() {
    assert!(ArcCoefficients::new(&[], 10, 10).is_err());
    assert!(ArcCoefficients::new(&[60.0, 0.0, 1.0, 1.0, 1.0], 10, 10).is_err());
    assert!(ArcCoefficients::new(&[0.0], 10, 10).is_err());
    assert!(ArcCoefficients::new(&[60.0, 0.0, 0.0, 10.0], 10, 10).is_err());
    assert!(ArcCoefficients::new(&[f64::NAN], 10, 10).is_err());
}

#[test]
fn rotation_wraps_into_half_turn_range() {
    let c = ArcCoefficients::new(&[60.0, 360.0], 10, 10).unwrap();
    assert!(approx(c.center_angle, -FRAC_PI_2));
}

#[test]
fn upright_arc_bounds_are_symmetric_and_above_origin() {
    let c = ArcCoefficients::new(&[60.0, 0.0], 100, 50).unwrap();
    let b = c.bounds();
    assert!((b.x0 + b.x1).abs() < 1e-9);
    assert!(approx(b.y0, -c.outer_radius));
    assert!(b.y1 < 0.0);
}

#[test]
fn full_circle_is_square() {
    let img = solid(64, 16, [1.0, 0.0, 0.0, 1.0]);
    let out = distort_arc(&img, &[360.0], &ResourceLimits::single_threaded()).unwrap();
    assert_eq!(out.width(), out.height());
}

#[test]
fn arc_band_is_opaque_and_corners_transparent() {
    let color = [0.25, 0.5, 0.75, 1.0];
    let img = solid(100, 50, color);
    let c = ArcCoefficients::new(&[60.0, 0.0], 100, 50).unwrap();
    let view = Viewport::from_bounds(&c.bounds()).unwrap();

    let out = distort_arc(&img, &[60.0, 0.0], &ResourceLimits::single_threaded()).unwrap();
    assert_eq!((out.width(), out.height()), (view.width, view.height));
    assert!(out.alpha_enabled());

    let mid_radius = c.outer_radius - c.thickness / 2.0;
    let i = (-view.x) as u32;
    let j = (-mid_radius - view.y as f64 - 0.5).round() as u32;
    let p = out.pixel(i, j);
    for k in 0..4 {
        assert!((p[k] - color[k]).abs() < 1e-5, "channel {k}: {p:?}");
    }

    assert_eq!(out.pixel(0, 0)[3], 0.0);
    assert_eq!(out.pixel(out.width() - 1, out.height() - 1)[3], 0.0);
}

#[test]
fn parallel_and_serial_rows_match() {
    let mut img = MagickImage::new(31, 17, TRANSPARENT).unwrap();
    for y in 0..17 {
        for x in 0..31 {
            img.set_pixel(x, y, [x as f32 / 31.0, y as f32 / 17.0, 0.5, 1.0]);
        }
    }
    img.set_virtual_pixel_method(VirtualPixelMethod::Mirror);

    let args = [120.0, 30.0, 80.0, 20.0];
    let serial = distort_arc(&img, &args, &ResourceLimits::single_threaded()).unwrap();
    let parallel = distort_arc(&img, &args, &ResourceLimits::with_threads(4).unwrap()).unwrap();
    assert_eq!(serial, parallel);
}
