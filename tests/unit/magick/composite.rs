use super::*;
use crate::magick::image::{OPAQUE_BLACK, TRANSPARENT};

#[test]
fn over_transparent_src_is_noop() {
    let dst = [0.1, 0.2, 0.3, 1.0];
    assert_eq!(over(dst, [1.0, 1.0, 1.0, 0.0]), dst);
}

#[test]
fn over_opaque_src_replaces_dst() {
    let src = [0.9, 0.1, 0.4, 1.0];
    assert_eq!(over([0.0, 0.0, 0.0, 1.0], src), src);
}

#[test]
fn over_on_transparent_dst_returns_src() {
    let src = [0.5, 0.25, 1.0, 0.5];
    assert_eq!(over(TRANSPARENT, src), src);
}

#[test]
fn over_then_copy_alpha_yields_premultiplied_pixels() {
    let mut canvas = MagickImage::new(2, 1, OPAQUE_BLACK).unwrap();
    let mut img = MagickImage::new(2, 1, TRANSPARENT).unwrap();
    img.set_pixel(0, 0, [1.0, 0.0, 0.0, 0.5]);
    img.set_pixel(1, 0, [0.2, 0.4, 0.6, 1.0]);

    canvas.composite(&img, 0, 0, CompositeOp::Over);
    canvas.composite(&img, 0, 0, CompositeOp::CopyAlpha);

    assert_eq!(canvas.pixel(0, 0), [0.5, 0.0, 0.0, 0.5]);
    assert_eq!(canvas.pixel(1, 0), [0.2, 0.4, 0.6, 1.0]);
}

#[test]
fn copy_alpha_uses_intensity_without_source_alpha() {
    let mut canvas = MagickImage::new(1, 1, OPAQUE_BLACK).unwrap();
    let mut img = MagickImage::new(1, 1, [1.0, 1.0, 1.0, 0.0]).unwrap();
    img.set_alpha(false);
    canvas.composite(&img, 0, 0, CompositeOp::CopyAlpha);
    assert!((canvas.pixel(0, 0)[3] - 1.0).abs() < 1e-5);
}

#[test]
fn composite_clips_to_destination() {
    let mut canvas = MagickImage::new(2, 2, TRANSPARENT).unwrap();
    let img = MagickImage::new(2, 2, [1.0; 4]).unwrap();
    canvas.composite(&img, 1, -1, CompositeOp::Over);
    assert_eq!(canvas.pixel(1, 0), [1.0; 4]);
    assert_eq!(canvas.pixel(0, 0), TRANSPARENT);
    assert_eq!(canvas.pixel(1, 1), TRANSPARENT);
}

#[test]
fn copy_replaces_including_alpha() {
    let mut canvas = MagickImage::new(2, 1, OPAQUE_BLACK).unwrap();
    let img = MagickImage::new(1, 1, [0.3, 0.3, 0.3, 0.25]).unwrap();
    canvas.composite(&img, 1, 0, CompositeOp::Copy);
    assert_eq!(canvas.pixel(0, 0), OPAQUE_BLACK);
    assert_eq!(canvas.pixel(1, 0), [0.3, 0.3, 0.3, 0.25]);
}
