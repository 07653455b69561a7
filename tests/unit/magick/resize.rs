use super::*;

fn row_image(values: &[Rgba]) -> MagickImage {
    let mut img = MagickImage::new(values.len() as u32, 1, TRANSPARENT).unwrap();
    for (x, v) in values.iter().enumerate() {
        img.set_pixel(x as u32, 0, *v);
    }
    img
}

#[test]
fn halving_averages_pairs() {
    let img = row_image(&[
        [0.0, 0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0, 1.0],
        [2.0, 0.0, 0.0, 1.0],
        [3.0, 0.0, 0.0, 1.0],
    ]);
    let out = img.scale(2, 1).unwrap();
    assert_eq!(out.pixel(0, 0), [0.5, 0.0, 0.0, 1.0]);
    assert_eq!(out.pixel(1, 0), [2.5, 0.0, 0.0, 1.0]);
}

#[test]
fn transparent_pixels_do_not_bleed_color() {
    let img = row_image(&[[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 0.0]]);
    let out = img.scale(1, 1).unwrap();
    assert_eq!(out.pixel(0, 0), [1.0, 0.0, 0.0, 0.5]);
}

#[test]
fn aspect_preserving_scales() {
    let img = MagickImage::new(100, 40, [0.2, 0.2, 0.2, 1.0]).unwrap();
    let w = img.scale_to_width(50).unwrap();
    assert_eq!((w.width(), w.height()), (50, 20));
    let h = img.scale_to_height(10).unwrap();
    assert_eq!((h.width(), h.height()), (25, 10));
    assert!(h.pixels().iter().all(|p| (p[0] - 0.2).abs() < 1e-6));
}

#[test]
fn extent_centers_when_growing() {
    let img = MagickImage::new(2, 2, [1.0, 1.0, 1.0, 1.0]).unwrap();
    let out = img.extent(4, 4, Gravity::Center).unwrap();
    assert_eq!(out.pixel(0, 0), TRANSPARENT);
    assert_eq!(out.pixel(1, 1), [1.0; 4]);
    assert_eq!(out.pixel(2, 2), [1.0; 4]);
    assert_eq!(out.pixel(3, 3), TRANSPARENT);
}

#[test]
fn extent_crops_around_center_when_shrinking() {
    let mut img = MagickImage::new(4, 4, TRANSPARENT).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            img.set_pixel(x, y, [x as f32, y as f32, 0.0, 1.0]);
        }
    }
    let out = img.extent(2, 2, Gravity::Center).unwrap();
    assert_eq!(out.pixel(0, 0), [1.0, 1.0, 0.0, 1.0]);
    assert_eq!(out.pixel(1, 1), [2.0, 2.0, 0.0, 1.0]);
}

#[test]
fn extent_pads_with_background() {
    let mut img = MagickImage::new(1, 1, [1.0; 4]).unwrap();
    img.set_background([0.0, 1.0, 0.0, 1.0]);
    let out = img.extent(3, 1, Gravity::NorthWest).unwrap();
    assert_eq!(out.pixel(0, 0), [1.0; 4]);
    assert_eq!(out.pixel(2, 0), [0.0, 1.0, 0.0, 1.0]);
}

fn first_opaque_column(img: &MagickImage) -> Option<u32> {
    (0..img.width()).find(|&x| img.pixel(x, 0)[3] > 0.0)
}

#[test]
fn extent_center_halves_each_side_on_mixed_parity() {
    let narrow = MagickImage::new(7, 1, [1.0; 4]).unwrap();
    let grown = narrow.extent(10, 1, Gravity::Center).unwrap();
    assert_eq!(first_opaque_column(&grown), Some(2));
    assert_eq!(grown.pixel(8, 0), [1.0; 4]);
    assert_eq!(grown.pixel(9, 0), TRANSPARENT);

    let mut wide = MagickImage::new(10, 1, TRANSPARENT).unwrap();
    for x in 0..10 {
        wide.set_pixel(x, 0, [x as f32, 0.0, 0.0, 1.0]);
    }
    let shrunk = wide.extent(7, 1, Gravity::Center).unwrap();
    assert_eq!(shrunk.pixel(0, 0), [2.0, 0.0, 0.0, 1.0]);
    assert_eq!(shrunk.pixel(6, 0), [8.0, 0.0, 0.0, 1.0]);
}
