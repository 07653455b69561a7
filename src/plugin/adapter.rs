//! Frame render adapter shared by every effect.
//!
//! Validates the host images, marshals the source into an engine image, runs a compiled plan
//! on the CPU backend and writes the render window back into the host output.

use crate::{
    compile::plan::Plan,
    foundation::core::{BitDepth, PixelComponents, Rect, RectI, infinite_rect},
    foundation::error::{DistortError, DistortResult},
    host::{EffectHost, MessageLevel, clip::HostImage, clip::ImageProps},
    magick::{
        composite::CompositeOp,
        image::{MagickImage, OPAQUE_BLACK, Rgba, TRANSPARENT},
    },
    plugin::effect::{RegionOfDefinitionArguments, RenderArguments},
    render::{cpu::CpuBackend, passes::execute_plan},
};

/// Message posted when a fetched image does not match the request.
pub const WRONG_PROPERTIES_MESSAGE: &str =
    "OFX Host gave image with wrong scale or field properties";

/// Render `args` through the plan produced by `compile`.
///
/// `compile` receives the working image size (the source region of definition, in render-scale
/// pixels) and is only called once every precondition holds. The output image is written only
/// after the whole plan succeeded.
pub(crate) fn render_with_plan<F>(
    host: &dyn EffectHost,
    args: &RenderArguments,
    supports_render_scale: bool,
    compile: F,
) -> DistortResult<()>
where
    F: FnOnce(u32, u32) -> DistortResult<Plan>,
{
    check_render_scale(args.render_scale.is_identity(), supports_render_scale)?;

    let src_clip = host
        .source_clip()
        .ok_or_else(|| DistortError::failed("effect has no source clip"))?;
    let src = src_clip
        .fetch_image(args.time)
        .ok_or_else(|| DistortError::failed("host returned no source image"))?;
    let src_props = src.props();
    check_scale_and_field(host, &src_props, args)?;

    let dst_clip = host
        .output_clip()
        .ok_or_else(|| DistortError::failed("effect has no output clip"))?;
    let mut dst = dst_clip
        .fetch_image_mut(args.time)
        .ok_or_else(|| DistortError::failed("host returned no output image"))?;
    let dst_props = dst.props();
    check_scale_and_field(host, &dst_props, args)?;

    if dst_props.depth != BitDepth::Float || dst_props.depth != src_props.depth {
        return Err(DistortError::format(format!(
            "unsupported bit depth: source {:?}, output {:?}",
            src_props.depth, dst_props.depth
        )));
    }
    if dst_props.components != PixelComponents::Rgba
        || dst_props.components != src_props.components
    {
        return Err(DistortError::format(format!(
            "unsupported components: source {:?}, output {:?}",
            src_props.components, dst_props.components
        )));
    }
    if !args.render_window.is_window_of(&dst_props.bounds) {
        return Err(DistortError::value(format!(
            "render window {:?} is outside output bounds {:?}",
            args.render_window, dst_props.bounds
        )));
    }

    let rod = src_props.region_of_definition;
    if rod.is_empty() {
        if !dst_clip.is_connected() {
            return Ok(());
        }
        write_window(dst.pixels_mut(), &dst_props, &args.render_window, |_, _| {
            TRANSPARENT
        });
        return Ok(());
    }

    let plan = compile(rod.width(), rod.height())?;
    let image = if src_clip.is_connected() {
        import_source(&*src, &rod)?
    } else {
        MagickImage::new(rod.width(), rod.height(), TRANSPARENT)?
    };
    drop(src);

    let mut backend = CpuBackend::new(image);
    execute_plan(&mut backend, &plan)?;
    let image = backend.into_image();
    if image.width() != plan.width || image.height() != plan.height {
        return Err(DistortError::engine(format!(
            "plan ended at {}x{}, expected {}x{}",
            image.width(),
            image.height(),
            plan.width,
            plan.height
        )));
    }

    if !dst_clip.is_connected() {
        return Ok(());
    }
    let mut canvas = MagickImage::new(plan.width, plan.height, OPAQUE_BLACK)?;
    canvas.composite(&image, 0, 0, CompositeOp::Over);
    canvas.composite(&image, 0, 0, CompositeOp::CopyAlpha);

    write_window(
        dst.pixels_mut(),
        &dst_props,
        &args.render_window,
        |x, y| {
            if rod.contains(x, y) {
                canvas.pixel((x - rod.x1) as u32, (y - rod.y1) as u32)
            } else {
                TRANSPARENT
            }
        },
    );
    Ok(())
}

/// Region of definition shared by the distortion effects: the source's, or infinite without
/// a connected source.
pub(crate) fn passthrough_region_of_definition(
    host: &dyn EffectHost,
    args: &RegionOfDefinitionArguments,
    supports_render_scale: bool,
) -> DistortResult<Rect> {
    check_render_scale(args.render_scale.is_identity(), supports_render_scale)?;
    Ok(match host.source_clip() {
        Some(clip) if clip.is_connected() => clip.region_of_definition(args.time),
        _ => infinite_rect(),
    })
}

fn check_render_scale(identity: bool, supported: bool) -> DistortResult<()> {
    if !identity && !supported {
        return Err(DistortError::failed(
            "render scale is not supported by this effect",
        ));
    }
    Ok(())
}

fn check_scale_and_field(
    host: &dyn EffectHost,
    props: &ImageProps,
    args: &RenderArguments,
) -> DistortResult<()> {
    if props.render_scale != args.render_scale || props.field != args.field {
        host.set_persistent_message(MessageLevel::Error, WRONG_PROPERTIES_MESSAGE);
        return Err(DistortError::host_compat(WRONG_PROPERTIES_MESSAGE));
    }
    Ok(())
}

/// Copy the part of the source inside `rod` into a transparent image, keeping the host's
/// bottom-up row order.
fn import_source(src: &dyn HostImage, rod: &RectI) -> DistortResult<MagickImage> {
    let props = src.props();
    let pixels = src.pixels();
    let mut image = MagickImage::new(rod.width(), rod.height(), TRANSPARENT)?;
    let Some(area) = rod.intersect(&props.bounds) else {
        return Ok(image);
    };
    for y in area.y1..area.y2 {
        let row = image.row_mut((y - rod.y1) as u32);
        for x in area.x1..area.x2 {
            let Some(i) = props.offset_of(x, y) else {
                continue;
            };
            let Some(px) = pixels.get(i..i + 4) else {
                return Err(DistortError::failed(format!(
                    "source image buffer is shorter than its bounds {:?}",
                    props.bounds
                )));
            };
            row[(x - rod.x1) as usize] = [px[0], px[1], px[2], px[3]];
        }
    }
    Ok(image)
}

fn write_window<F>(pixels: &mut [f32], props: &ImageProps, window: &RectI, value: F)
where
    F: Fn(i32, i32) -> Rgba,
{
    for y in window.y1..window.y2 {
        for x in window.x1..window.x2 {
            let Some(i) = props.offset_of(x, y) else {
                continue;
            };
            if let Some(px) = pixels.get_mut(i..i + 4) {
                px.copy_from_slice(&value(x, y));
            }
        }
    }
}
