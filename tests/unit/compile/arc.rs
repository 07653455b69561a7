use super::*;

fn ops_without_state(plan: &Plan) -> Vec<&'static str> {
    plan.ops
        .iter()
        .map(|op| match op {
            Op::Flip => "flip",
            Op::SetVirtualPixel(_) => "virtual_pixel",
            Op::SetBackground(_) => "background",
            Op::ResetAlpha => "reset_alpha",
            Op::ArcDistort(_) => "arc",
            Op::FitWithin { .. } => "fit",
            Op::Extent { .. } => "extent",
            Op::Mirror(_) => "mirror",
            Op::Tile { .. } => "tile",
        })
        .collect()
}

#[test]
fn zero_radius_selects_two_argument_call() {
    let mut p = ArcParams {
        top_radius: 100.0,
        ..ArcParams::default()
    };
    assert_eq!(arc_args(&p, RenderScale::IDENTITY).arity(), 2);

    p.top_radius = 0.0;
    p.bottom_radius = 50.0;
    assert_eq!(arc_args(&p, RenderScale::IDENTITY).arity(), 2);

    p.top_radius = 100.0;
    assert_eq!(
        arc_args(&p, RenderScale::IDENTITY),
        ArcArgs::Four([60.0, 0.0, 100.0, 50.0])
    );
}

#[test]
fn radii_scale_and_round_half_up() {
    let p = ArcParams {
        top_radius: 101.0,
        bottom_radius: 33.0,
        ..ArcParams::default()
    };
    let args = arc_args(&p, RenderScale::new(0.5, 0.5));
    assert_eq!(args.as_slice(), &[60.0, 0.0, 51.0, 17.0]);
}

#[test]
fn tiny_scale_keeps_four_arguments() {
    let p = ArcParams {
        top_radius: 1.0,
        bottom_radius: 1.0,
        ..ArcParams::default()
    };
    assert_eq!(
        arc_args(&p, RenderScale::new(0.1, 0.1)),
        ArcArgs::Four([60.0, 0.0, 0.0, 0.0])
    );
}

#[test]
fn default_plan_order() {
    let plan = compile_arc(
        &ArcParams::default(),
        8,
        4,
        RenderScale::IDENTITY,
        ResourceLimits::single_threaded(),
    );
    assert_eq!(
        ops_without_state(&plan),
        ["flip", "virtual_pixel", "background", "arc", "fit", "extent", "flip"]
    );
    assert_eq!(plan.ops[2], Op::SetBackground(TRANSPARENT));
    assert_eq!(
        plan.ops[5],
        Op::Extent {
            width: 8,
            height: 4,
            gravity: Gravity::Center
        }
    );
}

#[test]
fn matte_and_flip_wrap_the_distortion() {
    let p = ArcParams {
        matte: true,
        flip: true,
        virtual_pixel: VirtualPixelMethod::Mirror,
        ..ArcParams::default()
    };
    let plan = compile_arc(
        &p,
        8,
        4,
        RenderScale::IDENTITY,
        ResourceLimits::single_threaded(),
    );
    assert_eq!(
        ops_without_state(&plan),
        [
            "flip",
            "virtual_pixel",
            "background",
            "reset_alpha",
            "flip",
            "arc",
            "flip",
            "fit",
            "extent",
            "flip"
        ]
    );
    assert_eq!(plan.ops[1], Op::SetVirtualPixel(VirtualPixelMethod::Mirror));
    assert_eq!(plan.flip_count(), 4);
}

#[test]
fn plan_carries_limits() {
    let limits = ResourceLimits::with_threads(6).unwrap();
    let plan = compile_arc(&ArcParams::default(), 2, 2, RenderScale::IDENTITY, limits);
    assert_eq!(plan.limits.threads(), 6);
    assert_eq!((plan.width, plan.height), (2, 2));
}

#[test]
fn preset_json_uses_host_names() {
    let p = ArcParams::from_json(
        r#"{"angle": 180, "top": 200, "bottom": 50, "pixel": "Mirror", "openmp": true}"#,
    )
    .unwrap();
    assert_eq!(p.angle, 180.0);
    assert_eq!(p.top_radius, 200.0);
    assert_eq!(p.bottom_radius, 50.0);
    assert_eq!(p.virtual_pixel, VirtualPixelMethod::Mirror);
    assert!(p.parallel);
    assert!(!p.flip);
}

#[test]
fn preset_rejects_out_of_range_and_unknown_fields() {
    assert!(ArcParams::from_json(r#"{"angle": 0}"#).is_err());
    assert!(ArcParams::from_json(r#"{"top": 701}"#).is_err());
    assert!(ArcParams::from_json(r#"{"bottom": -1}"#).is_err());
    assert!(ArcParams::from_json(r#"{"radius": 3}"#).is_err());
    assert_eq!(ArcParams::from_json("{}").unwrap(), ArcParams::default());
}

#[derive(Clone, Default)]
struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn compile_logs_arity_and_threads() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let params = ArcParams {
        top_radius: 80.0,
        bottom_radius: 20.0,
        ..ArcParams::default()
    };
    let limits = ResourceLimits::with_threads(3).unwrap();
    tracing::subscriber::with_default(subscriber, || {
        compile_arc(&params, 4, 4, RenderScale::IDENTITY, limits);
    });

    let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("compiled arc plan"), "{text}");
    assert!(text.contains("arity=4"), "{text}");
    assert!(text.contains("threads=3"), "{text}");
}
