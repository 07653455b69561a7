use super::*;
use crate::{
    compile::{
        arc::{ArcParams, compile_arc},
        mirror::{MirrorParams, compile_mirror},
    },
    foundation::core::RenderScale,
    foundation::error::DistortError,
};

#[derive(Default)]
struct MockBackend {
    calls: Vec<String>,
    fail_on_distort: bool,
}

impl PlanBackend for MockBackend {
    fn flip(&mut self) -> DistortResult<()> {
        self.calls.push("flip".into());
        Ok(())
    }

    fn set_virtual_pixel(&mut self, method: VirtualPixelMethod) -> DistortResult<()> {
        self.calls.push(format!("virtual_pixel:{}", method.label()));
        Ok(())
    }

    fn set_background(&mut self, _color: Rgba) -> DistortResult<()> {
        self.calls.push("background".into());
        Ok(())
    }

    fn reset_alpha(&mut self) -> DistortResult<()> {
        self.calls.push("reset_alpha".into());
        Ok(())
    }

    fn arc_distort(&mut self, args: &ArcArgs, limits: &ResourceLimits) -> DistortResult<()> {
        if self.fail_on_distort {
            return Err(DistortError::engine("boom"));
        }
        self.calls
            .push(format!("arc:{}:{}", args.arity(), limits.threads()));
        Ok(())
    }

    fn fit_within(&mut self, width: u32, height: u32) -> DistortResult<()> {
        self.calls.push(format!("fit:{width}x{height}"));
        Ok(())
    }

    fn extent(&mut self, width: u32, height: u32, _gravity: Gravity) -> DistortResult<()> {
        self.calls.push(format!("extent:{width}x{height}"));
        Ok(())
    }

    fn mirror(&mut self, mode: MirrorMode) -> DistortResult<()> {
        self.calls.push(format!("mirror:{}", mode.label()));
        Ok(())
    }

    fn tile(&mut self, rows: u32, cols: u32) -> DistortResult<()> {
        self.calls.push(format!("tile:{rows}x{cols}"));
        Ok(())
    }
}

/// Tracks row order only; distortion is the identity.
struct RowOrderBackend {
    rows: Vec<u32>,
}

impl PlanBackend for RowOrderBackend {
    fn flip(&mut self) -> DistortResult<()> {
        self.rows.reverse();
        Ok(())
    }
    fn set_virtual_pixel(&mut self, _method: VirtualPixelMethod) -> DistortResult<()> {
        Ok(())
    }
    fn set_background(&mut self, _color: Rgba) -> DistortResult<()> {
        Ok(())
    }
    fn reset_alpha(&mut self) -> DistortResult<()> {
        Ok(())
    }
    fn arc_distort(&mut self, _args: &ArcArgs, _limits: &ResourceLimits) -> DistortResult<()> {
        Ok(())
    }
    fn fit_within(&mut self, _width: u32, _height: u32) -> DistortResult<()> {
        Ok(())
    }
    fn extent(&mut self, _width: u32, _height: u32, _gravity: Gravity) -> DistortResult<()> {
        Ok(())
    }
    fn mirror(&mut self, _mode: MirrorMode) -> DistortResult<()> {
        Ok(())
    }
    fn tile(&mut self, _rows: u32, _cols: u32) -> DistortResult<()> {
        Ok(())
    }
}

#[test]
fn execute_plan_calls_in_expected_order() {
    let params = ArcParams {
        top_radius: 120.0,
        bottom_radius: 40.0,
        ..ArcParams::default()
    };
    let plan = compile_arc(
        &params,
        16,
        9,
        RenderScale::IDENTITY,
        ResourceLimits::with_threads(3).unwrap(),
    );
    let mut backend = MockBackend::default();
    execute_plan(&mut backend, &plan).unwrap();
    assert_eq!(
        backend.calls,
        vec![
            "flip",
            "virtual_pixel:Transparent",
            "background",
            "arc:4:3",
            "fit:16x9",
            "extent:16x9",
            "flip"
        ]
    );
}

#[test]
fn execute_plan_uses_two_args_for_zero_radius() {
    let params = ArcParams {
        top_radius: 120.0,
        ..ArcParams::default()
    };
    let plan = compile_arc(
        &params,
        4,
        4,
        RenderScale::IDENTITY,
        ResourceLimits::single_threaded(),
    );
    let mut backend = MockBackend::default();
    execute_plan(&mut backend, &plan).unwrap();
    assert!(backend.calls.contains(&"arc:2:1".to_string()));
}

#[test]
fn execute_plan_stops_at_first_error() {
    let plan = compile_arc(
        &ArcParams::default(),
        4,
        4,
        RenderScale::IDENTITY,
        ResourceLimits::single_threaded(),
    );
    let mut backend = MockBackend {
        fail_on_distort: true,
        ..MockBackend::default()
    };
    assert!(execute_plan(&mut backend, &plan).is_err());
    assert!(!backend.calls.iter().any(|c| c.starts_with("fit")));
}

#[test]
fn flip_option_cancels_for_identity_distortion() {
    let run = |flip: bool| {
        let params = ArcParams {
            flip,
            ..ArcParams::default()
        };
        let plan = compile_arc(
            &params,
            1,
            5,
            RenderScale::IDENTITY,
            ResourceLimits::single_threaded(),
        );
        let mut backend = RowOrderBackend {
            rows: (0..5).collect(),
        };
        execute_plan(&mut backend, &plan).unwrap();
        backend.rows
    };
    assert_eq!(run(true), run(false));
    assert_eq!(run(false), vec![0, 1, 2, 3, 4]);
}

#[test]
fn mirror_plan_dispatches_mode() {
    let plan = compile_mirror(
        &MirrorParams {
            mirror: MirrorMode::SouthWest,
            matte: false,
        },
        4,
        4,
    );
    let mut backend = MockBackend::default();
    execute_plan(&mut backend, &plan).unwrap();
    assert_eq!(backend.calls, vec!["flip", "mirror:SouthWest", "flip"]);
}
