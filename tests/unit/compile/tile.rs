use super::*;

#[test]
fn host_values_are_clamped() {
    assert_eq!(
        TileParams::from_host(0, 250, true),
        TileParams {
            rows: 1,
            cols: 100,
            matte: true
        }
    );
}

#[test]
fn plan_order() {
    let plan = compile_tile(&TileParams::default(), 10, 6).unwrap();
    assert_eq!(
        plan.ops,
        vec![
            Op::Flip,
            Op::SetBackground(TRANSPARENT),
            Op::Tile { rows: 2, cols: 2 },
            Op::Flip
        ]
    );
}

#[test]
fn empty_grid_is_rejected() {
    let p = TileParams {
        rows: 0,
        cols: 2,
        matte: false,
    };
    assert!(compile_tile(&p, 4, 4).is_err());
}
