use super::*;

#[test]
fn modes_round_trip_through_choice_index() {
    for (i, m) in MIRROR_MODES.iter().enumerate() {
        assert_eq!(m.index(), i);
        assert_eq!(MirrorMode::from_index(i), Some(*m));
    }
    assert_eq!(MirrorMode::from_index(9), None);
    assert_eq!(MirrorMode::default(), MirrorMode::North);
}

#[test]
fn corner_modes_mirror_both_axes() {
    assert_eq!(MirrorMode::SouthEast.keeps_top(), Some(false));
    assert_eq!(MirrorMode::SouthEast.keeps_left(), Some(false));
    assert_eq!(MirrorMode::North.keeps_left(), None);
    assert_eq!(MirrorMode::West.keeps_top(), None);
    assert_eq!(MirrorMode::Undefined.keeps_top(), None);
}

#[test]
fn plan_is_wrapped_in_flips() {
    let plan = compile_mirror(
        &MirrorParams {
            mirror: MirrorMode::East,
            matte: true,
        },
        4,
        4,
    );
    assert_eq!(
        plan.ops,
        vec![
            Op::Flip,
            Op::ResetAlpha,
            Op::Mirror(MirrorMode::East),
            Op::Flip
        ]
    );
}

#[test]
fn undefined_mode_only_flips() {
    let plan = compile_mirror(
        &MirrorParams {
            mirror: MirrorMode::Undefined,
            matte: false,
        },
        4,
        4,
    );
    assert_eq!(plan.ops, vec![Op::Flip, Op::Flip]);
}
