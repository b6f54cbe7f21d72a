use super::*;

#[test]
fn frames_for_rounds_up() {
    assert_eq!(frames_for(10, 1), 10);
    assert_eq!(frames_for(10, 3), 4);
    assert_eq!(frames_for(9, 3), 3);
    assert_eq!(frames_for(1, 5), 1);
}

#[test]
fn frames_for_degenerate_inputs_are_zero() {
    assert_eq!(frames_for(0, 1), 0);
    assert_eq!(frames_for(7, 0), 0);
}

#[test]
fn frame_index_next_saturates() {
    assert_eq!(FrameIndex(3).next(), FrameIndex(4));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}
