use super::*;

#[test]
fn loop_count_zero_is_infinite_repeat() {
    assert!(LoopCount::default().is_infinite());
    assert_eq!(gif::Repeat::from(LoopCount::INFINITE), gif::Repeat::Infinite);
    assert_eq!(gif::Repeat::from(LoopCount(3)), gif::Repeat::Finite(3));
}

#[test]
fn loop_count_serializes_as_plain_number() {
    let json = serde_json::to_string(&LoopCount(2)).unwrap();
    assert_eq!(json, "2");
    let back: LoopCount = serde_json::from_str("0").unwrap();
    assert_eq!(back, LoopCount::INFINITE);
}

#[test]
fn frame_index_orders_and_displays() {
    assert!(FrameIndex(1) < FrameIndex(2));
    assert_eq!(FrameIndex(7).to_string(), "7");
}
