use super::*;

#[test]
fn frame_budget_is_fps_times_duration() {
    let plan = RecordingPlan::new(Fps::default(), 20).unwrap();
    assert_eq!(plan.total_frames, 600);
    assert_eq!(plan.frames_per_quote, 150);
    assert!((plan.duration_secs_f64() - 20.0).abs() < 1e-9);

    let minute = RecordingPlan::new(Fps::whole(24).unwrap(), 60).unwrap();
    assert_eq!(minute.total_frames, 1440);
    assert_eq!(minute.frames_per_quote, 120);
}

#[test]
fn quotes_rotate_every_five_seconds_and_wrap_around() {
    let plan = RecordingPlan::new(Fps::default(), 30).unwrap();
    assert_eq!(plan.quote_index(FrameIndex(0), 3), Some(0));
    assert_eq!(plan.quote_index(FrameIndex(149), 3), Some(0));
    assert_eq!(plan.quote_index(FrameIndex(150), 3), Some(1));
    assert_eq!(plan.quote_index(FrameIndex(300), 3), Some(2));
    assert_eq!(plan.quote_index(FrameIndex(450), 3), Some(0));
    assert_eq!(plan.quote_index(FrameIndex(899), 1), Some(0));
    assert_eq!(plan.quote_index(FrameIndex(10), 0), None);
}

#[test]
fn fractional_rates_floor_the_frame_count() {
    let ntsc = Fps::new(30_000, 1001).unwrap();
    let plan = RecordingPlan::new(ntsc, 20).unwrap();
    assert_eq!(plan.total_frames, 599);
    assert_eq!(plan.frames_per_quote, 149);
}

#[test]
fn rejects_empty_recordings() {
    assert!(RecordingPlan::new(Fps::default(), 0).is_err());
    assert!(RecordingPlan::new(Fps { num: 0, den: 1 }, 20).is_err());
}
