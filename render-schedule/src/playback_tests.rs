use crate::test_support::{RED, scene, target};
use crate::{
    ColorEntry, ColorValue, DEFAULT_PLAYBACK_RATE, ElementTimeline, ModelTimeline, Playback,
    ScheduleDocument, TimeRange,
};

const TWO_WEEKS: i64 = 1_209_600;

#[test]
fn starts_paused_at_begin() {
    let playback = Playback::new(TimeRange::new(1_000, 5_000_000));
    assert_eq!(playback.time(), 1_000);
    assert!(!playback.is_playing());
    assert_eq!(playback.rate(), DEFAULT_PLAYBACK_RATE);
    assert_eq!(DEFAULT_PLAYBACK_RATE as i64, TWO_WEEKS);
}

#[test]
fn advance_only_moves_while_playing() {
    let mut playback = Playback::new(TimeRange::new(0, 10 * TWO_WEEKS));
    assert_eq!(playback.advance(1.0), 0);

    playback.play();
    assert_eq!(playback.advance(1.0), TWO_WEEKS);
    assert_eq!(playback.advance(0.5), TWO_WEEKS + TWO_WEEKS / 2);

    playback.toggle();
    assert!(!playback.is_playing());
    assert_eq!(playback.advance(1.0), TWO_WEEKS + TWO_WEEKS / 2);
}

#[test]
fn reaching_the_end_clamps_and_pauses() {
    let mut playback = Playback::new(TimeRange::new(0, 100)).with_rate(60.0);
    playback.play();
    assert_eq!(playback.advance(1.0), 60);
    assert!(playback.is_playing());
    assert_eq!(playback.advance(1.0), 100);
    assert!(!playback.is_playing());
}

#[test]
fn seek_clamps_into_range() {
    let mut playback = Playback::new(TimeRange::new(10, 20));
    playback.seek(-5);
    assert_eq!(playback.time(), 10);
    playback.play();
    playback.seek(15);
    assert_eq!(playback.time(), 15);
    assert!(playback.is_playing());
    playback.seek(99);
    assert_eq!(playback.time(), 20);
    assert!(!playback.is_playing());
}

#[test]
fn apply_uses_cursor_time() {
    let scene = scene(&["a"]);
    let records = vec![ModelTimeline {
        model_id: None,
        element_timelines: vec![ElementTimeline {
            batch_id: None,
            element_ids: vec!["a".to_string()],
            color_timeline: Some(vec![
                ColorEntry {
                    time: 0,
                    value: None,
                },
                ColorEntry {
                    time: 50,
                    value: Some(ColorValue {
                        red: 255,
                        green: 0,
                        blue: 0,
                    }),
                },
            ]),
            visibility_timeline: None,
        }],
    }];
    let doc = ScheduleDocument::build(&records, &scene).unwrap();

    let mut playback = Playback::new(doc.range()).with_rate(30.0);
    playback.apply(&doc);
    assert_eq!(target(&scene, "a").color(), None);

    playback.play();
    playback.advance(2.0);
    playback.apply(&doc);
    assert_eq!(playback.time(), 50);
    assert_eq!(target(&scene, "a").color(), Some(RED));
    assert!(!playback.is_playing());
}
