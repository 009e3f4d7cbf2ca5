//! Tests for replaying recorded landmark streams through the application


use gaze_select::{
    app::GazeSelectApp,
    clock::ManualClock,
    config::Config,
    source::{LandmarkSource, ReplaySource, TimedFrame},
};
use std::io::{Cursor, Write};
use test_helpers::{ear_sequence, screen_to_normalized, to_json_lines};

const DOUBLE_BLINK: [f64; 8] = [0.3, 0.1, 0.1, 0.3, 0.3, 0.1, 0.1, 0.3];

fn recording() -> String {
    let gaze = screen_to_normalized(1250.0, 540.0);
    let mut frames = ear_sequence(gaze, &DOUBLE_BLINK, 0.0, 0.1);
    frames.insert(
        2,
        TimedFrame {
            timestamp: 0.15,
            landmarks: None,
        },
    );
    to_json_lines(&frames)
}

#[test]
fn test_replay_file_selects_region() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", recording()).unwrap();
    writeln!(file, "this line is corrupt").unwrap();

    let source = ReplaySource::from_file(file.path()).unwrap();
    let mut app = GazeSelectApp::new(&Config::default(), None).unwrap();
    let stats = app.run(source).unwrap();

    assert_eq!(stats.frames, 9);
    assert_eq!(stats.frames_without_face, 1);
    assert_eq!(stats.blinks, 2);
    assert_eq!(stats.confirms, 1);
    assert_eq!(stats.final_selection, Some(2));
}

#[test]
fn test_invalid_utf8_does_not_end_replay() {
    let mut bytes = recording().into_bytes();
    let split = bytes.iter().position(|&b| b == b'\n').unwrap() + 1;
    bytes.splice(split..split, [0xc3, 0x28, b'\n']);

    let source = ReplaySource::new(Cursor::new(bytes), ManualClock::new(0.0));
    let mut app = GazeSelectApp::new(&Config::default(), None).unwrap();
    let stats = app.run(source).unwrap();

    assert_eq!(stats.frames, 9);
    assert_eq!(stats.final_selection, Some(2));
}

#[test]
fn test_selection_changes_are_counted() {
    let box_three = screen_to_normalized(1250.0, 540.0);
    let box_one = screen_to_normalized(350.0, 540.0);
    let mut frames = ear_sequence(box_three, &DOUBLE_BLINK, 0.0, 0.1);
    frames.extend(ear_sequence(box_one, &DOUBLE_BLINK, 5.0, 0.1));
    frames.extend(ear_sequence(box_one, &DOUBLE_BLINK, 10.0, 0.1));

    let mut app = GazeSelectApp::new(&Config::default(), None).unwrap();
    let stats = app.run(VecSource(frames.into_iter())).unwrap();

    assert_eq!(stats.confirms, 3);
    assert_eq!(stats.selection_changes, 2);
    assert_eq!(stats.final_selection, Some(0));
}

#[test]
fn test_missing_file_is_an_error() {
    let result = ReplaySource::from_file("/nonexistent/landmarks.jsonl");
    assert!(matches!(result, Err(gaze_select::Error::Io(_))));
}

/// Source that hands out frames without blocking
struct VecSource(std::vec::IntoIter<TimedFrame>);

impl LandmarkSource for VecSource {
    fn next_frame(&mut self) -> gaze_select::Result<Option<TimedFrame>> {
        Ok(self.0.next())
    }
}

#[test]
fn test_threaded_run_processes_latest_frames() {
    let gaze = screen_to_normalized(350.0, 540.0);
    let frames = ear_sequence(gaze, &[0.3; 50], 0.0, 0.033);

    let mut app = GazeSelectApp::new(&Config::default(), None).unwrap();
    let stats = app.run_threaded(VecSource(frames.into_iter())).unwrap();

    assert!(stats.frames >= 1);
    assert_eq!(stats.frames + stats.dropped_frames, 50);
    assert_eq!(stats.final_selection, None);
}

#[test]
fn test_threaded_run_surfaces_source_errors() {
    struct BrokenSource;

    impl LandmarkSource for BrokenSource {
        fn next_frame(&mut self) -> gaze_select::Result<Option<TimedFrame>> {
            Err(gaze_select::Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "landmark model exited",
            )))
        }
    }

    let mut app = GazeSelectApp::new(&Config::default(), None).unwrap();
    assert!(app.run_threaded(BrokenSource).is_err());
}

#[test]
fn test_untimed_records_use_clock() {
    let clock = ManualClock::new(10.0);
    let text = "{\"landmarks\": null}\n{\"landmarks\": null}\n";
    let mut source = ReplaySource::new(Cursor::new(text.as_bytes().to_vec()), clock.clone());

    assert_eq!(source.next_frame().unwrap().unwrap().timestamp, 10.0);
    clock.advance(0.5);
    assert_eq!(source.next_frame().unwrap().unwrap().timestamp, 10.5);
}
