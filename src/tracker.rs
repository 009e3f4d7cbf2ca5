//! Per-frame pipeline from landmarks to selection state.
//!
//! For each frame the tracker estimates the gaze point, measures the EAR,
//! and pushes the EAR through the blink detector and gesture composer. A
//! confirm gesture resolves the frame's gaze point against the regions.
//! Frames without a face leave every state machine untouched. Gaze smoothing
//! history is dropped when a face returns after a long absence.

use crate::{
    blink::{BlinkCompleted, BlinkDetector, EyeState},
    config::Config,
    constants::FILTER_RESET_AFTER_ABSENCE,
    filters::GazeFilter,
    geometry::{normalized_to_screen, LandmarkPoint, ScreenPoint},
    gesture::{ConfirmEvent, GestureComposer, GestureState},
    landmarks::{EyeSelection, GazeStrategy, LandmarkFrame},
    regions::{RegionId, RegionSelector},
    Result,
};
use log::{debug, info};

/// Everything the tracker learned from one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutput {
    /// Normalized gaze point, for the camera preview overlay
    pub gaze: Option<LandmarkPoint>,
    /// Gaze point in screen pixels, unclamped
    pub screen_gaze: Option<ScreenPoint>,
    /// Eye-aspect-ratio, `None` when the eye state is unknown
    pub ear: Option<f64>,
    pub blink: Option<BlinkCompleted>,
    pub confirm: Option<ConfirmEvent>,
    /// Selection after this frame
    pub selection: Option<RegionId>,
}

/// Owns the blink, gesture and selection state machines
pub struct GazeTracker {
    strategy: GazeStrategy,
    eye: EyeSelection,
    screen_width: u32,
    screen_height: u32,
    filter: Box<dyn GazeFilter>,
    last_face_at: Option<f64>,
    blink: BlinkDetector,
    gesture: GestureComposer,
    selector: RegionSelector,
}

impl GazeTracker {
    /// Build a tracker from validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if the configuration is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let tracker = Self {
            strategy: config.gaze.strategy,
            eye: config.blink.eye,
            screen_width: config.screen.width,
            screen_height: config.screen.height,
            filter: config.create_filter()?,
            last_face_at: None,
            blink: BlinkDetector::new(config.blink.params())?,
            gesture: GestureComposer::new(config.gesture.params())?,
            selector: RegionSelector::new(config.regions.clone())?,
        };
        info!(
            "Tracker ready: {}x{} screen, {} regions, {:?} gaze, {} filter",
            tracker.screen_width,
            tracker.screen_height,
            tracker.selector.regions().len(),
            tracker.strategy,
            tracker.filter.name()
        );
        Ok(tracker)
    }

    /// Process one frame captured at `now` seconds.
    ///
    /// `None` or an empty frame means no face was detected: no state
    /// changes, no events, and the current selection is reported as is.
    pub fn process_frame(&mut self, frame: Option<&LandmarkFrame>, now: f64) -> FrameOutput {
        let Some(frame) = frame.filter(|frame| !frame.is_empty()) else {
            return FrameOutput {
                selection: self.selector.current_selection(),
                ..FrameOutput::default()
            };
        };

        if let Some(last) = self.last_face_at {
            if now - last > FILTER_RESET_AFTER_ABSENCE {
                debug!("Face back after {:.3}s, resetting {}", now - last, self.filter.name());
                self.filter.reset();
            }
        }
        self.last_face_at = Some(now);

        let gaze = self.strategy.estimate(frame).map(|raw| {
            let (x, y) = self.filter.apply(raw.x, raw.y);
            LandmarkPoint::new(x, y)
        });
        let screen_gaze =
            gaze.map(|point| normalized_to_screen(point.x, point.y, self.screen_width, self.screen_height));

        let ear = self.eye.ear(frame);
        let blink = self.blink.update(ear, now);
        let confirm = self.gesture.update(blink, now);

        if confirm.is_some() {
            match screen_gaze {
                Some(point) => {
                    self.selector.on_confirm(point);
                }
                None => debug!("Double blink without a gaze point, selection unchanged"),
            }
        }

        FrameOutput {
            gaze,
            screen_gaze,
            ear,
            blink,
            confirm,
            selection: self.selector.current_selection(),
        }
    }

    #[must_use]
    pub const fn current_selection(&self) -> Option<RegionId> {
        self.selector.current_selection()
    }

    #[must_use]
    pub const fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    #[must_use]
    pub const fn eye_state(&self) -> EyeState {
        self.blink.state()
    }

    #[must_use]
    pub const fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    #[must_use]
    pub const fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{IRIS_LANDMARK, RIGHT_EYE_LANDMARKS};

    /// 478-point frame with the iris at `gaze` and the right eye at `ear`
    fn frame(gaze: (f64, f64), ear: f64) -> LandmarkFrame {
        let mut points = vec![LandmarkPoint::new(0.5, 0.5); 478];
        let (cx, cy, width) = (0.4, 0.4, 0.1);
        let lid = ear * width / 2.0;
        let offsets = [
            (-width / 2.0, 0.0),
            (-0.02, -lid),
            (0.02, -lid),
            (width / 2.0, 0.0),
            (0.02, lid),
            (-0.02, lid),
        ];
        for (&index, (dx, dy)) in RIGHT_EYE_LANDMARKS.iter().zip(offsets) {
            points[index] = LandmarkPoint::new(cx + dx, cy + dy);
        }
        points[IRIS_LANDMARK] = LandmarkPoint::new(gaze.0, gaze.1);
        LandmarkFrame::new(points)
    }

    fn tracker() -> GazeTracker {
        GazeTracker::from_config(&Config::default()).unwrap()
    }

    fn smoothed_tracker() -> GazeTracker {
        let mut config = Config::default();
        config.gaze.filter = "moving_average".to_string();
        config.gaze.filter_window = 2;
        GazeTracker::from_config(&config).unwrap()
    }

    #[test]
    fn test_long_absence_resets_smoothing() {
        let mut tracker = smoothed_tracker();
        tracker.process_frame(Some(&frame((0.25, 0.5), 0.3)), 0.0);
        tracker.process_frame(None, 0.5);
        tracker.process_frame(None, 1.0);

        let output = tracker.process_frame(Some(&frame((0.75, 0.5), 0.3)), 1.5);
        assert_eq!(output.screen_gaze, Some(ScreenPoint::new(1440, 540)));
    }

    #[test]
    fn test_short_absence_keeps_smoothing() {
        let mut tracker = smoothed_tracker();
        tracker.process_frame(Some(&frame((0.25, 0.5), 0.3)), 0.0);
        tracker.process_frame(None, 0.2);

        let output = tracker.process_frame(Some(&frame((0.75, 0.5), 0.3)), 0.4);
        assert_eq!(output.screen_gaze, Some(ScreenPoint::new(960, 540)));
    }

    #[test]
    fn test_gaze_maps_to_screen() {
        let mut tracker = tracker();
        let output = tracker.process_frame(Some(&frame((0.5, 0.25), 0.3)), 0.0);
        assert_eq!(output.screen_gaze, Some(ScreenPoint::new(960, 270)));
        assert!((output.ear.unwrap() - 0.3).abs() < 1e-9);
        assert_eq!(output.selection, None);
    }

    #[test]
    fn test_missing_face_changes_nothing() {
        let mut tracker = tracker();
        tracker.process_frame(Some(&frame((0.5, 0.5), 0.1)), 0.0);
        assert!(matches!(tracker.eye_state(), EyeState::Closing { .. }));

        let output = tracker.process_frame(None, 0.1);
        assert_eq!(output, FrameOutput::default());
        let output = tracker.process_frame(Some(&LandmarkFrame::default()), 0.2);
        assert_eq!(output.gaze, None);
        assert!(matches!(tracker.eye_state(), EyeState::Closing { since } if since == 0.0));
    }

    #[test]
    fn test_double_blink_selects_gazed_region() {
        let mut tracker = tracker();
        // Box 2 spans x 650..=950, y 440..=640 on a 1920x1080 screen
        let gaze = (800.0 / 1920.0, 500.0 / 1080.0);
        let ears = [0.3, 0.1, 0.1, 0.3, 0.3, 0.1, 0.1, 0.3];

        let mut confirms = 0;
        for (i, ear) in ears.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let now = i as f64 * 0.1;
            let output = tracker.process_frame(Some(&frame(gaze, ear)), now);
            confirms += usize::from(output.confirm.is_some());
        }

        assert_eq!(confirms, 1);
        assert_eq!(tracker.current_selection(), Some(1));
        assert_eq!(tracker.gesture_state(), GestureState::Idle);
    }
}
