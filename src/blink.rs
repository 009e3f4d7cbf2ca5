//! Blink detection from a per-frame eye-aspect-ratio signal.
//!
//! The detector is a two-state machine. It moves to `Closing` when the EAR
//! drops below the threshold and back to `Open` when it recovers. A blink is
//! reported on reopening only if the eye stayed closed for a duration inside
//! the configured window: shorter closures are treated as noise, longer ones
//! as a deliberate rest.

use crate::{constants::TIMING_EPSILON, Error, Result};
use log::{debug, info};

/// A recognized blink, stamped with the time the eye reopened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkCompleted {
    /// Time of reopening, in seconds
    pub timestamp: f64,
    /// How long the eye was closed, in seconds
    pub duration: f64,
}

/// Eye state tracked across frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EyeState {
    Open,
    /// Closure in progress since the given timestamp
    Closing { since: f64 },
}

/// Timing and threshold parameters for blink recognition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkParams {
    /// EAR strictly below this counts as closed
    pub ear_threshold: f64,
    /// Shortest closure accepted as a blink, in seconds
    pub min_duration: f64,
    /// Longest closure accepted as a blink, in seconds
    pub max_duration: f64,
}

impl BlinkParams {
    /// Check the parameters describe a usable blink window
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the threshold is not a positive
    /// finite number or the duration window is empty or negative.
    pub fn validate(&self) -> Result<()> {
        if !self.ear_threshold.is_finite() || self.ear_threshold <= 0.0 {
            return Err(Error::Configuration(
                "EAR threshold must be a positive number".to_string(),
            ));
        }
        if !self.min_duration.is_finite() || self.min_duration < 0.0 {
            return Err(Error::Configuration(
                "Minimum blink duration must be non-negative".to_string(),
            ));
        }
        if !self.max_duration.is_finite() || self.max_duration < self.min_duration {
            return Err(Error::Configuration(
                "Maximum blink duration must not be less than the minimum".to_string(),
            ));
        }
        Ok(())
    }
}

/// Debounces the EAR signal into discrete blink events
#[derive(Debug, Clone)]
pub struct BlinkDetector {
    params: BlinkParams,
    state: EyeState,
}

impl BlinkDetector {
    /// Create a detector with no closure in progress
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `params` fail validation.
    pub fn new(params: BlinkParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: EyeState::Open,
        })
    }

    /// Feed one frame's EAR.
    ///
    /// `None` means the eye state is unknown for this frame; the detector
    /// keeps its current state so missing data never closes or reopens it.
    pub fn update(&mut self, ear: Option<f64>, now: f64) -> Option<BlinkCompleted> {
        let ear = ear?;
        let closed = ear < self.params.ear_threshold;

        match (self.state, closed) {
            (EyeState::Open, true) => {
                debug!("Eye closed at {now:.3}s (EAR {ear:.3})");
                self.state = EyeState::Closing { since: now };
                None
            }
            (EyeState::Closing { since }, false) => {
                self.state = EyeState::Open;
                let duration = now - since;
                if duration >= self.params.min_duration - TIMING_EPSILON
                    && duration <= self.params.max_duration + TIMING_EPSILON
                {
                    info!("Blink detected at {now:.3}s ({duration:.3}s)");
                    Some(BlinkCompleted {
                        timestamp: now,
                        duration,
                    })
                } else {
                    debug!("Closure of {duration:.3}s outside blink window, ignored");
                    None
                }
            }
            _ => None,
        }
    }

    /// Current eye state
    #[must_use]
    pub const fn state(&self) -> EyeState {
        self.state
    }

    #[must_use]
    pub const fn params(&self) -> &BlinkParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> BlinkDetector {
        BlinkDetector::new(BlinkParams {
            ear_threshold: 0.2,
            min_duration: 0.1,
            max_duration: 0.3,
        })
        .unwrap()
    }

    #[test]
    fn test_single_blink() {
        let mut detector = detector();
        assert_eq!(detector.update(Some(0.30), 0.0), None);
        assert_eq!(detector.update(Some(0.15), 0.1), None);
        assert_eq!(detector.state(), EyeState::Closing { since: 0.1 });
        assert_eq!(detector.update(Some(0.15), 0.2), None);

        let blink = detector.update(Some(0.30), 0.3).unwrap();
        assert!((blink.timestamp - 0.3).abs() < 1e-9);
        assert!((blink.duration - 0.2).abs() < 1e-9);
        assert_eq!(detector.state(), EyeState::Open);
    }

    #[test]
    fn test_twitch_and_rest_are_rejected() {
        let mut detector = detector();

        // Too short
        detector.update(Some(0.1), 1.0);
        assert_eq!(detector.update(Some(0.3), 1.05), None);
        assert_eq!(detector.state(), EyeState::Open);

        // Too long
        detector.update(Some(0.1), 2.0);
        detector.update(Some(0.1), 2.2);
        assert_eq!(detector.update(Some(0.3), 2.5), None);
        assert_eq!(detector.state(), EyeState::Open);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut detector = detector();
        detector.update(Some(0.2), 0.0);
        assert_eq!(detector.state(), EyeState::Open);
    }

    #[test]
    fn test_unknown_ear_holds_state() {
        let mut detector = detector();
        detector.update(Some(0.1), 0.0);
        assert_eq!(detector.update(None, 0.1), None);
        assert_eq!(detector.state(), EyeState::Closing { since: 0.0 });

        assert!(detector.update(Some(0.3), 0.2).is_some());
        assert_eq!(detector.update(None, 0.3), None);
        assert_eq!(detector.state(), EyeState::Open);
    }

    /// Close at `closed`, reopen at `opened`, report whether a blink fired
    fn blink_between(closed: f64, opened: f64) -> bool {
        let mut detector = detector();
        detector.update(Some(0.1), closed);
        detector.update(Some(0.3), opened).is_some()
    }

    #[test]
    fn test_duration_bounds_are_inclusive_at_any_offset() {
        // 0.1s and 0.3s closures land on either side of the exact bound
        // depending on where they start.
        for (closed, opened) in [(0.1, 0.2), (0.2, 0.3), (0.7, 0.8), (2.3, 2.4)] {
            assert!(blink_between(closed, opened), "min bound {closed} -> {opened}");
        }
        for (closed, opened) in [(0.0, 0.3), (0.1, 0.4), (0.6, 0.9), (1.7, 2.0)] {
            assert!(blink_between(closed, opened), "max bound {closed} -> {opened}");
        }
    }

    #[test]
    fn test_durations_just_outside_bounds_are_rejected() {
        assert!(!blink_between(0.1, 0.199));
        assert!(!blink_between(0.1, 0.401));
    }

    #[test]
    fn test_invalid_params() {
        let base = BlinkParams {
            ear_threshold: 0.2,
            min_duration: 0.1,
            max_duration: 0.3,
        };
        assert!(BlinkDetector::new(BlinkParams { ear_threshold: 0.0, ..base }).is_err());
        assert!(BlinkDetector::new(BlinkParams { ear_threshold: f64::NAN, ..base }).is_err());
        assert!(BlinkDetector::new(BlinkParams { min_duration: -0.1, ..base }).is_err());
        assert!(BlinkDetector::new(BlinkParams { max_duration: 0.05, ..base }).is_err());
    }
}
