//! Double-blink gesture composition.
//!
//! A first blink arms the composer; a second blink within the pairing window
//! emits a single [`ConfirmEvent`] and disarms it. An armed composer that
//! sees no qualifying second blink before the reset timeout falls back to
//! idle and the lone blink is discarded as noise.

use crate::{blink::BlinkCompleted, Error, Result};
use log::{debug, info};

/// A recognized double-blink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfirmEvent {
    /// Time of the second blink, in seconds
    pub timestamp: f64,
}

/// Composer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    /// First blink accepted at `first_blink_at`
    AwaitingSecondBlink { first_blink_at: f64 },
}

/// Timing parameters for double-blink recognition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureParams {
    /// Maximum gap between the two blinks, in seconds
    pub pairing_window: f64,
    /// Inactivity after which a pending first blink is dropped, in seconds
    pub reset_timeout: f64,
}

impl GestureParams {
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the pairing window is not positive
    /// or the reset timeout is shorter than the pairing window.
    pub fn validate(&self) -> Result<()> {
        if !self.pairing_window.is_finite() || self.pairing_window <= 0.0 {
            return Err(Error::Configuration(
                "Pairing window must be greater than 0".to_string(),
            ));
        }
        if !self.reset_timeout.is_finite() || self.reset_timeout < self.pairing_window {
            return Err(Error::Configuration(
                "Reset timeout must not be shorter than the pairing window".to_string(),
            ));
        }
        Ok(())
    }
}

/// Turns blink events into confirm gestures
#[derive(Debug, Clone)]
pub struct GestureComposer {
    params: GestureParams,
    state: GestureState,
}

impl GestureComposer {
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `params` fail validation.
    pub fn new(params: GestureParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: GestureState::Idle,
        })
    }

    /// Advance the composer to `now`, consuming this frame's blink if any.
    ///
    /// The reset timeout is applied before the blink is considered, so a
    /// blink arriving after an expired first blink starts a new gesture.
    pub fn update(&mut self, blink: Option<BlinkCompleted>, now: f64) -> Option<ConfirmEvent> {
        if let GestureState::AwaitingSecondBlink { first_blink_at } = self.state {
            if now - first_blink_at > self.params.reset_timeout {
                debug!("Pending blink from {first_blink_at:.3}s timed out");
                self.state = GestureState::Idle;
            }
        }

        let blink = blink?;
        match self.state {
            GestureState::Idle => {
                debug!("First blink at {:.3}s, awaiting second", blink.timestamp);
                self.state = GestureState::AwaitingSecondBlink {
                    first_blink_at: blink.timestamp,
                };
                None
            }
            GestureState::AwaitingSecondBlink { first_blink_at } => {
                let gap = blink.timestamp - first_blink_at;
                if gap <= self.params.pairing_window {
                    info!("Double blink detected at {:.3}s", blink.timestamp);
                    self.state = GestureState::Idle;
                    Some(ConfirmEvent {
                        timestamp: blink.timestamp,
                    })
                } else {
                    // Too late to pair, too early to restart: stays pending until the timeout
                    debug!("Second blink {gap:.3}s after first, outside pairing window");
                    None
                }
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub const fn params(&self) -> &GestureParams {
        &self.params
    }
}
