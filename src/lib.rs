//! Gaze-driven pointer control with double-blink region selection.
//!
//! Facial landmarks from an external face-mesh model are turned into:
//! - a gaze point in screen pixels, every frame, for pointer movement
//! - an eye-aspect-ratio (EAR) signal, debounced into blink events
//! - double-blink confirm gestures that select one of several screen regions
//!
//! The pipeline per frame is landmarks → geometry → [`blink::BlinkDetector`]
//! → [`gesture::GestureComposer`] → [`regions::RegionSelector`], wired
//! together by [`tracker::GazeTracker`]. Missing faces, missing landmarks
//! and degenerate geometry are absorbed as "no update" so a single bad frame
//! never interrupts control.
//!
//! # Examples
//!
//! ## Blink and gesture state machines
//!
//! ```
//! use gaze_select::blink::{BlinkDetector, BlinkParams};
//! use gaze_select::gesture::{GestureComposer, GestureParams};
//!
//! # fn main() -> gaze_select::Result<()> {
//! let mut blinks = BlinkDetector::new(BlinkParams {
//!     ear_threshold: 0.2,
//!     min_duration: 0.1,
//!     max_duration: 0.3,
//! })?;
//! let mut gestures = GestureComposer::new(GestureParams {
//!     pairing_window: 1.0,
//!     reset_timeout: 1.5,
//! })?;
//!
//! let ears = [0.30, 0.15, 0.15, 0.30, 0.30, 0.15, 0.15, 0.30];
//! let mut confirmed = false;
//! for (i, ear) in ears.into_iter().enumerate() {
//!     let now = i as f64 * 0.1;
//!     let blink = blinks.update(Some(ear), now);
//!     confirmed |= gestures.update(blink, now).is_some();
//! }
//! assert!(confirmed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Full pipeline
//!
//! ```no_run
//! use gaze_select::{config::Config, source::{LandmarkSource, ReplaySource}, tracker::GazeTracker};
//!
//! # fn main() -> gaze_select::Result<()> {
//! let config = Config::from_file("gaze-select.yaml")?;
//! let mut tracker = GazeTracker::from_config(&config)?;
//! let mut source = ReplaySource::from_file("session.jsonl")?;
//!
//! while let Some(frame) = source.next_frame()? {
//!     let output = tracker.process_frame(frame.landmarks.as_ref(), frame.timestamp);
//!     if let Some(point) = output.screen_gaze {
//!         println!("gaze at ({}, {}), selection {:?}", point.x, point.y, output.selection);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Eye-aspect-ratio and coordinate mapping
pub mod geometry;

/// Landmark frames, gaze estimation and eye selection
pub mod landmarks;

/// Blink detection state machine
pub mod blink;

/// Double-blink gesture composition
pub mod gesture;

/// Selectable screen regions
pub mod regions;

/// Gaze smoothing filters
pub mod filters;

/// Per-frame pipeline
pub mod tracker;

/// Time sources
pub mod clock;

/// Landmark input streams
pub mod source;

/// Single-slot frame handoff between threads
pub mod frame_slot;

/// Pointer output, including the X11 backend
pub mod cursor_control;

/// Main application module
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
