//! Main application module: drives landmark frames through the tracker.

use crate::{
    config::Config,
    cursor_control::PointerSink,
    error::{Error, Result},
    frame_slot::FrameSlot,
    regions::{Region, RegionId},
    source::{LandmarkSource, TimedFrame},
    tracker::{FrameOutput, GazeTracker},
};
use log::{info, warn};
use std::thread;

/// Counters reported when a run ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames processed
    pub frames: u64,
    /// Frames without a detected face
    pub frames_without_face: u64,
    pub blinks: u64,
    pub confirms: u64,
    /// Times the highlighted region changed
    pub selection_changes: u64,
    /// Frames replaced in the handoff slot before processing
    pub dropped_frames: u64,
    /// Selection when the run ended
    pub final_selection: Option<RegionId>,
}

/// Main application struct
pub struct GazeSelectApp {
    tracker: GazeTracker,
    pointer: Option<Box<dyn PointerSink>>,
    last_selection: Option<RegionId>,
    stats: RunStats,
}

impl GazeSelectApp {
    /// Create the application
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the configuration is invalid.
    pub fn new(config: &Config, pointer: Option<Box<dyn PointerSink>>) -> Result<Self> {
        info!("Initializing gaze selection application");

        if let Some(sink) = &pointer {
            let (width, height) = sink.screen_size();
            if (width, height) != (config.screen.width, config.screen.height) {
                warn!(
                    "Pointer screen is {}x{} but configuration says {}x{}",
                    width, height, config.screen.width, config.screen.height
                );
            }
        }

        Ok(Self {
            tracker: GazeTracker::from_config(config)?,
            pointer,
            last_selection: None,
            stats: RunStats::default(),
        })
    }

    /// Process one frame: update the tracker, move the pointer, report changes.
    ///
    /// Pointer failures are logged and never interrupt processing.
    pub fn step(&mut self, frame: &TimedFrame) -> FrameOutput {
        let output = self
            .tracker
            .process_frame(frame.landmarks.as_ref(), frame.timestamp);

        self.stats.frames += 1;
        if frame.landmarks.is_none() {
            self.stats.frames_without_face += 1;
        }
        if output.blink.is_some() {
            self.stats.blinks += 1;
        }
        if output.confirm.is_some() {
            self.stats.confirms += 1;
        }

        if let (Some(pointer), Some(point)) = (self.pointer.as_mut(), output.screen_gaze) {
            if let Err(e) = pointer.move_to(point) {
                warn!("Failed to move pointer: {}", e);
            }
        }

        if output.selection != self.last_selection {
            let name = self
                .tracker
                .selector()
                .selected_region()
                .map_or_else(|| "nothing".to_string(), Region::display_name);
            info!(
                "Selection changed {:?} -> {:?}, highlighting {}",
                self.last_selection, output.selection, name
            );
            self.last_selection = output.selection;
            self.stats.selection_changes += 1;
        }

        output
    }

    /// Process every frame from `source` in order on the current thread
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn run<S: LandmarkSource>(&mut self, mut source: S) -> Result<RunStats> {
        info!("Starting frame loop");
        while let Some(frame) = source.next_frame()? {
            self.step(&frame);
        }
        Ok(self.finish())
    }

    /// Read frames on a capture thread and process the latest one available.
    ///
    /// Frames that arrive while the previous one is still being processed
    /// are dropped rather than queued.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or the capture thread panics.
    pub fn run_threaded<S: LandmarkSource>(&mut self, mut source: S) -> Result<RunStats> {
        info!("Starting threaded frame loop");
        let slot = FrameSlot::new();

        let capture_result = thread::scope(|scope| {
            let capture = scope.spawn(|| {
                let result = loop {
                    match source.next_frame() {
                        Ok(Some(frame)) => {
                            slot.publish(frame);
                        }
                        Ok(None) => break Ok(()),
                        Err(e) => break Err(e),
                    }
                };
                slot.close();
                result
            });

            while let Some(frame) = slot.take() {
                self.step(&frame);
            }

            capture
                .join()
                .map_err(|_| Error::Capture("capture thread panicked".to_string()))
        });

        capture_result??;
        self.stats.dropped_frames = slot.dropped();
        Ok(self.finish())
    }

    fn finish(&mut self) -> RunStats {
        self.stats.final_selection = self.tracker.current_selection();
        info!(
            "Frame loop finished: {} frames, {} blinks, {} confirms, {} dropped",
            self.stats.frames, self.stats.blinks, self.stats.confirms, self.stats.dropped_frames
        );
        self.stats
    }

    #[must_use]
    pub const fn tracker(&self) -> &GazeTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn stats(&self) -> RunStats {
        self.stats
    }
}
