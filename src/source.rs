//! Landmark sources feeding the tracker.
//!
//! The face-mesh model runs outside this crate. Its output arrives as JSON
//! Lines, one record per camera frame:
//!
//! ```text
//! {"t": 12.533, "landmarks": [{"x": 0.41, "y": 0.38}, ...]}
//! {"t": 12.566, "landmarks": null}
//! ```
//!
//! `t` is optional; records without it are stamped from the source clock on
//! arrival. A `null` or empty landmark list means no face was detected.

use crate::{
    clock::{Clock, MonotonicClock},
    landmarks::LandmarkFrame,
    Error, Result,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, Stdin},
    path::Path,
};

/// One camera frame's landmarks with its capture time
#[derive(Debug, Clone, PartialEq)]
pub struct TimedFrame {
    /// Capture time, in seconds
    pub timestamp: f64,
    /// `None` when no face was detected
    pub landmarks: Option<LandmarkFrame>,
}

/// Producer of landmark frames
pub trait LandmarkSource: Send {
    /// Next frame, or `Ok(None)` once the source is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying stream fails.
    fn next_frame(&mut self) -> Result<Option<TimedFrame>>;
}

/// Wire format of a single landmark record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(default)]
    pub landmarks: Option<LandmarkFrame>,
}

impl LandmarkRecord {
    /// Decode one JSON line
    ///
    /// # Errors
    ///
    /// Returns [`Error::LandmarkFormat`] if the line is not a valid record.
    pub fn parse(line: &str) -> Result<Self> {
        let record: Self =
            serde_json::from_str(line).map_err(|e| Error::LandmarkFormat(e.to_string()))?;
        if let Some(t) = record.t {
            if !t.is_finite() {
                return Err(Error::LandmarkFormat(format!("Non-finite timestamp {t}")));
            }
        }
        Ok(record)
    }

    /// Encode as one JSON line
    ///
    /// # Errors
    ///
    /// Returns [`Error::LandmarkFormat`] if serialization fails.
    pub fn to_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::LandmarkFormat(e.to_string()))
    }
}

/// Reads JSON Lines landmark records from a file or pipe
pub struct ReplaySource<R, C> {
    reader: R,
    clock: C,
    line: Vec<u8>,
    line_number: usize,
    skipped: usize,
}

impl ReplaySource<BufReader<File>, MonotonicClock> {
    /// Open a recorded landmark file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), MonotonicClock::new()))
    }
}

impl ReplaySource<BufReader<Stdin>, MonotonicClock> {
    /// Stream records piped from a live landmark model
    #[must_use]
    pub fn from_stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()), MonotonicClock::new())
    }
}

impl<R: BufRead, C: Clock> ReplaySource<R, C> {
    pub fn new(reader: R, clock: C) -> Self {
        Self {
            reader,
            clock,
            line: Vec::new(),
            line_number: 0,
            skipped: 0,
        }
    }

    /// Number of malformed records skipped so far
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead + Send, C: Clock> LandmarkSource for ReplaySource<R, C> {
    fn next_frame(&mut self) -> Result<Option<TimedFrame>> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                debug!("Landmark source exhausted after {} lines", self.line_number);
                return Ok(None);
            }
            self.line_number += 1;

            let text = match std::str::from_utf8(&self.line) {
                Ok(text) => text,
                Err(e) => {
                    self.skipped += 1;
                    warn!("Skipping landmark record on line {}: {}", self.line_number, e);
                    continue;
                }
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            match LandmarkRecord::parse(trimmed) {
                Ok(record) => {
                    return Ok(Some(TimedFrame {
                        timestamp: record.t.unwrap_or_else(|| self.clock.now()),
                        landmarks: record.landmarks.filter(|frame| !frame.is_empty()),
                    }));
                }
                Err(e) => {
                    self.skipped += 1;
                    warn!("Skipping landmark record on line {}: {}", self.line_number, e);
                }
            }
        }
    }
}
