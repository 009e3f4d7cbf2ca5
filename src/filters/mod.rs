//! Smoothing filters for the normalized gaze point.
//!
//! Raw iris positions jitter from frame to frame. A filter can be placed
//! between gaze estimation and screen mapping; the default passes values
//! through unchanged.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Median filter for outlier rejection
pub mod median;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{
    constants::{DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MEDIAN_WINDOW, DEFAULT_MOVING_AVERAGE_WINDOW},
    Error, Result,
};

/// Trait for all gaze filters
pub trait GazeFilter: Send + Sync {
    /// Apply filter to a normalized gaze point
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl GazeFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a gaze filter from a spec string.
///
/// Accepts a bare name (`none`, `moving_average`, `median`, `exponential`)
/// or a name with one parameter, e.g. `median:7` or `exponential:0.3`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] for an unknown name or an invalid parameter.
pub fn create_filter(spec: &str) -> Result<Box<dyn GazeFilter>> {
    let lowered = spec.to_lowercase();
    let (name, param) = match lowered.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (lowered.as_str(), None),
    };

    match name {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => {
            let window = parse_param(param, DEFAULT_MOVING_AVERAGE_WINDOW, spec)?;
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)?))
        }
        "median" => {
            let window = parse_param(param, DEFAULT_MEDIAN_WINDOW, spec)?;
            Ok(Box::new(median::MedianFilter::new(window)?))
        }
        "exponential" => {
            let alpha = parse_param(param, DEFAULT_EXPONENTIAL_ALPHA, spec)?;
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)?))
        }
        _ => Err(Error::Configuration(format!("Unknown filter type: {spec}"))),
    }
}

fn parse_param<T: std::str::FromStr>(param: Option<&str>, default: T, spec: &str) -> Result<T> {
    match param {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Configuration(format!("Invalid filter parameter in '{spec}'"))),
    }
}
