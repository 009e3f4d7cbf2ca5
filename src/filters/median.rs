use super::GazeFilter;
use crate::{Error, Result};
use std::collections::VecDeque;

/// Median filter, robust against single-frame landmark glitches
pub struct MedianFilter {
    window_size: usize,
    x_buffer: VecDeque<f64>,
    y_buffer: VecDeque<f64>,
}

impl MedianFilter {
    /// # Errors
    ///
    /// Returns an error unless `window_size` is odd and greater than zero.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 || window_size % 2 == 0 {
            return Err(Error::Configuration(
                "Median filter window size must be odd and greater than 0".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            x_buffer: VecDeque::with_capacity(window_size),
            y_buffer: VecDeque::with_capacity(window_size),
        })
    }

    fn calculate_median(values: &VecDeque<f64>) -> f64 {
        let mut sorted: Vec<f64> = values.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        if len == 0 {
            0.0
        } else if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        } else {
            sorted[len / 2]
        }
    }
}

impl GazeFilter for MedianFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        if self.x_buffer.len() >= self.window_size {
            self.x_buffer.pop_front();
            self.y_buffer.pop_front();
        }

        self.x_buffer.push_back(x);
        self.y_buffer.push_back(y);

        (
            Self::calculate_median(&self.x_buffer),
            Self::calculate_median(&self.y_buffer),
        )
    }

    fn reset(&mut self) {
        self.x_buffer.clear();
        self.y_buffer.clear();
    }

    fn name(&self) -> &str {
        "MedianFilter"
    }
}
