use super::GazeFilter;
use crate::{Error, Result};
use std::collections::VecDeque;

/// Moving average filter
pub struct MovingAverageFilter {
    window_size: usize,
    x_buffer: VecDeque<f64>,
    y_buffer: VecDeque<f64>,
}

impl MovingAverageFilter {
    /// # Errors
    ///
    /// Returns an error if `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::Configuration(
                "Window size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            x_buffer: VecDeque::with_capacity(window_size),
            y_buffer: VecDeque::with_capacity(window_size),
        })
    }
}

impl GazeFilter for MovingAverageFilter {
    #[allow(clippy::cast_precision_loss)]
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        if self.x_buffer.len() >= self.window_size {
            self.x_buffer.pop_front();
            self.y_buffer.pop_front();
        }

        self.x_buffer.push_back(x);
        self.y_buffer.push_back(y);

        let n = self.x_buffer.len() as f64;
        let x_avg = self.x_buffer.iter().sum::<f64>() / n;
        let y_avg = self.y_buffer.iter().sum::<f64>() / n;

        (x_avg, y_avg)
    }

    fn reset(&mut self) {
        self.x_buffer.clear();
        self.y_buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average() {
        let mut filter = MovingAverageFilter::new(3).unwrap();

        assert_eq!(filter.apply(0.1, 0.2), (0.1, 0.2));

        let (x2, y2) = filter.apply(0.3, 0.4);
        assert!((x2 - 0.2).abs() < 1e-12);
        assert!((y2 - 0.3).abs() < 1e-12);

        filter.apply(0.5, 0.6);

        // Window is full, oldest value should be dropped
        let (x4, y4) = filter.apply(0.7, 0.8);
        assert!((x4 - 0.5).abs() < 1e-12);
        assert!((y4 - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(MovingAverageFilter::new(0).is_err());
    }
}
