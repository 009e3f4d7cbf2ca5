//! Per-frame facial landmarks and the measurements derived from them.
//!
//! A [`LandmarkFrame`] is the face-mesh output for one camera frame, indexed
//! by landmark number. Every lookup is optional: models without iris
//! refinement emit fewer points, and a missing point makes the derived
//! measurement absent for that frame rather than an error.

use crate::{
    constants::{EYE_CORNER_LANDMARKS, IRIS_LANDMARK, LEFT_EYE_LANDMARKS, RIGHT_EYE_LANDMARKS},
    geometry::{EyeContour, LandmarkPoint},
};
use serde::{Deserialize, Serialize};

/// Facial landmarks for a single detected face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    points: Vec<LandmarkPoint>,
}

impl LandmarkFrame {
    #[must_use]
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// Landmark at `index`, if the model produced it
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LandmarkPoint> {
        self.points.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gather the six contour points named by `indices`
    #[must_use]
    pub fn eye_contour(&self, indices: &[usize; 6]) -> Option<EyeContour> {
        let mut points = [LandmarkPoint::new(0.0, 0.0); 6];
        for (slot, &index) in points.iter_mut().zip(indices) {
            *slot = self.get(index)?;
        }
        Some(EyeContour::new(points))
    }

    /// Mean of the landmarks named by `indices`
    fn centroid(&self, indices: &[usize]) -> Option<LandmarkPoint> {
        if indices.is_empty() {
            return None;
        }
        let (mut sum_x, mut sum_y) = (0.0, 0.0);
        for &index in indices {
            let point = self.get(index)?;
            sum_x += point.x;
            sum_y += point.y;
        }
        #[allow(clippy::cast_precision_loss)] // at most a handful of indices
        let n = indices.len() as f64;
        Some(LandmarkPoint::new(sum_x / n, sum_y / n))
    }
}

/// How the gaze point is estimated from landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GazeStrategy {
    /// Iris centre landmark only
    Iris,
    /// Average of the eye corner and lid landmarks
    EyeCorners,
    /// Iris when the model provides it, eye corners otherwise
    #[default]
    PreferIris,
}

impl GazeStrategy {
    /// Normalized gaze point for this frame
    #[must_use]
    pub fn estimate(self, frame: &LandmarkFrame) -> Option<LandmarkPoint> {
        match self {
            Self::Iris => frame.get(IRIS_LANDMARK),
            Self::EyeCorners => frame.centroid(&EYE_CORNER_LANDMARKS),
            Self::PreferIris => frame
                .get(IRIS_LANDMARK)
                .or_else(|| frame.centroid(&EYE_CORNER_LANDMARKS)),
        }
    }
}

impl std::str::FromStr for GazeStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "iris" => Ok(Self::Iris),
            "eye_corners" | "eyecorners" | "corners" => Ok(Self::EyeCorners),
            "prefer_iris" | "preferiris" | "auto" => Ok(Self::PreferIris),
            _ => Err(crate::Error::Configuration(format!("Unknown gaze strategy: {s}"))),
        }
    }
}

/// Which eye feeds the blink detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeSelection {
    #[default]
    Right,
    Left,
    /// Mean EAR of both eyes; unknown unless both are measurable
    Average,
}

impl EyeSelection {
    /// EAR for the selected eye(s), `None` when the eye state is unknown
    #[must_use]
    pub fn ear(self, frame: &LandmarkFrame) -> Option<f64> {
        let right = || frame.eye_contour(&RIGHT_EYE_LANDMARKS).and_then(|c| c.ear());
        let left = || frame.eye_contour(&LEFT_EYE_LANDMARKS).and_then(|c| c.ear());
        match self {
            Self::Right => right(),
            Self::Left => left(),
            Self::Average => Some((right()? + left()?) / 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame where every landmark sits at (index / 1000, 0.5)
    fn frame_with(len: usize) -> LandmarkFrame {
        #[allow(clippy::cast_precision_loss)]
        let points = (0..len)
            .map(|i| LandmarkPoint::new(i as f64 / 1000.0, 0.5))
            .collect();
        LandmarkFrame::new(points)
    }

    #[test]
    fn test_prefer_iris_uses_iris_when_present() {
        let frame = frame_with(478);
        let gaze = GazeStrategy::PreferIris.estimate(&frame).unwrap();
        assert!((gaze.x - 0.473).abs() < 1e-12);
    }

    #[test]
    fn test_prefer_iris_falls_back_to_eye_corners() {
        let frame = frame_with(468);
        let gaze = GazeStrategy::PreferIris.estimate(&frame).unwrap();
        let expected = (33.0 + 133.0 + 159.0 + 145.0) / 4.0 / 1000.0;
        assert!((gaze.x - expected).abs() < 1e-12);
        assert!((gaze.y - 0.5).abs() < 1e-12);
        assert_eq!(GazeStrategy::Iris.estimate(&frame), None);
    }

    #[test]
    fn test_empty_frame_has_no_gaze() {
        let frame = LandmarkFrame::default();
        assert!(frame.is_empty());
        assert_eq!(GazeStrategy::PreferIris.estimate(&frame), None);
        assert_eq!(EyeSelection::Right.ear(&frame), None);
    }

    #[test]
    fn test_eye_contour_requires_all_points() {
        let frame = frame_with(200);
        assert!(frame.eye_contour(&RIGHT_EYE_LANDMARKS).is_some());
        assert!(frame.eye_contour(&LEFT_EYE_LANDMARKS).is_none());
        assert_eq!(EyeSelection::Average.ear(&frame), None);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("iris".parse::<GazeStrategy>().unwrap(), GazeStrategy::Iris);
        assert_eq!("corners".parse::<GazeStrategy>().unwrap(), GazeStrategy::EyeCorners);
        assert!("nose".parse::<GazeStrategy>().is_err());
    }
}
