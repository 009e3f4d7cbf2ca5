//! Geometry utilities: eye-aspect-ratio and normalized-to-screen mapping.
//!
//! All landmark coordinates are normalized to the camera frame, `x` and `y`
//! nominally in `[0, 1]`. Points slightly outside that range occur at the
//! frame edges and are passed through untouched.

use crate::{
    constants::{EPSILON, EYE_CONTOUR_POINTS},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// A normalized 2D facial landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// Horizontal position, 0 at the left edge of the frame
    pub x: f64,
    /// Vertical position, 0 at the top edge of the frame
    pub y: f64,
}

impl LandmarkPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Absolute screen position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Six eye-outline points in fixed anatomical order:
/// outer corner, upper-outer, upper-inner, inner corner, lower-inner, lower-outer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeContour([LandmarkPoint; EYE_CONTOUR_POINTS]);

impl EyeContour {
    #[must_use]
    pub const fn new(points: [LandmarkPoint; EYE_CONTOUR_POINTS]) -> Self {
        Self(points)
    }

    #[must_use]
    pub const fn points(&self) -> &[LandmarkPoint; EYE_CONTOUR_POINTS] {
        &self.0
    }

    /// Eye-aspect-ratio of this contour.
    ///
    /// Returns `None` when the corners coincide, in which case the eye state
    /// is unknown for this frame.
    #[must_use]
    pub fn ear(&self) -> Option<f64> {
        let p = &self.0;
        let vertical_1 = p[1].distance(&p[5]);
        let vertical_2 = p[2].distance(&p[4]);
        let horizontal = p[0].distance(&p[3]);

        if !horizontal.is_finite() || horizontal < EPSILON {
            return None;
        }

        let ear = (vertical_1 + vertical_2) / (2.0 * horizontal);
        ear.is_finite().then_some(ear)
    }
}

impl TryFrom<&[LandmarkPoint]> for EyeContour {
    type Error = Error;

    fn try_from(points: &[LandmarkPoint]) -> Result<Self> {
        let array: [LandmarkPoint; EYE_CONTOUR_POINTS] =
            points.try_into().map_err(|_| Error::InvalidContour {
                expected: EYE_CONTOUR_POINTS,
                found: points.len(),
            })?;
        Ok(Self(array))
    }
}

/// Compute the eye-aspect-ratio from six eye-contour points.
///
/// EAR = (|p1 - p5| + |p2 - p4|) / (2 |p0 - p3|)
///
/// # Errors
///
/// Returns [`Error::InvalidContour`] if `points` does not hold exactly six
/// landmarks. A degenerate contour is not an error: it yields `Ok(None)`.
pub fn compute_ear(points: &[LandmarkPoint]) -> Result<Option<f64>> {
    Ok(EyeContour::try_from(points)?.ear())
}

/// Map a normalized coordinate to absolute screen pixels.
///
/// Linear scaling, truncated toward zero. No clamping is performed, so
/// inputs outside `[0, 1]` give off-screen pixels; pointer backends clamp.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // `as` saturates and maps NaN to 0
pub fn normalized_to_screen(x: f64, y: f64, screen_width: u32, screen_height: u32) -> ScreenPoint {
    let px = (x * f64::from(screen_width)).trunc() as i32;
    let py = (y * f64::from(screen_height)).trunc() as i32;
    ScreenPoint::new(px, py)
}
