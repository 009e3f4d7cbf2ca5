//! Constants used throughout the application

/// Number of points in an eye contour used for EAR
pub const EYE_CONTOUR_POINTS: usize = 6;

/// Face-mesh indices of the right eye contour, in anatomical order:
/// outer corner, upper-outer, upper-inner, inner corner, lower-inner, lower-outer
pub const RIGHT_EYE_LANDMARKS: [usize; EYE_CONTOUR_POINTS] = [33, 160, 158, 133, 153, 144];

/// Face-mesh indices of the left eye contour, same anatomical order
pub const LEFT_EYE_LANDMARKS: [usize; EYE_CONTOUR_POINTS] = [362, 385, 387, 263, 373, 380];

/// Iris centre landmark, only present when the model refines iris landmarks
pub const IRIS_LANDMARK: usize = 473;

/// Eye corner and lid landmarks averaged when no iris landmark is available
pub const EYE_CORNER_LANDMARKS: [usize; 4] = [33, 133, 159, 145];

/// Default EAR below which the eye counts as closed
pub const DEFAULT_EAR_THRESHOLD: f64 = 0.2;

/// Default valid blink window, in seconds
pub const DEFAULT_MIN_BLINK_DURATION: f64 = 0.1;
pub const DEFAULT_MAX_BLINK_DURATION: f64 = 0.3;

/// Default double-blink timing, in seconds
pub const DEFAULT_PAIRING_WINDOW: f64 = 1.0;
pub const DEFAULT_RESET_TIMEOUT: f64 = 1.5;

/// Default screen size in pixels
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// Default size of a selectable region
pub const DEFAULT_REGION_WIDTH: i32 = 300;
pub const DEFAULT_REGION_HEIGHT: i32 = 200;

/// Default window sizes for gaze filters
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
pub const DEFAULT_MEDIAN_WINDOW: usize = 5;

/// Default exponential filter alpha
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Horizontal eye width below which EAR is undefined
pub const EPSILON: f64 = 1e-10;

/// Slack on blink duration bounds, in seconds, absorbing timestamp rounding
pub const TIMING_EPSILON: f64 = 1e-9;

/// Face absence, in seconds, after which gaze smoothing history is discarded
pub const FILTER_RESET_AFTER_ABSENCE: f64 = 1.0;
