//! Configuration management for the gaze selection application

use crate::{
    blink::BlinkParams,
    constants::{
        DEFAULT_EAR_THRESHOLD, DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MAX_BLINK_DURATION,
        DEFAULT_MIN_BLINK_DURATION, DEFAULT_MOVING_AVERAGE_WINDOW, DEFAULT_PAIRING_WINDOW,
        DEFAULT_REGION_HEIGHT, DEFAULT_REGION_WIDTH, DEFAULT_RESET_TIMEOUT, DEFAULT_SCREEN_HEIGHT,
        DEFAULT_SCREEN_WIDTH,
    },
    filters::{create_filter, GazeFilter},
    gesture::GestureParams,
    landmarks::{EyeSelection, GazeStrategy},
    regions::{Region, RegionSelector},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration, fixed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blink detection configuration
    pub blink: BlinkConfig,

    /// Double-blink gesture configuration
    pub gesture: GestureConfig,

    /// Screen geometry
    pub screen: ScreenConfig,

    /// Gaze estimation configuration
    pub gaze: GazeConfig,

    /// Pointer control configuration
    pub cursor: CursorConfig,

    /// Selectable regions, tested in this order
    pub regions: Vec<Region>,
}

/// Blink detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// EAR below which the eye counts as closed
    pub ear_threshold: f64,

    /// Shortest valid blink, in seconds
    pub min_duration: f64,

    /// Longest valid blink, in seconds
    pub max_duration: f64,

    /// Eye(s) used for EAR
    pub eye: EyeSelection,
}

/// Double-blink timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum gap between blinks of a pair, in seconds
    pub pairing_window: f64,

    /// Inactivity before a lone blink is discarded, in seconds
    pub reset_timeout: f64,
}

/// Screen size in pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

/// Gaze estimation and smoothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Landmarks used to estimate the gaze point
    pub strategy: GazeStrategy,

    /// Smoothing filter name (none, moving_average, median, exponential)
    pub filter: String,

    /// Window size for moving_average and median
    pub filter_window: usize,

    /// Alpha for exponential
    pub filter_alpha: f64,
}

/// Pointer control configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Move the system pointer to the gaze point
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blink: BlinkConfig::default(),
            gesture: GestureConfig::default(),
            screen: ScreenConfig::default(),
            gaze: GazeConfig::default(),
            cursor: CursorConfig::default(),
            regions: default_regions(),
        }
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            ear_threshold: DEFAULT_EAR_THRESHOLD,
            min_duration: DEFAULT_MIN_BLINK_DURATION,
            max_duration: DEFAULT_MAX_BLINK_DURATION,
            eye: EyeSelection::Right,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pairing_window: DEFAULT_PAIRING_WINDOW,
            reset_timeout: DEFAULT_RESET_TIMEOUT,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            strategy: GazeStrategy::PreferIris,
            filter: "none".to_string(),
            filter_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            filter_alpha: DEFAULT_EXPONENTIAL_ALPHA,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Four boxes in a row across the middle of a 1920x1080 screen
fn default_regions() -> Vec<Region> {
    [(200, 440), (650, 440), (1100, 440), (1550, 440)]
        .into_iter()
        .zip(0..)
        .map(|((x, y), id)| {
            Region::new(id, x, y, DEFAULT_REGION_WIDTH, DEFAULT_REGION_HEIGHT)
                .with_label(format!("Box {}", id + 1))
        })
        .collect()
}

impl BlinkConfig {
    #[must_use]
    pub const fn params(&self) -> BlinkParams {
        BlinkParams {
            ear_threshold: self.ear_threshold,
            min_duration: self.min_duration,
            max_duration: self.max_duration,
        }
    }
}

impl GestureConfig {
    #[must_use]
    pub const fn params(&self) -> GestureParams {
        GestureParams {
            pairing_window: self.pairing_window,
            reset_timeout: self.reset_timeout,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the text is not a valid configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Serialize configuration to YAML text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::Configuration(format!("Failed to serialize config: {e}")))
    }

    /// Filter spec string understood by [`create_filter`]
    #[must_use]
    pub fn filter_spec(&self) -> String {
        match self.gaze.filter.to_lowercase().as_str() {
            "moving_average" | "movingaverage" | "median" => {
                format!("{}:{}", self.gaze.filter, self.gaze.filter_window)
            }
            "exponential" => format!("{}:{}", self.gaze.filter, self.gaze.filter_alpha),
            _ => self.gaze.filter.clone(),
        }
    }

    /// Create the gaze filter from configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown filter or bad parameter.
    pub fn create_filter(&self) -> Result<Box<dyn GazeFilter>> {
        create_filter(&self.filter_spec())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.blink.params().validate()?;
        self.gesture.params().validate()?;

        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(Error::Configuration(
                "Screen width and height must be greater than 0".to_string(),
            ));
        }

        if self.regions.is_empty() {
            return Err(Error::Configuration(
                "At least one region must be configured".to_string(),
            ));
        }
        RegionSelector::new(self.regions.clone())?;

        self.create_filter()?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gaze Select Configuration

# Blink detection
blink:
  ear_threshold: 0.2
  min_duration: 0.1
  max_duration: 0.3
  eye: right            # right, left, or average

# Double-blink gesture
gesture:
  pairing_window: 1.0
  reset_timeout: 1.5

# Screen geometry (pixels)
screen:
  width: 1920
  height: 1080

# Gaze estimation
gaze:
  strategy: prefer_iris # iris, eye_corners, or prefer_iris
  filter: none          # none, moving_average, median, exponential
  filter_window: 5
  filter_alpha: 0.5

# Pointer control
cursor:
  enabled: true

# Selectable regions, tested top to bottom
regions:
  - { id: 0, label: "Box 1", x: 200, y: 440, width: 300, height: 200 }
  - { id: 1, label: "Box 2", x: 650, y: 440, width: 300, height: 200 }
  - { id: 2, label: "Box 3", x: 1100, y: 440, width: 300, height: 200 }
  - { id: 3, label: "Box 4", x: 1550, y: 440, width: 300, height: 200 }
"#;
