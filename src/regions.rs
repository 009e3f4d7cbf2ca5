//! Selectable screen regions and the current selection.

use crate::{geometry::ScreenPoint, Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identity of a configured region
pub type RegionId = u32;

/// Axis-aligned screen rectangle that can become the active selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// Display name for overlays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    #[must_use]
    pub const fn new(id: RegionId, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            label: None,
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Point-in-rectangle test, inclusive on all four edges
    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        let right = i64::from(self.x) + i64::from(self.width);
        let bottom = i64::from(self.y) + i64::from(self.height);
        (i64::from(self.x)..=right).contains(&i64::from(point.x))
            && (i64::from(self.y)..=bottom).contains(&i64::from(point.y))
    }

    /// Label if configured, otherwise a name derived from the id
    #[must_use]
    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("Region {}", self.id))
    }
}

/// Resolves confirm gestures against the configured regions
#[derive(Debug, Clone)]
pub struct RegionSelector {
    regions: Vec<Region>,
    selection: Option<RegionId>,
}

impl RegionSelector {
    /// Build a selector over `regions`, tested in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if any region has a zero or negative
    /// size, or two regions share an id.
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(regions.len());
        for region in &regions {
            if region.width <= 0 || region.height <= 0 {
                return Err(Error::Configuration(format!(
                    "Region {} must have positive width and height, got {}x{}",
                    region.id, region.width, region.height
                )));
            }
            if !seen.insert(region.id) {
                return Err(Error::Configuration(format!("Duplicate region id {}", region.id)));
            }
        }

        Ok(Self {
            regions,
            selection: None,
        })
    }

    /// Apply a confirm gesture at `gaze`.
    ///
    /// The first region containing the point becomes the selection. A point
    /// outside every region leaves the selection as it was.
    pub fn on_confirm(&mut self, gaze: ScreenPoint) -> Option<RegionId> {
        match self.regions.iter().find(|region| region.contains(gaze)) {
            Some(region) => {
                info!("Selected {} at ({}, {})", region.display_name(), gaze.x, gaze.y);
                self.selection = Some(region.id);
            }
            None => debug!("Confirm at ({}, {}) outside all regions", gaze.x, gaze.y),
        }
        self.selection
    }

    #[must_use]
    pub const fn current_selection(&self) -> Option<RegionId> {
        self.selection
    }

    /// The selected region itself, for overlay rendering
    #[must_use]
    pub fn selected_region(&self) -> Option<&Region> {
        let id = self.selection?;
        self.regions.iter().find(|region| region.id == id)
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let region = Region::new(0, 100, 100, 50, 50);
        assert!(region.contains(ScreenPoint::new(100, 100)));
        assert!(region.contains(ScreenPoint::new(150, 150)));
        assert!(!region.contains(ScreenPoint::new(151, 150)));
        assert!(!region.contains(ScreenPoint::new(99, 120)));
    }

    #[test]
    fn test_confirm_selects_and_sticks() {
        let mut selector = RegionSelector::new(vec![Region::new(7, 100, 100, 50, 50)]).unwrap();
        assert_eq!(selector.current_selection(), None);

        assert_eq!(selector.on_confirm(ScreenPoint::new(120, 120)), Some(7));
        assert_eq!(selector.on_confirm(ScreenPoint::new(500, 500)), Some(7));
        assert_eq!(selector.current_selection(), Some(7));
    }

    #[test]
    fn test_first_matching_region_wins() {
        let mut selector = RegionSelector::new(vec![
            Region::new(1, 0, 0, 200, 200),
            Region::new(2, 100, 100, 200, 200),
        ])
        .unwrap();
        assert_eq!(selector.on_confirm(ScreenPoint::new(150, 150)), Some(1));
        assert_eq!(selector.on_confirm(ScreenPoint::new(250, 250)), Some(2));
        assert_eq!(selector.selected_region().map(|r| r.id), Some(2));
    }

    #[test]
    fn test_malformed_regions_rejected() {
        assert!(RegionSelector::new(vec![Region::new(0, 0, 0, 0, 10)]).is_err());
        assert!(RegionSelector::new(vec![Region::new(0, 0, 0, 10, -5)]).is_err());
        assert!(RegionSelector::new(vec![
            Region::new(3, 0, 0, 10, 10),
            Region::new(3, 20, 20, 10, 10),
        ])
        .is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Region::new(2, 0, 0, 1, 1).display_name(), "Region 2");
        assert_eq!(Region::new(2, 0, 0, 1, 1).with_label("Box 3").display_name(), "Box 3");
    }
}
