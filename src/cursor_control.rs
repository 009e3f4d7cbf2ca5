//! Pointer output.
//!
//! The tracker reports unclamped screen coordinates; every [`PointerSink`]
//! clamps to the visible screen before moving the pointer. The X11 backend
//! warps the core pointer through `x11rb`.

use crate::{
    error::{Error, Result},
    geometry::ScreenPoint,
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt, Screen},
    rust_connection::RustConnection,
};

/// Destination for the per-frame gaze position
pub trait PointerSink: Send {
    /// Move the pointer to `point`, clamped to the screen
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorControl`] if the backend rejects the move.
    fn move_to(&mut self, point: ScreenPoint) -> Result<()>;

    /// Screen size in pixels
    fn screen_size(&self) -> (u32, u32);
}

/// Clamp a point to `0..width` by `0..height`
#[must_use]
pub fn clamp_to_screen(point: ScreenPoint, width: u32, height: u32) -> ScreenPoint {
    let max_x = i32::try_from(width.saturating_sub(1)).unwrap_or(i32::MAX);
    let max_y = i32::try_from(height.saturating_sub(1)).unwrap_or(i32::MAX);
    ScreenPoint::new(point.x.clamp(0, max_x), point.y.clamp(0, max_y))
}

/// Cursor control implementation for X11
pub struct CursorController {
    connection: RustConnection,
    screen: Screen,
    last_position: Option<ScreenPoint>,
}

impl CursorController {
    /// Connect to the X11 display named by `$DISPLAY`
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorControl`] if no display is reachable.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::CursorControl("Failed to get screen".to_string()))?
            .clone();

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen.width_in_pixels, screen.height_in_pixels
        );

        Ok(Self {
            connection,
            screen,
            last_position: None,
        })
    }
}

impl PointerSink for CursorController {
    fn move_to(&mut self, point: ScreenPoint) -> Result<()> {
        let (width, height) = self.screen_size();
        let target = clamp_to_screen(point, width, height);
        if self.last_position == Some(target) {
            return Ok(());
        }

        // X11 screens are at most u16 pixels wide, so the clamped values fit
        let x = i16::try_from(target.x).unwrap_or(i16::MAX);
        let y = i16::try_from(target.y).unwrap_or(i16::MAX);
        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::CursorControl(format!("Failed to warp pointer: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| Error::CursorControl(format!("Failed to flush connection: {e}")))?;

        self.last_position = Some(target);
        Ok(())
    }

    fn screen_size(&self) -> (u32, u32) {
        (
            u32::from(self.screen.width_in_pixels),
            u32::from(self.screen.height_in_pixels),
        )
    }
}
