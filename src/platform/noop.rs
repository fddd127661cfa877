//! Dry-run collaborators: log every action instead of simulating input.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::Result;
use crate::model::MouseButton;
use crate::platform::{Clock, InputDriver, ScreenLocator, TextInjector};

/// Logging [`InputDriver`] that tracks a virtual cursor so relative moves
/// still resolve to meaningful coordinates in dry-run output.
#[derive(Default)]
pub struct NoopDriver {
    position: (i32, i32),
}

impl InputDriver for NoopDriver {
    fn cursor_position(&mut self) -> Result<(i32, i32)> {
        Ok(self.position)
    }

    fn move_cursor(&mut self, x: i32, y: i32, duration: Duration) -> Result<()> {
        info!(target: "input_simulation::platform", x, y, ?duration, "DRY-RUN move_cursor");
        self.position = (x, y);
        Ok(())
    }

    fn click(&mut self, button: MouseButton, x: i32, y: i32, interval: Duration) -> Result<()> {
        info!(target: "input_simulation::platform", ?button, x, y, ?interval, "DRY-RUN click");
        self.position = (x, y);
        Ok(())
    }

    fn press_key(&mut self, key: &str, presses: u32, interval: Duration) -> Result<()> {
        info!(target: "input_simulation::platform", key, presses, ?interval, "DRY-RUN press_key");
        Ok(())
    }

    fn press_chord(&mut self, keys: &[String]) -> Result<()> {
        info!(target: "input_simulation::platform", ?keys, "DRY-RUN press_chord");
        Ok(())
    }
}

/// Logging [`ScreenLocator`] that reports every template at (0, 0) so dry
/// runs never abort on image lookups.
pub struct NoopLocator;

impl ScreenLocator for NoopLocator {
    fn locate_center(
        &mut self,
        image: &Path,
        confidence: f64,
        grayscale: bool,
    ) -> Result<Option<(i32, i32)>> {
        info!(
            target: "input_simulation::platform",
            image = %image.display(),
            confidence,
            grayscale,
            "DRY-RUN locate_center"
        );
        Ok(Some((0, 0)))
    }
}

/// Logging [`TextInjector`].
pub struct NoopInjector;

impl TextInjector for NoopInjector {
    fn paste_text(&mut self, text: &str) -> Result<()> {
        info!(target: "input_simulation::platform", %text, "DRY-RUN paste_text");
        Ok(())
    }

    fn stream_text(&mut self, text: &str, interval: Duration) -> Result<()> {
        info!(target: "input_simulation::platform", %text, ?interval, "DRY-RUN stream_text");
        Ok(())
    }

    fn press_enter(&mut self) -> Result<()> {
        info!(target: "input_simulation::platform", "DRY-RUN press_enter");
        Ok(())
    }
}

/// [`Clock`] that logs instead of blocking, so dry runs finish instantly.
pub struct NoopClock;

impl Clock for NoopClock {
    fn sleep(&mut self, duration: Duration) {
        info!(target: "input_simulation::platform", ?duration, "DRY-RUN sleep");
    }
}
