/*!
Platform boundary for input-simulation.

The execution engine never touches the OS directly; it drives these four
collaborator traits:
- `InputDriver`: cursor queries, eased moves, clicks, key presses.
- `ScreenLocator`: find a template image's center on the live screen.
- `TextInjector`: deliver typed text atomically or one character at a time.
- `Clock`: blocking sleeps.

Production implementations (`EnigoDriver`, `TemplateLocator`,
`EnigoInjector`, `SystemClock`) live in the submodules; the `Noop*` family
logs instead of simulating and backs `--dry-run`.
*/

pub mod enigo_driver;
pub mod injector;
pub mod locator;
pub mod noop;

pub use enigo_driver::EnigoDriver;
pub use injector::EnigoInjector;
pub use locator::TemplateLocator;
pub use noop::{NoopClock, NoopDriver, NoopInjector, NoopLocator};

use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::model::MouseButton;

/// Pointer and keyboard injection primitives.
pub trait InputDriver {
    /// Current cursor position in screen coordinates.
    fn cursor_position(&mut self) -> Result<(i32, i32)>;

    /// Move the cursor to `(x, y)`. A non-zero duration animates the move
    /// along an eased path; zero moves instantly.
    fn move_cursor(&mut self, x: i32, y: i32, duration: Duration) -> Result<()>;

    /// Click at `(x, y)`: position the cursor, then issue the button's
    /// click count with `interval` between consecutive presses.
    fn click(&mut self, button: MouseButton, x: i32, y: i32, interval: Duration) -> Result<()>;

    /// Press a single key `presses` times with `interval` between presses.
    fn press_key(&mut self, key: &str, presses: u32, interval: Duration) -> Result<()>;

    /// Press a chord once: keys go down in order and release in reverse.
    fn press_chord(&mut self, keys: &[String]) -> Result<()>;
}

/// Finds a template image on the current screen contents.
pub trait ScreenLocator {
    /// Center of the best on-screen match scoring at least `confidence`,
    /// or `Ok(None)` when the image is not currently visible.
    fn locate_center(
        &mut self,
        image: &Path,
        confidence: f64,
        grayscale: bool,
    ) -> Result<Option<(i32, i32)>>;
}

/// Delivers typed text to the focused application.
pub trait TextInjector {
    /// Deliver the whole text at once via the clipboard and a paste
    /// gesture.
    fn paste_text(&mut self, text: &str) -> Result<()>;

    /// Type a newline-free run one character at a time with `interval`
    /// between characters.
    fn stream_text(&mut self, text: &str, interval: Duration) -> Result<()>;

    /// Press Enter once; used for line boundaries during streamed typing,
    /// since some injectors mishandle literal newlines.
    fn press_enter(&mut self) -> Result<()>;
}

/// Blocking time source, mockable in executor tests.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Real wall-clock sleeping.
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
