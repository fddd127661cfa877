use std::thread;
use std::time::Duration;

use arboard::Clipboard;
use enigo::Keyboard as _;
use enigo::{Direction, Enigo, Key, Settings};
use tracing::trace;

use crate::error::Result;
use crate::platform::TextInjector;

#[cfg(target_os = "macos")]
const PASTE_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const PASTE_MODIFIER: Key = Key::Control;

/// Production [`TextInjector`]: clipboard + paste gesture for atomic
/// delivery, per-character key events for streamed delivery.
///
/// Both the Enigo handle and the clipboard connection are created lazily.
pub struct EnigoInjector {
    enigo: Option<Enigo>,
    clipboard: Option<Clipboard>,
}

impl EnigoInjector {
    pub fn new() -> Self {
        Self {
            enigo: None,
            clipboard: None,
        }
    }

    fn ensure_enigo(&mut self) -> Result<&mut Enigo> {
        if self.enigo.is_none() {
            trace!(target: "input_simulation::platform", "Initializing Enigo for text injection");
            self.enigo = Some(Enigo::new(&Settings::default())?);
        }
        Ok(self.enigo.as_mut().expect("Enigo must be initialized"))
    }

    fn ensure_clipboard(&mut self) -> Result<&mut Clipboard> {
        if self.clipboard.is_none() {
            trace!(target: "input_simulation::platform", "Opening clipboard");
            self.clipboard = Some(Clipboard::new()?);
        }
        Ok(self.clipboard.as_mut().expect("Clipboard must be open"))
    }
}

impl Default for EnigoInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInjector for EnigoInjector {
    fn paste_text(&mut self, text: &str) -> Result<()> {
        trace!(target: "input_simulation::platform", chars = text.chars().count(), "paste_text");
        self.ensure_clipboard()?.set_text(text)?;

        let enigo = self.ensure_enigo()?;
        enigo.key(PASTE_MODIFIER, Direction::Press)?;
        enigo.key(Key::Unicode('v'), Direction::Click)?;
        enigo.key(PASTE_MODIFIER, Direction::Release)?;
        Ok(())
    }

    fn stream_text(&mut self, text: &str, interval: Duration) -> Result<()> {
        trace!(target: "input_simulation::platform", chars = text.chars().count(), "stream_text");
        let enigo = self.ensure_enigo()?;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            enigo.key(Key::Unicode(ch), Direction::Click)?;
            if chars.peek().is_some() && !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        Ok(())
    }

    fn press_enter(&mut self) -> Result<()> {
        self.ensure_enigo()?.key(Key::Return, Direction::Click)?;
        Ok(())
    }
}
