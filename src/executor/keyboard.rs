//! Keyboard-side execution: key presses, chords, and text delivery.

use std::fs;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::executor::Runtime;
use crate::model::KeyboardAction;
use crate::platform::{Clock, InputDriver, ScreenLocator, TextInjector};

impl<D, L, T, C> Runtime<D, L, T, C>
where
    D: InputDriver,
    L: ScreenLocator,
    T: TextInjector,
    C: Clock,
{
    pub(crate) fn execute_keyboard(&mut self, action: &KeyboardAction) -> Result<()> {
        match action {
            KeyboardAction::Sleep(seconds) => self.sleep_inline(*seconds),

            KeyboardAction::KeyPress { keys, presses } => self.press_keys(keys, *presses),

            KeyboardAction::TypeText(text) => self.type_text(text),

            KeyboardAction::TypeFile(path) => {
                debug!(
                    target: "input_simulation::keyboard",
                    path = %path.display(),
                    "Typing file content"
                );
                let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
                    path: path.clone(),
                    source,
                })?;
                self.type_text(&content)
            }
        }
    }

    /// A single key is one driver call with built-in repeats; a chord
    /// replays the whole combination `presses` times with the inter-press
    /// delay between repeats (and none after the last).
    fn press_keys(&mut self, keys: &[String], presses: u32) -> Result<()> {
        let interval = Duration::from_secs_f64(self.config.press_interval);
        if let [key] = keys {
            debug!(target: "input_simulation::keyboard", %key, presses, "Pressing key");
            return self.driver.press_key(key, presses, interval);
        }

        debug!(target: "input_simulation::keyboard", ?keys, presses, "Pressing key combination");
        for press in 0..presses {
            self.driver.press_chord(keys)?;
            if press + 1 < presses && self.config.press_interval > 0.0 {
                self.clock.sleep(interval);
            }
        }
        Ok(())
    }

    /// Deliver text through the injector.
    ///
    /// Below the minimum safe typing interval the whole text goes out
    /// atomically via the clipboard. Otherwise it is streamed run by run,
    /// with each line boundary injected as a discrete Enter keystroke,
    /// since literal newlines are mishandled by some injectors.
    fn type_text(&mut self, text: &str) -> Result<()> {
        if self.config.atomic_typing() {
            debug!(
                target: "input_simulation::keyboard",
                chars = text.chars().count(),
                "Typing whole text at once"
            );
            return self.injector.paste_text(text);
        }

        let interval = Duration::from_secs_f64(self.config.typing_interval);
        debug!(
            target: "input_simulation::keyboard",
            chars = text.chars().count(),
            interval_s = self.config.typing_interval,
            "Typing text"
        );
        for line in text.split_inclusive('\n') {
            let (run, line_break) = match line.strip_suffix('\n') {
                Some(run) => (run.strip_suffix('\r').unwrap_or(run), true),
                None => (line, false),
            };
            if !run.is_empty() {
                self.injector.stream_text(run, interval)?;
            }
            if line_break {
                self.injector.press_enter()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::config::ExecutionConfig;
    use crate::error::Error;
    use crate::executor::testing::runtime_with;
    use crate::model::{InputAction, KeyboardAction};

    fn key_press(keys: &[&str], presses: u32) -> InputAction {
        KeyboardAction::KeyPress {
            keys: keys.iter().map(|k| (*k).to_string()).collect(),
            presses,
        }
        .into()
    }

    fn streaming_config() -> ExecutionConfig {
        ExecutionConfig {
            typing_interval: 0.05,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_key_is_one_driver_call() {
        let config = ExecutionConfig {
            press_interval: 0.2,
            ..Default::default()
        };
        let (mut runtime, log) = runtime_with(config, (0, 0), None);
        runtime.run(&[key_press(&["enter"], 3)]).unwrap();
        assert_eq!(log.borrow().as_slice(), ["key enter x3 i=0.2"]);
    }

    #[test]
    fn test_chord_repeats_with_delay_between_but_not_after() {
        let config = ExecutionConfig {
            press_interval: 0.1,
            ..Default::default()
        };
        let (mut runtime, log) = runtime_with(config, (0, 0), None);
        runtime.run(&[key_press(&["ctrl", "s"], 3)]).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            [
                "chord ctrl+s",
                "sleep 0.1",
                "chord ctrl+s",
                "sleep 0.1",
                "chord ctrl+s",
            ]
        );
    }

    #[test]
    fn test_chord_with_zero_interval_skips_sleeps() {
        let (mut runtime, log) = runtime_with(ExecutionConfig::default(), (0, 0), None);
        runtime.run(&[key_press(&["ctrl", "shift", "c"], 2)]).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["chord ctrl+shift+c", "chord ctrl+shift+c"]
        );
    }

    #[test]
    fn test_low_typing_interval_pastes_atomically() {
        let config = ExecutionConfig {
            typing_interval: 0.0,
            ..Default::default()
        };
        let (mut runtime, log) = runtime_with(config, (0, 0), None);
        runtime
            .run(&[KeyboardAction::TypeText("line one\nline two".into()).into()])
            .unwrap();
        assert_eq!(log.borrow().as_slice(), ["paste \"line one\\nline two\""]);
    }

    #[test]
    fn test_streamed_typing_injects_enter_at_line_boundaries() {
        let (mut runtime, log) = runtime_with(streaming_config(), (0, 0), None);
        runtime
            .run(&[KeyboardAction::TypeText("ab\ncd\n".into()).into()])
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            [
                "stream \"ab\" i=0.05",
                "enter",
                "stream \"cd\" i=0.05",
                "enter",
            ]
        );
    }

    #[test]
    fn test_streamed_typing_without_trailing_newline() {
        let (mut runtime, log) = runtime_with(streaming_config(), (0, 0), None);
        runtime
            .run(&[KeyboardAction::TypeText("ab\ncd".into()).into()])
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["stream \"ab\" i=0.05", "enter", "stream \"cd\" i=0.05"]
        );
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let (mut runtime, log) = runtime_with(streaming_config(), (0, 0), None);
        runtime
            .run(&[KeyboardAction::TypeText("ab\r\n\ncd".into()).into()])
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            [
                "stream \"ab\" i=0.05",
                "enter",
                "enter",
                "stream \"cd\" i=0.05",
            ]
        );
    }

    #[test]
    fn test_type_file_streams_its_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("content.txt");
        fs::write(&file, "hello\nworld").unwrap();

        let (mut runtime, log) = runtime_with(streaming_config(), (0, 0), None);
        runtime
            .run(&[KeyboardAction::TypeFile(file).into()])
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["stream \"hello\" i=0.05", "enter", "stream \"world\" i=0.05"]
        );
    }

    #[test]
    fn test_unreadable_file_aborts_remaining_actions() {
        let (mut runtime, log) = runtime_with(streaming_config(), (0, 0), None);
        let err = runtime
            .run(&[
                KeyboardAction::TypeFile("/no/such/file.txt".into()).into(),
                key_press(&["enter"], 1),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
        assert!(err.to_string().contains("/no/such/file.txt"));
        assert!(log.borrow().is_empty());
    }
}
