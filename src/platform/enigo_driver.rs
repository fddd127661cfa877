use std::thread;
use std::time::Duration;

use enigo::Keyboard as _;
use enigo::Mouse as _;
use enigo::{Button as EButton, Coordinate, Direction, Enigo, Key, Settings};
use rand::random_range;
use tracing::trace;

use crate::error::{Error, Result};
use crate::model::MouseButton;
use crate::platform::InputDriver;
use crate::utils::easing::TWEENS;

/// Interval between cursor updates during a timed move.
const MOVE_STEP: Duration = Duration::from_millis(10);

/// Production [`InputDriver`] backed by Enigo.
///
/// The Enigo handle is created lazily on first use so that commands which
/// fail during parsing never open an input connection.
pub struct EnigoDriver {
    enigo: Option<Enigo>,
}

impl EnigoDriver {
    pub fn new() -> Self {
        Self { enigo: None }
    }

    fn ensure_enigo(&mut self) -> Result<&mut Enigo> {
        if self.enigo.is_none() {
            trace!(target: "input_simulation::platform", "Initializing Enigo");
            self.enigo = Some(Enigo::new(&Settings::default())?);
        }
        Ok(self.enigo.as_mut().expect("Enigo must be initialized"))
    }
}

impl Default for EnigoDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDriver for EnigoDriver {
    fn cursor_position(&mut self) -> Result<(i32, i32)> {
        let position = self.ensure_enigo()?.location()?;
        trace!(target: "input_simulation::platform", x = position.0, y = position.1, "cursor_position");
        Ok(position)
    }

    fn move_cursor(&mut self, x: i32, y: i32, duration: Duration) -> Result<()> {
        if duration.is_zero() {
            trace!(target: "input_simulation::platform", x, y, "move_cursor");
            self.ensure_enigo()?.move_mouse(x, y, Coordinate::Abs)?;
            return Ok(());
        }

        let (start_x, start_y) = self.cursor_position()?;
        let tween = TWEENS[random_range(0..TWEENS.len())];
        let steps = (duration.as_secs_f64() / MOVE_STEP.as_secs_f64())
            .ceil()
            .max(1.0) as u32;
        trace!(target: "input_simulation::platform", x, y, steps, "move_cursor (timed)");

        let enigo = self.ensure_enigo()?;
        for step in 1..=steps {
            let progress = tween(f64::from(step) / f64::from(steps));
            let px = start_x + (f64::from(x - start_x) * progress).round() as i32;
            let py = start_y + (f64::from(y - start_y) * progress).round() as i32;
            enigo.move_mouse(px, py, Coordinate::Abs)?;
            thread::sleep(duration / steps);
        }
        // ease_out_back overshoots; land exactly on the target
        enigo.move_mouse(x, y, Coordinate::Abs)?;
        Ok(())
    }

    fn click(&mut self, button: MouseButton, x: i32, y: i32, interval: Duration) -> Result<()> {
        let clicks = button.click_count();
        let mapped = map_mouse_button(button);
        trace!(target: "input_simulation::platform", ?button, x, y, clicks, "click");

        let enigo = self.ensure_enigo()?;
        enigo.move_mouse(x, y, Coordinate::Abs)?;
        for click in 0..clicks {
            enigo.button(mapped, Direction::Click)?;
            if click + 1 < clicks && !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        Ok(())
    }

    fn press_key(&mut self, key: &str, presses: u32, interval: Duration) -> Result<()> {
        let mapped = map_key(key)?;
        trace!(target: "input_simulation::platform", key, presses, "press_key");

        let enigo = self.ensure_enigo()?;
        for press in 0..presses {
            enigo.key(mapped, Direction::Click)?;
            if press + 1 < presses && !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        Ok(())
    }

    fn press_chord(&mut self, keys: &[String]) -> Result<()> {
        let mapped = keys
            .iter()
            .map(|key| map_key(key))
            .collect::<Result<Vec<_>>>()?;
        trace!(target: "input_simulation::platform", ?keys, "press_chord");

        let enigo = self.ensure_enigo()?;
        for key in &mapped {
            enigo.key(*key, Direction::Press)?;
        }
        for key in mapped.iter().rev() {
            enigo.key(*key, Direction::Release)?;
        }
        Ok(())
    }
}

fn map_mouse_button(button: MouseButton) -> EButton {
    match button {
        MouseButton::Left | MouseButton::DoubleLeft => EButton::Left,
        MouseButton::Right => EButton::Right,
        MouseButton::Middle => EButton::Middle,
    }
}

/// Map a lowercased key name to an Enigo key. Single characters type
/// themselves; everything else must be a known named key.
pub(crate) fn map_key(name: &str) -> Result<Key> {
    let key = match name {
        "alt" | "option" => Key::Alt,
        "backspace" => Key::Backspace,
        "capslock" => Key::CapsLock,
        "ctrl" | "control" => Key::Control,
        "del" | "delete" => Key::Delete,
        "down" => Key::DownArrow,
        "end" => Key::End,
        "enter" | "return" => Key::Return,
        "esc" | "escape" => Key::Escape,
        "home" => Key::Home,
        "left" => Key::LeftArrow,
        "cmd" | "command" | "meta" | "super" | "win" => Key::Meta,
        "pagedown" | "pgdn" => Key::PageDown,
        "pageup" | "pgup" => Key::PageUp,
        "right" => Key::RightArrow,
        "shift" => Key::Shift,
        "space" => Key::Space,
        "tab" => Key::Tab,
        "up" => Key::UpArrow,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Unicode(ch),
                _ => return Err(Error::UnknownKey(other.to_string())),
            }
        }
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys_map() {
        assert_eq!(map_key("ctrl").unwrap(), Key::Control);
        assert_eq!(map_key("enter").unwrap(), Key::Return);
        assert_eq!(map_key("f5").unwrap(), Key::F5);
        assert_eq!(map_key("win").unwrap(), Key::Meta);
    }

    #[test]
    fn test_single_characters_type_themselves() {
        assert_eq!(map_key("a").unwrap(), Key::Unicode('a'));
        assert_eq!(map_key("+").unwrap(), Key::Unicode('+'));
        assert_eq!(map_key("é").unwrap(), Key::Unicode('é'));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = map_key("notakey").unwrap_err();
        assert!(err.to_string().contains("notakey"));
    }

    #[test]
    fn test_double_left_maps_to_left_button() {
        assert_eq!(map_mouse_button(MouseButton::DoubleLeft), EButton::Left);
        assert_eq!(map_mouse_button(MouseButton::Middle), EButton::Middle);
    }
}
