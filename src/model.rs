use std::path::PathBuf;

/// A single screen coordinate component.
///
/// Each axis of a point is independently absolute or relative, so
/// `"+50,-30"` (move 50 right and 30 up from the current position) and
/// `"100,+0"` (absolute x, unchanged y) are both expressible. Relative
/// components are resolved against the live cursor position at the moment
/// the action executes, never at parse time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Coord {
    /// Absolute screen coordinate.
    Abs(i32),
    /// Signed offset from the cursor position at execution time.
    Rel(i32),
}

/// The spatial destination of a mouse action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An explicit point, each axis absolute or relative.
    Point { x: Coord, y: Coord },
    /// The center of a template image located on screen at execution time.
    Image(PathBuf),
    /// Wherever the cursor currently is (click without moving).
    Current,
}

/// Mouse button selector, including the double-click pseudo-button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Two left clicks separated by the configured double-click interval.
    DoubleLeft,
}

impl MouseButton {
    /// Number of physical clicks this button selector produces.
    pub fn click_count(self) -> u32 {
        match self {
            Self::DoubleLeft => 2,
            _ => 1,
        }
    }
}

/// One parsed unit of mouse work.
#[derive(Debug, Clone, PartialEq)]
pub enum MouseAction {
    /// Block for the given number of seconds, replacing the global
    /// inter-action sleep for this step.
    Sleep(f64),
    /// Move the cursor to the target without clicking.
    Move(Target),
    /// Click at the target (after an optional timed move).
    Click { button: MouseButton, target: Target },
}

/// One parsed unit of keyboard work.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyboardAction {
    Sleep(f64),
    /// Press a key or chord `presses` times. Key names are lowercased at
    /// parse time; a chord holds more than one key.
    KeyPress { keys: Vec<String>, presses: u32 },
    /// Type the literal text (may be empty).
    TypeText(String),
    /// Type the content of a file, read at execution time.
    TypeFile(PathBuf),
}

/// A domain-tagged action as produced by the combined `input` parser.
///
/// The variant tag is the action's domain and selects the executor at
/// dispatch time; order within a sequence is significant and preserved
/// end to end.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Mouse(MouseAction),
    Keyboard(KeyboardAction),
}

impl InputAction {
    /// The literal sleep duration, if this action is a sleep.
    ///
    /// Used by the pacing loop: a literal sleep runs inline and replaces
    /// the global inter-action sleep for its step.
    pub fn sleep_seconds(&self) -> Option<f64> {
        match self {
            Self::Mouse(MouseAction::Sleep(s)) | Self::Keyboard(KeyboardAction::Sleep(s)) => {
                Some(*s)
            }
            _ => None,
        }
    }
}

impl From<MouseAction> for InputAction {
    fn from(action: MouseAction) -> Self {
        Self::Mouse(action)
    }
}

impl From<KeyboardAction> for InputAction {
    fn from(action: KeyboardAction) -> Self {
        Self::Keyboard(action)
    }
}
