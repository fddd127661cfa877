/*!
The action grammar.

An action string is an ordered sequence of whitespace-separated tokens;
each token becomes exactly one action. Parsing is atomic: the whole string
is validated before any input is simulated, and one bad token rejects the
whole sequence.

- `tokenizer`: plain and shell-quoted splitting.
- `mouse`: the comma-field decision tree for mouse tokens.
- `keyboard`: the first-comma keyword dispatch for keyboard tokens.
- `input`: keyword classification for mixed sequences, delegating each
  token to the single-domain parsers.
*/

pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod tokenizer;

pub use input::parse_input_actions;
pub use keyboard::parse_keyboard_actions;
pub use mouse::parse_mouse_actions;

use std::path::PathBuf;

use crate::config::ExecutionConfig;
use crate::error::{Error, Result};

/// Parse-time context, built once per invocation: the optional base
/// directories that relative image and file paths resolve against.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub images_path: Option<PathBuf>,
    pub files_path: Option<PathBuf>,
}

impl ParseContext {
    pub fn from_config(config: &ExecutionConfig) -> Self {
        Self {
            images_path: config.images_path.clone(),
            files_path: config.files_path.clone(),
        }
    }
}

/// Parse a sleep duration field: a finite, non-negative float.
pub(crate) fn parse_sleep_seconds(token: &str, field: &str) -> Result<f64> {
    let seconds: f64 = field
        .parse()
        .map_err(|_| Error::grammar(token, format!("invalid sleep duration '{field}'")))?;
    if !seconds.is_finite() {
        return Err(Error::grammar(
            token,
            format!("invalid sleep duration '{field}'"),
        ));
    }
    if seconds < 0.0 {
        return Err(Error::grammar(token, "sleep time cannot be negative"));
    }
    Ok(seconds)
}
