//! Keyboard token parsing: keyword dispatch on the field before the first
//! comma. The remainder may itself contain commas (`K,combo,presses`, text
//! with commas), so only the first comma splits.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::KeyboardAction;
use crate::parser::{ParseContext, parse_sleep_seconds, tokenizer};
use crate::utils::paths::resolve_existing_file;

/// Parse a keyboard-only action string into an ordered action list.
///
/// The string is split with shell-style quoting so typed payloads may
/// contain spaces: `keyboard "T,'Hello World' K,Enter"`.
pub fn parse_keyboard_actions(actions: &str, ctx: &ParseContext) -> Result<Vec<KeyboardAction>> {
    debug!(target: "input_simulation::parser", %actions, "Parsing keyboard actions");
    tokenizer::split_quoted(actions)?
        .iter()
        .map(|token| parse_keyboard_token(token, ctx))
        .collect()
}

/// Parse one keyboard token, already split out of its sequence.
pub(crate) fn parse_keyboard_token(token: &str, ctx: &ParseContext) -> Result<KeyboardAction> {
    let Some((action, rest)) = token.split_once(',') else {
        return Err(Error::grammar(
            token,
            "expected ACTION,ARGUMENTS: use K, KEY, T, TYPE, TF, TYPEFILE, S or SLEEP",
        ));
    };

    let parsed = match action.to_ascii_uppercase().as_str() {
        "S" | "SLEEP" => KeyboardAction::Sleep(parse_sleep_seconds(token, rest)?),
        "K" | "KEY" => parse_key_press(token, rest)?,
        "T" | "TYPE" => KeyboardAction::TypeText(rest.to_string()),
        "TF" | "TYPEFILE" => {
            KeyboardAction::TypeFile(resolve_existing_file(rest, ctx.files_path.as_deref())?)
        }
        other => {
            return Err(Error::grammar(
                token,
                format!("invalid action '{other}': use K, KEY, T, TYPE, TF, TYPEFILE, S or SLEEP"),
            ));
        }
    };

    trace!(target: "input_simulation::parser", %token, ?parsed, "Parsed keyboard token");
    Ok(parsed)
}

/// `key-combo[,presses]`: the combo splits on `+` and is lowercased;
/// presses defaults to 1 and must be a positive integer.
fn parse_key_press(token: &str, rest: &str) -> Result<KeyboardAction> {
    let mut fields = rest.split(',');
    let combo = fields.next().expect("split yields at least one field");
    let presses = match fields.next() {
        None => 1,
        Some(count) => {
            let presses: u32 = count.parse().map_err(|_| {
                Error::grammar(token, format!("invalid press count '{count}'"))
            })?;
            if presses == 0 {
                return Err(Error::grammar(token, "press count must be a positive integer"));
            }
            presses
        }
    };
    if fields.next().is_some() {
        return Err(Error::grammar(token, "expected K,key or K,key,presses"));
    }

    let keys: Vec<String> = combo.split('+').map(str::to_lowercase).collect();
    if keys.iter().any(String::is_empty) {
        return Err(Error::grammar(token, "empty key name in combination"));
    }
    Ok(KeyboardAction::KeyPress { keys, presses })
}
