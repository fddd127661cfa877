//! Mouse token parsing: the fixed 1/2/3-comma-field decision tree.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::{Coord, MouseAction, MouseButton, Target};
use crate::parser::{ParseContext, parse_sleep_seconds, tokenizer};
use crate::utils::paths::resolve_existing_file;

const KEYWORD_HELP: &str =
    "use L, LEFT, R, RIGHT, W, MIDDLE, LL, DOUBLELEFT, M, MOVE, S or SLEEP";

/// Canonical mouse action keyword; short aliases map onto it
/// case-insensitively.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Keyword {
    Left,
    Right,
    Middle,
    DoubleLeft,
    Move,
    Sleep,
}

impl Keyword {
    fn parse(field: &str) -> Option<Self> {
        match field.to_ascii_uppercase().as_str() {
            "L" | "LEFT" => Some(Self::Left),
            "R" | "RIGHT" => Some(Self::Right),
            "W" | "MIDDLE" => Some(Self::Middle),
            "LL" | "DOUBLELEFT" => Some(Self::DoubleLeft),
            "M" | "MOVE" => Some(Self::Move),
            "S" | "SLEEP" => Some(Self::Sleep),
            _ => None,
        }
    }

    /// The click button this keyword selects, if it is a click keyword.
    fn button(self) -> Option<MouseButton> {
        match self {
            Self::Left => Some(MouseButton::Left),
            Self::Right => Some(MouseButton::Right),
            Self::Middle => Some(MouseButton::Middle),
            Self::DoubleLeft => Some(MouseButton::DoubleLeft),
            Self::Move | Self::Sleep => None,
        }
    }
}

/// Parse a mouse-only action string into an ordered action list.
///
/// The whole string is validated up front; the first bad token fails the
/// entire sequence and nothing executes.
pub fn parse_mouse_actions(actions: &str, ctx: &ParseContext) -> Result<Vec<MouseAction>> {
    debug!(target: "input_simulation::parser", %actions, "Parsing mouse actions");
    tokenizer::split_plain(actions)
        .into_iter()
        .map(|token| parse_mouse_token(token, ctx))
        .collect()
}

/// Parse one mouse token.
///
/// Field-count decision tree:
/// - 1 field: a click keyword (click at the current cursor position) or an
///   image path to move to.
/// - 2 fields: `S,seconds`, `x,y` (move), or `button,image_path`.
/// - 3 fields: `button,x,y`.
pub(crate) fn parse_mouse_token(token: &str, ctx: &ParseContext) -> Result<MouseAction> {
    let fields: Vec<&str> = token.split(',').collect();
    let action = match fields.as_slice() {
        [single] => match Keyword::parse(single) {
            Some(keyword) => match keyword.button() {
                Some(button) => MouseAction::Click {
                    button,
                    target: Target::Current,
                },
                None => {
                    let reason = match keyword {
                        Keyword::Sleep => "sleep requires a duration",
                        _ => "move requires a target",
                    };
                    return Err(Error::grammar(token, reason));
                }
            },
            None => MouseAction::Move(Target::Image(resolve_image(single, ctx)?)),
        },

        [first, second] => {
            if Keyword::parse(first) == Some(Keyword::Sleep) {
                MouseAction::Sleep(parse_sleep_seconds(token, second)?)
            } else if is_coordinate(first) {
                MouseAction::Move(Target::Point {
                    x: parse_coordinate(token, first)?,
                    y: parse_coordinate(token, second)?,
                })
            } else {
                let keyword = Keyword::parse(first)
                    .ok_or_else(|| Error::grammar(token, format!("invalid action '{first}': {KEYWORD_HELP}")))?;
                let target = Target::Image(resolve_image(second, ctx)?);
                match keyword.button() {
                    Some(button) => MouseAction::Click { button, target },
                    // Sleep was handled above, so this is M/MOVE
                    None => MouseAction::Move(target),
                }
            }
        }

        [first, x, y] => {
            let keyword = Keyword::parse(first)
                .ok_or_else(|| Error::grammar(token, format!("invalid action '{first}': {KEYWORD_HELP}")))?;
            let target = Target::Point {
                x: parse_coordinate(token, x)?,
                y: parse_coordinate(token, y)?,
            };
            match keyword {
                Keyword::Sleep => {
                    return Err(Error::grammar(token, "sleep takes a single duration"));
                }
                Keyword::Move => MouseAction::Move(target),
                _ => MouseAction::Click {
                    button: keyword.button().expect("click keywords map to a button"),
                    target,
                },
            }
        }

        _ => {
            return Err(Error::grammar(
                token,
                "an action has at most 3 comma-separated fields",
            ));
        }
    };

    trace!(target: "input_simulation::parser", %token, ?action, "Parsed mouse token");
    Ok(action)
}

/// `digits`, or `+`/`-` followed by digits.
fn is_coordinate(field: &str) -> bool {
    let digits = match field.strip_prefix(['+', '-']) {
        Some(rest) => rest,
        None => field,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Bare digits are absolute; a `+`/`-` prefix makes the axis relative to
/// the cursor position at execution time.
fn parse_coordinate(token: &str, field: &str) -> Result<Coord> {
    let invalid = || {
        Error::grammar(
            token,
            format!("invalid coordinate '{field}': it must be an integer, absolute or relative"),
        )
    };
    if !is_coordinate(field) {
        return Err(invalid());
    }
    let value: i32 = field.parse().map_err(|_| invalid())?;
    if field.starts_with(['+', '-']) {
        Ok(Coord::Rel(value))
    } else {
        Ok(Coord::Abs(value))
    }
}

fn resolve_image(field: &str, ctx: &ParseContext) -> Result<PathBuf> {
    resolve_existing_file(field, ctx.images_path.as_deref())
}
