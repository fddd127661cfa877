//! Combined mouse + keyboard parsing for the `input` command.
//!
//! Each token is classified by the keyword before its first comma (or the
//! whole token when it has none) and delegated, already atomic, to the
//! single-domain parsers. Domain order is preserved end to end so mixed
//! sequences execute exactly as written.

use tracing::debug;

use crate::error::Result;
use crate::model::InputAction;
use crate::parser::{ParseContext, keyboard, mouse, tokenizer};

/// Keywords that route a token to the keyboard parser. Everything else,
/// including the shared `S`/`SLEEP` and bare coordinate or image-path
/// tokens, goes to the mouse parser.
const KEYBOARD_KEYWORDS: [&str; 6] = ["K", "KEY", "T", "TYPE", "TF", "TYPEFILE"];

/// Parse a mixed action string into an ordered, domain-tagged sequence.
pub fn parse_input_actions(actions: &str, ctx: &ParseContext) -> Result<Vec<InputAction>> {
    debug!(target: "input_simulation::parser", %actions, "Parsing combined actions");
    let tokens = tokenizer::split_quoted(actions)?;
    let mut sequence = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let keyword = token
            .split_once(',')
            .map_or(token.as_str(), |(first, _)| first)
            .to_ascii_uppercase();
        let action = if KEYBOARD_KEYWORDS.contains(&keyword.as_str()) {
            InputAction::Keyboard(keyboard::parse_keyboard_token(token, ctx)?)
        } else {
            InputAction::Mouse(mouse::parse_mouse_token(token, ctx)?)
        };
        sequence.push(action);
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coord, KeyboardAction, MouseAction, MouseButton, Target};

    fn ctx() -> ParseContext {
        ParseContext::default()
    }

    #[test]
    fn test_mixed_sequence_preserves_order_and_domains() {
        let actions =
            parse_input_actions("L,100,200 T,'Hello World' K,Enter +10,+0", &ctx()).unwrap();
        assert_eq!(
            actions,
            vec![
                InputAction::Mouse(MouseAction::Click {
                    button: MouseButton::Left,
                    target: Target::Point {
                        x: Coord::Abs(100),
                        y: Coord::Abs(200),
                    },
                }),
                InputAction::Keyboard(KeyboardAction::TypeText("Hello World".into())),
                InputAction::Keyboard(KeyboardAction::KeyPress {
                    keys: vec!["enter".into()],
                    presses: 1,
                }),
                InputAction::Mouse(MouseAction::Move(Target::Point {
                    x: Coord::Rel(10),
                    y: Coord::Rel(0),
                })),
            ]
        );
    }

    #[test]
    fn test_sleep_classifies_as_mouse_domain() {
        let actions = parse_input_actions("S,0.5", &ctx()).unwrap();
        assert_eq!(actions, vec![InputAction::Mouse(MouseAction::Sleep(0.5))]);
    }

    #[test]
    fn test_bare_button_token_goes_to_mouse() {
        let actions = parse_input_actions("LL", &ctx()).unwrap();
        assert_eq!(
            actions,
            vec![InputAction::Mouse(MouseAction::Click {
                button: MouseButton::DoubleLeft,
                target: Target::Current,
            })]
        );
    }

    #[test]
    fn test_keyboard_keywords_are_case_insensitive() {
        let actions = parse_input_actions("typefile,x", &ctx());
        // classified as keyboard, then fails on the missing file,
        // proving delegation reached the keyboard parser
        assert!(actions.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_one_bad_token_rejects_everything() {
        assert!(parse_input_actions("L,1,2 K,Enter S,-1", &ctx()).is_err());
    }

    #[test]
    fn test_quoted_payload_with_mouse_keyword_inside_stays_keyboard() {
        let actions = parse_input_actions("T,'L,100,200'", &ctx()).unwrap();
        assert_eq!(
            actions,
            vec![InputAction::Keyboard(KeyboardAction::TypeText(
                "L,100,200".into()
            ))]
        );
    }
}
