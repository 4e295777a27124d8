//! Rewriting of roll expressions into rollable markup.
//!
//! A roll expression is a keyword, a colon and a dice-shaped token:
//! `to hit: 1d20+5`, `damage: 2d6+3`, `healing: 1d8+4`, `save: 1d20`.
//!
//! The scan pattern is loose: it accepts any die size and a dangling sign so
//! that validation happens in one place ([`DiceNotation`]). Tokens that fail
//! validation are left as written.

use std::convert::Infallible;
use std::io;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::{DiceError, DiceNotation};

/// Keywords that introduce a roll expression. Matching is case-sensitive.
pub const ROLL_KEYWORDS: [&str; 4] = ["to hit", "damage", "healing", "save"];

static ROLL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let keywords = ROLL_KEYWORDS.join("|");
    Regex::new(&format!(r"({keywords}):[ \t\n\f\r]*([0-9]*d[0-9]+[+-]?[0-9]*)")).unwrap()
});

/// JSON payload embedded in a rollable fragment. Field order is part of the
/// output format.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RollPayload<'a> {
    dice_notation: &'a str,
    roll_type: &'a str,
    roll_action: &'a str,
}

/// Compact JSON formatter that also escapes `<`, `>`, `&`, U+2028 and U+2029
/// as `\uXXXX`, so the payload is safe to embed in HTML.
struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => r"\u003c",
                '>' => r"\u003e",
                '&' => r"\u0026",
                '\u{2028}' => r"\u2028",
                '\u{2029}' => r"\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn payload_json(payload: &RollPayload<'_>) -> Result<String, serde_json::Error> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter);
    payload.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

/// Render one rollable fragment.
///
/// Produces `[rollable]<display>;<json>[/rollable]`. The semicolon is emitted
/// even when the display value is empty.
///
/// # Errors
///
/// Returns [`DiceError::Payload`] if the JSON payload cannot be serialized.
pub fn render_rollable(
    notation: &DiceNotation,
    roll_type: &str,
    action_name: &str,
) -> Result<String, DiceError> {
    let payload = payload_json(&RollPayload {
        dice_notation: notation.as_str(),
        roll_type,
        roll_action: action_name,
    })?;
    Ok(format!(
        "[rollable]{};{payload}[/rollable]",
        notation.display_value()
    ))
}

/// Convert every roll expression in `text` into rollable markup.
///
/// `action_name` is recorded as the roll's action (empty for unnamed text).
/// Invalid dice (`damage: 1d3`) and payload failures leave the matched text
/// unchanged; everything outside matches is copied through untouched.
#[must_use]
pub fn convert_rolls(text: &str, action_name: &str) -> String {
    let Ok(converted) = rewrite_rolls::<Infallible>(text, |matched, roll_type, dice| {
        let notation = match dice.parse::<DiceNotation>() {
            Ok(notation) => notation,
            Err(e) => {
                tracing::debug!(matched, error = %e, "Leaving roll expression unconverted");
                return Ok(None);
            }
        };
        match render_rollable(&notation, roll_type, action_name) {
            Ok(markup) => Ok(Some(markup)),
            Err(e) => {
                tracing::warn!(matched, error = %e, "Failed to render rollable");
                Ok(None)
            }
        }
    });
    converted
}

/// Strict variant of [`convert_rolls`].
///
/// # Errors
///
/// Returns the first validation or payload error instead of leaving the
/// offending expression unconverted.
pub fn try_convert_rolls(text: &str, action_name: &str) -> Result<String, DiceError> {
    rewrite_rolls(text, |_, roll_type, dice| {
        let notation = dice.parse::<DiceNotation>()?;
        render_rollable(&notation, roll_type, action_name).map(Some)
    })
}

/// Replace roll expressions left to right.
///
/// The callback receives the whole match, the keyword and the dice token, and
/// returns the replacement or `None` to keep the match as written.
fn rewrite_rolls<E>(
    text: &str,
    mut rewrite: impl FnMut(&str, &str, &str) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in ROLL_PATTERN.captures_iter(text) {
        let whole = caps.get_match();
        result.push_str(&text[last_end..whole.start()]);

        let roll_type = caps[1].trim();
        let dice = caps[2].trim();
        match rewrite(whole.as_str(), roll_type, dice)? {
            Some(replacement) => result.push_str(&replacement),
            None => result.push_str(whole.as_str()),
        }

        last_end = whole.end();
    }

    result.push_str(&text[last_end..]);
    Ok(result)
}
