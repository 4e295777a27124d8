//! Parsed dice notation.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::DiceError;

/// Supported die sizes, as written after the `d`.
///
/// Lookup is on the literal digits, so `d020` is rejected rather than read as
/// a d20.
pub const VALID_SIDES: [&str; 7] = ["4", "6", "8", "10", "12", "20", "100"];

static NOTATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*)d([0-9]+)([+-][0-9]+)?$").unwrap());

/// Validated dice notation in canonical form.
///
/// The canonical text always has an explicit count. Count and modifier digits
/// are kept as written, so re-parsing the canonical text yields the same
/// notation. Numeric accessors saturate on values too large for their type;
/// the text itself is never rejected for size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceNotation {
    count: u64,
    sides: u32,
    modifier: i64,
    canonical: String,
    /// Byte offset of the signed modifier within `canonical`, if present.
    modifier_start: Option<usize>,
}

impl DiceNotation {
    /// Number of dice rolled, saturating at `u64::MAX`.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of sides per die.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Flat modifier (zero when absent), saturating at the `i64` bounds.
    #[must_use]
    pub fn modifier(&self) -> i64 {
        self.modifier
    }

    /// Signed modifier exactly as written (e.g. `+5`), or `""` when absent.
    #[must_use]
    pub fn modifier_text(&self) -> &str {
        self.modifier_start
            .map_or("", |start| &self.canonical[start..])
    }

    /// Canonical notation text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Consume the notation, returning the canonical text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.canonical
    }

    /// Whether this is a d20 roll (attack rolls, checks and saves).
    #[must_use]
    pub fn is_d20(&self) -> bool {
        self.sides == 20
    }

    /// Expected value of the roll, rounded half up.
    ///
    /// Computed as `count * (sides + 1) / 2 + modifier` in floating point from
    /// the written digits; `0.5` is added and the result truncated toward
    /// zero. Results beyond the `i64` range saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn average(&self) -> i64 {
        let per_die = (f64::from(self.sides) + 1.0) / 2.0;
        let mean = digits_to_f64(self.count_text()) * per_die
            + digits_to_f64(self.modifier_text());
        (mean + 0.5) as i64
    }

    /// Count digits as written in the canonical text.
    fn count_text(&self) -> &str {
        self.canonical
            .split_once('d')
            .map_or("", |(count, _)| count)
    }

    /// Text shown in front of the rollable payload.
    ///
    /// d20 rolls show only the modifier (`+5`, or nothing). Other rolls show
    /// the average followed by the notation, e.g. `8(1d8+3)`.
    #[must_use]
    pub fn display_value(&self) -> String {
        if self.is_d20() {
            self.modifier_text().to_owned()
        } else {
            format!("{}({})", self.average(), self.canonical)
        }
    }
}

impl FromStr for DiceNotation {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s.trim();
        let invalid_format = || DiceError::InvalidFormat(notation.to_owned());

        let caps = NOTATION_PATTERN
            .captures(notation)
            .ok_or_else(invalid_format)?;

        let count_text = match &caps[1] {
            "" => "1",
            count => count,
        };
        let sides_text = &caps[2];
        let modifier_text = caps.get(3).map_or("", |m| m.as_str());

        if !VALID_SIDES.contains(&sides_text) {
            return Err(DiceError::InvalidDiceType(format!("d{sides_text}")));
        }

        let count = count_text.parse::<u64>().unwrap_or(u64::MAX);
        let sides = sides_text.parse::<u32>().map_err(|_| invalid_format())?;
        let modifier = match modifier_text.parse::<i64>() {
            Ok(modifier) => modifier,
            Err(_) if modifier_text.is_empty() => 0,
            Err(_) if modifier_text.starts_with('-') => i64::MIN,
            Err(_) => i64::MAX,
        };

        let mut canonical = format!("{count_text}d{sides_text}");
        let modifier_start = (!modifier_text.is_empty()).then_some(canonical.len());
        canonical.push_str(modifier_text);

        Ok(Self {
            count,
            sides,
            modifier,
            canonical,
            modifier_start,
        })
    }
}

/// Value of an optionally signed run of ASCII digits; `0.0` when empty.
fn digits_to_f64(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}

impl fmt::Display for DiceNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}
