//! Splitting a markdown document into sections and abilities.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Ability, AbilityCategory, ParseResult};

/// Level-2 header line: `## Name`.
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());

/// Bold-named paragraph: `**Name.** Text` or `**Name**. Text`.
static ABILITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\*\*([^*]+?)\.?\*\*\.?\s*(.+)$").unwrap());

/// What to do with paragraphs that have no bold name prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlainParagraphs {
    /// Keep them as unnamed abilities.
    #[default]
    Keep,
    /// Discard them.
    Drop,
}

/// One `## ` section of the document.
#[derive(Debug, PartialEq, Eq)]
struct Section<'a> {
    name: &'a str,
    content: &'a str,
}

/// Markdown segmenter.
///
/// # Example
///
/// ```
/// use statblock_parser::{PlainParagraphs, Segmenter};
///
/// let markdown = "## Traits\n\n**Keen Smell.** Advantage on smell checks.\n\nFlavor text.";
///
/// let all = Segmenter::new().segment(markdown);
/// assert_eq!(all.traits.len(), 2);
///
/// let named = Segmenter::new()
///     .with_plain_paragraphs(PlainParagraphs::Drop)
///     .segment(markdown);
/// assert_eq!(named.traits.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    plain_paragraphs: PlainParagraphs,
}

impl Segmenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how paragraphs without a bold name are handled.
    #[must_use]
    pub fn with_plain_paragraphs(mut self, policy: PlainParagraphs) -> Self {
        self.plain_paragraphs = policy;
        self
    }

    /// Segment a markdown document into abilities grouped by category.
    ///
    /// Empty input yields an empty result. Unrecognized sections and text
    /// before the first header are skipped. Repeated headers of the same
    /// category append in document order.
    #[must_use]
    pub fn segment(&self, markdown: &str) -> ParseResult {
        let mut result = ParseResult::default();

        let markdown = normalize_line_endings(markdown);
        if markdown.trim().is_empty() {
            return result;
        }

        for section in split_sections(&markdown) {
            let Some(category) = AbilityCategory::from_section_name(section.name) else {
                tracing::debug!(section = section.name, "Skipping unrecognized section");
                continue;
            };

            let abilities = result.abilities_mut(category);
            let before = abilities.len();
            abilities.extend(self.parse_abilities(section.content, category));
            tracing::debug!(
                section = section.name,
                count = abilities.len() - before,
                "Parsed section"
            );
        }

        result
    }

    /// Parse the paragraphs of one section's content.
    fn parse_abilities<'a>(
        &'a self,
        content: &'a str,
        category: AbilityCategory,
    ) -> impl Iterator<Item = Ability> + 'a {
        content
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .filter_map(move |paragraph| self.parse_paragraph(paragraph, category))
    }

    fn parse_paragraph(&self, paragraph: &str, category: AbilityCategory) -> Option<Ability> {
        if let Some(caps) = ABILITY_PATTERN.captures(paragraph) {
            return Some(Ability::named(
                caps[1].trim(),
                caps[2].trim(),
                category,
            ));
        }

        match self.plain_paragraphs {
            PlainParagraphs::Keep => Some(Ability::plain(paragraph, category)),
            PlainParagraphs::Drop => {
                tracing::debug!(paragraph, "Dropping paragraph without ability name");
                None
            }
        }
    }
}

/// Segment `markdown` with default options.
///
/// Paragraphs without a bold name are kept as unnamed abilities.
#[must_use]
pub fn segment(markdown: &str) -> ParseResult {
    Segmenter::new().segment(markdown)
}

fn normalize_line_endings(markdown: &str) -> Cow<'_, str> {
    if markdown.contains('\r') {
        Cow::Owned(markdown.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(markdown)
    }
}

/// Split a document at `## ` header lines.
///
/// Each section's content runs from the line after its header up to the next
/// header, trimmed. Text before the first header belongs to no section.
fn split_sections(markdown: &str) -> Vec<Section<'_>> {
    let headers: Vec<_> = HEADER_PATTERN
        .captures_iter(markdown)
        .map(|caps| {
            let whole = caps.get_match();
            let name = caps.get(1).map_or("", |m| m.as_str());
            (whole.start(), whole.end(), name)
        })
        .collect();

    headers
        .iter()
        .enumerate()
        .map(|(i, &(_, header_end, name))| {
            let mut start = header_end;
            if markdown.as_bytes().get(start) == Some(&b'\n') {
                start += 1;
            }
            let end = headers
                .get(i + 1)
                .map_or(markdown.len(), |&(next_start, _, _)| next_start);
            Section {
                name: name.trim(),
                content: markdown[start..end].trim(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(segment(""), ParseResult::default());
        assert_eq!(segment("   \n\n\t  "), ParseResult::default());
    }

    #[test]
    fn test_single_trait() {
        let input = "## Traits\n\n**Darkvision.** You can see in dim light within 60 feet of you as if it were bright light.";
        let result = segment(input);

        assert_eq!(result.traits.len(), 1);
        let trait_ = &result.traits[0];
        assert_eq!(trait_.name(), Some("Darkvision"));
        assert_eq!(
            trait_.description(),
            "You can see in dim light within 60 feet of you as if it were bright light."
        );
        assert_eq!(trait_.category(), AbilityCategory::Trait);
    }

    #[test]
    fn test_multiple_sections() {
        let input = "\
## Traits

**Keen Senses.** Advantage on Perception checks.

## Actions

**Bite.** Melee Weapon Attack.

## Bonus Actions

**Nimble Escape.** Disengage or Hide.

## Reactions

**Parry.** Add 2 to AC.";
        let result = segment(input);

        assert_eq!(result.traits.len(), 1);
        assert_eq!(result.actions.len(), 1);
        assert_eq!(result.bonus_actions.len(), 1);
        assert_eq!(result.reactions.len(), 1);
        assert_eq!(result.bonus_actions[0].name(), Some("Nimble Escape"));
        assert_eq!(
            result.bonus_actions[0].category(),
            AbilityCategory::BonusAction
        );
    }

    #[test]
    fn test_multiple_abilities_in_order() {
        let input = "\
## Actions

**Bite.** Melee Weapon Attack: to hit: 1d20+4.

**Claw**. Melee Weapon Attack: to hit: 1d20+4.

**Tail** Melee Weapon Attack: to hit: 1d20+4.";
        let result = segment(input);

        let names: Vec<_> = result.actions.iter().map(|a| a.name()).collect();
        assert_eq!(names, [Some("Bite"), Some("Claw"), Some("Tail")]);
        for action in &result.actions {
            assert_eq!(action.description(), "Melee Weapon Attack: to hit: 1d20+4.");
        }
    }

    #[test]
    fn test_period_inside_or_outside_bold() {
        let inside = segment("## Traits\n\n**Amphibious.** Breathes air and water.");
        let outside = segment("## Traits\n\n**Amphibious**. Breathes air and water.");
        assert_eq!(inside, outside);
        assert_eq!(inside.traits[0].name(), Some("Amphibious"));
    }

    #[test]
    fn test_preserves_inline_formatting() {
        let result =
            segment("## Traits\n\n**Spellcasting.** You can cast *fireball* and _magic missile_.");
        assert_eq!(
            result.traits[0].description(),
            "You can cast *fireball* and _magic missile_."
        );
    }

    #[test]
    fn test_ignores_unknown_sections() {
        let input = "\
Intro text before any header.

## Some Random Section

**Something.** This should be ignored.

## Actions

**Bite.** Melee Weapon Attack.";
        let result = segment(input);

        assert_eq!(result.actions.len(), 1);
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_empty_sections() {
        let result = segment("## Traits\n\n## Actions\n\n**Bite.** Melee Weapon Attack.");
        assert!(result.traits.is_empty());
        assert_eq!(result.actions.len(), 1);
    }

    #[test]
    fn test_repeated_sections_accumulate_in_order() {
        let input = "\
## Actions

**First.** One.

## Traits

**Middle.** Two.

## actions

**Second.** Three.";
        let result = segment(input);

        let names: Vec<_> = result.actions.iter().map(|a| a.name()).collect();
        assert_eq!(names, [Some("First"), Some("Second")]);
        assert_eq!(result.traits.len(), 1);
    }

    #[test]
    fn test_deeper_headers_are_not_sections() {
        let input = "## Traits\n\n### Subheading\n\n**Keen Smell.** Advantage.";
        let result = segment(input);
        assert_eq!(result.traits.len(), 2);
        assert_eq!(result.traits[0].name(), None);
        assert_eq!(result.traits[0].description(), "### Subheading");
    }

    #[test]
    fn test_plain_paragraph_kept_by_default() {
        let result = segment("## Traits\n\nThe creature is always hungry.");
        assert_eq!(
            result.traits,
            [Ability::plain(
                "The creature is always hungry.",
                AbilityCategory::Trait
            )]
        );
    }

    #[test]
    fn test_plain_paragraph_dropped() {
        let result = Segmenter::new()
            .with_plain_paragraphs(PlainParagraphs::Drop)
            .segment("## Traits\n\nThe creature is always hungry.\n\n**Keen Smell.** Advantage.");
        assert_eq!(result.traits.len(), 1);
        assert_eq!(result.traits[0].name(), Some("Keen Smell"));
    }

    #[test]
    fn test_multiline_description() {
        let input = "## Actions\n\n**Multiattack.** The dragon makes three attacks:\none with its bite and two with its claws.";
        let result = segment(input);
        assert_eq!(result.actions[0].name(), Some("Multiattack"));
        assert_eq!(
            result.actions[0].description(),
            "The dragon makes three attacks:\none with its bite and two with its claws."
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "## Traits\r\n\r\n**Darkvision.** See in the dark.\r\n\r\n**Keen Smell.** Advantage.";
        let result = segment(input);
        assert_eq!(result.traits.len(), 2);
        assert_eq!(result.traits[1].description(), "Advantage.");
    }

    #[test]
    fn test_split_sections() {
        let sections = split_sections("preamble\n## One \nalpha\n\nbeta\n## Two\n");
        assert_eq!(
            sections,
            [
                Section {
                    name: "One",
                    content: "alpha\n\nbeta",
                },
                Section {
                    name: "Two",
                    content: "",
                },
            ]
        );
    }
}
