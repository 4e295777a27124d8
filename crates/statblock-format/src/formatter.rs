//! Ability batch formatting.

use rayon::prelude::*;
use statblock_dice::{DiceError, convert_rolls, try_convert_rolls};
use statblock_parser::{Ability, AbilityCategory, ParseResult};
use statblock_spells::{SpellBook, SpellWarning, convert_spell_links};

use crate::FormatError;

/// Separator between formatted abilities.
const ABILITY_SEPARATOR: &str = "\n\n";

/// Formatted text of an ability batch plus the warnings it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedAbilities {
    /// Abilities joined by blank lines.
    pub text: String,
    /// Warnings in ability order.
    pub warnings: Vec<String>,
}

/// Formatted output of one category of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutput {
    pub category: AbilityCategory,
    /// Number of abilities formatted.
    pub count: usize,
    pub text: String,
    pub warnings: Vec<String>,
}

impl CategoryOutput {
    /// Warnings prefixed with their category, e.g. `[Actions] Unknown spell: "Hex"`.
    pub fn tagged_warnings(&self) -> impl Iterator<Item = String> + '_ {
        self.warnings
            .iter()
            .map(|warning| format!("[{}] {warning}", self.category))
    }
}

/// Formats abilities against a spell dictionary.
///
/// The formatter only borrows the spell book, so one book can serve many
/// documents, including from several threads.
#[derive(Debug, Clone, Copy)]
pub struct AbilityFormatter<'a> {
    spells: &'a SpellBook,
    strict_dice: bool,
}

impl<'a> AbilityFormatter<'a> {
    #[must_use]
    pub fn new(spells: &'a SpellBook) -> Self {
        Self {
            spells,
            strict_dice: false,
        }
    }

    /// Treat roll expressions with invalid dice (`damage: 1d3`) as errors
    /// instead of leaving them unconverted.
    #[must_use]
    pub fn with_strict_dice(mut self, strict: bool) -> Self {
        self.strict_dice = strict;
        self
    }

    /// Format one ability, returning its text and spell warnings.
    ///
    /// # Errors
    ///
    /// Returns a [`DiceError`] only in strict dice mode.
    pub fn format_ability(
        &self,
        ability: &Ability,
    ) -> Result<(String, Vec<SpellWarning>), DiceError> {
        let (text, warnings) = self.link_spells(ability);
        let text = self.rolls(&text, ability)?;
        Ok((text, warnings))
    }

    /// Ability text with spell references converted.
    fn link_spells(&self, ability: &Ability) -> (String, Vec<SpellWarning>) {
        let text = match ability.name() {
            Some(name) => format!("{name}. {}", ability.description()),
            None => ability.description().to_owned(),
        };
        convert_spell_links(&text, self.spells)
    }

    /// Roll conversion, labelled with the ability name.
    fn rolls(&self, text: &str, ability: &Ability) -> Result<String, DiceError> {
        let action_name = ability.name().unwrap_or_default();
        if self.strict_dice {
            try_convert_rolls(text, action_name)
        } else {
            Ok(convert_rolls(text, action_name))
        }
    }

    /// Format a batch of abilities in order.
    ///
    /// An empty batch yields empty text and no warnings.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] at the first ability whose rolls fail in strict
    /// dice mode; no further abilities are processed.
    pub fn format(&self, abilities: &[Ability]) -> Result<FormattedAbilities, FormatError> {
        let mut formatted = Vec::with_capacity(abilities.len());
        let mut warnings = Vec::new();

        for ability in abilities {
            let (text, spell_warnings) = self.link_spells(ability);
            warnings.extend(spell_warnings.iter().map(ToString::to_string));

            match self.rolls(&text, ability) {
                Ok(text) => formatted.push(text),
                Err(source) => {
                    return Err(FormatError {
                        category: ability.category(),
                        ability: ability.name().unwrap_or_default().to_owned(),
                        warnings,
                        source,
                    });
                }
            }
        }

        Ok(FormattedAbilities {
            text: formatted.join(ABILITY_SEPARATOR),
            warnings,
        })
    }

    /// Format every category of a parsed document.
    ///
    /// Categories are formatted in parallel and returned in output order
    /// (Traits, Actions, Bonus Actions, Reactions).
    ///
    /// # Errors
    ///
    /// Returns the [`FormatError`] of the first failing category in output
    /// order.
    pub fn format_document(
        &self,
        document: &ParseResult,
    ) -> Result<Vec<CategoryOutput>, FormatError> {
        let results: Vec<_> = AbilityCategory::ALL
            .as_slice()
            .par_iter()
            .map(|&category| -> Result<CategoryOutput, FormatError> {
                let abilities = document.abilities(category);
                let formatted = self.format(abilities)?;
                tracing::debug!(
                    %category,
                    count = abilities.len(),
                    warnings = formatted.warnings.len(),
                    "Formatted category"
                );
                Ok(CategoryOutput {
                    category,
                    count: abilities.len(),
                    text: formatted.text,
                    warnings: formatted.warnings,
                })
            })
            .collect();

        results.into_iter().collect()
    }
}

/// Format a batch of abilities with default (lenient) dice handling.
///
/// # Errors
///
/// Never fails in lenient mode; the `Result` mirrors
/// [`AbilityFormatter::format`].
pub fn format_abilities(
    abilities: &[Ability],
    spells: &SpellBook,
) -> Result<FormattedAbilities, FormatError> {
    AbilityFormatter::new(spells).format(abilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use statblock_parser::segment;

    fn spells() -> SpellBook {
        ["Fireball", "Magic Missile", "Shield"].into_iter().collect()
    }

    #[test]
    fn test_empty_list() {
        let formatted = format_abilities(&[], &SpellBook::new()).unwrap();
        assert_eq!(formatted, FormattedAbilities::default());
    }

    #[test]
    fn test_single_ability() {
        let abilities = [Ability::named(
            "Darkvision",
            "You can see in dim light within 60 feet.",
            AbilityCategory::Trait,
        )];
        let formatted = format_abilities(&abilities, &SpellBook::new()).unwrap();
        assert_eq!(formatted.text, "Darkvision. You can see in dim light within 60 feet.");
        assert!(formatted.warnings.is_empty());
    }

    #[test]
    fn test_multiple_abilities_joined_by_blank_line() {
        let abilities = [
            Ability::named(
                "Darkvision",
                "You can see in dim light within 60 feet.",
                AbilityCategory::Trait,
            ),
            Ability::named(
                "Pack Tactics",
                "You have advantage on attack rolls.",
                AbilityCategory::Trait,
            ),
        ];
        let formatted = format_abilities(&abilities, &SpellBook::new()).unwrap();
        assert_eq!(
            formatted.text,
            "Darkvision. You can see in dim light within 60 feet.\n\nPack Tactics. You have advantage on attack rolls."
        );
    }

    #[test]
    fn test_plain_ability_has_no_prefix() {
        let abilities = [Ability::plain("damage: 1d6 fire.", AbilityCategory::Trait)];
        let formatted = format_abilities(&abilities, &SpellBook::new()).unwrap();
        assert_eq!(
            formatted.text,
            r#"[rollable]4(1d6);{"diceNotation":"1d6","rollType":"damage","rollAction":""}[/rollable] fire."#
        );
    }

    #[test]
    fn test_dice_rolls_use_ability_name() {
        let abilities = [Ability::named(
            "Quarterstaff",
            "Melee Weapon Attack: to hit: 1d20+2, reach 5 ft. Hit: damage: 1d6+2 bludgeoning.",
            AbilityCategory::Action,
        )];
        let formatted = format_abilities(&abilities, &SpellBook::new()).unwrap();
        assert_eq!(
            formatted.text,
            concat!(
                "Quarterstaff. Melee Weapon Attack: ",
                r#"[rollable]+2;{"diceNotation":"1d20+2","rollType":"to hit","rollAction":"Quarterstaff"}[/rollable]"#,
                ", reach 5 ft. Hit: ",
                r#"[rollable]6(1d6+2);{"diceNotation":"1d6+2","rollType":"damage","rollAction":"Quarterstaff"}[/rollable]"#,
                " bludgeoning."
            )
        );
    }

    #[test]
    fn test_spell_links_and_warnings() {
        let abilities = [
            Ability::named(
                "Innate Spellcasting",
                "You can cast {{spell:Fireball}} and {{spell:Fake Spell}}.",
                AbilityCategory::Trait,
            ),
            Ability::named("Ward", "You can cast {{spell:}}.", AbilityCategory::Trait),
        ];
        let formatted = format_abilities(&abilities, &spells()).unwrap();
        assert_eq!(
            formatted.text,
            "Innate Spellcasting. You can cast [spell]Fireball[/spell] and [spell]Fake Spell[/spell].\n\nWard. You can cast [spell][/spell]."
        );
        assert_eq!(
            formatted.warnings,
            [
                r#"Unknown spell: "Fake Spell""#.to_owned(),
                "Empty spell name in {{spell:}}".to_owned(),
            ]
        );
    }

    #[test]
    fn test_invalid_dice_silent_in_lenient_mode() {
        let abilities = [Ability::named(
            "Dart",
            "Roll damage: 1d3 piercing.",
            AbilityCategory::Action,
        )];
        let formatted = format_abilities(&abilities, &SpellBook::new()).unwrap();
        assert_eq!(formatted.text, "Dart. Roll damage: 1d3 piercing.");
        assert!(formatted.warnings.is_empty());
    }

    #[test]
    fn test_strict_dice_stops_batch_and_keeps_warnings() {
        let abilities = [
            Ability::named("Hex", "Cast {{spell:Hex}}.", AbilityCategory::Action),
            Ability::named("Dart", "damage: 1d3 piercing.", AbilityCategory::Action),
            Ability::named("Later", "Cast {{spell:Unknown}}.", AbilityCategory::Action),
        ];
        let err = AbilityFormatter::new(&spells())
            .with_strict_dice(true)
            .format(&abilities)
            .unwrap_err();

        assert_eq!(err.ability, "Dart");
        assert_eq!(err.category, AbilityCategory::Action);
        assert_eq!(err.warnings, [r#"Unknown spell: "Hex""#.to_owned()]);
        assert!(matches!(err.source, DiceError::InvalidDiceType(_)));
    }

    #[test]
    fn test_strict_dice_failure_keeps_own_spell_warnings() {
        let abilities = [Ability::named(
            "Glamour Dart",
            "Cast {{spell:Goblin Glamour}}, then damage: 1d3 piercing.",
            AbilityCategory::Action,
        )];
        let err = AbilityFormatter::new(&spells())
            .with_strict_dice(true)
            .format(&abilities)
            .unwrap_err();

        assert_eq!(err.ability, "Glamour Dart");
        assert_eq!(err.warnings, [r#"Unknown spell: "Goblin Glamour""#.to_owned()]);
    }

    #[test]
    fn test_spells_converted_before_rolls() {
        // A spell named like a roll expression is linked, and the roll inside
        // the link is still converted afterwards.
        let abilities = [Ability::named(
            "Odd",
            "{{spell:damage: 1d6}}",
            AbilityCategory::Action,
        )];
        let formatted = format_abilities(&abilities, &SpellBook::new()).unwrap();
        assert!(formatted.text.starts_with("Odd. [spell][rollable]4(1d6);"));
        assert!(formatted.text.ends_with("[/rollable][/spell]"));
        assert_eq!(formatted.warnings.len(), 1);
    }

    #[test]
    fn test_format_document() {
        let document = segment(
            "## Reactions\n\n**Parry.** Add 2 to AC.\n\n## Traits\n\n**Keen Smell.** Cast {{spell:Nope}}.",
        );
        let outputs = AbilityFormatter::new(&spells())
            .format_document(&document)
            .unwrap();

        let categories: Vec<_> = outputs.iter().map(|o| o.category).collect();
        assert_eq!(categories, AbilityCategory::ALL);

        assert_eq!(outputs[0].count, 1);
        assert_eq!(outputs[0].text, "Keen Smell. Cast [spell]Nope[/spell].");
        assert_eq!(
            outputs[0].tagged_warnings().collect::<Vec<_>>(),
            [r#"[Traits] Unknown spell: "Nope""#.to_owned()]
        );
        assert_eq!(outputs[1].count, 0);
        assert_eq!(outputs[1].text, "");
        assert_eq!(outputs[3].text, "Parry. Add 2 to AC.");
    }
}
