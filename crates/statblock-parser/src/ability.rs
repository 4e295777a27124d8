//! Ability data model.

use std::fmt;

/// Gameplay category an ability belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AbilityCategory {
    Trait,
    Action,
    BonusAction,
    Reaction,
}

/// Recognized section names (lowercase) and the category each maps to.
const SECTION_NAMES: [(&str, AbilityCategory); 4] = [
    ("traits", AbilityCategory::Trait),
    ("actions", AbilityCategory::Action),
    ("bonus actions", AbilityCategory::BonusAction),
    ("reactions", AbilityCategory::Reaction),
];

impl AbilityCategory {
    /// All categories in output order.
    pub const ALL: [Self; 4] = [Self::Trait, Self::Action, Self::BonusAction, Self::Reaction];

    /// Map a section header to its category, ignoring case and surrounding
    /// whitespace.
    #[must_use]
    pub fn from_section_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        SECTION_NAMES
            .iter()
            .find(|(section, _)| *section == normalized)
            .map(|&(_, category)| category)
    }

    /// Human-readable label, as used in section headers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Trait => "Traits",
            Self::Action => "Actions",
            Self::BonusAction => "Bonus Actions",
            Self::Reaction => "Reactions",
        }
    }

    /// Output file name for this category's formatted abilities.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Trait => "traits.txt",
            Self::Action => "actions.txt",
            Self::BonusAction => "bonus-actions.txt",
            Self::Reaction => "reactions.txt",
        }
    }
}

impl fmt::Display for AbilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single ability parsed from one markdown paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ability {
    name: Option<String>,
    description: String,
    category: AbilityCategory,
}

impl Ability {
    /// Create an ability with a bold-prefixed name.
    ///
    /// An empty name produces an unnamed ability.
    #[must_use]
    pub fn named(
        name: impl Into<String>,
        description: impl Into<String>,
        category: AbilityCategory,
    ) -> Self {
        let name = name.into();
        Self {
            name: (!name.is_empty()).then_some(name),
            description: description.into(),
            category,
        }
    }

    /// Create an unnamed ability from a plain paragraph.
    #[must_use]
    pub fn plain(description: impl Into<String>, category: AbilityCategory) -> Self {
        Self {
            name: None,
            description: description.into(),
            category,
        }
    }

    /// Ability name, if the paragraph had one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> AbilityCategory {
        self.category
    }
}

/// Abilities of one document, grouped by category in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseResult {
    pub traits: Vec<Ability>,
    pub actions: Vec<Ability>,
    pub bonus_actions: Vec<Ability>,
    pub reactions: Vec<Ability>,
}

impl ParseResult {
    /// Abilities of one category.
    #[must_use]
    pub fn abilities(&self, category: AbilityCategory) -> &[Ability] {
        match category {
            AbilityCategory::Trait => &self.traits,
            AbilityCategory::Action => &self.actions,
            AbilityCategory::BonusAction => &self.bonus_actions,
            AbilityCategory::Reaction => &self.reactions,
        }
    }

    pub(crate) fn abilities_mut(&mut self, category: AbilityCategory) -> &mut Vec<Ability> {
        match category {
            AbilityCategory::Trait => &mut self.traits,
            AbilityCategory::Action => &mut self.actions,
            AbilityCategory::BonusAction => &mut self.bonus_actions,
            AbilityCategory::Reaction => &mut self.reactions,
        }
    }

    /// Iterate categories in output order with their abilities.
    pub fn categories(&self) -> impl Iterator<Item = (AbilityCategory, &[Ability])> {
        AbilityCategory::ALL
            .into_iter()
            .map(|category| (category, self.abilities(category)))
    }

    /// Total number of abilities across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.categories().map(|(_, abilities)| abilities.len()).sum()
    }

    /// Whether no abilities were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
