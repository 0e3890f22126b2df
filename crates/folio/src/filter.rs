//! Local category and search filtering over rendered cards.
//!
//! This never triggers a fetch; it only flips card visibility on whatever the
//! renderer already holds.

use std::fmt;
use std::str::FromStr;

use crate::card::ProjectCard;
use crate::renderer::Renderer;

/// Category selector value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    /// Every language.
    #[default]
    All,
    /// A lowercase language key such as `rust` or `html`.
    Language(String),
}

impl Category {
    /// Returns true when a card with `language_key` belongs to this category.
    ///
    /// The `html` category also takes `css` cards.
    pub fn matches(&self, language_key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Language(lang) => {
                language_key == lang || (lang == "html" && language_key == "css")
            }
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        if key.is_empty() || key == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Language(key))
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Language(lang) => f.write_str(lang),
        }
    }
}

/// The active category plus the current search text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalFilter {
    pub category: Category,
    pub search: String,
}

impl LocalFilter {
    pub fn new(category: Category, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// Both the category and the search text must match.
    pub fn matches(&self, card: &ProjectCard) -> bool {
        self.category.matches(&card.language_key)
            && card.search_name.contains(&self.search.to_lowercase())
    }

    /// Applies the filter to every rendered card and returns how many remain visible.
    pub fn apply<R: Renderer + ?Sized>(&self, renderer: &mut R) -> usize {
        let decisions: Vec<_> = renderer
            .cards()
            .iter()
            .map(|card| (card.id, self.matches(card)))
            .collect();
        let mut shown = 0;
        for (id, visible) in decisions {
            renderer.set_card_visible(id, visible);
            shown += usize::from(visible);
        }
        tracing::debug!(category = %self.category, search = %self.search, shown, "local filter applied");
        shown
    }
}
