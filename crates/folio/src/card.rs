//! Display cards derived from repository records.

use std::time::Duration;

use serde::Serialize;

use crate::repository::RepositoryRecord;

/// Maximum description length before truncation, in characters.
pub const DESCRIPTION_LIMIT: usize = 120;

/// Appended to truncated descriptions.
pub const ELLIPSIS: &str = "...";

/// Shown when a repository has no description.
pub const PLACEHOLDER_DESCRIPTION: &str =
    "A GitHub repository showcasing development skills and best practices.";

/// Language label used when the host detected none.
pub const FALLBACK_LANGUAGE: &str = "Code";

/// Maximum number of topic tags on a card.
pub const MAX_TOPICS: usize = 3;

/// Delay between the reveal of consecutive cards.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);

/// Position of a card in the rendered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardId(pub usize);

/// A labelled link on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLink {
    pub label: &'static str,
    pub url: String,
}

/// A display-ready project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub id: CardId,
    pub title: String,
    pub description: String,
    pub language: String,
    pub topics: Vec<String>,
    pub source: CardLink,
    pub demo: Option<CardLink>,
    /// Lowercase repository name, matched by the search box.
    pub search_name: String,
    /// Lowercase language, or `"other"`, matched by the category filter.
    pub language_key: String,
}

impl ProjectCard {
    /// Maps a record to the card shown at position `index`.
    pub fn from_record(record: &RepositoryRecord, index: usize) -> Self {
        let description = record
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map_or_else(|| PLACEHOLDER_DESCRIPTION.to_string(), truncate_description);

        Self {
            id: CardId(index),
            title: format_title(&record.name),
            description,
            language: record
                .language
                .clone()
                .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string()),
            topics: record.topics.iter().take(MAX_TOPICS).cloned().collect(),
            source: CardLink {
                label: "Code",
                url: record.html_url.clone(),
            },
            demo: record.live_demo().map(|url| CardLink {
                label: "Live Demo",
                url: url.to_string(),
            }),
            search_name: record.name.to_lowercase(),
            language_key: record
                .language
                .as_deref()
                .map_or_else(|| "other".to_string(), str::to_lowercase),
        }
    }

    /// All tags in display order: the language label, then the topics.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.language.as_str()).chain(self.topics.iter().map(String::as_str))
    }

    /// Links in display order.
    pub fn links(&self) -> impl Iterator<Item = &CardLink> {
        std::iter::once(&self.source).chain(self.demo.as_ref())
    }

    /// How long after the reveal starts this card should appear.
    pub fn reveal_delay(&self) -> Duration {
        REVEAL_STAGGER * u32::try_from(self.id.0).unwrap_or(u32::MAX)
    }
}

/// Turns a kebab-case repository name into a title.
///
/// Every `-` separated segment gets its first character uppercased; the rest
/// of the segment is left as is.
///
/// ```rust
/// use folio::card::format_title;
///
/// assert_eq!(format_title("pathfinder-ai-project"), "Pathfinder Ai Project");
/// ```
pub fn format_title(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Cuts a description to [`DESCRIPTION_LIMIT`] characters plus [`ELLIPSIS`].
///
/// Applying it twice gives the same result as applying it once.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_LIMIT {
        return description.to_string();
    }
    let mut out: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    out.push_str(ELLIPSIS);
    out
}
