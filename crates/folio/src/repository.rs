//! Repository records as returned by the GitHub REST API.
//!
//! Only the fields the showcase consumes are modelled; everything else in the
//! response body is ignored by serde.

use serde::{Deserialize, Serialize};

/// A repository returned by `GET /users/{user}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name, usually kebab-case.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language as detected by the host.
    #[serde(default)]
    pub language: Option<String>,
    /// Topic tags in the order the host reports them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
    /// Link to the repository page.
    pub html_url: String,
    /// Link to a live deployment.
    #[serde(default)]
    pub homepage: Option<String>,
}

impl RepositoryRecord {
    /// Creates a record with only a name and source link set.
    pub fn new(name: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            language: None,
            topics: Vec::new(),
            html_url: html_url.into(),
            homepage: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the primary language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the topic list.
    #[must_use]
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the live deployment link.
    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Returns the live deployment link if it is present and non-empty.
    pub fn live_demo(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|url| !url.trim().is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a response body into an ordered list of records.
///
/// # Errors
///
/// Returns the serde error when the body is not a JSON array of repositories.
pub fn parse_records(body: &str) -> Result<Vec<RepositoryRecord>, serde_json::Error> {
    serde_json::from_str(body)
}
