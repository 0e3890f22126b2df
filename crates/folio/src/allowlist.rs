//! Curated allow-list of repositories to showcase.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::repository::RepositoryRecord;

/// Repositories shown by default.
pub const DEFAULT_PROJECTS: [&str; 6] = [
    "Eataly-Hub",
    "E-commerce-website",
    "Finance-Pulse-Money-Intelligence-Dashboard",
    "IT-Asset-Manager",
    "PathFinder-AI-The-Career-Architect-For-Next-Gen-Enigeers",
    "Tholakwande-Group",
];

/// Normalizes a repository name for matching.
///
/// Lowercases and removes every `-` and `_`, so `Eataly-Hub`,
/// `eataly_hub` and `EatalyHub` all compare equal.
///
/// # Example
///
/// ```rust
/// use folio::allowlist::normalize_name;
///
/// assert_eq!(normalize_name("IT-Asset_Manager"), "itassetmanager");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A fixed, ordered set of project names used as an inclusion filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    /// Creates an allow-list from the given names.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the configured names in their original order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true when `name` normalizes to any configured entry.
    pub fn contains(&self, name: &str) -> bool {
        let needle = normalize_name(name);
        self.entries.iter().any(|entry| normalize_name(entry) == needle)
    }

    /// Keeps the records whose name is on the list.
    ///
    /// The result follows the order of `records`, not the order of the list.
    /// Duplicate records each match on their own.
    pub fn filter<'a>(&self, records: &'a [RepositoryRecord]) -> Vec<&'a RepositoryRecord> {
        let wanted: HashSet<String> = self.entries.iter().map(|e| normalize_name(e)).collect();
        records
            .iter()
            .filter(|record| wanted.contains(&normalize_name(&record.name)))
            .collect()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> RepositoryRecord {
        RepositoryRecord::new(name, format!("https://github.com/u/{name}"))
    }

    #[test]
    fn normalize_strips_separators_and_case() {
        assert_eq!(normalize_name("Eataly-Hub"), "eatalyhub");
        assert_eq!(normalize_name("eataly_hub"), "eatalyhub");
        assert_eq!(normalize_name("E-commerce-website"), "ecommercewebsite");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn default_list_has_six_entries() {
        let list = AllowList::default();
        assert_eq!(list.len(), 6);
        assert!(list.contains("eataly_hub"));
        assert!(list.contains("TholakwandeGroup"));
        assert!(!list.contains("dotfiles"));
    }

    #[test]
    fn filter_keeps_fetch_order() {
        let list = AllowList::new(["Tholakwande-Group", "Eataly-Hub"]);
        let records = vec![repo("eataly-hub"), repo("dotfiles"), repo("Tholakwande_Group")];
        let names: Vec<_> = list.filter(&records).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["eataly-hub", "Tholakwande_Group"]);
    }

    #[test]
    fn duplicate_records_match_independently() {
        let list = AllowList::new(["Eataly-Hub", "Eataly-Hub"]);
        let records = vec![repo("Eataly-Hub"), repo("EatalyHub")];
        assert_eq!(list.filter(&records).len(), 2);
    }

    #[test]
    fn empty_list_matches_nothing() {
        let list = AllowList::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert!(list.filter(&[repo("Eataly-Hub")]).is_empty());
    }

    #[test]
    fn deserializes_from_plain_array() {
        let list: AllowList = serde_json::from_str(r#"["a-b", "c"]"#).unwrap();
        assert_eq!(list.entries(), ["a-b", "c"]);
    }
}
