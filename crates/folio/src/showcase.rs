//! The fetch → filter → map → render pipeline.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use folio::allowlist::AllowList;
//! use folio::github::{ClientConfig, GitHubClient};
//! use folio::renderer::RenderState;
//! use folio::showcase::ProjectShowcase;
//!
//! # async fn run() -> Result<(), folio::github::FetchError> {
//! let client = GitHubClient::new(ClientConfig::default())?;
//! let showcase = ProjectShowcase::new(Arc::new(client), AllowList::default(), RenderState::new());
//! let outcome = showcase.load_projects("octocat").await;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, MutexGuard};

use crate::allowlist::AllowList;
use crate::card::{CardId, ProjectCard};
use crate::filter::LocalFilter;
use crate::github::{FetchError, FetchResult, RepositorySource};
use crate::renderer::{EmptyMessage, Region, Renderer};
use crate::repository::RepositoryRecord;

/// Why a load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network error or non-success status.
    Fetch,
    /// The body could not be parsed.
    MalformedResponse,
}

impl From<&FetchError> for FailureKind {
    fn from(err: &FetchError) -> Self {
        if err.is_malformed() {
            Self::MalformedResponse
        } else {
            Self::Fetch
        }
    }
}

/// What a single load did to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Cards were rendered.
    Loaded { count: usize },
    /// The user has no repositories.
    Empty,
    /// Repositories came back but none are on the allow-list.
    NoMatch { available: Vec<String> },
    /// The fetch failed; the user may retry.
    Failed(FailureKind),
    /// A newer load started before this one finished; nothing was rendered.
    Superseded,
}

impl LoadOutcome {
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Fetches, curates and renders a user's projects.
pub struct ProjectShowcase<R> {
    source: Arc<dyn RepositorySource>,
    allow_list: AllowList,
    renderer: Mutex<R>,
    generation: AtomicU64,
}

impl<R: Renderer> ProjectShowcase<R> {
    pub fn new(source: Arc<dyn RepositorySource>, allow_list: AllowList, renderer: R) -> Self {
        Self {
            source,
            allow_list,
            renderer: Mutex::new(renderer),
            generation: AtomicU64::new(0),
        }
    }

    /// Locks the renderer for reading or for local filtering.
    pub fn renderer(&self) -> MutexGuard<'_, R> {
        self.renderer.lock()
    }

    /// Generation of the most recently started load.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Loads and renders the projects of `identifier`.
    ///
    /// Every failure is turned into renderer state; nothing is returned as an
    /// error. A blank identifier takes the failure path without fetching. When another load starts before this one's fetch completes, this
    /// load's result is dropped and [`LoadOutcome::Superseded`] is returned.
    pub async fn load_projects(&self, identifier: &str) -> LoadOutcome {
        let identifier = identifier.trim();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(user = identifier, generation, "loading projects");

        {
            let mut renderer = self.renderer.lock();
            renderer.set_visible(Region::Loading, true);
            renderer.clear_cards();
            renderer.set_visible(Region::EmptyState, false);
        }

        let fetched = if identifier.is_empty() {
            Err(FetchError::EmptyIdentifier)
        } else {
            self.source.list_repositories(identifier).await
        };

        let mut renderer = self.renderer.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(user = identifier, generation, "discarding superseded load");
            return LoadOutcome::Superseded;
        }
        render_fetch_result(&mut *renderer, &self.allow_list, fetched)
    }

    /// Re-applies a category/search filter to the rendered cards.
    pub fn apply_filter(&self, filter: &LocalFilter) -> usize {
        filter.apply(&mut *self.renderer.lock())
    }
}

/// Applies the outcome of a fetch to `renderer`.
///
/// This is the whole post-fetch half of the pipeline: empty check, allow-list
/// filtering, card mapping and the region toggles for each path.
pub fn render_fetch_result<R: Renderer + ?Sized>(
    renderer: &mut R,
    allow_list: &AllowList,
    fetched: FetchResult<Vec<RepositoryRecord>>,
) -> LoadOutcome {
    let records = match fetched {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(error = %err, "error fetching GitHub projects");
            renderer.set_visible(Region::Loading, false);
            renderer.set_empty_message(EmptyMessage::Generic);
            renderer.set_visible(Region::EmptyState, true);
            renderer.set_visible(Region::InputWrapper, true);
            return LoadOutcome::Failed(FailureKind::from(&err));
        }
    };

    renderer.set_visible(Region::Loading, false);
    renderer.set_visible(Region::InputWrapper, false);

    if records.is_empty() {
        renderer.set_empty_message(EmptyMessage::Generic);
        renderer.set_visible(Region::EmptyState, true);
        return LoadOutcome::Empty;
    }

    let matching = allow_list.filter(&records);
    if matching.is_empty() {
        let available: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        tracing::warn!(
            available = ?available,
            "no allow-listed projects found among fetched repositories"
        );
        renderer.set_empty_message(EmptyMessage::NoMatch {
            available: available.clone(),
        });
        renderer.set_visible(Region::EmptyState, true);
        renderer.set_visible(Region::InputWrapper, true);
        return LoadOutcome::NoMatch { available };
    }

    let ids: Vec<CardId> = matching
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let card = ProjectCard::from_record(record, index);
            let id = card.id;
            renderer.append_card(card);
            id
        })
        .collect();
    renderer.observe_reveal(&ids);

    let names: Vec<&str> = matching.iter().map(|r| r.name.as_str()).collect();
    tracing::info!(count = ids.len(), projects = ?names, "projects loaded");
    LoadOutcome::Loaded { count: ids.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderState;

    fn repo(name: &str) -> RepositoryRecord {
        RepositoryRecord::new(name, format!("https://x/{name}"))
    }

    #[test]
    fn failure_hides_loading_and_shows_input() {
        let mut state = RenderState::new();
        state.set_visible(Region::Loading, true);
        state.set_visible(Region::InputWrapper, false);

        let outcome = render_fetch_result(
            &mut state,
            &AllowList::default(),
            Err(FetchError::Status {
                status: 404,
                message: String::new(),
            }),
        );

        assert_eq!(outcome, LoadOutcome::Failed(FailureKind::Fetch));
        assert!(!state.is_visible(Region::Loading));
        assert!(state.is_visible(Region::EmptyState));
        assert!(state.is_visible(Region::InputWrapper));
        assert_eq!(state.empty_message(), &EmptyMessage::Generic);
    }

    #[test]
    fn malformed_body_is_reported_separately() {
        let mut state = RenderState::new();
        let err = crate::repository::parse_records("{").unwrap_err();
        let outcome = render_fetch_result(&mut state, &AllowList::default(), Err(err.into()));
        assert_eq!(outcome, LoadOutcome::Failed(FailureKind::MalformedResponse));
        assert!(state.is_visible(Region::EmptyState));
    }

    #[test]
    fn success_observes_every_card() {
        let mut state = RenderState::new();
        let list = AllowList::new(["a", "b"]);
        let outcome = render_fetch_result(&mut state, &list, Ok(vec![repo("b"), repo("z"), repo("a")]));

        assert_eq!(outcome, LoadOutcome::Loaded { count: 2 });
        assert_eq!(state.reveal().observed_count(), 2);
        let titles: Vec<_> = state.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
        assert!(!state.is_visible(Region::InputWrapper));
    }

    #[test]
    fn empty_result_hides_input() {
        let mut state = RenderState::new();
        let outcome = render_fetch_result(&mut state, &AllowList::default(), Ok(Vec::new()));
        assert_eq!(outcome, LoadOutcome::Empty);
        assert!(state.is_visible(Region::EmptyState));
        assert!(!state.is_visible(Region::InputWrapper));
    }

    #[test]
    fn no_match_lists_every_name() {
        let mut state = RenderState::new();
        let outcome = render_fetch_result(
            &mut state,
            &AllowList::default(),
            Ok(vec![repo("dotfiles"), repo("notes")]),
        );
        assert_eq!(
            outcome,
            LoadOutcome::NoMatch {
                available: vec!["dotfiles".into(), "notes".into()]
            }
        );
        assert_eq!(
            state.empty_message().available(),
            Some(&["dotfiles".to_string(), "notes".to_string()][..])
        );
    }
}
