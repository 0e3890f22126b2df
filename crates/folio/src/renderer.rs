//! The render target the showcase pipeline drives.
//!
//! The pipeline never touches a concrete UI. It clears the card container,
//! appends cards and toggles a handful of named regions through [`Renderer`].
//! [`RenderState`] is the in-memory implementation; the terminal and HTML
//! renderers keep one and draw from it.

use std::collections::HashSet;

use crate::card::{CardId, ProjectCard};
use crate::reveal::RevealObserver;

/// Regions whose visibility the pipeline toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Spinner or "loading" text shown while a fetch is in flight.
    Loading,
    /// Placeholder shown instead of cards.
    EmptyState,
    /// The identifier input and its submit button.
    InputWrapper,
}

/// Content of the empty-state region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmptyMessage {
    /// "No projects found".
    #[default]
    Generic,
    /// Repositories came back but none were on the allow-list.
    NoMatch {
        /// Names of every fetched repository, in fetch order.
        available: Vec<String>,
    },
}

impl EmptyMessage {
    pub const GENERIC_TITLE: &'static str = "No projects found";
    pub const GENERIC_BODY: &'static str = "Try a different GitHub username.";
    pub const NO_MATCH_TITLE: &'static str = "Specific Projects Not Found";
    pub const NO_MATCH_BODY: &'static str =
        "Could not find the specified projects. Please check your repository names.";

    pub const fn title(&self) -> &'static str {
        match self {
            Self::Generic => Self::GENERIC_TITLE,
            Self::NoMatch { .. } => Self::NO_MATCH_TITLE,
        }
    }

    pub const fn body(&self) -> &'static str {
        match self {
            Self::Generic => Self::GENERIC_BODY,
            Self::NoMatch { .. } => Self::NO_MATCH_BODY,
        }
    }

    /// The repository listing of a no-match message.
    pub fn available(&self) -> Option<&[String]> {
        match self {
            Self::Generic => None,
            Self::NoMatch { available } => Some(available),
        }
    }
}

/// A UI surface the showcase renders into.
pub trait Renderer: Send {
    /// Removes every rendered card.
    fn clear_cards(&mut self);

    /// Appends a card to the container.
    fn append_card(&mut self, card: ProjectCard);

    /// Shows or hides a region.
    fn set_visible(&mut self, region: Region, visible: bool);

    /// Replaces the content of the empty-state region.
    fn set_empty_message(&mut self, message: EmptyMessage);

    /// Starts watching cards for their first appearance in the viewport.
    fn observe_reveal(&mut self, ids: &[CardId]);

    /// Shows or hides a single rendered card.
    fn set_card_visible(&mut self, id: CardId, visible: bool);

    /// Cards currently in the container, in render order.
    fn cards(&self) -> &[ProjectCard];
}

/// In-memory render target.
#[derive(Debug, Clone)]
pub struct RenderState {
    cards: Vec<ProjectCard>,
    hidden: HashSet<CardId>,
    loading: bool,
    empty_state: bool,
    input_wrapper: bool,
    empty_message: EmptyMessage,
    reveal: RevealObserver,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            hidden: HashSet::new(),
            loading: false,
            empty_state: false,
            input_wrapper: true,
            empty_message: EmptyMessage::Generic,
            reveal: RevealObserver::default(),
        }
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::Loading => self.loading,
            Region::EmptyState => self.empty_state,
            Region::InputWrapper => self.input_wrapper,
        }
    }

    pub fn empty_message(&self) -> &EmptyMessage {
        &self.empty_message
    }

    pub fn is_card_visible(&self, id: CardId) -> bool {
        !self.hidden.contains(&id)
    }

    /// Cards not hidden by the local filter.
    pub fn visible_cards(&self) -> impl Iterator<Item = &ProjectCard> {
        self.cards.iter().filter(|card| self.is_card_visible(card.id))
    }

    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut RevealObserver {
        &mut self.reveal
    }
}

impl Renderer for RenderState {
    fn clear_cards(&mut self) {
        self.cards.clear();
        self.hidden.clear();
        self.reveal.reset();
    }

    fn append_card(&mut self, card: ProjectCard) {
        self.cards.push(card);
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        match region {
            Region::Loading => self.loading = visible,
            Region::EmptyState => self.empty_state = visible,
            Region::InputWrapper => self.input_wrapper = visible,
        }
    }

    fn set_empty_message(&mut self, message: EmptyMessage) {
        self.empty_message = message;
    }

    fn observe_reveal(&mut self, ids: &[CardId]) {
        for id in ids {
            self.reveal.observe(*id);
        }
    }

    fn set_card_visible(&mut self, id: CardId, visible: bool) {
        if visible {
            self.hidden.remove(&id);
        } else {
            self.hidden.insert(id);
        }
    }

    fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }
}

/// Implements [`Renderer`] for a type by forwarding to a [`RenderState`] field.
macro_rules! delegate_renderer {
    ($ty:ty, $field:ident) => {
        impl $crate::renderer::Renderer for $ty {
            fn clear_cards(&mut self) {
                self.$field.clear_cards();
            }

            fn append_card(&mut self, card: $crate::card::ProjectCard) {
                self.$field.append_card(card);
            }

            fn set_visible(&mut self, region: $crate::renderer::Region, visible: bool) {
                self.$field.set_visible(region, visible);
            }

            fn set_empty_message(&mut self, message: $crate::renderer::EmptyMessage) {
                self.$field.set_empty_message(message);
            }

            fn observe_reveal(&mut self, ids: &[$crate::card::CardId]) {
                self.$field.observe_reveal(ids);
            }

            fn set_card_visible(&mut self, id: $crate::card::CardId, visible: bool) {
                self.$field.set_card_visible(id, visible);
            }

            fn cards(&self) -> &[$crate::card::ProjectCard] {
                self.$field.cards()
            }
        }
    };
}

pub(crate) use delegate_renderer;
