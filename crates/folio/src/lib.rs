#![forbid(unsafe_code)]

//! # Folio
//!
//! Fetches a user's repositories from GitHub, keeps a curated allow-list of
//! them and renders each as a project card.
//!
//! The pipeline is independent of any UI toolkit: it drives a [`Renderer`]
//! that clears and appends cards and toggles a loading indicator, an empty
//! state and the username input. Terminal and HTML renderers are included.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use folio::{AllowList, GitHubClient, ProjectShowcase, TerminalRenderer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(Default::default())?;
//! let showcase = ProjectShowcase::new(Arc::new(client), AllowList::default(), TerminalRenderer::new(80));
//! showcase.load_projects("octocat").await;
//! println!("{}", showcase.renderer().view());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`repository`] - records returned by the API
//! - [`allowlist`] - curated names and normalized matching
//! - [`card`] - card mapping rules
//! - [`github`] - repository source trait and HTTP client
//! - [`showcase`] - the load pipeline
//! - [`renderer`] - render target capability and in-memory state
//! - [`filter`] - category and search filtering of rendered cards
//! - [`reveal`] - one-shot reveal tracking
//! - [`terminal`], [`html`] - concrete renderers

pub mod allowlist;
pub mod card;
pub mod cli;
pub mod config;
pub mod filter;
pub mod github;
pub mod html;
pub mod logging;
pub mod renderer;
pub mod repository;
pub mod reveal;
pub mod showcase;
pub mod terminal;

pub use allowlist::AllowList;
pub use card::{CardId, ProjectCard};
pub use filter::{Category, LocalFilter};
pub use github::{FetchError, GitHubClient, RepositorySource};
pub use html::HtmlRenderer;
pub use renderer::{EmptyMessage, Region, RenderState, Renderer};
pub use repository::RepositoryRecord;
pub use showcase::{FailureKind, LoadOutcome, ProjectShowcase};
pub use terminal::{TerminalRenderer, ViewMode};
