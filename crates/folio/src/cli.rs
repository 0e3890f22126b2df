//! Command-line interface for `folio`.
//!
//! # Examples
//!
//! ```bash
//! # Showcase the configured user's projects
//! folio octocat
//!
//! # Only HTML/CSS projects whose name contains "site", stacked
//! folio octocat --category html --search site --view list
//!
//! # Write the HTML fragment for a static page
//! folio octocat --format html --output projects.html
//!
//! # Prompt for usernames until an empty line
//! folio --interactive
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};

use crate::terminal::ViewMode;

/// Showcase a curated set of GitHub repositories as project cards.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(name = "folio", author, version, about)]
pub struct Cli {
    /// GitHub username whose repositories are listed
    #[arg(env = "FOLIO_USERNAME")]
    pub username: Option<String>,

    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// GitHub API root
    #[arg(long, env = "FOLIO_API_URL")]
    pub api_url: Option<String>,

    /// GitHub token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository to showcase; repeat to replace the built-in list
    #[arg(long = "allow", short = 'a', value_name = "NAME")]
    pub allow: Vec<String>,

    /// Language category to show ("all", or e.g. "rust"; "html" includes CSS)
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Only show projects whose name contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Card layout
    #[arg(long, value_parser = parse_view)]
    pub view: Option<ViewMode>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Terminal width used for layout (defaults to $COLUMNS or 80)
    #[arg(long)]
    pub width: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Print cards at once instead of revealing them one by one
    #[arg(long, env = "FOLIO_NO_ANIMATIONS")]
    pub no_animations: bool,

    /// Keep prompting for usernames after the first load
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the resolved configuration and exit
    Diagnostics,
}

/// How the showcase is written out.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Boxed cards for a terminal
    #[default]
    Terminal,
    /// HTML fragment
    Html,
}

fn parse_view(s: &str) -> Result<ViewMode, String> {
    s.parse()
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// Environment fallbacks such as `FOLIO_USERNAME` and `GITHUB_TOKEN` are
    /// ignored, so the result depends on `iter` alone.
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(iter)?;
        Self::from_arg_matches(&matches)
    }
}
