//! Runtime configuration for `folio`.
//!
//! [`Config`] is the single source of truth for a run. It is resolved in
//! layers: built-in defaults, then an optional TOML file, then CLI flags and
//! their environment fallbacks.
//!
//! ```toml
//! username = "octocat"
//! api_url = "https://api.github.com"
//! view = "list"
//! timeout_secs = 10
//! projects = ["Eataly-Hub", "IT-Asset-Manager"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::allowlist::AllowList;
use crate::cli::{Cli, OutputFormat};
use crate::filter::{Category, LocalFilter};
use crate::github::{ClientConfig, DEFAULT_API_BASE};
use crate::terminal::ViewMode;

/// Username loaded when none is given anywhere else.
pub const DEFAULT_USERNAME: &str = "octocat";

/// Shape of the optional config file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub username: Option<String>,
    pub api_url: Option<String>,
    pub projects: Option<Vec<String>>,
    pub view: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub allow_list: AllowList,
    pub filter: LocalFilter,
    pub view: ViewMode,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub width: Option<usize>,
    pub color_mode: ColorMode,
    pub animations: bool,
    pub interactive: bool,
    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            api_url: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            allow_list: AllowList::default(),
            filter: LocalFilter::default(),
            view: ViewMode::default(),
            format: OutputFormat::default(),
            output: None,
            width: None,
            color_mode: ColorMode::Auto,
            animations: true,
            interactive: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Resolves the configuration for a parsed command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or holds an
    /// invalid value.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let mut config = Self::default();
        config.merge_file(file)?;

        if let Some(username) = &cli.username {
            config.username = username.trim().to_string();
        }
        if let Some(api_url) = &cli.api_url {
            config.api_url.clone_from(api_url);
        }
        if cli.token.is_some() {
            config.token.clone_from(&cli.token);
        }
        if !cli.allow.is_empty() {
            config.allow_list = AllowList::new(cli.allow.iter().cloned());
        }
        if let Some(view) = cli.view {
            config.view = view;
        }
        config.filter = LocalFilter::new(
            cli.category.parse::<Category>().unwrap_or_default(),
            cli.search.clone().unwrap_or_default(),
        );
        config.format = cli.format;
        config.output.clone_from(&cli.output);
        config.width = cli.width;
        config.color_mode = if cli.force_color {
            ColorMode::Always
        } else if cli.no_color {
            ColorMode::Never
        } else {
            ColorMode::Auto
        };
        config.animations = !cli.no_animations;
        config.interactive = cli.interactive;
        config.verbosity = cli.verbose;

        config.validate()?;
        Ok(config)
    }

    fn merge_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(username) = file.username {
            self.username = username.trim().to_string();
        }
        if let Some(api_url) = file.api_url {
            self.api_url = api_url;
        }
        if let Some(projects) = file.projects {
            self.allow_list = AllowList::new(projects);
        }
        if let Some(view) = file.view {
            self.view = view.parse().map_err(ConfigError::InvalidView)?;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Checks values that cannot be caught by parsing alone.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if self.allow_list.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Settings for the HTTP client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_url.clone(),
            token: self.token.clone(),
            timeout: self.timeout,
            ..ClientConfig::default()
        }
    }

    /// Whether styled output should be produced.
    pub fn use_color(&self) -> bool {
        match self.color_mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Export configuration as a diagnostic string. The token is never shown.
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Username: {}", self.username));
        lines.push(format!("API URL: {}", self.api_url));
        lines.push(format!(
            "Token: {}",
            if self.token.is_some() { "set" } else { "unset" }
        ));
        lines.push(format!("Timeout: {}s", self.timeout.as_secs()));
        lines.push(format!("Projects: {}", self.allow_list.entries().join(", ")));
        lines.push(format!("Category: {}", self.filter.category));
        lines.push(format!("Search: {:?}", self.filter.search));
        lines.push(format!("View: {}", self.view));
        lines.push(format!("Format: {:?}", self.format));
        lines.push(format!("Color mode: {:?}", self.color_mode));
        lines.push(format!("Animations: {}", if self.animations { "on" } else { "off" }));
        lines.push(format!("Verbosity: {}", self.verbosity));
        lines.join("\n")
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("API URL must start with http:// or https://: {0}")]
    InvalidApiUrl(String),

    #[error("project allow-list must not be empty")]
    EmptyAllowList,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("{0}")]
    InvalidView(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Config {
        let cli = Cli::try_parse_from(std::iter::once("folio").chain(args.iter().copied())).unwrap();
        Config::from_cli(&cli).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert_eq!(config.api_url, DEFAULT_API_BASE);
        assert_eq!(config.allow_list, AllowList::default());
        assert_eq!(config.filter, LocalFilter::default());
        assert_eq!(config.view, ViewMode::Grid);
        assert!(config.animations);
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn cli_overrides() {
        let config = parse(&[
            "  alice  ",
            "--allow",
            "one",
            "--allow",
            "two",
            "--category",
            "HTML",
            "--search",
            "site",
            "--view",
            "list",
            "--no-animations",
            "-vv",
        ]);
        assert_eq!(config.username, "alice");
        assert_eq!(config.allow_list.entries(), ["one", "two"]);
        assert_eq!(config.filter.category, Category::Language("html".into()));
        assert_eq!(config.filter.search, "site");
        assert_eq!(config.view, ViewMode::List);
        assert!(!config.animations);
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn color_modes() {
        assert_eq!(parse(&["--no-color"]).color_mode, ColorMode::Never);
        assert_eq!(parse(&["--force-color"]).color_mode, ColorMode::Always);
        assert!(parse(&["--force-color"]).use_color());
        assert!(!parse(&["--no-color"]).use_color());
    }

    #[test]
    fn file_layer_sits_under_cli() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "username = \"bob\"\nview = \"list\"\ntimeout_secs = 5\nprojects = [\"a\", \"b\"]"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path]);
        assert_eq!(config.username, "bob");
        assert_eq!(config.view, ViewMode::List);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.allow_list.entries(), ["a", "b"]);

        let config = parse(&["--config", path, "carol", "--view", "grid"]);
        assert_eq!(config.username, "carol");
        assert_eq!(config.view, ViewMode::Grid);
    }

    #[test]
    fn bad_files_are_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = true").unwrap();
        let cli = Cli::try_parse_from(["folio", "--config", file.path().to_str().unwrap()]).unwrap();
        assert!(matches!(Config::from_cli(&cli), Err(ConfigError::Parse { .. })));

        let cli = Cli::try_parse_from(["folio", "--config", "/nonexistent/folio.toml"]).unwrap();
        assert!(matches!(Config::from_cli(&cli), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.username.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyUsername)));

        let config = Config {
            api_url: "ftp://example".into(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidApiUrl(_))));

        let config = Config {
            allow_list: AllowList::new(Vec::<String>::new()),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyAllowList)));

        let config = Config {
            timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn blank_cli_username_is_rejected() {
        let cli = Cli::try_parse_from(["folio", "   "]).unwrap();
        assert!(matches!(Config::from_cli(&cli), Err(ConfigError::EmptyUsername)));
    }

    #[test]
    fn diagnostics_hide_token() {
        let config = Config {
            token: Some("ghp_secret".into()),
            ..Config::default()
        };
        let diag = config.to_diagnostic_string();
        assert!(diag.contains("Token: set"));
        assert!(!diag.contains("ghp_secret"));
        assert!(diag.contains("Projects: Eataly-Hub"));
    }
}
