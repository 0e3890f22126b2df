#![forbid(unsafe_code)]

//! # Folio CLI
//!
//! Showcase a curated set of GitHub repositories as project cards.
//!
//! ## Usage
//!
//! ```bash
//! folio octocat
//! folio octocat --category rust --view list
//! folio octocat --format html -o projects.html
//! folio --interactive
//! ```

use std::io::Write as _;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, BufReader};

use folio::card::REVEAL_STAGGER;
use folio::cli::{Cli, Command, OutputFormat};
use folio::config::Config;
use folio::{GitHubClient, HtmlRenderer, LoadOutcome, ProjectShowcase, TerminalRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli)?;
    folio::logging::init(config.verbosity);

    if let Some(Command::Diagnostics) = cli.command {
        println!("{}", config.to_diagnostic_string());
        return Ok(());
    }

    let client = Arc::new(GitHubClient::new(config.client_config())?);

    match config.format {
        OutputFormat::Terminal => run_terminal(&config, client).await,
        OutputFormat::Html => run_html(&config, client).await,
    }
}

fn terminal_width(config: &Config) -> usize {
    config
        .width
        .or_else(|| std::env::var("COLUMNS").ok()?.parse().ok())
        .unwrap_or(80)
}

fn terminal_height() -> usize {
    std::env::var("LINES")
        .ok()
        .and_then(|lines| lines.parse().ok())
        .filter(|lines| *lines > 0)
        .unwrap_or(24)
}

async fn run_terminal(config: &Config, client: Arc<GitHubClient>) -> anyhow::Result<()> {
    let renderer = TerminalRenderer::new(terminal_width(config))
        .with_view_mode(config.view)
        .with_color(config.use_color());
    let showcase = ProjectShowcase::new(client, config.allow_list.clone(), renderer);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut username = config.username.clone();
    loop {
        let outcome = showcase.load_projects(&username).await;
        showcase.apply_filter(&config.filter);
        present_terminal(config, &showcase, &outcome).await?;

        if !config.interactive {
            break;
        }
        print!("GitHub username › ");
        std::io::stdout().flush()?;
        match stdin.next_line().await? {
            Some(line) if !line.trim().is_empty() => username = line.trim().to_string(),
            _ => break,
        }
    }
    Ok(())
}

async fn present_terminal(
    config: &Config,
    showcase: &ProjectShowcase<TerminalRenderer>,
    outcome: &LoadOutcome,
) -> anyhow::Result<()> {
    if let Some(path) = &config.output {
        let view = {
            let mut renderer = showcase.renderer();
            renderer.state_mut().reveal_mut().reveal_all();
            renderer.view()
        };
        return std::fs::write(path, view)
            .with_context(|| format!("failed to write {}", path.display()));
    }

    if !config.animations || !outcome.is_loaded() {
        let mut renderer = showcase.renderer();
        renderer.state_mut().reveal_mut().reveal_all();
        println!("{}", renderer.view());
        return Ok(());
    }

    // Rows scroll in from the bottom; each is revealed once it is on screen.
    let height = terminal_height();
    let layout = showcase.renderer().row_layout();
    for (ids, span) in layout {
        tokio::time::sleep(REVEAL_STAGGER).await;
        let mut renderer = showcase.renderer();
        let revealed = renderer.scroll_to(span.top + span.height, height);
        tracing::trace!(?revealed, "cards revealed");
        println!("{}", renderer.render_row(&ids));
    }
    if let Some(footer) = showcase.renderer().view_footer() {
        println!("{footer}");
    }
    Ok(())
}

async fn run_html(config: &Config, client: Arc<GitHubClient>) -> anyhow::Result<()> {
    let renderer = HtmlRenderer::new().with_view_mode(config.view);
    let showcase = ProjectShowcase::new(client, config.allow_list.clone(), renderer);

    showcase.load_projects(&config.username).await;
    showcase.apply_filter(&config.filter);
    let view = {
        let mut renderer = showcase.renderer();
        renderer.state_mut().reveal_mut().reveal_all();
        renderer.view()
    };

    match &config.output {
        Some(path) => std::fs::write(path, view)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{view}"),
    }
    Ok(())
}
