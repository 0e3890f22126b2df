//! Terminal rendering of the showcase.
//!
//! Cards are drawn as rounded boxes, either stacked (list view) or two per
//! row (grid view) when the terminal is wide enough.

use std::fmt;
use std::str::FromStr;

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::card::{CardId, ProjectCard};
use crate::renderer::{EmptyMessage, Region, RenderState, Renderer, delegate_renderer};
use crate::reveal::Span;

/// Narrowest card the grid view will lay out side by side.
const MIN_GRID_CARD_WIDTH: usize = 32;
const GUTTER: usize = 2;

/// Card container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Grid => "grid",
            Self::List => "list",
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Border,
    Title,
    Body,
    Tag,
    Link,
    Muted,
    Warning,
}

/// Removes control characters (escape sequences included) from host data.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

/// Cuts `text` to at most `width` display columns, marking the cut with `…`.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Draws the render state to a string for a terminal.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    state: RenderState,
    width: usize,
    view_mode: ViewMode,
    color: bool,
}

delegate_renderer!(TerminalRenderer, state);

impl TerminalRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            state: RenderState::new(),
            width: width.max(20),
            view_mode: ViewMode::default(),
            color: true,
        }
    }

    #[must_use]
    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    fn paint(&self, text: &str, tone: Tone, dim: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = match tone {
            Tone::Border => text.bright_black(),
            Tone::Title => text.bold().cyan(),
            Tone::Body => text.normal(),
            Tone::Tag => text.magenta(),
            Tone::Link => text.blue().underline(),
            Tone::Muted => text.bright_black().italic(),
            Tone::Warning => text.yellow().bold(),
        };
        if dim {
            styled.dimmed().to_string()
        } else {
            styled.to_string()
        }
    }

    fn card_width(&self) -> usize {
        match self.view_mode {
            ViewMode::List => self.width,
            ViewMode::Grid => {
                let half = (self.width.saturating_sub(GUTTER)) / 2;
                if half >= MIN_GRID_CARD_WIDTH {
                    half
                } else {
                    self.width
                }
            }
        }
    }

    /// Lines of a single boxed card, each exactly `width` columns wide.
    pub fn render_card(&self, card: &ProjectCard, width: usize) -> Vec<String> {
        let inner = width.saturating_sub(4).max(1);
        let dim = !self.state.reveal().is_revealed(card.id);
        let mut body: Vec<(String, Tone)> = Vec::new();

        body.push((fit(&sanitize(&card.title), inner), Tone::Title));
        for line in textwrap::wrap(&sanitize(&card.description), inner) {
            body.push((line.into_owned(), Tone::Body));
        }
        body.push((String::new(), Tone::Body));

        let tags = card
            .tags()
            .map(|tag| format!("[{}]", sanitize(tag)))
            .collect::<Vec<_>>()
            .join(" ");
        for line in textwrap::wrap(&tags, inner) {
            body.push((line.into_owned(), Tone::Tag));
        }
        for link in card.links() {
            let text = format!("{}: {}", link.label, sanitize(&link.url));
            body.push((fit(&text, inner), Tone::Link));
        }

        let rule = "─".repeat(width.saturating_sub(2));
        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(self.paint(&format!("╭{rule}╮"), Tone::Border, dim));
        for (text, tone) in body {
            lines.push(format!(
                "{} {} {}",
                self.paint("│", Tone::Border, dim),
                self.paint(&pad(&text, inner), tone, dim),
                self.paint("│", Tone::Border, dim)
            ));
        }
        lines.push(self.paint(&format!("╰{rule}╯"), Tone::Border, dim));
        lines
    }

    fn per_row(&self) -> usize {
        if self.card_width() < self.width { 2 } else { 1 }
    }

    /// Visible cards grouped the way they are laid out, one group per row.
    pub fn rows(&self) -> Vec<Vec<CardId>> {
        let visible: Vec<CardId> = self.state.visible_cards().map(|card| card.id).collect();
        visible.chunks(self.per_row()).map(<[CardId]>::to_vec).collect()
    }

    /// Rows with the vertical span each occupies once drawn, starting at line 0.
    pub fn row_layout(&self) -> Vec<(Vec<CardId>, Span)> {
        let mut top = 0;
        self.rows()
            .into_iter()
            .map(|ids| {
                let height = self.render_row(&ids).lines().count();
                let span = Span::new(top, height);
                top += height;
                (ids, span)
            })
            .collect()
    }

    /// Reveals cards inside a `height`-line viewport whose last line is `bottom`.
    ///
    /// Returns the cards revealed by this call.
    pub fn scroll_to(&mut self, bottom: usize, height: usize) -> Vec<CardId> {
        let layout: Vec<(CardId, Span)> = self
            .row_layout()
            .into_iter()
            .flat_map(|(ids, span)| ids.into_iter().map(move |id| (id, span)))
            .collect();
        let viewport = Span::new(bottom.saturating_sub(height), height);
        self.state.reveal_mut().on_scroll(&layout, viewport)
    }

    /// Draws one row of cards side by side.
    pub fn render_row(&self, ids: &[CardId]) -> String {
        let width = self.card_width();
        let blocks: Vec<Vec<String>> = ids
            .iter()
            .filter_map(|id| self.state.cards().iter().find(|card| card.id == *id))
            .map(|card| self.render_card(card, width))
            .collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
        (0..height)
            .map(|i| {
                blocks
                    .iter()
                    .map(|block| block.get(i).cloned().unwrap_or_else(|| " ".repeat(width)))
                    .collect::<Vec<_>>()
                    .join(&" ".repeat(GUTTER))
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_empty(&self, out: &mut Vec<String>) {
        let message = self.state.empty_message();
        let tone = match message {
            EmptyMessage::Generic => Tone::Muted,
            EmptyMessage::NoMatch { .. } => Tone::Warning,
        };
        out.push(self.paint(message.title(), tone, false));
        out.push(self.paint(message.body(), Tone::Muted, false));
        if let Some(available) = message.available() {
            let names = available
                .iter()
                .map(|name| sanitize(name))
                .collect::<Vec<_>>()
                .join(", ");
            let listing = format!("Available repositories: {names}");
            for line in textwrap::wrap(&listing, self.width) {
                out.push(self.paint(&line, Tone::Muted, false));
            }
        }
    }

    /// Renders the loading indicator, if shown.
    pub fn view_header(&self) -> Option<String> {
        self.state
            .is_visible(Region::Loading)
            .then(|| self.paint("Loading projects…", Tone::Muted, false))
    }

    /// Renders the empty state and input prompt, if shown.
    pub fn view_footer(&self) -> Option<String> {
        let mut out = Vec::new();
        if self.state.is_visible(Region::EmptyState) {
            self.render_empty(&mut out);
        }
        if self.state.is_visible(Region::InputWrapper) {
            out.push(self.paint("Enter another GitHub username to retry.", Tone::Muted, false));
        }
        (!out.is_empty()).then(|| out.join("\n"))
    }

    /// Renders every visible region.
    pub fn view(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.view_header());
        parts.extend(self.rows().iter().map(|ids| self.render_row(ids)));
        parts.extend(self.view_footer());
        parts.join("\n")
    }
}
