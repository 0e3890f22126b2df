//! HTML fragment rendering of the showcase.
//!
//! Produces the markup a static page can embed: the loading and empty-state
//! placeholders, the input wrapper and the project grid. All host-provided
//! text is escaped.

use std::fmt::Write as _;

use crate::card::ProjectCard;
use crate::renderer::{EmptyMessage, Region, RenderState, Renderer, delegate_renderer};
use crate::terminal::ViewMode;

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Only `http(s)` links are emitted; anything else becomes `#`.
fn safe_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        escape_html(trimmed)
    } else {
        "#".to_string()
    }
}

const fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// Renders the showcase as an HTML fragment.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    state: RenderState,
    view_mode: ViewMode,
}

delegate_renderer!(HtmlRenderer, state);

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    fn write_card(&self, out: &mut String, card: &ProjectCard) {
        let visible = self.state.is_card_visible(card.id);
        let hidden_class = if visible { "" } else { " hidden" };
        let delay = card.reveal_delay().as_secs_f32();
        let _ = writeln!(
            out,
            r#"  <div class="project-card{hidden_class}" style="animation-delay: {delay:.1}s; display: {}" data-language="{}" data-name="{}">"#,
            display(visible),
            escape_html(&card.language_key),
            escape_html(&card.search_name),
        );
        out.push_str("    <div class=\"project-image\"><i class=\"uil uil-code-branch\"></i></div>\n");
        out.push_str("    <div class=\"project-content\">\n");
        let _ = writeln!(out, "      <h3>{}</h3>", escape_html(&card.title));
        let _ = writeln!(out, "      <p>{}</p>", escape_html(&card.description));
        out.push_str("      <div class=\"project-tags\">\n");
        for tag in card.tags() {
            let _ = writeln!(out, "        <span class=\"project-tag\">{}</span>", escape_html(tag));
        }
        out.push_str("      </div>\n");
        out.push_str("      <div class=\"project-links\">\n");
        for link in card.links() {
            let icon = if link.label == "Code" {
                "uil-github-alt"
            } else {
                "uil-external-link-alt"
            };
            let _ = writeln!(
                out,
                r#"        <a href="{}" target="_blank" rel="noopener noreferrer" class="project-link"><i class="uil {icon}"></i> {}</a>"#,
                safe_url(&link.url),
                link.label
            );
        }
        out.push_str("      </div>\n");
        out.push_str("    </div>\n");
        out.push_str("  </div>\n");
    }

    fn write_empty(&self, out: &mut String) {
        let message = self.state.empty_message();
        let _ = writeln!(
            out,
            r#"<div id="emptyState" class="empty-state" style="display: {}">"#,
            display(self.state.is_visible(Region::EmptyState))
        );
        let icon = match message {
            EmptyMessage::Generic => "uil-folder-open",
            EmptyMessage::NoMatch { .. } => "uil-info-circle",
        };
        let _ = writeln!(out, r#"  <i class="uil {icon}"></i>"#);
        let _ = writeln!(out, "  <h3>{}</h3>", message.title());
        let _ = writeln!(out, "  <p>{}</p>", message.body());
        if let Some(available) = message.available() {
            let names = available
                .iter()
                .map(|name| escape_html(name))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                r#"  <p class="available-repositories">Available repositories: {names}</p>"#
            );
        }
        out.push_str("</div>\n");
    }

    /// Renders the full fragment.
    pub fn view(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<div id="githubInputWrapper" class="github-input-wrapper" style="display: {}"></div>"#,
            display(self.state.is_visible(Region::InputWrapper))
        );
        let _ = writeln!(
            out,
            r#"<div id="loadingState" class="loading-state" style="display: {}"></div>"#,
            display(self.state.is_visible(Region::Loading))
        );
        let _ = writeln!(
            out,
            r#"<div id="projectsGrid" class="projects-grid {}-view">"#,
            self.view_mode
        );
        for card in self.state.cards() {
            self.write_card(&mut out, card);
        }
        out.push_str("</div>\n");
        self.write_empty(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardId;
    use crate::renderer::Renderer;
    use crate::repository::RepositoryRecord;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="a&b">"#),
            "&lt;img src=x onerror=&quot;a&amp;b&quot;&gt;"
        );
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn non_http_links_are_neutralized() {
        assert_eq!(safe_url("javascript:alert(1)"), "#");
        assert_eq!(safe_url(" https://x.dev/?a=1&b=2 "), "https://x.dev/?a=1&amp;b=2");
    }

    #[test]
    fn card_markup_matches_page_structure() {
        let mut html = HtmlRenderer::new().with_view_mode(ViewMode::List);
        let record = RepositoryRecord::new("Eataly-Hub", "https://x/eataly-hub")
            .with_description("A <b>food</b> app")
            .with_language("JavaScript")
            .with_topics(["food", "react"])
            .with_homepage("https://eataly.dev");
        html.append_card(ProjectCard::from_record(&record, 1));
        let out = html.view();

        assert!(out.contains(r#"class="projects-grid list-view""#));
        assert!(out.contains(r#"data-language="javascript" data-name="eataly-hub""#));
        assert!(out.contains("animation-delay: 0.1s"));
        assert!(out.contains("<h3>Eataly Hub</h3>"));
        assert!(out.contains("<p>A &lt;b&gt;food&lt;/b&gt; app</p>"));
        assert!(out.contains(r#"<span class="project-tag">react</span>"#));
        assert!(out.contains(r#"href="https://eataly.dev""#));
        assert!(out.contains("Live Demo"));
    }

    #[test]
    fn hidden_cards_get_display_none() {
        let mut html = HtmlRenderer::new();
        html.append_card(ProjectCard::from_record(&RepositoryRecord::new("a", "https://x/a"), 0));
        html.set_card_visible(CardId(0), false);
        assert!(html.view().contains(r#"class="project-card hidden""#));
    }

    #[test]
    fn no_match_listing_is_escaped() {
        let mut html = HtmlRenderer::new();
        html.set_empty_message(EmptyMessage::NoMatch {
            available: vec!["<script>".into(), "ok".into()],
        });
        html.set_visible(Region::EmptyState, true);
        let out = html.view();
        assert!(out.contains("Available repositories: &lt;script&gt;, ok"));
        assert!(!out.contains("<script>"));
        assert!(out.contains(r#"id="emptyState" class="empty-state" style="display: block""#));
    }
}
