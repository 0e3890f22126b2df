//! One-shot reveal tracking for rendered cards.
//!
//! A card is revealed the first time at least [`RevealOptions::threshold`] of
//! it lies inside the viewport, where the viewport's bottom edge is pulled in
//! by [`RevealOptions::bottom_margin`]. Once revealed a card stays revealed
//! until the container is cleared.

use std::collections::BTreeMap;

use crate::card::CardId;

/// Intersection settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the card that must be visible, in `0.0..=1.0`.
    pub threshold: f32,
    /// Rows subtracted from the bottom of the viewport.
    pub bottom_margin: u16,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 2,
        }
    }
}

/// Vertical span of a card or viewport, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub top: usize,
    pub height: usize,
}

impl Span {
    pub const fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }

    const fn bottom(self) -> usize {
        self.top + self.height
    }
}

/// Fraction of `target` that lies inside `viewport`.
#[expect(clippy::cast_precision_loss, reason = "row counts are small")]
pub fn intersection_ratio(target: Span, viewport: Span) -> f32 {
    if target.height == 0 {
        return 0.0;
    }
    let top = target.top.max(viewport.top);
    let bottom = target.bottom().min(viewport.bottom());
    if bottom <= top {
        return 0.0;
    }
    (bottom - top) as f32 / target.height as f32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealStatus {
    Waiting,
    Revealed,
}

/// Watches cards and reports each one exactly once when it scrolls into view.
#[derive(Debug, Clone, Default)]
pub struct RevealObserver {
    options: RevealOptions,
    cards: BTreeMap<CardId, RevealStatus>,
}

impl RevealObserver {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            cards: BTreeMap::new(),
        }
    }

    /// Starts watching a card. Watching an already watched card is a no-op.
    pub fn observe(&mut self, id: CardId) {
        self.cards.entry(id).or_insert(RevealStatus::Waiting);
    }

    /// Forgets every card.
    pub fn reset(&mut self) {
        self.cards.clear();
    }

    pub fn observed_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_revealed(&self, id: CardId) -> bool {
        self.cards.get(&id) == Some(&RevealStatus::Revealed)
    }

    /// Feeds intersection ratios and returns cards revealed by this call.
    ///
    /// Unobserved ids and cards that were already revealed are ignored.
    pub fn on_intersections(&mut self, entries: &[(CardId, f32)]) -> Vec<CardId> {
        let mut revealed = Vec::new();
        for &(id, ratio) in entries {
            if ratio <= 0.0 || ratio < self.options.threshold {
                continue;
            }
            if let Some(status) = self.cards.get_mut(&id)
                && *status == RevealStatus::Waiting
            {
                *status = RevealStatus::Revealed;
                revealed.push(id);
            }
        }
        revealed
    }

    /// Computes ratios for laid-out cards against a viewport and reveals them.
    pub fn on_scroll(&mut self, layout: &[(CardId, Span)], viewport: Span) -> Vec<CardId> {
        let margin = usize::from(self.options.bottom_margin);
        let effective = Span::new(viewport.top, viewport.height.saturating_sub(margin));
        let entries: Vec<(CardId, f32)> = layout
            .iter()
            .map(|&(id, span)| (id, intersection_ratio(span, effective)))
            .collect();
        self.on_intersections(&entries)
    }

    /// Marks every observed card as revealed, returning the newly revealed ones.
    pub fn reveal_all(&mut self) -> Vec<CardId> {
        let ids: Vec<(CardId, f32)> = self.cards.keys().map(|id| (*id, 1.0)).collect();
        self.on_intersections(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_partial_overlap() {
        let card = Span::new(8, 4);
        let viewport = Span::new(0, 10);
        assert!((intersection_ratio(card, viewport) - 0.5).abs() < f32::EPSILON);
        assert!(intersection_ratio(Span::new(20, 4), viewport).abs() < f32::EPSILON);
        assert!(intersection_ratio(Span::new(0, 0), viewport).abs() < f32::EPSILON);
    }

    #[test]
    fn reveals_each_card_once() {
        let mut observer = RevealObserver::default();
        observer.observe(CardId(0));
        observer.observe(CardId(1));

        let first = observer.on_intersections(&[(CardId(0), 0.5), (CardId(1), 0.05)]);
        assert_eq!(first, vec![CardId(0)]);
        assert!(observer.is_revealed(CardId(0)));
        assert!(!observer.is_revealed(CardId(1)));

        let second = observer.on_intersections(&[(CardId(0), 1.0), (CardId(1), 0.2)]);
        assert_eq!(second, vec![CardId(1)]);

        assert!(observer.on_intersections(&[(CardId(0), 1.0), (CardId(1), 1.0)]).is_empty());
    }

    #[test]
    fn ignores_unobserved_cards() {
        let mut observer = RevealObserver::default();
        assert!(observer.on_intersections(&[(CardId(3), 1.0)]).is_empty());
    }

    #[test]
    fn bottom_margin_delays_reveal() {
        let mut observer = RevealObserver::new(RevealOptions {
            threshold: 0.1,
            bottom_margin: 2,
        });
        observer.observe(CardId(0));
        let layout = [(CardId(0), Span::new(9, 10))];

        // Rows 8..10 are inside the margin, so nothing shows yet.
        assert!(observer.on_scroll(&layout, Span::new(0, 10)).is_empty());
        assert_eq!(observer.on_scroll(&layout, Span::new(3, 10)), vec![CardId(0)]);
    }

    #[test]
    fn reveal_all_then_reset() {
        let mut observer = RevealObserver::default();
        observer.observe(CardId(0));
        observer.observe(CardId(1));
        assert_eq!(observer.reveal_all().len(), 2);
        assert!(observer.reveal_all().is_empty());
        observer.reset();
        assert_eq!(observer.observed_count(), 0);
    }
}
