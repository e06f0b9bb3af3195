//! Suggestion dropdown — the match list floating under the search bar.
//!
//! Each row shows the canonical Korean name and, dimmed, the English name.
//! The part of the row that the query matched is highlighted: the English
//! substring, the Korean substring, or the syllables whose initials matched.
//!
//! # Scroll semantics
//!
//! `selected` is an absolute index into `items`; `offset` is the first row
//! shown. Moving the selection past either edge of the window scrolls it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use pokesrc_core::hangul::get_choseong;
use pokesrc_core::{MatchKind, SearchHit};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub korean: String,
    pub english: String,
    pub kind: MatchKind,
}

impl From<SearchHit<'_>> for Suggestion {
    fn from(hit: SearchHit<'_>) -> Self {
        Self {
            korean: hit.korean.to_string(),
            english: hit.english.to_string(),
            kind: hit.kind,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SuggestionsState {
    pub items: Vec<Suggestion>,
    /// Query the items were computed for, used for highlighting.
    pub query: String,
    pub selected: usize,
    pub offset: usize,
    /// Rows visible at once.
    pub window: usize,
    /// Hidden after a submit until the next edit.
    pub dismissed: bool,
}

impl SuggestionsState {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            ..Self::default()
        }
    }

    /// Replace the items after a matcher run.
    pub fn replace(&mut self, query: &str, items: Vec<Suggestion>) {
        self.query = query.to_string();
        self.items = items;
        self.selected = 0;
        self.offset = 0;
        self.dismissed = false;
    }

    pub fn clear(&mut self) {
        self.replace("", Vec::new());
    }

    pub fn is_visible(&self) -> bool {
        !self.items.is_empty() && !self.dismissed
    }

    pub fn selected_item(&self) -> Option<&Suggestion> {
        self.items.get(self.selected)
    }

    /// Rows the dropdown needs, borders excluded.
    pub fn visible_rows(&self) -> usize {
        self.items.len().min(self.window)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if self.items.is_empty() {
            return;
        }
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
                if self.selected < self.offset {
                    self.offset = self.selected;
                }
            }
            AppEvent::Nav(Direction::Down) => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
                if self.selected >= self.offset + self.window {
                    self.offset = self.selected + 1 - self.window;
                }
            }
            _ => return,
        }
        tracing::debug!(selected = self.selected, offset = self.offset, "suggestions: nav");
    }

    /// Select the item on the given visible row (mouse click).
    pub fn select_row(&mut self, row: usize) -> Option<&Suggestion> {
        let idx = self.offset + row;
        if idx < self.items.len() && row < self.window {
            self.selected = idx;
            self.items.get(idx)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Highlighting
// ---------------------------------------------------------------------------

/// Character range of `text` matched by `needle`, compared case-insensitively
/// when `fold_case` is set.
fn char_range(text: &str, needle: &str, fold_case: bool) -> Option<(usize, usize)> {
    let (hay, needle) = if fold_case {
        (text.to_lowercase(), needle.to_lowercase())
    } else {
        (text.to_string(), needle.to_string())
    };
    let byte = hay.find(&needle)?;
    let start = hay[..byte].chars().count();
    Some((start, start + needle.chars().count()))
}

/// Character range of the syllables in `korean` whose initials spell `query`.
fn choseong_range(korean: &str, query: &str) -> Option<(usize, usize)> {
    // Positions in `korean` of the characters that survive choseong reduction.
    let kept: Vec<usize> = korean
        .chars()
        .enumerate()
        .filter(|(_, c)| !get_choseong(c.encode_utf8(&mut [0; 4])).is_empty())
        .map(|(i, _)| i)
        .collect();
    let (start, end) = char_range(&get_choseong(korean), query, false)?;
    if end == 0 || end > kept.len() {
        return None;
    }
    Some((kept[start], kept[end - 1] + 1))
}

fn split_spans<'a>(
    text: &'a str,
    range: Option<(usize, usize)>,
    base: Style,
    highlight: Style,
) -> Vec<Span<'a>> {
    let Some((start, end)) = range else {
        return vec![Span::styled(text, base)];
    };
    let byte_at = |n: usize| text.char_indices().nth(n).map(|(i, _)| i).unwrap_or(text.len());
    let (a, b) = (byte_at(start), byte_at(end));
    vec![
        Span::styled(&text[..a], base),
        Span::styled(&text[a..b], base.patch(highlight)),
        Span::styled(&text[b..], base),
    ]
}

fn suggestion_line<'a>(item: &'a Suggestion, query: &str, selected: bool, theme: &Theme) -> Line<'a> {
    let row = if selected { theme.suggestion_selected } else { Style::default() };
    let (korean_range, english_range) = match item.kind {
        MatchKind::English => (None, char_range(&item.english, query, true)),
        MatchKind::Korean => (char_range(&item.korean, query, false), None),
        MatchKind::Choseong => (choseong_range(&item.korean, query), None),
    };

    let mut spans = vec![Span::styled(if selected { " › " } else { "   " }, row)];
    spans.extend(split_spans(&item.korean, korean_range, row, theme.search_highlight));
    spans.push(Span::styled("  ", row));
    spans.extend(split_spans(
        &item.english,
        english_range,
        row.patch(theme.suggestion_secondary),
        theme.search_highlight,
    ));
    Line::from(spans).style(row)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Floating dropdown. The caller passes the overlay rect (borders included)
/// computed by the app layout.
pub struct Suggestions<'a> {
    state: &'a SuggestionsState,
    theme: &'a Theme,
}

impl<'a> Suggestions<'a> {
    pub fn new(state: &'a SuggestionsState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for Suggestions<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let total = self.state.items.len();
        let title = format!(" {total}건 ");
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .state
            .items
            .iter()
            .enumerate()
            .skip(self.state.offset)
            .take(inner.height as usize)
            .map(|(i, item)| {
                suggestion_line(item, &self.state.query, i == self.state.selected, self.theme)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
