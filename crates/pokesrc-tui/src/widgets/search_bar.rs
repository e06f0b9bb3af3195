//! Search bar widget — the text input at the top of the landing screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! # Debounce
//!
//! Every edit stamps `edited_at`. The app shell polls [`SearchBarState::take_due`]
//! on each tick and only reruns the matcher once the query has been idle for
//! the configured debounce window.

use std::time::{Duration, Instant};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use pokesrc_core::hangul::is_choseong_query;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub const PLACEHOLDER: &str = "포켓몬 이름 또는 초성을 검색하세요. (예: 피카츄, ㅍㅋㅊ)";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The text typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
    /// Time of the last edit not yet picked up by the matcher.
    pub edited_at: Option<Instant>,
}

impl SearchBarState {
    /// Handle an editing event. Returns true when the query text changed.
    pub fn handle(&mut self, event: &AppEvent, now: Instant) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.edited_at = Some(now);
                tracing::debug!(query = %self.query, cursor = self.cursor, "search: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.query.remove(prev);
                self.cursor = prev;
                self.edited_at = Some(now);
                tracing::debug!(query = %self.query, cursor = self.cursor, "search: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
                false
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Replace the whole query (suggestion submit, `:clear`, click-outside).
    /// Takes effect immediately, bypassing the debounce.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.cursor = self.query.len();
        self.edited_at = None;
    }

    pub fn clear(&mut self) {
        self.set_query("");
    }

    /// True once the pending edit has been idle for `debounce`; clears the
    /// pending mark so each edit burst is reported once.
    pub fn take_due(&mut self, now: Instant, debounce: Duration) -> bool {
        match self.edited_at {
            Some(t) if now.saturating_duration_since(t) >= debounce => {
                self.edited_at = None;
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a SearchBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // Hangul is double-width, so measure display columns, not chars.
        let col = Span::raw(&self.state.query[..self.state.cursor]).width() as u16;
        let x = (area.x + 2 + col).min(area.right().saturating_sub(2));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if is_choseong_query(&self.state.query) {
            " 검색 · 초성 "
        } else {
            " 검색 "
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.query.is_empty() {
            Line::from(vec![
                Span::raw(" "),
                Span::styled(PLACEHOLDER, self.theme.search_placeholder),
            ])
        } else {
            Line::from(vec![Span::raw(" "), Span::raw(self.state.query.as_str())])
        };
        Paragraph::new(line).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
