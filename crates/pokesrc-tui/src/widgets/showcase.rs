//! Showcase grid — the "today's Pokémon" cards under the search box.
//!
//! The grid has two columns on narrow terminals and three once the width
//! reaches `ui.wide_breakpoint`. Until the first daily load arrives it shows
//! a loading placeholder; a failed load adds an error line under it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use pokesrc_core::{DailyPicks, DailyPokemon};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub const TITLE: &str = " 오늘의 포켓몬은? ";
pub const LOADING: &str = "로딩 중...";
const EMPTY: &str = "오늘의 포켓몬이 없습니다.";

/// Card height including borders.
const CARD_HEIGHT: u16 = 4;

/// Column count for a grid of the given outer width.
pub fn columns_for(width: u16, wide_breakpoint: u16) -> usize {
    if width >= wide_breakpoint {
        3
    } else {
        2
    }
}

/// Rects of the first `count` cards laid out row-major inside `inner`.
/// Cards that would fall below the bottom edge are omitted.
pub fn card_rects(inner: Rect, count: usize, columns: usize) -> Vec<Rect> {
    let columns = columns.max(1) as u16;
    let width = inner.width / columns;
    if width == 0 {
        return Vec::new();
    }
    (0..count)
        .map_while(|i| {
            let (row, col) = (i as u16 / columns, i as u16 % columns);
            let y = inner.y + row * CARD_HEIGHT;
            if y + CARD_HEIGHT > inner.bottom() {
                return None;
            }
            Some(Rect::new(inner.x + col * width, y, width, CARD_HEIGHT))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ShowcaseState {
    /// `None` until the first load completes.
    pub picks: Option<DailyPicks>,
    /// Message from the most recent failed load.
    pub error: Option<String>,
    pub cursor: usize,
}

impl ShowcaseState {
    pub fn is_loading(&self) -> bool {
        self.picks.is_none()
    }

    pub fn cards(&self) -> &[DailyPokemon] {
        self.picks.as_ref().map(|p| p.pokemon.as_slice()).unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<&DailyPokemon> {
        self.cards().get(self.cursor)
    }

    /// The selected card, provided it is among the first `visible` cards.
    pub fn selected_within(&self, visible: usize) -> Option<&DailyPokemon> {
        self.selected().filter(|_| self.cursor < visible)
    }

    /// Install a freshly loaded dataset. Keeps the cursor in range.
    pub fn set_picks(&mut self, picks: DailyPicks) {
        let len = picks.pokemon.len();
        self.picks = Some(picks);
        self.error = None;
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Record a failed load. Previously loaded cards stay visible.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Move the card cursor. Left/Right step one card, Up/Down one row.
    /// `visible` is the number of cards that fit on screen; the cursor never
    /// moves past them.
    pub fn handle(&mut self, event: &AppEvent, columns: usize, visible: usize) {
        let len = self.cards().len().min(visible);
        if len == 0 {
            return;
        }
        let columns = columns.max(1);
        let next = match event {
            AppEvent::Nav(Direction::Left) => self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Right) => (self.cursor + 1).min(len - 1),
            AppEvent::Nav(Direction::Up) => self.cursor.checked_sub(columns).unwrap_or(self.cursor),
            AppEvent::Nav(Direction::Down) => {
                let down = self.cursor + columns;
                if down < len {
                    down
                } else {
                    self.cursor
                }
            }
            _ => return,
        };
        tracing::debug!(from = self.cursor, to = next, columns, "showcase: nav");
        self.cursor = next;
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Showcase<'a> {
    state: &'a ShowcaseState,
    focused: bool,
    columns: usize,
    theme: &'a Theme,
}

impl<'a> Showcase<'a> {
    pub fn new(state: &'a ShowcaseState, focused: bool, columns: usize, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            columns,
            theme,
        }
    }

    fn placeholder(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(Span::styled(LOADING, self.theme.card_subtitle))];
        if let Some(err) = &self.state.error {
            lines.push(Line::from(Span::styled(
                format!("불러오기 실패: {err}"),
                self.theme.card_subtitle.add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }

    fn render_card(&self, pokemon: &DailyPokemon, selected: bool, area: Rect, buf: &mut Buffer) {
        let border = if selected && self.focused {
            self.theme.card_selected
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        let name = DailyPicks::display_name(pokemon);
        let lines = vec![
            Line::from(Span::styled(
                name,
                self.theme.card_style(&pokemon.name).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("#{:03} {}", pokemon.id, pokemon.name),
                self.theme.card_subtitle,
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

impl Widget for Showcase<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(TITLE)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(picks) = &self.state.picks else {
            Paragraph::new(self.placeholder())
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        };

        if picks.is_empty() {
            Paragraph::new(Line::from(Span::styled(EMPTY, self.theme.card_subtitle)))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let rects = card_rects(inner, picks.pokemon.len(), self.columns);
        for (i, (pokemon, rect)) in picks.pokemon.iter().zip(rects).enumerate() {
            self.render_card(pokemon, i == self.state.cursor, rect, buf);
        }

        if let Some(err) = &self.state.error {
            let line = Line::from(Span::styled(
                format!(" 새로고침 실패: {err} "),
                Style::default().add_modifier(Modifier::DIM),
            ));
            buf.set_line(area.x + 1, area.bottom().saturating_sub(1), &line, area.width.saturating_sub(2));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
