//! Header and status rows framing the landing screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub const TITLE: &str = "PokéSrc";

/// 1-line title row. Keybinding hints (`q:quit  ?:help`) are right-aligned.
pub struct Header<'a> {
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_string(area.x + 1, area.y, TITLE, self.theme.title);

        let hint = " /:search  tab:focus  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(Span::raw(hint).width() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}

/// 1-line status row: the submitted Pokémon on the left, a short note about
/// the daily dataset on the right.
pub struct StatusLine<'a> {
    selected: Option<(&'a str, &'a str)>,
    note: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(selected: Option<(&'a str, &'a str)>, note: Option<&'a str>, theme: &'a Theme) -> Self {
        Self { selected, note, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = match self.selected {
            Some((korean, english)) => Line::from(vec![
                Span::raw(" 선택: "),
                Span::styled(korean, self.theme.title),
                Span::styled(format!(" ({english})"), self.theme.suggestion_secondary),
            ]),
            None => Line::from(Span::styled(" 선택 없음", self.theme.search_placeholder)),
        };
        buf.set_line(area.x, area.y, &left, area.width);

        if let Some(note) = self.note {
            let note = format!("{note} ");
            let x = area.right().saturating_sub(Span::raw(note.as_str()).width() as u16);
            buf.set_string(x, area.y, note, self.theme.card_subtitle);
        }
    }
}
