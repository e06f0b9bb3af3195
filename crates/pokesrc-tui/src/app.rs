//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All behaviour lives on
//! [`AppState`] so it can be exercised without a terminal.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        header::{Header, StatusLine},
        help::HelpPopup,
        search_bar::{SearchBar, SearchBarState},
        showcase::{card_rects, columns_for, Showcase, ShowcaseState},
        suggestions::{Suggestion, Suggestions, SuggestionsState},
    },
    DailyFeed,
};
use chrono::NaiveDate;
use crossterm::{
    event::{self as ct_event, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokesrc_core::{config::Config, DailyPicks, DailyPokemon, Dex, Matcher};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Position, Rect},
    widgets::Block,
    Frame, Terminal,
};
use std::{
    io,
    sync::mpsc::TryRecvError,
    time::{Duration, Instant},
};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Showcase,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Screen regions for one frame. Shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub header: Rect,
    pub search: Rect,
    pub showcase: Rect,
    pub status: Rect,
    /// Suggestion overlay directly under the search box, when shown.
    pub dropdown: Option<Rect>,
}

impl Screen {
    /// The search container: search box plus dropdown.
    pub fn in_search_container(&self, pos: Position) -> bool {
        self.search.contains(pos) || self.dropdown.is_some_and(|d| d.contains(pos))
    }
}

pub fn layout(area: Rect, dropdown_rows: usize) -> Screen {
    let [header, search, showcase, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let room = status.y.saturating_sub(search.bottom());
    let dropdown = (dropdown_rows > 0 && room > 2).then(|| Rect {
        y: search.bottom(),
        height: (dropdown_rows as u16 + 2).min(room),
        ..search
    });

    Screen {
        header,
        search,
        showcase,
        status,
        dropdown,
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub matcher: Matcher,
    pub search: SearchBarState,
    pub suggestions: SuggestionsState,
    pub showcase: ShowcaseState,
    pub command_bar: CommandBarState,
    /// Last submitted Pokémon as (korean, english).
    pub selected: Option<(String, String)>,
    /// Short note about the daily dataset for the status row.
    pub daily_note: Option<String>,
    pub show_help: bool,
    /// Set by `:reload`; the event loop forwards it to the daily feed.
    pub reload_requested: bool,
    /// Terminal area of the last frame, used for mouse hit-testing.
    pub viewport: Rect,
    pub quit: bool,
}

impl AppState {
    pub fn new(dex: Dex, config: Config, theme: Theme) -> Self {
        let window = config.ui.max_suggestions as usize;
        Self {
            focus: Focus::Search,
            prev_focus: Focus::Search,
            theme,
            config,
            matcher: Matcher::new(dex),
            search: SearchBarState::default(),
            suggestions: SuggestionsState::new(window),
            showcase: ShowcaseState::default(),
            command_bar: CommandBarState::default(),
            selected: None,
            daily_note: None,
            show_help: false,
            reload_requested: false,
            viewport: Rect::new(0, 0, 80, 24),
            quit: false,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.search.debounce_ms)
    }

    pub fn columns(&self) -> usize {
        columns_for(self.viewport.width, self.config.ui.wide_breakpoint)
    }

    pub fn screen(&self) -> Screen {
        let rows = if self.suggestions.is_visible() {
            self.suggestions.visible_rows()
        } else {
            0
        };
        layout(self.viewport, rows)
    }

    /// Rerun the matcher for the current query and rebuild the dropdown.
    pub fn refresh_suggestions(&mut self) {
        let query = self.search.query.clone();
        let items: Vec<Suggestion> = self
            .matcher
            .hits(&query)
            .into_iter()
            .map(Suggestion::from)
            .collect();
        tracing::debug!(query = %query, results = items.len(), "suggestions refreshed");
        self.suggestions.replace(&query, items);
    }

    /// Apply an edit still waiting out the debounce, so the dropdown matches
    /// the query on screen before anything is picked from it.
    fn flush_pending_edit(&mut self) {
        if self.search.edited_at.take().is_some() {
            self.refresh_suggestions();
        }
    }

    /// Per-frame housekeeping: run the matcher once the debounce elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.search.take_due(now, self.debounce()) {
            self.refresh_suggestions();
        }
    }

    /// Empty the search box and close the dropdown.
    pub fn clear_query(&mut self) {
        tracing::debug!("query cleared");
        self.search.clear();
        self.suggestions.clear();
    }

    pub fn request_reload(&mut self) {
        tracing::debug!("daily reload requested");
        self.reload_requested = true;
    }

    /// Put `korean` in the search box and record it as the selection.
    pub fn submit(&mut self, korean: &str, english: &str) {
        tracing::debug!(korean, english, "submitted");
        self.search.set_query(korean);
        self.refresh_suggestions();
        self.suggestions.dismissed = true;
        self.selected = Some((korean.to_string(), english.to_string()));
    }

    /// Install the result of a daily (re)load.
    pub fn apply_daily(&mut self, update: Result<DailyPicks, String>, today: NaiveDate) {
        match update {
            Ok(picks) => {
                self.daily_note = match picks.date {
                    Some(date) if picks.is_stale(today) => Some(format!("{date} 기준")),
                    _ => None,
                };
                tracing::debug!(count = picks.pokemon.len(), "showcase updated");
                self.showcase.set_picks(picks);
            }
            Err(message) => {
                tracing::debug!(error = %message, "showcase load failed");
                self.showcase.set_error(message);
            }
        }
    }

    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_bar(event);
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Char('?') if self.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Search => Focus::Showcase,
                    Focus::Showcase | Focus::Command => Focus::Search,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> Search");
                self.focus = Focus::Search;
            }

            AppEvent::Click { column, row } => self.handle_click(Position::new(column, row)),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => match self.focus {
                Focus::Search => self.handle_search(other, now),
                Focus::Showcase => self.handle_showcase(other),
                Focus::Command => {}
            },
        }
    }

    fn handle_search(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Escape => self.clear_query(),
            AppEvent::Enter => {
                self.flush_pending_edit();
                match self.suggestions.selected_item().cloned() {
                    Some(item) if self.suggestions.is_visible() => {
                        self.submit(&item.korean, &item.english)
                    }
                    _ => tracing::debug!(query = %self.search.query, "enter without suggestion"),
                }
            }
            AppEvent::Nav(Direction::Up | Direction::Down) => {
                self.flush_pending_edit();
                self.suggestions.handle(&event);
            }
            other => {
                self.search.handle(&other, now);
            }
        }
    }

    /// Rects of the cards that fit in the showcase on the current viewport.
    fn card_areas(&self) -> Vec<Rect> {
        let inner = Block::bordered().inner(self.screen().showcase);
        card_rects(inner, self.showcase.cards().len(), self.columns())
    }

    fn handle_showcase(&mut self, event: AppEvent) {
        let visible = self.card_areas().len();
        match event {
            AppEvent::Enter => {
                if let Some(card) = self.showcase.selected_within(visible) {
                    let (korean, english) = card_names(card);
                    self.submit(&korean, &english);
                }
            }
            AppEvent::Escape => self.focus = Focus::Search,
            other => {
                let columns = self.columns();
                self.showcase.handle(&other, columns, visible);
            }
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.clone();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        execute_command(self, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        // Empty input closes the bar
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        // Show the error; bar stays open
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            other => self.command_bar.handle(&other),
        }
    }

    fn handle_click(&mut self, pos: Position) {
        self.flush_pending_edit();
        let screen = self.screen();

        if let Some(dropdown) = screen.dropdown {
            if dropdown.contains(pos) {
                // Rows inside the border map onto visible suggestions.
                if pos.y > dropdown.y && pos.y + 1 < dropdown.bottom() {
                    let row = (pos.y - dropdown.y - 1) as usize;
                    if let Some(item) = self.suggestions.select_row(row).cloned() {
                        self.submit(&item.korean, &item.english);
                    }
                }
                return;
            }
        }

        if screen.in_search_container(pos) {
            self.focus = Focus::Search;
            return;
        }

        if self.suggestions.is_visible() {
            tracing::debug!(x = pos.x, y = pos.y, "click outside search");
            self.clear_query();
        }

        if screen.showcase.contains(pos) {
            if let Some(idx) = self.card_areas().iter().position(|r| r.contains(pos)) {
                self.showcase.cursor = idx;
            }
            self.focus = Focus::Showcase;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    daily: Option<DailyFeed>,
}

impl App {
    pub fn new(dex: Dex, config: Config, daily: Option<DailyFeed>) -> Self {
        let theme = Theme::by_name(&config.ui.theme);
        let mut state = AppState::new(dex, config, theme);
        if daily.is_none() {
            // Nothing will ever arrive, so show an empty showcase.
            state.showcase.set_picks(DailyPicks::default());
        }
        App { state, daily }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            let size = terminal.size()?;
            self.state.viewport = Rect::new(0, 0, size.width, size.height);
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev, Instant::now());
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev, Instant::now());
                        }
                    }
                }
            }

            self.state.tick(Instant::now());
            self.pump_daily();
        }
        Ok(())
    }

    /// Drain pending daily updates and forward reload requests.
    fn pump_daily(&mut self) {
        let Some(feed) = self.daily.as_mut() else {
            self.state.reload_requested = false;
            return;
        };

        if std::mem::take(&mut self.state.reload_requested) {
            (feed.reload)();
        }

        let today = chrono::Local::now().date_naive();
        loop {
            match feed.updates.try_recv() {
                Ok(update) => self.state.apply_daily(update, today),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("daily feed closed");
                    self.daily = None;
                    break;
                }
            }
        }
    }
}

fn card_names(card: &DailyPokemon) -> (String, String) {
    (DailyPicks::display_name(card).to_string(), card.name.clone())
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let screen = {
        let rows = if state.suggestions.is_visible() {
            state.suggestions.visible_rows()
        } else {
            0
        };
        layout(area, rows)
    };
    let theme = &state.theme;

    frame.render_widget(Header::new(theme), screen.header);
    frame.render_widget(
        SearchBar::new(&state.search, state.focus == Focus::Search, theme),
        screen.search,
    );
    frame.render_widget(
        Showcase::new(
            &state.showcase,
            state.focus == Focus::Showcase,
            columns_for(area.width, state.config.ui.wide_breakpoint),
            theme,
        ),
        screen.showcase,
    );
    let selected = state
        .selected
        .as_ref()
        .map(|(k, e)| (k.as_str(), e.as_str()));
    frame.render_widget(
        StatusLine::new(selected, state.daily_note.as_deref(), theme),
        screen.status,
    );

    if let Some(dropdown) = screen.dropdown {
        frame.render_widget(Suggestions::new(&state.suggestions, theme), dropdown);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }

    // Command bar overlays the status row
    if state.focus == Focus::Command {
        frame.render_widget(CommandBar::new(&state.command_bar, theme), screen.status);
        let col = state.command_bar.cursor_col(screen.status);
        frame.set_cursor_position((col, screen.status.y));
        return;
    }

    if state.focus == Focus::Search {
        let bar = SearchBar::new(&state.search, true, theme);
        frame.set_cursor_position(bar.cursor_position(screen.search));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
