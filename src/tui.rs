//! TUI (Terminal User Interface) module for the Mastermind solver
//!
//! Full-screen board built with Ratatui.
//!
//! # Architecture
//! - `FeedbackForm`: black/white entry fields and key handling, no terminal
//! - `TuiInterface`: owns the terminal, renders the last session it was shown
//!   and feeds key presses to the form

use crate::code::Code;
use crate::game_state::{GameInterface, RoundOutcome, RoundRecord, Session, UserAction};
use crate::solver::Feedback;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const PEG_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);
const ACTIVE_FIELD_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
const FIELD_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Field {
    #[default]
    Black,
    White,
}

/// Black/white peg entry. Empty fields count as 0.
#[derive(Debug, Default)]
pub struct FeedbackForm {
    black: String,
    white: String,
    field: Field,
    error: String,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    fn current_mut(&mut self) -> &mut String {
        match self.field {
            Field::Black => &mut self.black,
            Field::White => &mut self.white,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            Field::Black => Field::White,
            Field::White => Field::Black,
        };
    }

    fn submit(&mut self) -> Option<UserAction> {
        let or_zero = |s: &str| if s.is_empty() { "0".to_string() } else { s.to_string() };
        let text = format!("{} {}", or_zero(&self.black), or_zero(&self.white));
        match text.parse::<Feedback>() {
            Ok(feedback) => {
                info_log!("FeedbackForm::submit() - {}", feedback);
                self.clear();
                Some(UserAction::Feedback(feedback))
            }
            Err(e) => {
                self.error = e.to_string();
                debug_log!("FeedbackForm::submit() - rejected '{}': {}", text, e);
                None
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UserAction::Exit);
        }
        if key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL) {
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }
        self.error.clear();

        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => return Some(UserAction::Exit),
            KeyCode::Char('r' | 'R') => {
                self.clear();
                return Some(UserAction::Reset);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                *self.current_mut() = c.to_string();
                if self.field == Field::Black {
                    self.field = Field::White;
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => self.toggle_field(),
            KeyCode::Backspace => {
                if self.current_mut().is_empty() {
                    self.field = Field::Black;
                }
                self.current_mut().clear();
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) => {
                self.error = format!("Only digits are allowed! ('{c}' is not a number)");
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    session: Option<&'a Session>,
    form: &'a FeedbackForm,
    message: &'a str,
    error_message: &'a str,
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    session: Option<Session>,
    form: FeedbackForm,
    message: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            session: None,
            form: FeedbackForm::new(),
            message: String::new(),
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            session: self.session.as_ref(),
            form: &self.form,
            message: &self.message,
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Counters
                Constraint::Length(3), // Current guess
                Constraint::Min(6),    // Remaining codes and history
                Constraint::Length(3), // Feedback entry
                Constraint::Length(4), // Messages
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        if let Some(session) = ctx.session {
            Self::render_counters(f, chunks[1], session);
            Self::render_current_guess(f, chunks[2], session);
            Self::render_board(f, chunks[3], session);
        }
        Self::render_form(f, chunks[4], ctx.form);
        Self::render_messages(f, chunks[5], ctx.message, ctx.error_message, ctx.form.error());
        Self::render_instructions(f, chunks[6]);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("MASTERMIND SOLVER  (4 pegs, ↑ ↓ → ←)")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_counters(f: &mut Frame, area: Rect, session: &Session) {
        let text = format!(
            "Guess number: {}   Remaining possibilities: {}   Best-case remaining turns: ≤ {}",
            session.guess_number(),
            session.candidates().len(),
            session.remaining_rounds_estimate()
        );
        let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn peg_spans(code: &Code) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for symbol in code.symbols() {
            spans.push(Span::styled(format!(" {} ", symbol.arrow()), PEG_STYLE));
            spans.push(Span::raw(" "));
        }
        spans
    }

    fn render_current_guess(f: &mut Frame, area: Rect, session: &Session) {
        let line = match session.current_guess() {
            Some(guess) if !session.is_over() => {
                let mut spans = Self::peg_spans(&guess);
                spans.push(Span::raw(format!("  ({guess})")));
                Line::from(spans)
            }
            _ => Line::from(Span::styled(session.message(), INFO_STYLE)),
        };
        let paragraph = Paragraph::new(line)
            .block(Block::default().title("Current guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn history_line(round: usize, record: &RoundRecord) -> Line<'static> {
        let mut spans = vec![Span::raw(format!("{round:>2}. "))];
        spans.extend(Self::peg_spans(&record.guess));
        spans.push(Span::raw(format!(
            " black {}  white {}",
            record.feedback.exact(),
            record.feedback.partial()
        )));
        Line::from(spans)
    }

    fn render_board(f: &mut Frame, area: Rect, session: &Session) {
        let mut lines = Vec::new();

        if let Some(codes) = session.endgame_candidates() {
            lines.push(Line::from(Span::styled("Possible codes remaining:", INFO_STYLE)));
            for code in codes {
                let mut spans = vec![Span::raw("    ")];
                spans.extend(Self::peg_spans(code));
                if Some(*code) == session.current_guess() {
                    spans.push(Span::styled(" Suggested", SUCCESS_STYLE));
                }
                lines.push(Line::from(spans));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled("History", HEADER_STYLE)));
        if session.history().is_empty() {
            lines.push(Line::from("  No guesses yet."));
        }
        // newest last; drop the oldest rows that do not fit
        let visible = (area.height as usize).saturating_sub(lines.len() + 2);
        let skip = session.history().len().saturating_sub(visible);
        for (i, record) in session.history().iter().enumerate().skip(skip) {
            lines.push(Self::history_line(i + 1, record));
        }

        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_form(f: &mut Frame, area: Rect, form: &FeedbackForm) {
        let field = |label: &'static str, value: &str, active: bool| {
            let style = if active { ACTIVE_FIELD_STYLE } else { FIELD_STYLE };
            let shown = if value.is_empty() { "0" } else { value };
            [Span::raw(label), Span::styled(format!(" {shown} "), style), Span::raw("   ")]
        };
        let mut spans = Vec::new();
        spans.extend(field("Black pegs: ", &form.black, form.field == Field::Black));
        spans.extend(field("White pegs: ", &form.white, form.field == Field::White));
        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Feedback").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str, form_error: &str) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            lines.push(Line::from(Span::styled(message.to_string(), MESSAGE_STYLE)));
        }
        for error in [error_message, form_error] {
            if !error.is_empty() {
                lines.push(Line::from(Span::styled(error.to_string(), ERROR_STYLE)));
            }
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new("0-4: Set pegs | TAB: Switch field | ENTER: Submit | R: Reset | ESC: Quit")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            // Only process Press events, ignore Release and Repeat to avoid double input
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                Ok(self.form.handle_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_state(&mut self, session: &Session) {
        if self.message.is_empty() {
            self.message = session.message();
        }
        self.session = Some(session.clone());
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match self.handle_input() {
                Ok(Some(action)) => {
                    self.error_message.clear();
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_outcome(&mut self, outcome: &RoundOutcome) {
        self.message = outcome.message();
        self.draw_or_log();
    }

    fn display_history(&mut self, _history: &[RoundRecord]) {
        // always on screen
        self.draw_or_log();
    }

    fn display_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, session: &Session) {
        self.form.clear();
        self.error_message.clear();
        self.message = format!(
            "New game started. {} possible codes.",
            session.candidates().len()
        );
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
