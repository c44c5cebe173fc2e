//! Main TUI application state and logic

use crate::errors::CompileError;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::Parser;
use crate::Compilation;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

const PAGE_SIZE: usize = 10;

/// Everything the viewer shows about one source text
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// Empty when lexing failed
    pub tokens: Vec<Token>,
    pub outcome: Result<Compilation, CompileError>,
}

impl CompileReport {
    /// Lex and parse `source`, keeping the token stream for display.
    pub fn run(source: &str) -> Self {
        let tokens = match tokenize(source) {
            Ok(tokens) => tokens,
            Err(e) => {
                return CompileReport {
                    tokens: Vec::new(),
                    outcome: Err(e),
                }
            }
        };

        let mut parser = Parser::new(tokens.clone());
        let outcome = match parser.parse_program() {
            Ok(program) => Ok(Compilation {
                program,
                symbols: parser.into_symbols(),
            }),
            Err(e) => Err(e),
        };

        CompileReport { tokens, outcome }
    }

    pub fn error(&self) -> Option<&CompileError> {
        self.outcome.as_ref().err()
    }

    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match &self.outcome {
            Ok(compiled) => format!(
                "Compiled {} statement(s), {} symbol(s)",
                compiled.program.statements().len(),
                compiled.symbols.len()
            ),
            Err(e) => e.to_string(),
        }
    }
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
    Symbols,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tree -> symbols -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The source text being inspected
    pub source_code: String,

    pub report: CompileReport,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,
    pub symbols_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Compile `source_code` and set up the viewer for it
    pub fn new(source_code: String) -> Self {
        let report = CompileReport::run(&source_code);
        let status_message = report.summary();

        // Start with the error line a few rows from the top
        let source_scroll = report
            .error()
            .map_or(0, |e| e.location().line.saturating_sub(4));

        App {
            source_code,
            report,
            focused_pane: FocusedPane::Source,
            source_scroll,
            tokens_scroll: 0,
            tree_scroll: 0,
            symbols_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pane_area);

        // Left column: Source (top) | Tokens (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        // Right column: Tree (top) | Symbols (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let compiled = self.report.outcome.as_ref().ok();
        let error = self.report.error();

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            error.map(|e| e.location().line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            left_rows[1],
            &self.report.tokens,
            error.is_some() && self.report.tokens.is_empty(),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            compiled.map(|c| &c.program),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_symbols_pane(
            frame,
            right_rows[1],
            compiled.map(|c| &c.symbols),
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbols_scroll,
        );

        super::panes::render_status_bar(frame, status_area, &self.status_message, error.is_some());
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Symbols => &mut self.symbols_scroll,
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            // Offsets are clamped to the content on the next render
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE_SIZE);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE_SIZE);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycle() {
        let mut pane = FocusedPane::Source;
        for _ in 0..4 {
            assert_eq!(pane.next().prev(), pane);
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
    }

    #[test]
    fn test_report_keeps_tokens_on_parse_error() {
        let report = CompileReport::run("int x = 'a';");
        assert_eq!(report.tokens.len(), 5);
        assert_eq!(report.error().map(CompileError::kind), Some(ErrorKind::TypeMismatch));
    }

    #[test]
    fn test_report_lexical_error() {
        let report = CompileReport::run("int x = 5 % 2;");
        assert!(report.tokens.is_empty());
        assert_eq!(report.error().map(CompileError::kind), Some(ErrorKind::Lexical));
    }

    #[test]
    fn test_summary() {
        let report = CompileReport::run("int a; a = 1;");
        assert_eq!(report.summary(), "Compiled 2 statement(s), 1 symbol(s)");
    }

    #[test]
    fn test_new_app_starts_at_error_line() {
        let source = "int a;\nint b;\nint c;\nint d;\nint e;\nint f;\nint a;";
        let app = App::new(source.to_string());
        assert_eq!(app.status_message, app.report.summary());
        assert!(app.status_message.starts_with("Duplicate identifier at line 7"));
        assert_eq!(app.source_scroll, 3);
    }

    #[test]
    fn test_keys_scroll_focused_pane() {
        let mut app = App::new("int a = 1;".to_string());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tree_scroll, PAGE_SIZE - 1);
        assert_eq!(app.source_scroll, 0);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.tree_scroll, 0);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
