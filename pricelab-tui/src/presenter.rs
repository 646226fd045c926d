//! Terminal presenter: shows the two charts one after the other on the
//! alternate screen and waits for a key between them.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::{Frame, Terminal};
use tracing::debug;

use pricelab_core::domain::EnrichedTable;
use pricelab_runner::Presenter;

use crate::panels::{PriceTrendChart, ReturnHistogram};
use crate::theme::Theme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The charts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    PriceTrend,
    ReturnDistribution,
}

impl ChartView {
    pub const ALL: [ChartView; 2] = [ChartView::PriceTrend, ChartView::ReturnDistribution];

    pub fn label(self) -> &'static str {
        match self {
            ChartView::PriceTrend => "price trend",
            ChartView::ReturnDistribution => "return distribution",
        }
    }
}

/// What a key press means while a chart is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Next,
    Abort,
}

/// Map a key event to an action. Releases and repeats are ignored.
pub fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Abort)
        }
        KeyCode::Char('q') | KeyCode::Char(' ') | KeyCode::Esc | KeyCode::Enter => {
            Some(KeyAction::Next)
        }
        _ => None,
    }
}

/// Draw one chart view plus its footer into `frame`.
pub fn draw_view(
    frame: &mut Frame,
    table: &EnrichedTable,
    theme: &Theme,
    view: ChartView,
    position: usize,
) {
    let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
        .areas(frame.area());

    match view {
        ChartView::PriceTrend => frame.render_widget(PriceTrendChart::new(table, theme), body),
        ChartView::ReturnDistribution => {
            frame.render_widget(ReturnHistogram::new(table, theme), body)
        }
    }
    render_footer(frame, footer, theme, position);
}

fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme, position: usize) {
    let text = format!(
        " q/Enter: next ({}/{})  Ctrl-C: abort",
        position + 1,
        ChartView::ALL.len()
    );
    frame.render_widget(
        Line::styled(text, Style::default().fg(theme.text_secondary)),
        area,
    );
}

/// Raw mode + alternate screen for as long as the value lives.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn start() -> Result<Self> {
        enable_raw_mode()?;
        let terminal = undo_on_error(
            || {
                let mut stdout = io::stdout();
                execute!(stdout, EnterAlternateScreen)?;
                let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
                terminal.clear()?;
                Ok(terminal)
            },
            restore_terminal,
        )?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave raw mode and the alternate screen, ignoring errors. Safe to call
/// when setup only got partway.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Run `setup`; if it fails, run `undo` before handing back the error.
fn undo_on_error<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| undo())
}

/// Interactive presenter rendering into the current terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalPresenter {
    theme: Theme,
}

impl TerminalPresenter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn show(
        &self,
        session: &mut TerminalSession,
        table: &EnrichedTable,
        view: ChartView,
        position: usize,
    ) -> Result<()> {
        loop {
            // Redraw every tick so resizes are picked up.
            session
                .terminal
                .draw(|f| draw_view(f, table, &self.theme, view, position))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                match key_action(key) {
                    Some(KeyAction::Next) => return Ok(()),
                    Some(KeyAction::Abort) => bail!("presentation interrupted"),
                    None => {}
                }
            }
        }
    }
}

impl Presenter for TerminalPresenter {
    fn name(&self) -> &str {
        "terminal"
    }

    fn present(&mut self, table: &EnrichedTable) -> Result<()> {
        let mut session = TerminalSession::start()?;
        for (position, view) in ChartView::ALL.into_iter().enumerate() {
            debug!(chart = view.label(), "showing chart");
            self.show(&mut session, table, view, position)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{buffer_text, enriched_table};
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;
    use std::cell::Cell;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn dismiss_keys_advance() {
        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Enter, KeyCode::Char(' ')] {
            assert_eq!(key_action(press(code, KeyModifiers::NONE)), Some(KeyAction::Next));
        }
    }

    #[test]
    fn ctrl_c_aborts() {
        assert_eq!(
            key_action(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Abort)
        );
        assert_eq!(key_action(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_action(release), None);
    }

    #[test]
    fn draw_view_renders_chart_and_footer() {
        let table = enriched_table(100);
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        terminal
            .draw(|f| draw_view(f, &table, &theme, ChartView::ReturnDistribution, 1))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Distribution of Daily Returns"));
        assert!(text.contains("(2/2)"));
    }

    #[test]
    fn failed_setup_runs_undo() {
        let undone = Cell::new(false);
        let result: Result<()> = undo_on_error(|| bail!("no tty"), || undone.set(true));
        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn successful_setup_skips_undo() {
        let undone = Cell::new(false);
        let result = undo_on_error(|| Ok(7), || undone.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }

    #[test]
    fn presenter_name() {
        assert_eq!(TerminalPresenter::default().name(), "terminal");
    }
}
