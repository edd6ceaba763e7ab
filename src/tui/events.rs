use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, size as terminal_size};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tracing::{error, info};

use crate::tui::app::{Flow, Input};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::App;

/// How long to wait for a key before redrawing (lets status messages expire)
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Restores the terminal on drop, so a panic never leaves it in raw mode
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
        };
        execute!(io::stdout(), EnterAlternateScreen)?;
        guard.alternate_screen_enabled = true;
        Ok(guard)
    }

    /// Restore explicitly on normal exit; drop becomes a no-op afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Translate a terminal key press into a controller input
pub fn map_key(key_event: KeyEvent) -> Option<Input> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') => Some(Input::Quit),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Up => Some(Input::Up),
        KeyCode::Down => Some(Input::Down),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Backspace => Some(Input::Backspace),
        KeyCode::Esc => Some(Input::Esc),
        KeyCode::Char(c) => Some(Input::Char(c)),
        _ => None,
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check size before entering the alternate screen so the message stays visible
    let (width, height) = terminal_size()?;
    if width < Layout::MIN_WIDTH || height < Layout::MIN_HEIGHT {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, Layout::MIN_WIDTH, Layout::MIN_HEIGHT
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = drive(&mut terminal, &mut app);
    if let Err(ref e) = result {
        error!(error = %e, "event loop aborted");
    }

    guard.restore()?;
    info!("terminal restored, exiting");
    result
}

fn drive(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), TuiError> {
    loop {
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area(), app.prompt.is_some());
            crate::tui::render::render(f, app, &layout);
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        // Only Press events; Windows also reports releases
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(input) = map_key(key_event) {
                if app.handle_input(input)? == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_plain_keys() {
        assert_eq!(map_key(key(KeyCode::Up)), Some(Input::Up));
        assert_eq!(map_key(key(KeyCode::Down)), Some(Input::Down));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Input::Enter));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Input::Esc));
        assert_eq!(map_key(key(KeyCode::Backspace)), Some(Input::Backspace));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Input::Char('q')));
        assert_eq!(map_key(key(KeyCode::Char('/'))), Some(Input::Char('/')));
        assert_eq!(map_key(key(KeyCode::F(1))), None);
    }

    #[test]
    fn test_shifted_characters_pass_through() {
        let event = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(map_key(event), Some(Input::Char('W')));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), Some(Input::Quit));
        let event = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), None);
    }
}
