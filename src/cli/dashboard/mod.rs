//! Full-screen batch dashboard.

pub mod app;
pub mod draw;
pub mod input;
pub mod pod_view;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::info;

pub use app::{App, Control, View};

/// Guard that restores terminal state on drop (even on panic/Ctrl+C).
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the dashboard until the user quits. Redraws at least once per `tick`.
pub fn run(app: &mut App, tick: Duration) -> io::Result<()> {
    let mut guard = TerminalGuard::new()?;
    let mut last_tick = Instant::now();
    info!(batches = app.collection().len(), "Dashboard started");

    loop {
        guard.terminal.draw(|frame| draw::draw(frame, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) == Control::Quit {
                    break;
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            app.tick(elapsed);
            app.set_time(chrono::Local::now().time());
            last_tick = Instant::now();
        }
    }

    info!(batches = app.collection().len(), "Dashboard closed");
    Ok(())
}
