//! meetcost-tui - TUI frontend for meetcost using Ratatui

pub mod app;
pub mod components;
pub mod keybindings;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use meetcost_core::{MeterConfig, SystemClock};
use ratatui::prelude::*;
use std::io;
use std::time::Instant;
use tracing::info;

/// Run the TUI application
pub fn run(config: MeterConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, Box::new(SystemClock));
    info!(
        rate = %app.rate(),
        tick_ms = app.tick_interval.as_millis() as u64,
        "Meter ready"
    );

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        elapsed_ms = app.snapshot.elapsed_ms,
        cost = %app.snapshot.cost_cents(),
        events = app.meter.ledger().len(),
        "Meter closed"
    );

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    let mut last_tick = Instant::now();

    loop {
        app.toast_manager.clear_expired();
        terminal.draw(|f| ui::render(f, app))?;

        // Wait for input until the next tick is due
        let timeout = app.tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_interval {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
