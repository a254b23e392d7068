//! TUI rendering logic

use crate::app::App;
use crate::keybindings::KeyAction;
use crate::theme::{CostLevelColor, Palette, RunStateColor};
use meetcost_core::format_cost;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the full UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let p = Palette::new(app.color_scheme);

    frame.render_widget(Block::default().style(Style::default().bg(p.bg)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(9),    // Meter
            Constraint::Length(3), // Rate input
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_meter(frame, chunks[0], app, &p);
    app.rate_input
        .render(frame, chunks[1], &p, &app.currency_symbol);
    render_status_bar(frame, chunks[2], app, &p);

    // Overlays, last drawn on top
    app.help_modal.render(frame, area, &app.keybindings, &p);
    app.toast_manager.render(frame, area, &p);
    app.confirm_dialog.render(frame, area, &p);
}

fn render_meter(frame: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let state = RunStateColor::from_running(app.snapshot.running);
    let state_color = state.to_color(app.color_scheme);
    let burn = app.hourly_burn();
    let burn_color = CostLevelColor::from_hourly_burn(burn).to_color(app.color_scheme);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(state_color))
        .title(Span::styled(
            " meetcost ",
            Style::default().fg(p.focus).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically center the content
    let content_height = 7;
    let top = inner.height.saturating_sub(content_height) / 2;
    let content_area = Rect {
        y: inner.y + top,
        height: inner.height.saturating_sub(top),
        ..inner
    };

    let bold = Modifier::BOLD;
    let lines = vec![
        Line::from(Span::styled(
            app.snapshot.elapsed_label(),
            Style::default().fg(p.fg).add_modifier(bold),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.snapshot.cost_label(&app.currency_symbol),
            Style::default().fg(p.important).add_modifier(bold),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Attendees: {}", app.snapshot.attendee_count),
            Style::default().fg(p.fg),
        )),
        Line::from(vec![
            Span::styled("Burn: ", Style::default().fg(p.muted)),
            Span::styled(
                format!("{}/hr", format_cost(burn, &app.currency_symbol)),
                Style::default().fg(burn_color),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} {}", state.icon(), state.label()),
            Style::default().fg(state_color).add_modifier(bold),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let hint = |action: KeyAction, label: &'static str| -> Vec<Span<'static>> {
        let key = app
            .keybindings
            .get_key_for_action(action)
            .unwrap_or_else(|| "-".to_string());
        vec![
            Span::styled(format!(" {} ", key), Style::default().fg(p.focus)),
            Span::styled(format!("{} ", label), Style::default().fg(p.muted)),
        ]
    };

    let spans: Vec<Span> = if app.rate_input.is_editing() {
        vec![
            Span::styled(" Enter ", Style::default().fg(p.focus)),
            Span::styled("save ", Style::default().fg(p.muted)),
            Span::styled(" Esc ", Style::default().fg(p.focus)),
            Span::styled("cancel", Style::default().fg(p.muted)),
        ]
    } else {
        let toggle_label = if app.snapshot.running { "stop" } else { "start" };
        [
            hint(KeyAction::ToggleTimer, toggle_label),
            hint(KeyAction::AddAttendee, "add"),
            hint(KeyAction::RemoveAttendee, "remove"),
            hint(KeyAction::EditRate, "rate"),
            hint(KeyAction::Reset, "reset"),
            hint(KeyAction::ToggleHelp, "help"),
            hint(KeyAction::Quit, "quit"),
        ]
        .concat()
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use meetcost_core::{ManualClock, MeterConfig};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_initial_meter() {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut app = App::new(&MeterConfig::default(), Box::new(clock));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("00:00:00"));
        assert!(text.contains("$0.00"));
        assert!(text.contains("Attendees: 0"));
        assert!(text.contains("STOPPED"));
    }

    #[test]
    fn test_renders_running_meter() {
        let clock = ManualClock::new(1_700_000_000_000);
        let config = MeterConfig {
            default_rate: "360".to_string(),
            ..Default::default()
        };
        let mut app = App::new(&config, Box::new(clock.clone()));
        app.handle_key(KeyCode::Char('+'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);
        clock.advance(3_723_000);
        app.on_tick();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("01:02:03"));
        // 3_723_000 ms × 0.0001
        assert!(text.contains("$372.30"));
        assert!(text.contains("RUNNING"));
        assert!(text.contains("$360.00/hr"));
    }
}
