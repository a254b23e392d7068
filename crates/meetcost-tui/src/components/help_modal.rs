//! Help modal component for displaying keybindings

use crate::keybindings::{KeyAction, KeyBindings};
use crate::theme::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help modal displaying keybindings
#[derive(Debug, Default)]
pub struct HelpModal {
    visible: bool,
}

impl HelpModal {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Render the help modal as an overlay
    pub fn render(&self, frame: &mut Frame, area: Rect, keybindings: &KeyBindings, p: &Palette) {
        if !self.visible {
            return;
        }

        let lines = build_help_content(keybindings, p);

        let modal_width = 56.min(area.width);
        let modal_height = (lines.len() as u16 + 2).min(area.height);
        let modal_area = Rect {
            x: area.x + area.width.saturating_sub(modal_width) / 2,
            y: area.y + area.height.saturating_sub(modal_height) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.focus))
            .title(Span::styled(
                " Help - Keybindings ",
                Style::default().fg(p.focus).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);

        let help = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(help, modal_area);
    }
}

/// One line per action, listing every key bound to it
fn build_help_content(keybindings: &KeyBindings, p: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];

    for action in KeyAction::all() {
        let keys = keybindings.keys_for_action(*action);
        if keys.is_empty() {
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", keys.join(" / ")), Style::default().fg(p.focus)),
            Span::styled(action.description(), Style::default().fg(p.fg)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  While editing the rate: Enter saves, Esc cancels",
        Style::default().fg(p.muted),
    )));

    lines
}
