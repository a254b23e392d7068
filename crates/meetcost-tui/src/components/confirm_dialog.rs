//! Confirmation dialog component

use crate::theme::Palette;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Confirmation dialog result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Yes,
    No,
    Cancel,
}

/// What a pending confirmation will do when accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmIntent {
    Reset,
    Quit,
}

/// Confirmation dialog state
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    intent: Option<ConfirmIntent>,
    title: String,
    message: String,
    default_option: ConfirmResult,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self {
            intent: None,
            title: String::new(),
            message: String::new(),
            default_option: ConfirmResult::No,
        }
    }

    /// Show the dialog for `intent`
    pub fn open(
        &mut self,
        intent: ConfirmIntent,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.intent = Some(intent);
        self.title = title.into();
        self.message = message.into();
    }

    pub fn hide(&mut self) {
        self.intent = None;
    }

    pub fn is_visible(&self) -> bool {
        self.intent.is_some()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle key input. Returns the intent once a choice is made and the
    /// answer with it; `None` while the dialog is still waiting.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<(ConfirmIntent, ConfirmResult)> {
        let intent = self.intent?;

        let result = match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => ConfirmResult::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') => ConfirmResult::No,
            KeyCode::Esc => ConfirmResult::Cancel,
            KeyCode::Enter => self.default_option,
            _ => return None,
        };

        self.hide();
        Some((intent, result))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, p: &Palette) {
        if !self.is_visible() {
            return;
        }

        // Center dialog (50% width, fixed height)
        let dialog_width = ((area.width as f32 * 0.5).max(40.0) as u16).min(area.width);
        let dialog_height = 9.min(area.height);
        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(dialog_width) / 2,
            y: area.y + area.height.saturating_sub(dialog_height) / 2,
            width: dialog_width,
            height: dialog_height,
        };

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.warning))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(p.warning).add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Message
                Constraint::Length(2), // Buttons
            ])
            .split(inner);

        let message = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(&self.message, Style::default().fg(p.fg))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let bold = Modifier::BOLD;
        let buttons = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("[Y] ", Style::default().fg(p.success).add_modifier(bold)),
                Span::styled("Yes", Style::default().fg(p.fg)),
                Span::raw("  "),
                Span::styled("[N] ", Style::default().fg(p.error).add_modifier(bold)),
                Span::styled("No", Style::default().fg(p.error)),
                Span::raw("  "),
                Span::styled("[Esc] ", Style::default().fg(p.muted).add_modifier(bold)),
                Span::styled("Cancel", Style::default().fg(p.muted)),
            ]),
            Line::from(Span::styled("(Enter = No)", Style::default().fg(p.muted))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(buttons, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_dialog_ignores_keys() {
        let mut dialog = ConfirmDialog::new();
        assert_eq!(dialog.handle_key(KeyCode::Char('y')), None);
    }

    #[test]
    fn test_yes_returns_intent_and_hides() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ConfirmIntent::Reset, "Reset", "Clear the meeting?");
        assert!(dialog.is_visible());

        assert_eq!(dialog.handle_key(KeyCode::Char('x')), None);
        assert!(dialog.is_visible());

        assert_eq!(
            dialog.handle_key(KeyCode::Char('Y')),
            Some((ConfirmIntent::Reset, ConfirmResult::Yes))
        );
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_enter_uses_safe_default() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ConfirmIntent::Quit, "Quit", "Meeting still running. Quit?");

        assert_eq!(
            dialog.handle_key(KeyCode::Enter),
            Some((ConfirmIntent::Quit, ConfirmResult::No))
        );
    }
}
