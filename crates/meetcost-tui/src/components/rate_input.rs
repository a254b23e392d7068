//! Billable rate input field

use crate::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MAX_LEN: usize = 24;

/// Outcome of committing an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateCommit {
    Unchanged,
    Changed,
}

/// Rate text box. The committed value is passed raw to the ledger, which
/// treats anything unparseable as a zero rate.
pub struct RateInput {
    value: String,
    draft: String,
    editing: bool,
}

impl RateInput {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
            draft: String::new(),
            editing: false,
        }
    }

    /// Committed rate text
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.draft = self.value.clone();
        self.editing = true;
    }

    pub fn push(&mut self, ch: char) {
        if self.editing && !ch.is_control() && self.draft.chars().count() < MAX_LEN {
            self.draft.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.editing {
            self.draft.pop();
        }
    }

    pub fn commit(&mut self) -> RateCommit {
        self.editing = false;
        if self.draft == self.value {
            return RateCommit::Unchanged;
        }
        self.value = std::mem::take(&mut self.draft);
        RateCommit::Changed
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.draft.clear();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, p: &Palette, currency_symbol: &str) {
        let (text, border_color) = if self.editing {
            (self.draft.as_str(), p.focus)
        } else {
            (self.value.as_str(), p.muted)
        };

        let mut spans = vec![
            Span::styled(format!("{}/hr ", currency_symbol), Style::default().fg(p.muted)),
            Span::styled(text, Style::default().fg(p.fg).add_modifier(Modifier::BOLD)),
        ];
        if self.editing {
            spans.push(Span::styled(
                "_",
                Style::default().fg(p.focus).add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(
                    " Rate per attendee ",
                    Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
                )),
        );

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_and_commit() {
        let mut input = RateInput::new("0.00");
        input.begin_edit();
        for _ in 0..4 {
            input.backspace();
        }
        "150".chars().for_each(|c| input.push(c));

        assert_eq!(input.draft(), "150");
        assert_eq!(input.value(), "0.00");
        assert_eq!(input.commit(), RateCommit::Changed);
        assert_eq!(input.value(), "150");
        assert!(!input.is_editing());
    }

    #[test]
    fn test_cancel_keeps_value() {
        let mut input = RateInput::new("80");
        input.begin_edit();
        input.push('0');
        input.cancel();

        assert_eq!(input.value(), "80");
        assert!(!input.is_editing());
    }

    #[test]
    fn test_commit_without_change() {
        let mut input = RateInput::new("80");
        input.begin_edit();
        assert_eq!(input.commit(), RateCommit::Unchanged);
        assert_eq!(input.value(), "80");
    }

    #[test]
    fn test_push_ignored_when_not_editing_or_full() {
        let mut input = RateInput::new("1");
        input.push('2');
        assert_eq!(input.value(), "1");

        input.begin_edit();
        for _ in 0..40 {
            input.push('9');
        }
        assert_eq!(input.draft().chars().count(), MAX_LEN);
    }
}
