//! Toast notification component

use crate::theme::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Toast notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Warning,
    Info,
}

impl ToastType {
    fn color(&self, p: &Palette) -> ratatui::style::Color {
        match self {
            Self::Success => p.success,
            Self::Warning => p.warning,
            Self::Info => p.focus,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Single toast message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Warning)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Info)
    }
}

/// Toast manager - handles multiple toasts
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    /// Max toasts stacked on screen at once
    const MAX_VISIBLE: usize = 3;

    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn clear_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Newest toasts that would be drawn, oldest first
    pub fn visible(&self) -> &[Toast] {
        let skip = self.toasts.len().saturating_sub(Self::MAX_VISIBLE);
        &self.toasts[skip..]
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        self.clear_expired();

        let visible = self.visible();
        if visible.is_empty() {
            return;
        }

        // Stack from the bottom, just above the status bar
        let toast_height: u16 = 3;
        let mut y_offset =
            area.height
                .saturating_sub((visible.len() as u16 * toast_height) + 2);

        for toast in visible {
            let toast_width = (toast.message.chars().count() + 6).min(area.width as usize) as u16;
            let x_offset = area.width.saturating_sub(toast_width) / 2;

            let toast_area = Rect {
                x: area.x + x_offset,
                y: area.y + y_offset,
                width: toast_width,
                height: toast_height.min(area.height.saturating_sub(y_offset)),
            };

            render_single_toast(frame, toast_area, toast, palette);
            y_offset += toast_height;
        }
    }
}

fn render_single_toast(frame: &mut Frame, area: Rect, toast: &Toast, palette: &Palette) {
    let color = toast.toast_type.color(palette);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = Line::from(vec![
        Span::styled(
            format!("{} ", toast.toast_type.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.message.as_str(), Style::default().fg(palette.fg)),
    ]);

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_newest_toasts_visible() {
        let mut manager = ToastManager::new();
        for i in 0..5 {
            manager.push(Toast::info(format!("toast {i}")));
        }

        let visible: Vec<_> = manager.visible().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(visible, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn test_expired_toasts_dropped() {
        let mut manager = ToastManager::new();
        manager.push(Toast::warning("gone").with_duration(Duration::ZERO));
        manager.push(Toast::success("kept"));

        std::thread::sleep(Duration::from_millis(5));
        manager.clear_expired();

        assert_eq!(manager.visible().len(), 1);
        assert_eq!(manager.visible()[0].message, "kept");
    }

    #[test]
    fn test_toast_kinds_use_palette_colors() {
        use meetcost_core::ColorScheme;
        let p = Palette::new(ColorScheme::Dark);

        assert_eq!(Toast::success("a").toast_type.color(&p), p.success);
        assert_eq!(Toast::warning("b").toast_type.color(&p), p.warning);
        assert_eq!(Toast::info("c").toast_type.icon(), "ℹ");
        assert_eq!(Toast::info("c").toast_type.color(&p), p.focus);
    }
}
