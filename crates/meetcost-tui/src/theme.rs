//! Unified theme and color system for the meetcost TUI
//!
//! Color language:
//! - 🟢 Green: Running, Success
//! - 🔴 Red: Stopped, Error, High burn
//! - 🟡 Yellow: Warning, Attention
//! - ⚪ Gray: Neutral, Disabled
//! - 🔵 Cyan: Focus, Interactive
//! - 🟣 Magenta: Important values

use meetcost_core::ColorScheme;
use ratatui::style::Color;
use rust_decimal::Decimal;

/// Status color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    /// Green: Running, Healthy, Success
    Success,
    /// Red: Failed, Error, Critical
    Error,
    /// Yellow: Warning, Pending, Attention
    Warning,
    /// Gray: Unknown, Disabled, Neutral
    Neutral,
    /// Cyan: Selected, Focus, Interactive
    Focus,
    /// Magenta: High value, Important
    Important,
}

impl StatusColor {
    /// Convert to Ratatui Color based on color scheme
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => match self {
                StatusColor::Success => Color::Green,
                StatusColor::Error => Color::Red,
                StatusColor::Warning => Color::Yellow,
                StatusColor::Neutral => Color::DarkGray,
                StatusColor::Focus => Color::Cyan,
                StatusColor::Important => Color::Magenta,
            },
            ColorScheme::Light => match self {
                StatusColor::Success => Color::Rgb(0, 128, 0), // Dark green
                StatusColor::Error => Color::Rgb(200, 0, 0),   // Dark red
                StatusColor::Warning => Color::Rgb(180, 120, 0), // Dark yellow/orange
                StatusColor::Neutral => Color::Gray,
                StatusColor::Focus => Color::Rgb(0, 128, 128), // Dark cyan
                StatusColor::Important => Color::Rgb(128, 0, 128), // Dark magenta
            },
        }
    }
}

/// Resolved colors for one scheme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub focus: Color,
    pub important: Color,
}

impl Palette {
    pub fn new(scheme: ColorScheme) -> Self {
        let (fg, bg, muted) = match scheme {
            ColorScheme::Dark => (Color::White, Color::Black, Color::DarkGray),
            ColorScheme::Light => (Color::Black, Color::White, Color::Gray),
        };
        Self {
            fg,
            bg,
            muted,
            success: StatusColor::Success.to_color(scheme),
            warning: StatusColor::Warning.to_color(scheme),
            error: StatusColor::Error.to_color(scheme),
            focus: StatusColor::Focus.to_color(scheme),
            important: StatusColor::Important.to_color(scheme),
        }
    }
}

/// Meeting clock state
pub enum RunStateColor {
    Running,
    Stopped,
}

impl RunStateColor {
    pub fn from_running(running: bool) -> Self {
        if running {
            RunStateColor::Running
        } else {
            RunStateColor::Stopped
        }
    }

    pub fn to_color(&self, scheme: ColorScheme) -> Color {
        match self {
            RunStateColor::Running => StatusColor::Success.to_color(scheme),
            RunStateColor::Stopped => StatusColor::Error.to_color(scheme),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RunStateColor::Running => "●",
            RunStateColor::Stopped => "○",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunStateColor::Running => "RUNNING",
            RunStateColor::Stopped => "STOPPED",
        }
    }
}

/// Hourly burn (rate × attendees) thresholds
pub enum CostLevelColor {
    /// <500/hr
    Low,
    /// 500-2000/hr
    Medium,
    /// >2000/hr
    High,
}

impl CostLevelColor {
    pub fn from_hourly_burn(burn: Decimal) -> Self {
        if burn > Decimal::from(2_000) {
            CostLevelColor::High
        } else if burn >= Decimal::from(500) {
            CostLevelColor::Medium
        } else {
            CostLevelColor::Low
        }
    }

    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match self {
            CostLevelColor::Low => StatusColor::Success.to_color(scheme),
            CostLevelColor::Medium => StatusColor::Warning.to_color(scheme),
            CostLevelColor::High => StatusColor::Error.to_color(scheme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_level_thresholds() {
        assert!(matches!(
            CostLevelColor::from_hourly_burn(Decimal::from(120)),
            CostLevelColor::Low
        ));
        assert!(matches!(
            CostLevelColor::from_hourly_burn(Decimal::from(500)),
            CostLevelColor::Medium
        ));
        assert!(matches!(
            CostLevelColor::from_hourly_burn(Decimal::from(2_000)),
            CostLevelColor::Medium
        ));
        assert!(matches!(
            CostLevelColor::from_hourly_burn(Decimal::from(2_001)),
            CostLevelColor::High
        ));
    }

    #[test]
    fn test_run_state_icons() {
        assert_eq!(RunStateColor::from_running(true).icon(), "●");
        assert_eq!(RunStateColor::from_running(false).icon(), "○");
        assert_eq!(RunStateColor::Running.label(), "RUNNING");
    }

    #[test]
    fn test_palette_follows_scheme() {
        let dark = Palette::new(ColorScheme::Dark);
        let light = Palette::new(ColorScheme::Light);
        assert_eq!(dark.fg, Color::White);
        assert_eq!(light.fg, Color::Black);
        assert_eq!(light.success, Color::Rgb(0, 128, 0));
    }
}
