//! TUI Application state and input handling

use crate::components::{
    ConfirmDialog, ConfirmIntent, ConfirmResult, HelpModal, RateCommit, RateInput, Toast,
    ToastManager,
};
use crate::keybindings::{KeyAction, KeyBindings};
use crossterm::event::{KeyCode, KeyModifiers};
use meetcost_core::{
    BillableRate, Clock, ColorScheme, DisplaySnapshot, MeterConfig, MeterController,
};
use std::time::Duration;
use tracing::info;

/// TUI Application state
pub struct App {
    /// Ledger and clock state
    pub meter: MeterController,

    /// Source of timestamps handed to the meter
    clock: Box<dyn Clock>,

    /// Billable rate text box
    pub rate_input: RateInput,

    /// Last projection shown on screen
    pub snapshot: DisplaySnapshot,

    pub currency_symbol: String,
    pub tick_interval: Duration,
    pub color_scheme: ColorScheme,

    pub keybindings: KeyBindings,
    pub help_modal: HelpModal,
    pub confirm_dialog: ConfirmDialog,
    pub toast_manager: ToastManager,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &MeterConfig, clock: Box<dyn Clock>) -> Self {
        let mut keybindings = KeyBindings::new();
        let mut toast_manager = ToastManager::new();
        for warning in keybindings.load_custom(&config.keybindings) {
            toast_manager.push(Toast::warning(warning));
        }

        let mut app = Self {
            meter: MeterController::new(),
            clock,
            rate_input: RateInput::new(config.default_rate.clone()),
            snapshot: DisplaySnapshot::default(),
            currency_symbol: config.currency_symbol.clone(),
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
            color_scheme: config.color_scheme,
            keybindings,
            help_modal: HelpModal::new(),
            confirm_dialog: ConfirmDialog::new(),
            toast_manager,
            should_quit: false,
        };
        app.warn_if_invalid_rate();
        app
    }

    fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Committed rate text, passed raw to the meter
    pub fn rate(&self) -> &str {
        self.rate_input.value()
    }

    /// Cost of one hour at the current rate and headcount
    pub fn hourly_burn(&self) -> rust_decimal::Decimal {
        BillableRate::parse(self.rate()).hourly_burn(self.snapshot.attendee_count)
    }

    /// Recompute the snapshot after a user action
    pub fn refresh(&mut self) {
        self.snapshot = self.meter.snapshot(self.now(), self.rate_input.value());
    }

    /// Periodic tick. Returns true when the display changed; a stopped
    /// meter leaves the snapshot untouched.
    pub fn on_tick(&mut self) -> bool {
        match self.meter.tick(self.now(), self.rate_input.value()) {
            Some(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            None => false,
        }
    }

    /// Handle keyboard input
    /// Returns true if the key did something
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        // Modal dialogs capture all input
        if self.confirm_dialog.is_visible() {
            if let Some((intent, result)) = self.confirm_dialog.handle_key(code) {
                self.on_confirm(intent, result);
            }
            return true;
        }

        if self.rate_input.is_editing() {
            self.handle_rate_key(code, modifiers);
            return true;
        }

        match self.keybindings.get_action(code, modifiers) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    fn handle_rate_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Enter => {
                if self.rate_input.commit() == RateCommit::Changed {
                    info!(rate = %self.rate(), "Billable rate changed");
                    if !self.warn_if_invalid_rate() {
                        let message = format!("Rate set to {}/hr", self.rate());
                        self.toast_manager.push(Toast::success(message));
                    }
                    self.refresh();
                }
            }
            KeyCode::Esc => self.rate_input.cancel(),
            KeyCode::Backspace => self.rate_input.backspace(),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => self.rate_input.push(c),
            _ => {}
        }
    }

    /// Toast when the committed rate will not parse. Returns true if it warned.
    fn warn_if_invalid_rate(&mut self) -> bool {
        if BillableRate::is_valid_input(self.rate()) {
            return false;
        }
        let message = format!(
            "Rate '{}' is not a number, cost will not accrue",
            self.rate()
        );
        self.toast_manager.push(Toast::warning(message));
        true
    }

    fn dispatch(&mut self, action: KeyAction) {
        let now = self.now();
        match action {
            KeyAction::ToggleTimer => {
                self.meter.toggle(now, self.rate_input.value());
                self.refresh();
            }
            KeyAction::AddAttendee => {
                self.meter.add_attendee(now, self.rate_input.value());
                self.refresh();
            }
            KeyAction::RemoveAttendee => {
                if self.meter.remove_attendee(now, self.rate_input.value()) {
                    self.refresh();
                }
            }
            KeyAction::Reset => {
                if self.meter.ledger().is_empty() {
                    return;
                }
                self.confirm_dialog.open(
                    ConfirmIntent::Reset,
                    "Reset meeting",
                    "Clear the timer, attendees and cost?",
                );
            }
            KeyAction::EditRate => self.rate_input.begin_edit(),
            KeyAction::ThemeToggle => self.color_scheme = self.color_scheme.toggled(),
            KeyAction::ToggleHelp => self.help_modal.toggle(),
            KeyAction::CloseModal => self.help_modal.hide(),
            KeyAction::Quit => {
                if self.meter.is_running() {
                    self.confirm_dialog.open(
                        ConfirmIntent::Quit,
                        "Quit",
                        "The meeting is still running. Quit anyway?",
                    );
                } else {
                    self.should_quit = true;
                }
            }
            KeyAction::ForceQuit => self.should_quit = true,
        }
    }

    fn on_confirm(&mut self, intent: ConfirmIntent, result: ConfirmResult) {
        if result != ConfirmResult::Yes {
            return;
        }
        match intent {
            ConfirmIntent::Reset => {
                self.meter.reset();
                self.refresh();
                self.toast_manager.push(Toast::info("Meeting cleared"));
            }
            ConfirmIntent::Quit => self.should_quit = true,
        }
    }
}
