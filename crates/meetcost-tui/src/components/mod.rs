pub mod confirm_dialog;
pub mod help_modal;
pub mod rate_input;
pub mod toast;

pub use confirm_dialog::{ConfirmDialog, ConfirmIntent, ConfirmResult};
pub use help_modal::HelpModal;
pub use rate_input::{RateCommit, RateInput};
pub use toast::{Toast, ToastManager, ToastType};
