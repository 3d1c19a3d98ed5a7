//! Input adapters.
//!
//! Keyboard shortcuts and text lines both reduce to [`WizardCommand`]s,
//! which map one-to-one onto controller operations.

pub mod command;
pub mod keymap;
pub mod line;

pub use command::{CommandOutcome, WizardCommand};
pub use keymap::{command_for, Key, KeyPress};
pub use line::{parse_line, InputLine, ParseLineError};
