//! Terminal presentation: command parsing and text rendering.

pub mod command;
pub mod render;

pub use command::{Command, CommandError, HELP};
pub use render::{render_game, render_info, render_notification, render_state};
