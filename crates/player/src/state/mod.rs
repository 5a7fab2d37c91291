//! Observable session state
//!
//! The coordinator is the only writer; every other component reads snapshots
//! or subscribes for changes.

mod game_state;

pub use game_state::{ActionStatus, GameState, GameStateStore};
