//! UDH player client.
//!
//! HTTP transport to the narrative engine, the game service adapter, the
//! session coordinator and a terminal front end.

pub mod application;
pub mod infrastructure;
pub mod messages;
pub mod ports;
pub mod runner;
pub mod state;
pub mod ui;

pub use application::services::GameSession;
pub use application::{GameOperation, ServiceError};
pub use state::{ActionStatus, GameState};
