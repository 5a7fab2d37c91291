//! Domain types for the UDH adventure client.
//!
//! These mirror the payloads produced by the remote game engine. Nothing in
//! this crate performs I/O; the player crate owns transport and state.

pub mod error;
pub mod game;
pub mod game_info;
pub mod notification;
mod wire;

pub use error::DomainError;
pub use game::{GameData, LoadOutcome, SelectChoiceRequest};
pub use game_info::{GameInfo, MapData, MapEdge, MapNode, MonsterData, MonsterInfo, StoryBeat};
pub use notification::{Notification, NotificationKind};
