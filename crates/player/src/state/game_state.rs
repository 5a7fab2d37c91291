//! Game state container backed by a `tokio::sync::watch` channel
//!
//! Central state for the player client: the active turn, the richer session
//! projection, the outcome of the last action and the notification overlay.

use std::sync::Arc;

use tokio::sync::watch;
use udh_domain::{GameData, GameInfo, Notification};

/// Outcome of the most recent coordinator action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Snapshot of everything the UI renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    /// The active narrative turn
    pub game_data: Option<GameData>,
    /// Stats, inventory and story log for the active game
    pub game_info: Option<GameInfo>,
    pub status: ActionStatus,
    /// Message of the last failed action, cleared on the next success
    pub error: Option<String>,
    /// Overlay signal, independent of `status`
    pub notification: Option<Notification>,
}

impl GameState {
    pub fn is_loading(&self) -> bool {
        self.status == ActionStatus::Loading
    }

    pub fn has_game(&self) -> bool {
        self.game_data.is_some()
    }

    /// Drop everything tied to the current game. The notification survives.
    pub fn clear_session(&mut self) {
        self.game_data = None;
        self.game_info = None;
        self.error = None;
    }
}

/// Shared handle to the single state container.
///
/// Cloning is cheap; all clones publish to the same subscribers.
#[derive(Clone)]
pub struct GameStateStore {
    sender: Arc<watch::Sender<GameState>>,
}

impl GameStateStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(GameState::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn snapshot(&self) -> GameState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.sender.subscribe()
    }

    /// Mutate in place and notify subscribers. Last write wins.
    pub fn update(&self, mutate: impl FnOnce(&mut GameState)) {
        self.sender.send_modify(mutate);
    }
}

impl Default for GameStateStore {
    fn default() -> Self {
        Self::new()
    }
}
