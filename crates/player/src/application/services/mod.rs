//! Application services
//!
//! `GameService` maps domain verbs to engine endpoints; `GameSession` is the
//! stateful coordinator the UI drives.

mod game_service;
mod game_session;
pub mod info_recovery;
mod teardown;

pub use game_service::GameService;
pub use game_session::GameSession;
pub use info_recovery::{InfoRecovery, RecoveryReport, RecoveryResult, RecoveryStep, RetryBudget};
pub use teardown::SessionTeardown;
