//! Bounded recovery for a missing game projection
//!
//! After a successful load, `/loadinfo` may report that nothing is saved.
//! Recovery then starts a new game and fetches the projection again. The walk
//! is an explicit step machine whose only way back to `FetchInfo` after a miss
//! goes through [`RetryBudget::try_consume`], so it cannot loop.

use udh_domain::{GameData, GameInfo};

use crate::application::services::GameService;
use crate::application::ServiceError;
use crate::ports::outbound::TokenPort;

/// The next request the recovery will make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    FetchInfo,
    AutoStart,
}

/// Number of automatic new-game starts still allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    remaining: u8,
}

impl RetryBudget {
    pub fn new(max_retries: u8) -> Self {
        Self {
            remaining: max_retries,
        }
    }

    /// Spend one retry. Returns `false` once the budget is exhausted.
    pub fn try_consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }
}

/// How the projection fetch ended
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryResult {
    Loaded(GameInfo),
    /// Still no saved data after the budget was spent
    Exhausted,
    Failed(ServiceError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryReport {
    /// Game created by an automatic start, if one happened
    pub started_game: Option<GameData>,
    pub result: RecoveryResult,
}

impl RecoveryReport {
    /// True when a new game was started and its projection then loaded
    pub fn recovered(&self) -> bool {
        self.started_game.is_some() && matches!(self.result, RecoveryResult::Loaded(_))
    }
}

pub struct InfoRecovery<'a> {
    service: &'a GameService,
    tokens: &'a dyn TokenPort,
    budget: RetryBudget,
}

impl<'a> InfoRecovery<'a> {
    pub fn new(service: &'a GameService, tokens: &'a dyn TokenPort, budget: RetryBudget) -> Self {
        Self {
            service,
            tokens,
            budget,
        }
    }

    pub async fn run(mut self) -> RecoveryReport {
        let mut step = RecoveryStep::FetchInfo;
        let mut started_game = None;

        loop {
            // Credentials are looked up fresh for every request.
            let Some(token) = self.tokens.access_token().await else {
                return RecoveryReport {
                    started_game,
                    result: RecoveryResult::Failed(ServiceError::LocalAuthMissing),
                };
            };

            step = match step {
                RecoveryStep::FetchInfo => match self.service.load_game_info(&token).await {
                    Ok(info) => {
                        return RecoveryReport {
                            started_game,
                            result: RecoveryResult::Loaded(info),
                        }
                    }
                    Err(ServiceError::NoSavedData) if self.budget.try_consume() => {
                        tracing::info!(
                            remaining = self.budget.remaining(),
                            "No saved game info; starting a new game"
                        );
                        RecoveryStep::AutoStart
                    }
                    Err(ServiceError::NoSavedData) => {
                        tracing::warn!("Still no saved game info after automatic start");
                        return RecoveryReport {
                            started_game,
                            result: RecoveryResult::Exhausted,
                        };
                    }
                    Err(e) => {
                        return RecoveryReport {
                            started_game,
                            result: RecoveryResult::Failed(e),
                        }
                    }
                },
                RecoveryStep::AutoStart => match self.service.start_new_game(&token).await {
                    Ok(data) => {
                        tracing::info!(game_id = %data.id, "Automatic new game started");
                        started_game = Some(data);
                        RecoveryStep::FetchInfo
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Automatic new game failed");
                        return RecoveryReport {
                            started_game,
                            result: RecoveryResult::Failed(e),
                        };
                    }
                },
            };
        }
    }
}
