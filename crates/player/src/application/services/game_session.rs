//! Game session coordinator
//!
//! Owns the observable [`GameState`] and drives every user action through
//! the [`GameService`]:
//! - each action asks the [`TokenPort`] for a token first and fails locally
//!   without one
//! - primary results set `status`, `error` and a notification
//! - secondary projection refreshes are best-effort and only logged
//! - a 401 anywhere hands control to the [`SessionTeardown`]
//!
//! There is no internal locking. Overlapping actions race on the state with
//! last-write-wins semantics; the `Loading` status is what callers use to
//! avoid triggering them.

use std::sync::Arc;

use tokio::sync::watch;
use udh_domain::{GameData, GameInfo, LoadOutcome, Notification, SelectChoiceRequest};

use crate::application::api::Api;
use crate::application::services::info_recovery::{
    InfoRecovery, RecoveryReport, RecoveryResult, RetryBudget,
};
use crate::application::services::{GameService, SessionTeardown};
use crate::application::{GameOperation, ServiceError};
use crate::infrastructure::{ApiConfig, CoordinatorConfig, HttpClient};
use crate::messages;
use crate::ports::outbound::{RawApiPort, SignOutPort, TokenPort};
use crate::state::{ActionStatus, GameState, GameStateStore};

pub struct GameSession {
    service: GameService,
    state: GameStateStore,
    tokens: Arc<dyn TokenPort>,
    config: CoordinatorConfig,
}

impl GameSession {
    /// Build a session over the real HTTP transport.
    ///
    /// The client is owned by this session and carries this session's
    /// teardown as its 401 handler.
    pub fn connect(
        api: &ApiConfig,
        config: CoordinatorConfig,
        tokens: Arc<dyn TokenPort>,
        sign_out: Arc<dyn SignOutPort>,
    ) -> Self {
        let teardown = SessionTeardown::new(GameStateStore::new(), sign_out, config.sign_out_delay);
        let client = HttpClient::new(api).with_unauthorized_handler(teardown.handler());
        tracing::info!(base_url = %client.base_url(), "Game session connected");
        Self::with_api(Arc::new(client), &teardown, config, tokens)
    }

    /// Build a session over any transport.
    ///
    /// The transport is expected to call `teardown` on a 401; the session
    /// publishes into the teardown's state store.
    pub fn with_api(
        raw: Arc<dyn RawApiPort>,
        teardown: &SessionTeardown,
        config: CoordinatorConfig,
        tokens: Arc<dyn TokenPort>,
    ) -> Self {
        Self {
            service: GameService::new(Api::new(raw)),
            state: teardown.state().clone(),
            tokens,
            config,
        }
    }

    pub fn state(&self) -> GameState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.subscribe()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.access_token().await.is_some()
    }

    pub async fn start_new_game(&self) -> Result<GameData, ServiceError> {
        let operation = GameOperation::NewGame;
        let token = self.require_token(operation).await?;
        let _loading = LoadingGuard::enter(&self.state);

        let data = self
            .service
            .start_new_game(&token)
            .await
            .map_err(|e| self.fail(operation, e))?;
        tracing::info!(game_id = %data.id, "New game started");

        self.state.update(|s| s.game_data = Some(data.clone()));
        let alive = self.refresh_info().await;
        self.succeed(operation, alive);
        Ok(data)
    }

    /// Load the saved game, then its projection.
    ///
    /// When the projection is missing a new game is started automatically;
    /// the returned outcome is then `Populated` with that new game, which is
    /// also what the state holds.
    pub async fn load_game(&self) -> Result<LoadOutcome, ServiceError> {
        let operation = GameOperation::LoadGame;
        let token = self.require_token(operation).await?;
        let _loading = LoadingGuard::enter(&self.state);

        let outcome = self
            .service
            .load_game(&token)
            .await
            .map_err(|e| self.fail(operation, e))?;

        // An empty redirect leaves whatever game we already had.
        if let LoadOutcome::Populated(data) = &outcome {
            self.state.update(|s| s.game_data = Some(data.clone()));
        }

        let report = InfoRecovery::new(
            &self.service,
            self.tokens.as_ref(),
            RetryBudget::new(self.config.max_info_retries),
        )
        .run()
        .await;

        Ok(match self.apply_recovery(operation, report) {
            Some(started) => LoadOutcome::Populated(started),
            None => outcome,
        })
    }

    /// Foreground projection fetch: toggles loading and reports failures.
    pub async fn load_game_info(&self) -> Result<GameInfo, ServiceError> {
        let operation = GameOperation::LoadGameInfo;
        let token = self.require_token(operation).await?;
        let _loading = LoadingGuard::enter(&self.state);

        let info = self
            .service
            .load_game_info(&token)
            .await
            .map_err(|e| self.fail(operation, e))?;

        self.state.update(|s| s.game_info = Some(info.clone()));
        self.succeed(operation, true);
        Ok(info)
    }

    /// Background projection fetch: no loading toggle, failures are logged only.
    pub async fn auto_load_game_info(&self) {
        self.refresh_info().await;
    }

    /// `index` is zero-based.
    pub async fn select_choice(&self, index: usize) -> Result<GameData, ServiceError> {
        let operation = GameOperation::SelectChoice;
        let token = self.require_token(operation).await?;
        if !self.state.snapshot().has_game() {
            return Err(self.fail(operation, ServiceError::NoActiveGame));
        }
        let _loading = LoadingGuard::enter(&self.state);

        let data = self
            .service
            .select_choice(SelectChoiceRequest::new(index), &token)
            .await
            .map_err(|e| self.fail(operation, e))?;
        tracing::info!(game_id = %data.id, choice = index, "Choice applied");

        self.state.update(|s| s.game_data = Some(data.clone()));
        let alive = self.refresh_info().await;
        self.succeed(operation, alive);
        Ok(data)
    }

    /// Local only; no request is made.
    pub fn reset_game(&self) {
        tracing::info!("Game state reset");
        self.state.update(GameState::clear_session);
    }

    pub fn close_notification(&self) {
        self.state.update(|s| s.notification = None);
    }

    pub fn set_notification(&self, notification: Notification) {
        self.state.update(|s| s.notification = Some(notification));
    }

    async fn require_token(&self, operation: GameOperation) -> Result<String, ServiceError> {
        match self.tokens.access_token().await {
            Some(token) => Ok(token),
            None => Err(self.fail(operation, ServiceError::LocalAuthMissing)),
        }
    }

    /// Best-effort projection refresh. Returns `false` if the session was
    /// torn down by a 401 during the fetch.
    async fn refresh_info(&self) -> bool {
        let Some(token) = self.tokens.access_token().await else {
            tracing::debug!("Skipping game info refresh, no token");
            return true;
        };

        match self.service.load_game_info(&token).await {
            Ok(info) => {
                self.state.update(|s| s.game_info = Some(info));
                true
            }
            Err(e) if e.is_unauthorized() => false,
            Err(e) => {
                tracing::warn!(error = %e, "Game info refresh failed");
                true
            }
        }
    }

    /// Publish the recovery result. Returns the automatically started game,
    /// if one was started and kept.
    fn apply_recovery(&self, operation: GameOperation, report: RecoveryReport) -> Option<GameData> {
        let recovered = report.recovered();
        let RecoveryReport {
            started_game,
            result,
        } = report;

        match &result {
            RecoveryResult::Failed(e) if e.is_unauthorized() => {
                self.succeed(operation, false);
                return None;
            }
            RecoveryResult::Failed(e) => {
                tracing::warn!(error = %e, "Game info after load failed");
            }
            RecoveryResult::Loaded(_) | RecoveryResult::Exhausted => {}
        }

        let kept = started_game.clone();
        self.state.update(|s| {
            if let Some(data) = started_game {
                s.game_data = Some(data);
            }
            s.status = ActionStatus::Succeeded;
            match result {
                RecoveryResult::Loaded(info) => {
                    s.game_info = Some(info);
                    s.error = None;
                    s.notification = Some(if recovered {
                        Notification::info(messages::NO_SAVED_DATA)
                    } else {
                        Notification::success(operation.success_message())
                    });
                }
                RecoveryResult::Exhausted => {
                    s.error = Some(messages::NO_SAVED_DATA_AFTER_RECOVERY.to_string());
                    s.notification =
                        Some(Notification::warning(messages::NO_SAVED_DATA_AFTER_RECOVERY));
                }
                RecoveryResult::Failed(_) => {
                    s.error = None;
                    s.notification = Some(Notification::success(operation.success_message()));
                }
            }
        });
        kept
    }

    /// `notify` is false once teardown owns the notification.
    fn succeed(&self, operation: GameOperation, notify: bool) {
        self.state.update(|s| {
            s.status = ActionStatus::Succeeded;
            s.error = None;
            if notify {
                s.notification = Some(Notification::success(operation.success_message()));
            }
        });
    }

    fn fail(&self, operation: GameOperation, error: ServiceError) -> ServiceError {
        tracing::warn!(%operation, error = %error, "Game action failed");
        let message = error.to_string();
        let notify = !error.is_unauthorized();
        self.state.update(|s| {
            s.status = ActionStatus::Failed;
            if notify {
                s.notification = Some(Notification::error(message.clone()));
            }
            s.error = Some(message);
        });
        error
    }
}

/// Marks the state as loading; a dropped action future falls back to idle.
struct LoadingGuard<'a> {
    state: &'a GameStateStore,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a GameStateStore) -> Self {
        state.update(|s| {
            s.status = ActionStatus::Loading;
            s.error = None;
        });
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.update(|s| {
            if s.status == ActionStatus::Loading {
                s.status = ActionStatus::Idle;
            }
        });
    }
}
