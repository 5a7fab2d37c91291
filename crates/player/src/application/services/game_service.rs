//! Game Service - adapter from domain verbs to engine endpoints
//!
//! Each operation is a fixed endpoint plus response normalization:
//! - `/loadgame` answering with no payload is a successful redirect
//! - `/loadinfo` answering with no payload means there is no saved game
//! - a 401 from any endpoint becomes [`ServiceError::Unauthorized`]

use udh_domain::{GameData, GameInfo, LoadOutcome, SelectChoiceRequest};

use crate::application::api::Api;
use crate::application::{GameOperation, ServiceError};
use crate::infrastructure::config::endpoints;

#[derive(Clone)]
pub struct GameService {
    api: Api,
}

impl GameService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn start_new_game(&self, token: &str) -> Result<GameData, ServiceError> {
        let data = self
            .api
            .get::<GameData>(endpoints::NEW_GAME, Some(token))
            .await?;
        require_payload(GameOperation::NewGame, data)
    }

    pub async fn load_game(&self, token: &str) -> Result<LoadOutcome, ServiceError> {
        let data = self
            .api
            .get::<GameData>(endpoints::LOAD_GAME, Some(token))
            .await?;

        Ok(match data {
            Some(data) => {
                tracing::debug!(game_id = %data.id, "Loaded game");
                LoadOutcome::Populated(data)
            }
            None => {
                tracing::debug!("Load returned no payload; engine redirected");
                LoadOutcome::EmptyRedirect
            }
        })
    }

    pub async fn load_game_info(&self, token: &str) -> Result<GameInfo, ServiceError> {
        self.api
            .get::<GameInfo>(endpoints::LOAD_INFO, Some(token))
            .await?
            .ok_or(ServiceError::NoSavedData)
    }

    pub async fn select_choice(
        &self,
        request: SelectChoiceRequest,
        token: &str,
    ) -> Result<GameData, ServiceError> {
        let data = self
            .api
            .post::<GameData, _>(endpoints::SELECT_CHOICE, &request, Some(token))
            .await?;
        require_payload(GameOperation::SelectChoice, data)
    }
}

fn require_payload(
    operation: GameOperation,
    data: Option<GameData>,
) -> Result<GameData, ServiceError> {
    data.ok_or_else(|| {
        tracing::warn!(%operation, "Engine returned success without game data");
        ServiceError::EmptyPayload(operation)
    })
}
