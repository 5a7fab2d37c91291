//! The active narrative turn and the requests that advance it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;

/// A playable session as returned by `/newgame`, `/loadgame` and `/selectchoice`.
///
/// Each successful mutating call replaces the previous value wholesale; the
/// client never patches individual fields. Every field is optional on the
/// wire, so partially populated engine responses still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Narrative text for the current turn
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    /// Choice labels, in the order the engine expects them to be indexed
    #[serde(deserialize_with = "null_as_default")]
    pub choices: Vec<String>,
    /// Opaque engine state tag
    #[serde(deserialize_with = "null_as_default")]
    pub current_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

impl GameData {
    /// Label of the choice at `index`, if the engine offered one.
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    /// `updated_at` parsed as RFC 3339. `None` when absent or malformed.
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }

    /// `created_at` parsed as RFC 3339. `None` when absent or malformed.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Body of `POST /selectchoice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectChoiceRequest {
    /// Zero-based index into [`GameData::choices`]
    pub select: usize,
}

impl SelectChoiceRequest {
    pub fn new(select: usize) -> Self {
        Self { select }
    }
}

/// Result of `/loadgame`.
///
/// The engine answers with an empty body when it has redirected instead of
/// returning a session. That is a successful outcome, distinct from a
/// populated response, and must not clear a session already held locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Populated(GameData),
    EmptyRedirect,
}

impl LoadOutcome {
    pub fn game_data(&self) -> Option<&GameData> {
        match self {
            Self::Populated(data) => Some(data),
            Self::EmptyRedirect => None,
        }
    }

    pub fn into_game_data(self) -> Option<GameData> {
        match self {
            Self::Populated(data) => Some(data),
            Self::EmptyRedirect => None,
        }
    }
}
