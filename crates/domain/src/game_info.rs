//! Session projection returned by `/loadinfo`.
//!
//! `GameInfo` is fetched independently of [`GameData`](crate::GameData) and may
//! lag behind it. The engine embeds the map and monster catalog as JSON
//! strings; the accessors here decode them on demand.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;
use crate::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub game_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current_state: String,
    pub available_choices: Option<Vec<String>>,
    pub choices: Option<Vec<String>>,
    /// Completion percentage as reported by the engine
    #[serde(deserialize_with = "null_as_default")]
    pub progress: f64,
    /// JSON-encoded [`MapData`]
    pub map: Option<String>,
    /// Comma-joined inventory
    pub items: Option<String>,
    pub health: Option<f64>,
    pub sanity: Option<f64>,
    pub money: Option<f64>,
    pub purification: Option<f64>,
    pub current_mood: Option<String>,
    pub current_location: Option<String>,
    pub story_beats: Option<Vec<StoryBeat>>,
    /// JSON-encoded [`MonsterData`]
    pub monster: Option<String>,
    pub master_lore: Option<String>,
    pub player_lore: Option<String>,
}

impl GameInfo {
    /// Inventory entries split out of the comma-joined `items` string.
    pub fn inventory(&self) -> Vec<&str> {
        self.items
            .as_deref()
            .map(|items| {
                items
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn progress_percent(&self) -> u8 {
        if self.progress.is_nan() {
            return 0;
        }
        self.progress.clamp(0.0, 100.0).round() as u8
    }

    pub fn story_beats(&self) -> &[StoryBeat] {
        self.story_beats.as_deref().unwrap_or_default()
    }

    /// Decode the embedded map graph. `Ok(None)` when the engine sent none.
    pub fn map_data(&self) -> Result<Option<MapData>, DomainError> {
        decode_embedded("map", self.map.as_deref())
    }

    /// Decode the embedded monster catalog. `Ok(None)` when the engine sent none.
    pub fn monster_data(&self) -> Result<Option<MonsterData>, DomainError> {
        decode_embedded("monster", self.monster.as_deref())
    }
}

fn decode_embedded<T: serde::de::DeserializeOwned>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(json) => serde_json::from_str(json)
            .map(Some)
            .map_err(|e| DomainError::embedded_json(field, e)),
    }
}

/// One entry of the story log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryBeat {
    #[serde(deserialize_with = "null_as_default")]
    pub speaker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    /// Category tag (narration, dialogue, ...)
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapData {
    pub nodes: Vec<MapNode>,
    pub edges: Vec<MapEdge>,
}

impl MapData {
    pub fn node(&self, id: u32) -> Option<&MapNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Nodes reachable from `id` over a single edge, in either direction.
    pub fn neighbors(&self, id: u32) -> Vec<&MapNode> {
        self.edges
            .iter()
            .filter_map(|edge| {
                if edge.source == id {
                    Some(edge.target)
                } else if edge.target == id {
                    Some(edge.source)
                } else {
                    None
                }
            })
            .filter_map(|other| self.node(other))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapNode {
    pub id: u32,
    pub name: String,
    pub monster: String,
    pub items: String,
    pub lore: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEdge {
    pub source: u32,
    pub target: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterData {
    pub monsters: Vec<MonsterInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterInfo {
    pub name: String,
    /// How to defeat the monster
    #[serde(rename = "퇴치법")]
    pub weakness: String,
    pub lore: String,
}
