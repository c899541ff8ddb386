use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;
use crate::error::{ClientError, ClientResult};

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Position {
        Batsman => "Batsman",
        Bowler => "Bowler",
        BattingAllRounder => "Batting All Rounder",
        BowlingAllRounder => "Bowling All Rounder",
        AllRounder => "All Rounder",
        WicketKeeper => "Wicket Keeper",
        #[default]
        Player => "Player",
    }
}

pub const DEFAULT_POSITION: &str = "Player";

fn default_position() -> String {
    DEFAULT_POSITION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub player_name: String,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default)]
    pub jersey_number: Option<i32>,
    /// `None` means the player is global (not on any team).
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Player {
    pub fn is_global(&self) -> bool {
        self.team_id.is_none()
    }

    pub fn jersey_label(&self) -> String {
        self.jersey_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlayerInput {
    pub player_name: String,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default)]
    pub jersey_number: Option<i32>,
    #[serde(default)]
    pub team_id: Option<i64>,
}

impl CreatePlayerInput {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            position: default_position(),
            jersey_number: None,
            team_id: None,
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        let position = position.into();
        if !position.trim().is_empty() {
            self.position = position;
        }
        self
    }

    pub fn with_jersey(mut self, jersey_number: Option<i32>) -> Self {
        self.jersey_number = jersey_number;
        self
    }

    pub fn with_team(mut self, team_id: Option<i64>) -> Self {
        self.team_id = team_id;
        self
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.player_name.trim().is_empty() {
            return Err(ClientError::validation("Player name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlayerInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<i32>,
}

impl UpdatePlayerInput {
    pub fn is_empty(&self) -> bool {
        self.player_name.is_none() && self.position.is_none() && self.jersey_number.is_none()
    }

    pub fn validate(&self) -> ClientResult<()> {
        if let Some(name) = &self.player_name {
            if name.trim().is_empty() {
                return Err(ClientError::validation("Player name is required"));
            }
        }
        if self.is_empty() {
            return Err(ClientError::validation("Nothing to update"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssignPlayerInput {
    pub team_id: i64,
}

/// Search and pagination parameters for the player list.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerQuery {
    pub search: Option<String>,
    pub team_id: Option<i64>,
    pub page: u32,
    pub limit: u32,
}

impl Default for PlayerQuery {
    fn default() -> Self {
        Self {
            search: None,
            team_id: None,
            page: 1,
            limit: 20,
        }
    }
}

impl PlayerQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", self.limit.max(1).to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(team_id) = self.team_id {
            pairs.push(("team_id", team_id.to_string()));
        }
        pairs
    }
}
