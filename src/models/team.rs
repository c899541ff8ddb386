use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub team_name: String,
    #[serde(default)]
    pub team_logo: Option<String>,
    #[serde(default)]
    pub team_color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub player_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTeamInput {
    pub team_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateTeamInput {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            team_logo: None,
            team_color: None,
            description: None,
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.team_name.trim().is_empty() {
            return Err(ClientError::validation("Team name is required"));
        }
        if let Some(color) = &self.team_color {
            validate_color(color)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTeamInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateTeamInput {
    pub fn validate(&self) -> ClientResult<()> {
        if let Some(name) = &self.team_name {
            if name.trim().is_empty() {
                return Err(ClientError::validation("Team name is required"));
            }
        }
        if let Some(color) = &self.team_color {
            validate_color(color)?;
        }
        if self.team_name.is_none()
            && self.team_logo.is_none()
            && self.team_color.is_none()
            && self.description.is_none()
        {
            return Err(ClientError::validation("Nothing to update"));
        }
        Ok(())
    }
}

/// Colours are `#rgb` or `#rrggbb` hex strings.
fn validate_color(color: &str) -> ClientResult<()> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ClientError::validation(format!("Invalid team color: {}", color)))
    }
}

/// Parse a `#rrggbb` / `#rgb` colour into 0.0..=1.0 RGB components.
pub fn parse_hex_color(color: &str) -> Option<(f32, f32, f32)> {
    let hex = color.trim().strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some((channel(0)?, channel(2)?, channel(4)?))
}
