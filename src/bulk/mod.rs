//! Bulk player import: pasted text in, one create request per line out.

mod parser;
mod runner;

pub use parser::{parse_line, parse_players, parse_players_with_jersey};
pub use runner::{BulkImporter, DEFAULT_IMPORT_DELAY, ImportProgress, PlayerCreator};

use serde::{Deserialize, Serialize};

use crate::models::{CreatePlayerInput, Position};

/// A player parsed from one line of bulk text, not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportRecord {
    pub name: String,
    pub position: Position,
    pub jersey_number: Option<i32>,
    pub team_id: Option<i64>,
}

impl BulkImportRecord {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            jersey_number: None,
            team_id: None,
        }
    }

    pub fn to_input(&self) -> CreatePlayerInput {
        CreatePlayerInput::new(self.name.clone())
            .with_position(self.position.to_string())
            .with_jersey(self.jersey_number)
            .with_team(self.team_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedImport {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportResult {
    pub success: Vec<String>,
    pub failed: Vec<FailedImport>,
    pub total: usize,
}

impl BulkImportResult {
    pub fn new(total: usize) -> Self {
        Self {
            success: Vec::with_capacity(total),
            failed: Vec::new(),
            total,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty() && self.success.len() == self.total
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} players imported, {} failed",
            self.success.len(),
            self.total,
            self.failed.len()
        )
    }
}
