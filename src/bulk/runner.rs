use std::future::Future;
use std::time::Duration;

use super::{BulkImportRecord, BulkImportResult, FailedImport};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreatePlayerInput, Player};

/// Pause after each successful create, so a large paste does not burst the API.
pub const DEFAULT_IMPORT_DELAY: Duration = Duration::from_millis(100);

/// Anything that can create a player. [`ApiClient`] is the real one.
pub trait PlayerCreator {
    fn create_player(
        &self,
        input: &CreatePlayerInput,
    ) -> impl Future<Output = ClientResult<Player>>;
}

impl PlayerCreator for ApiClient {
    async fn create_player(&self, input: &CreatePlayerInput) -> ClientResult<Player> {
        ApiClient::create_player(self, input).await
    }
}

/// Reported before each submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress<'a> {
    /// 1-based position of the record being submitted.
    pub current: usize,
    pub total: usize,
    pub player: &'a str,
}

/// Submits records one at a time, in order. A failed record is recorded and
/// skipped; players created earlier stay created.
pub struct BulkImporter<'a, C> {
    creator: &'a C,
    delay: Duration,
}

impl<'a, C: PlayerCreator> BulkImporter<'a, C> {
    pub fn new(creator: &'a C) -> Self {
        Self {
            creator,
            delay: DEFAULT_IMPORT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requires a tokio runtime with the time driver enabled for the pause.
    pub async fn run(&self, records: &[BulkImportRecord]) -> BulkImportResult {
        self.run_with_progress(records, |_| {}).await
    }

    pub async fn run_with_progress<F>(
        &self,
        records: &[BulkImportRecord],
        mut on_progress: F,
    ) -> BulkImportResult
    where
        F: FnMut(ImportProgress<'_>),
    {
        let total = records.len();
        let mut result = BulkImportResult::new(total);
        log::info!("Bulk import of {} players started", total);

        for (index, record) in records.iter().enumerate() {
            on_progress(ImportProgress {
                current: index + 1,
                total,
                player: &record.name,
            });

            match self.creator.create_player(&record.to_input()).await {
                Ok(player) => {
                    log::debug!("Created player {} (id {})", player.player_name, player.id);
                    result.success.push(record.name.clone());
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                Err(e) => {
                    let error = e.user_message();
                    log::warn!("Failed to import {}: {}", record.name, error);
                    result.failed.push(FailedImport {
                        name: record.name.clone(),
                        error,
                    });
                }
            }
        }

        log::info!("Bulk import finished: {}", result.summary());
        result
    }
}
