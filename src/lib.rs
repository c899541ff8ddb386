pub mod api;
pub mod bulk;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod session;

pub use api::ApiClient;
pub use bulk::{BulkImportRecord, BulkImportResult, BulkImporter, parse_players};
pub use config::Config;
pub use error::{ClientError, ClientResult};
