mod macros;

pub mod auth;
pub mod page;
pub mod player;
pub mod response;
pub mod team;

// Re-export all models for easy importing
pub use auth::*;
pub use page::*;
pub use player::*;
pub use response::*;
pub use team::*;
