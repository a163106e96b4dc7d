pub mod accounts;
pub mod api;
pub mod buckets;
pub mod buddies;
pub mod chart;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod funds;
pub mod goals;
pub mod jar;
pub mod models;
pub mod requests;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export types at crate root for convenient importing
pub use crate::api::ApiClient;
pub use crate::config::Config;
pub use crate::error::{ApiError, ApiResult, StorageError, ValidationError};
pub use crate::requests::{RequestTicket, RequestTracker};
pub use crate::state::{AppStore, StoreEvent};
pub use crate::storage::{KeyValueStore, MemoryStorage};
