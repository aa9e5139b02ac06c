pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;

pub use adapters::{LocalImageReader, LocalStorage, NoProgress, ShopifyClient};
pub use config::{ProductConfig, ShopConfig, StoreConfig};
pub use core::sync::{SyncEngine, SyncReport, TypeStatus};
pub use utils::error::{Result, SyncError};
