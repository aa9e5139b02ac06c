#[cfg(feature = "cli")]
pub mod cli;
pub mod shop_config;
pub mod store;

#[cfg(feature = "cli")]
pub use cli::Cli;
pub use shop_config::{ImageConfig, ParameterConfig, ProductConfig, ShopConfig};
pub use store::StoreConfig;
