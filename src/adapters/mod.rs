// Adapters layer: concrete implementations of the domain ports (storage, store API, images, progress).

pub mod images;
pub mod progress;
pub mod shopify;
pub mod storage;

pub use images::LocalImageReader;
pub use progress::NoProgress;
#[cfg(feature = "cli")]
pub use progress::BarProgress;
pub use shopify::ShopifyClient;
pub use storage::LocalStorage;
