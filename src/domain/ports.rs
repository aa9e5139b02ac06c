use crate::domain::model::{CreatedProduct, EncodedImage, NewProduct, ProductPage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 遠端商店目錄
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn create(&self, product: &NewProduct) -> Result<CreatedProduct>;
    /// Fetches one page; `None` requests the first page.
    async fn list(&self, page: Option<&str>) -> Result<ProductPage>;
    async fn count(&self) -> Result<u64>;
}

/// Reads and encodes images, silently omitting files that do not exist.
#[async_trait]
pub trait ImageReader: Send + Sync {
    async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<EncodedImage>>;
}

pub trait Progress: Send + Sync {
    fn start(&self, label: &str, total: usize);
    fn advance(&self);
    fn finish(&self);
}
