use crate::domain::model::EncodedImage;
use crate::domain::ports::ImageReader;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_DIMENSION: u32 = 4000;

/// 從本機讀取圖片，超過尺寸上限時等比例縮小，再以 base64 編碼
#[derive(Debug, Clone, Copy)]
pub struct LocalImageReader {
    max_width: u32,
    max_height: u32,
}

impl LocalImageReader {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    async fn read_one(&self, path: &Path) -> Result<EncodedImage> {
        let bytes = tokio::fs::read(path).await?;
        let (max_width, max_height) = (self.max_width, self.max_height);
        let display = path.display().to_string();

        let bytes = tokio::task::spawn_blocking(move || shrink_to_fit(bytes, max_width, max_height))
            .await
            .map_err(|e| SyncError::ProcessingError {
                message: format!("image task failed for '{}': {}", display, e),
            })?
            .map_err(|e| SyncError::ProcessingError {
                message: format!("cannot process image '{}': {}", display, e),
            })?;

        Ok(EncodedImage {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            base64: general_purpose::STANDARD.encode(&bytes),
        })
    }
}

impl Default for LocalImageReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION, DEFAULT_MAX_DIMENSION)
    }
}

#[async_trait]
impl ImageReader for LocalImageReader {
    async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<EncodedImage>> {
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                tracing::debug!("🖼️ Skipping missing image {}", path.display());
                continue;
            }
            images.push(self.read_one(path).await?);
        }
        Ok(images)
    }
}

/// Returns the original bytes when the image fits, otherwise a shrunk
/// re-encoding in the same format. Never enlarges.
fn shrink_to_fit(bytes: Vec<u8>, max_width: u32, max_height: u32) -> image::ImageResult<Vec<u8>> {
    let format = image::guess_format(&bytes)?;
    let img = image::load_from_memory_with_format(&bytes, format)?;
    if img.width() <= max_width && img.height() <= max_height {
        return Ok(bytes);
    }

    let resized = img.resize(max_width, max_height, FilterType::Lanczos3);
    // JPEG 不支援 alpha 通道
    let resized = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(resized.to_rgb8())
    } else {
        resized
    };

    let mut out = Cursor::new(Vec::new());
    resized.write_to(&mut out, format)?;
    Ok(out.into_inner())
}
