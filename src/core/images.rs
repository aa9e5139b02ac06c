use crate::config::ImageConfig;
use crate::core::mask::{mask, DEFAULT_PLACEHOLDER};
use crate::domain::model::Row;
use crate::utils::error::Result;
use std::path::PathBuf;

const IMAGE_EXTENSION: &str = ".jpg";

/// 推導產品圖片的候選檔案路徑
///
/// The configured column may hold several names separated by `|`. Paths are
/// candidates only; the image reader drops those that do not exist.
pub fn resolve(row: &Row, config: Option<&ImageConfig>) -> Result<Vec<PathBuf>> {
    let Some(config) = config else {
        return Ok(Vec::new());
    };
    let value = match row.get(&config.key) {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(Vec::new()),
    };

    let mut paths = Vec::new();
    for token in value.split('|').map(str::trim).filter(|t| !t.is_empty()) {
        let mut filename = match (&config.char_indices, &config.filename_pattern) {
            (Some(indices), Some(pattern)) => mask(token, indices, pattern, DEFAULT_PLACEHOLDER)?,
            _ => token.to_string(),
        };
        if !filename.ends_with(IMAGE_EXTENSION) {
            filename.push_str(IMAGE_EXTENSION);
        }
        paths.push(config.dir.join(filename));
    }

    tracing::debug!("🖼️ Resolved {} image candidates from '{}'", paths.len(), value);
    Ok(paths)
}
