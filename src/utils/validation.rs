use crate::utils::error::{Result, SyncError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.into(),
        reason: reason.into(),
    }
}

/// 商店位址只接受 http(s)
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// CSV 分隔符只能是 ASCII 標點（引號除外）、空白或 tab
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<u8> {
    let allowed = matches!(delimiter, ' ' | '\t')
        || (delimiter.is_ascii_punctuation() && delimiter != '"');
    if !allowed {
        return Err(invalid(
            field_name,
            delimiter.escape_default().to_string(),
            "Delimiter must be ASCII punctuation other than a quote, a space or a tab",
        ));
    }
    Ok(delimiter as u8)
}
