use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{self, Validate};
use std::collections::HashMap;
use std::path::Path;

pub const ENV_SHOP_NAME: &str = "SHOPIFY_SHOP_NAME";
pub const ENV_API_KEY: &str = "SHOPIFY_API_KEY";
pub const ENV_PASSWORD: &str = "SHOPIFY_PASSWORD";
pub const ENV_API_VERSION: &str = "SHOPIFY_API_VERSION";
pub const ENV_STORE_URL: &str = "SHOPIFY_STORE_URL";

pub const DEFAULT_API_VERSION: &str = "2019-07";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// 商店連線資訊
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: String,
    pub password: String,
    pub api_version: String,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            password: password.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// 從環境變數讀取連線資訊
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 讀取連線資訊；`env_file` 存在時先載入其中的變數，已設定的環境變數優先
    pub fn load(env_file: impl AsRef<Path>) -> Result<Self> {
        let env_file = env_file.as_ref();
        if env_file.is_file() {
            tracing::debug!("🔑 Loading credentials from {}", env_file.display());
            Self::from_env_file(env_file)
        } else {
            Self::from_env()
        }
    }

    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_env_file_with(path.as_ref(), |name| std::env::var(name).ok())
    }

    fn from_env_file_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file = read_env_file(path)?;
        Self::from_lookup(|name| env(name).or_else(|| file.get(name).cloned()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| SyncError::config(format!("{} is not defined", name)))
        };

        let api_key = required(ENV_API_KEY)?;
        let password = required(ENV_PASSWORD)?;
        let base_url = match lookup(ENV_STORE_URL).filter(|v| !v.is_empty()) {
            Some(url) => url,
            None => format!("https://{}.myshopify.com", required(ENV_SHOP_NAME)?),
        };

        let mut config = Self::new(base_url, api_key, password);
        if let Some(version) = lookup(ENV_API_VERSION).filter(|v| !v.is_empty()) {
            config.api_version = version;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn endpoint(&self, resource: &str) -> String {
        format!("{}/admin/api/{}/{}", self.base_url, self.api_version, resource)
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let env_error =
        |e: dotenvy::Error| SyncError::config(format!("env file '{}': {}", path.display(), e));
    dotenvy::from_path_iter(path)
        .map_err(env_error)?
        .map(|item| item.map_err(env_error))
        .collect()
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("store_url", &self.base_url)?;
        validation::validate_non_empty_string("api_version", &self.api_version)?;
        Ok(())
    }
}
