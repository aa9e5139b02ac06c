use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SHOP_CONFIG: &str = "./shopctl.json";
pub const DEFAULT_TAGS_TEMPLATE: &str = "{{ vendor }}, {{ name }}";

/// 規格或選項欄位設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterConfig {
    /// Column name in the product data file.
    pub key: String,
    /// User-visible label.
    pub label: String,
    /// Unit of measurement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl ParameterConfig {
    /// `label`, or `label [units]` when units are configured.
    pub fn display_label(&self) -> String {
        match &self.units {
            Some(units) if !units.is_empty() => format!("{} [{}]", self.label, units),
            _ => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_indices: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_pattern: Option<String>,
    pub dir: PathBuf,
}

/// 單一產品類型的設定檔內容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfig {
    #[serde(rename = "type")]
    pub product_type: String,
    pub data_path: PathBuf,
    #[serde(default)]
    pub specifications: Vec<ParameterConfig>,
    pub title: String,
    /// Template for the comma separated tag list, `{{ vendor }}, {{ name }}` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option1: Option<ParameterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option2: Option<ParameterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option3: Option<ParameterConfig>,
}

impl ProductConfig {
    /// 載入產品設定檔，並將 `dataPath` 與 `image.dir` 解析為相對於設定檔所在目錄的路徑
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::config(format!(
                "cannot read product config '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config = Self::from_json_str(&content).map_err(|e| {
            SyncError::config(format!("product config '{}': {}", path.display(), e))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SyncError::config(format!("JSON parsing error: {}", e)))
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.data_path = base.join(&self.data_path);
        if let Some(image) = self.image.as_mut() {
            image.dir = base.join(&image.dir);
        }
    }

    pub fn tags_template(&self) -> &str {
        self.tags.as_deref().unwrap_or(DEFAULT_TAGS_TEMPLATE)
    }

    pub fn weight_key(&self) -> &str {
        self.weight_key.as_deref().unwrap_or("weight")
    }

    pub fn sku_key(&self) -> &str {
        self.sku_key.as_deref().unwrap_or("sku")
    }

    pub fn barcode_key(&self) -> &str {
        self.barcode_key.as_deref().unwrap_or("barcode")
    }

    pub fn weight_unit_key(&self) -> &str {
        self.weight_unit_key.as_deref().unwrap_or("weight_unit")
    }

    pub fn price_key(&self) -> &str {
        self.price_key.as_deref().unwrap_or("price")
    }

    /// Configured option axes in order, skipping unset ones.
    pub fn options(&self) -> impl Iterator<Item = &ParameterConfig> {
        [&self.option1, &self.option2, &self.option3]
            .into_iter()
            .flatten()
    }
}

impl Validate for ProductConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("type", &self.product_type)?;
        validation::validate_non_empty_string("title", &self.title)?;
        validation::validate_path("dataPath", &self.data_path.to_string_lossy())?;

        for spec in &self.specifications {
            validation::validate_non_empty_string("specifications.key", &spec.key)?;
        }
        for option in self.options() {
            validation::validate_non_empty_string("option.key", &option.key)?;
        }

        if let Some(image) = &self.image {
            validation::validate_non_empty_string("image.key", &image.key)?;
            if let (Some(indices), Some(pattern)) = (&image.char_indices, &image.filename_pattern) {
                let slots = pattern.matches('#').count();
                if slots != indices.len() {
                    tracing::warn!(
                        "⚠️ {}: image.filenamePattern has {} placeholders but {} charIndices",
                        self.product_type,
                        slots,
                        indices.len()
                    );
                }
            }
        }

        Ok(())
    }
}

/// 商店設定：列出所有產品類型設定檔
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    pub products: Vec<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ','
}

impl ShopConfig {
    /// 載入商店設定檔，產品設定路徑相對於該檔案所在目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::config(format!("cannot read shop config '{}': {}", path.display(), e))
        })?;
        let mut config = Self::from_json_str(&content)
            .map_err(|e| SyncError::config(format!("shop config '{}': {}", path.display(), e)))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.products = config.products.iter().map(|p| base.join(p)).collect();
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SyncError::config(format!("JSON parsing error: {}", e)))
    }

    /// 載入全部產品設定；任何一個失敗都會中止整個執行
    pub fn load_product_configs(&self) -> Result<Vec<ProductConfig>> {
        self.products.iter().map(ProductConfig::from_file).collect()
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        validation::validate_delimiter("delimiter", self.delimiter)
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        for path in &self.products {
            validation::validate_path("products", &path.to_string_lossy())?;
        }
        self.delimiter_byte()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHIRT_CONFIG: &str = r###"{
        "type": "Shirt",
        "dataPath": "data/shirts.csv",
        "title": "{{ name }}",
        "specifications": [
            { "key": "color", "label": "Color" },
            { "key": "length", "label": "Length", "units": "cm" }
        ],
        "image": { "key": "image", "charIndices": [0, 1], "filenamePattern": "##", "dir": "img" },
        "option1": { "key": "size", "label": "Size" },
        "weightKey": "mass"
    }"###;

    #[test]
    fn test_parse_product_config_with_defaults() {
        let config = ProductConfig::from_json_str(SHIRT_CONFIG).unwrap();

        assert_eq!(config.product_type, "Shirt");
        assert_eq!(config.specifications.len(), 2);
        assert_eq!(config.specifications[1].display_label(), "Length [cm]");
        assert_eq!(config.weight_key(), "mass");
        assert_eq!(config.sku_key(), "sku");
        assert_eq!(config.tags_template(), "{{ vendor }}, {{ name }}");
        assert_eq!(config.weight_unit_key(), "weight_unit");
        assert_eq!(config.options().count(), 1);
    }

    #[test]
    fn test_product_config_paths_resolve_relative_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("shirt.json");
        std::fs::write(&config_path, SHIRT_CONFIG).unwrap();

        let config = ProductConfig::from_file(&config_path).unwrap();

        assert_eq!(config.data_path, temp_dir.path().join("data/shirts.csv"));
        assert_eq!(config.image.unwrap().dir, temp_dir.path().join("img"));
    }

    #[test]
    fn test_missing_product_config_is_config_error() {
        let err = ProductConfig::from_file("/nonexistent/shirt.json").unwrap_err();
        assert!(matches!(err, SyncError::ConfigError { .. }));
    }

    #[test]
    fn test_malformed_shop_config_is_config_error() {
        let err = ShopConfig::from_json_str("{ \"products\": ").unwrap_err();
        assert!(matches!(err, SyncError::ConfigError { .. }));
    }

    #[test]
    fn test_shop_config_resolves_products_and_defaults_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        let shop_path = temp_dir.path().join("shopctl.json");
        std::fs::write(&shop_path, r#"{ "products": ["shirt.json"] }"#).unwrap();

        let shop = ShopConfig::from_file(&shop_path).unwrap();

        assert_eq!(shop.products, vec![temp_dir.path().join("shirt.json")]);
        assert_eq!(shop.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let mut config = ProductConfig::from_json_str(SHIRT_CONFIG).unwrap();
        config.title = " ".to_string();
        assert!(config.validate().is_err());
    }
}
