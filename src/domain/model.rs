use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PRODUCT_ID_COLUMN: &str = "product_id";
pub const VARIANT_ID_COLUMN: &str = "variant_id";
pub const VENDOR_COLUMN: &str = "vendor";

/// 一筆 CSV 記錄，代表一個產品變體
///
/// Store identifiers and vendor are reserved fields; every other column lives
/// in `fields`, keyed by its header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub product_id: Option<u64>,
    pub variant_id: Option<u64>,
    pub vendor: String,
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a column value, reserved columns included.
    /// Unassigned identifiers read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            VENDOR_COLUMN => Some(self.vendor.as_str()),
            PRODUCT_ID_COLUMN | VARIANT_ID_COLUMN => None,
            _ => self.fields.get(key).map(String::as_str),
        }
    }

    /// Like [`Row::get`] but renders identifiers too; used for serialization
    /// and templating.
    pub fn value(&self, key: &str) -> Option<String> {
        match key {
            PRODUCT_ID_COLUMN => self.product_id.map(|id| id.to_string()),
            VARIANT_ID_COLUMN => self.variant_id.map(|id| id.to_string()),
            _ => self.get(key).map(str::to_string),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if key == VENDOR_COLUMN {
            self.vendor = value;
        } else {
            self.fields.insert(key, value);
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_synced(&self) -> bool {
        self.product_id.is_some()
    }
}

/// 產品選項名稱（例如 "Size [cm]"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metafield {
    pub key: String,
    pub value: String,
    pub value_type: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub inventory_management: String,
    pub weight: f64,
    pub weight_unit: String,
    pub metafields: Vec<Metafield>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option3: Option<String>,
}

impl NewProductVariant {
    /// 以三個選項值串接成的鍵，用於重複變體檢查
    pub fn option_key(&self) -> String {
        [&self.option1, &self.option2, &self.option3]
            .into_iter()
            .map(|o| o.as_deref().unwrap_or(""))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub attachment: String,
    pub filename: String,
}

/// The payload submitted to the store for one product group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub body_html: String,
    pub vendor: String,
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub options: Vec<ProductOption>,
    pub variants: Vec<NewProductVariant>,
    pub images: Vec<ProductImage>,
}

/// 商店建立產品後回傳的識別碼
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub id: u64,
    #[serde(default)]
    pub variants: Vec<CreatedVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedVariant {
    pub id: u64,
}

/// A product as listed by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProduct {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<StoreProduct>,
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub filename: String,
    pub base64: String,
}
