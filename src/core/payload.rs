use crate::config::{ParameterConfig, ProductConfig};
use crate::core::template::TemplateRenderer;
use crate::domain::model::{
    EncodedImage, Metafield, NewProduct, NewProductVariant, ProductImage, ProductOption, Row,
};
use crate::utils::error::{Result, SyncError};

pub const DEFAULT_WEIGHT_UNIT: &str = "kg";
pub const INVENTORY_MANAGEMENT: &str = "shopify";
pub const SPECIFICATIONS_NAMESPACE: &str = "specifications";
const METAFIELD_VALUE_TYPE: &str = "string";

/// 逐步累積產品欄位，最後產生完整的 [`NewProduct`]
#[derive(Debug, Clone, Default)]
pub struct ProductBuilder {
    title: String,
    product_type: String,
    vendor: String,
    tags: Option<String>,
    body_html: String,
    options: Vec<ProductOption>,
    variants: Vec<NewProductVariant>,
    images: Vec<ProductImage>,
}

impl ProductBuilder {
    pub fn new(title: impl Into<String>, product_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            product_type: product_type.into(),
            ..Self::default()
        }
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn tags(mut self, tags: Option<String>) -> Self {
        self.tags = tags.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn body_html(mut self, body_html: impl Into<String>) -> Self {
        self.body_html = body_html.into();
        self
    }

    pub fn option(mut self, name: impl Into<String>) -> Self {
        self.options.push(ProductOption { name: name.into() });
        self
    }

    pub fn variant(mut self, variant: NewProductVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn image(mut self, image: EncodedImage) -> Self {
        self.images.push(ProductImage {
            attachment: image.base64,
            filename: image.filename,
        });
        self
    }

    pub fn build(self) -> NewProduct {
        NewProduct {
            title: self.title,
            body_html: self.body_html,
            vendor: self.vendor,
            product_type: self.product_type,
            tags: self.tags,
            options: self.options,
            variants: self.variants,
            images: self.images,
        }
    }
}

/// Builds the store payload for one group of variant rows.
///
/// The first row is the representative for product-level fields. `images`
/// are the already-read files resolved from that row.
pub fn build_product(
    group: &[&Row],
    config: &ProductConfig,
    renderer: &TemplateRenderer,
    images: Vec<EncodedImage>,
) -> Result<NewProduct> {
    let representative = group.first().ok_or_else(|| SyncError::ProcessingError {
        message: format!("empty product group for type '{}'", config.product_type),
    })?;

    let title = renderer.render(&config.title, representative);
    let tags = renderer.render(config.tags_template(), representative);

    let mut builder = ProductBuilder::new(title, &config.product_type)
        .vendor(&representative.vendor)
        .tags(Some(tags))
        .body_html(specification_tables(group, config));

    for option in config.options() {
        builder = builder.option(option.display_label());
    }
    for row in group {
        builder = builder.variant(build_variant(row, config)?);
    }
    for image in images {
        builder = builder.image(image);
    }

    Ok(builder.build())
}

fn build_variant(row: &Row, config: &ProductConfig) -> Result<NewProductVariant> {
    let weight_key = config.weight_key();
    let raw_weight = row.get(weight_key).unwrap_or("");
    let weight = raw_weight
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| SyncError::NumericParseError {
            field: weight_key.to_string(),
            value: raw_weight.to_string(),
        })?;

    // 欄位不存在或為空白時使用預設單位
    let weight_unit = row
        .get(config.weight_unit_key())
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_WEIGHT_UNIT);

    let option_value = |option: &Option<ParameterConfig>| {
        option
            .as_ref()
            .map(|o| row.get(&o.key).unwrap_or_default().to_string())
    };

    Ok(NewProductVariant {
        sku: row.get(config.sku_key()).map(str::to_string),
        barcode: row.get(config.barcode_key()).map(str::to_string),
        price: row.get(config.price_key()).map(str::to_string),
        inventory_management: INVENTORY_MANAGEMENT.to_string(),
        weight,
        weight_unit: weight_unit.to_string(),
        metafields: metafields(row, config),
        option1: option_value(&config.option1),
        option2: option_value(&config.option2),
        option3: option_value(&config.option3),
    })
}

fn metafields(row: &Row, config: &ProductConfig) -> Vec<Metafield> {
    config
        .specifications
        .iter()
        .map(|spec| Metafield {
            key: spec.display_label(),
            value: row.get(&spec.key).unwrap_or_default().to_string(),
            value_type: METAFIELD_VALUE_TYPE.to_string(),
            namespace: SPECIFICATIONS_NAMESPACE.to_string(),
        })
        .collect()
}

fn specification_table(row: &Row, config: &ProductConfig) -> String {
    let rows: String = config
        .specifications
        .iter()
        .map(|spec| {
            format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                spec.display_label(),
                row.get(&spec.key).unwrap_or_default()
            )
        })
        .collect();
    format!("<table>{}</table>", rows)
}

/// 多個變體時，每個規格表包在 `<template id="specification-…-template">` 中
fn specification_tables(group: &[&Row], config: &ProductConfig) -> String {
    if group.len() == 1 {
        return specification_table(group[0], config);
    }

    group
        .iter()
        .map(|row| {
            let options: Vec<&str> = config
                .options()
                .map(|o| row.get(&o.key).unwrap_or_default())
                .collect();
            format!(
                "<template id=\"specification-{}-template\">{}</template>",
                options.join("-"),
                specification_table(row, config)
            )
        })
        .collect()
}
