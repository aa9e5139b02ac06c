use crate::config::{ProductConfig, ShopConfig};
use crate::core::csv_codec::{self, CsvDocument};
use crate::core::grouping::group_by_key;
use crate::core::template::TemplateRenderer;
use crate::core::{duplicates, images, payload};
use crate::domain::model::{CreatedProduct, NewProduct, Row, PRODUCT_ID_COLUMN, VARIANT_ID_COLUMN};
use crate::domain::ports::{CatalogClient, ImageReader, Progress, Storage};
use crate::utils::error::{ErrorScope, Result, SyncError};

/// 單一產品類型的同步結果
#[derive(Debug, Clone, PartialEq)]
pub enum TypeStatus {
    Synced { groups: usize, rows: usize },
    /// Every row already carries a store identifier.
    Skipped,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeOutcome {
    pub product_type: String,
    pub status: TypeStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub outcomes: Vec<TypeOutcome>,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.status, TypeStatus::Failed { .. }))
    }

    pub fn submitted_groups(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                TypeStatus::Synced { groups, .. } => groups,
                _ => 0,
            })
            .sum()
    }
}

/// Pushes new rows of every configured product type to the store and writes
/// the assigned identifiers back to the data files.
pub struct SyncEngine<C: CatalogClient, I: ImageReader, S: Storage, P: Progress> {
    client: C,
    images: I,
    storage: S,
    progress: P,
    renderer: TemplateRenderer,
}

impl<C: CatalogClient, I: ImageReader, S: Storage, P: Progress> SyncEngine<C, I, S, P> {
    pub fn new(client: C, images: I, storage: S, progress: P) -> Self {
        Self {
            client,
            images,
            storage,
            progress,
            renderer: TemplateRenderer::verbatim(),
        }
    }

    pub async fn run(&self, shop: &ShopConfig) -> Result<SyncReport> {
        tracing::info!("🚀 Starting product synchronization");

        // 先載入全部設定，設定錯誤不會留下部分同步的狀態
        let delimiter = shop.delimiter_byte()?;
        let configs = shop.load_product_configs()?;
        tracing::info!("📁 Loaded {} product configurations", configs.len());

        self.run_configs(&configs, delimiter).await
    }

    pub async fn run_configs(&self, configs: &[ProductConfig], delimiter: u8) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        for config in configs {
            let status = match self.sync_product_type(config, delimiter).await {
                Ok(status) => status,
                Err(e) if e.scope() == ErrorScope::Run => return Err(e),
                Err(e) => {
                    tracing::error!("❌ {}: synchronization failed: {}", config.product_type, e);
                    TypeStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            report.outcomes.push(TypeOutcome {
                product_type: config.product_type.clone(),
                status,
            });
        }

        Ok(report)
    }

    /// 同步單一產品類型：讀取、篩選、分組、逐群組上傳，全部成功後才寫回檔案
    pub async fn sync_product_type(&self, config: &ProductConfig, delimiter: u8) -> Result<TypeStatus> {
        let name = &config.product_type;

        tracing::debug!("📂 {}: reading {}", name, config.data_path.display());
        let bytes = self.storage.read_file(&config.data_path).await?;
        let mut doc = csv_codec::parse(&bytes, delimiter)?;

        let pending: Vec<usize> = doc
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_synced())
            .map(|(index, _)| index)
            .collect();

        if pending.is_empty() {
            tracing::info!("All \"{}\" products already exist in the store.", name);
            return Ok(TypeStatus::Skipped);
        }

        let groups = group_by_key(pending, |&index| {
            let title = self.renderer.render(&config.title, &doc.rows[index]);
            (!title.trim().is_empty()).then_some(title)
        });
        tracing::info!(
            "📦 {}: {} new rows in {} products",
            name,
            groups.iter().map(Vec::len).sum::<usize>(),
            groups.len()
        );

        self.progress
            .start(&format!("Adding \"{}\" products to store:", name), groups.len());
        let result = self.submit_groups(config, &mut doc, &groups).await;
        self.progress.finish();
        let rows = result?;

        self.write_back(config, &mut doc, delimiter).await?;
        tracing::info!("✅ {}: {} products created", name, groups.len());

        Ok(TypeStatus::Synced {
            groups: groups.len(),
            rows,
        })
    }

    async fn submit_groups(
        &self,
        config: &ProductConfig,
        doc: &mut CsvDocument,
        groups: &[Vec<usize>],
    ) -> Result<usize> {
        let mut updated = 0;
        for group in groups {
            let created = self.submit_group(config, &doc.rows, group).await?;
            merge_ids(&mut doc.rows, group, &created);
            updated += group.len();
            self.progress.advance();
        }
        Ok(updated)
    }

    async fn submit_group(
        &self,
        config: &ProductConfig,
        rows: &[Row],
        group: &[usize],
    ) -> Result<CreatedProduct> {
        let variants: Vec<&Row> = group.iter().map(|&index| &rows[index]).collect();
        let representative = variants.first().copied().ok_or_else(|| SyncError::ProcessingError {
            message: "empty product group".to_string(),
        })?;

        let paths = images::resolve(representative, config.image.as_ref())?;
        let encoded = self.images.read_all(&paths).await?;

        let product = payload::build_product(&variants, config, &self.renderer, encoded)?;
        duplicates::ensure_unique_variants(&product)?;

        tracing::debug!(
            "📡 {}: creating '{}' with {} variants and {} images",
            config.product_type,
            product.title,
            product.variants.len(),
            product.images.len()
        );
        self.client
            .create(&product)
            .await
            .map_err(|e| SyncError::SubmissionError {
                title: product.title.clone(),
                message: e.to_string(),
                payload: diagnostic_payload(&product),
            })
    }

    async fn write_back(&self, config: &ProductConfig, doc: &mut CsvDocument, delimiter: u8) -> Result<()> {
        doc.ensure_column(PRODUCT_ID_COLUMN);
        doc.ensure_column(VARIANT_ID_COLUMN);
        let bytes = csv_codec::serialize(doc, delimiter)?;
        self.storage.write_file(&config.data_path, &bytes).await?;
        tracing::debug!(
            "💾 {}: wrote {} rows to {}",
            config.product_type,
            doc.rows.len(),
            config.data_path.display()
        );
        Ok(())
    }
}

/// 把商店指派的識別碼寫回群組中的每一列；變體識別碼依位置對應
fn merge_ids(rows: &mut [Row], group: &[usize], created: &CreatedProduct) {
    if created.variants.len() != group.len() {
        tracing::warn!(
            "⚠️ Product {} returned {} variants for {} rows",
            created.id,
            created.variants.len(),
            group.len()
        );
    }

    for (position, &index) in group.iter().enumerate() {
        let row = &mut rows[index];
        row.product_id = Some(created.id);
        row.variant_id = created.variants.get(position).map(|v| v.id);
    }
}

/// Payload JSON for error reports, with image data elided.
fn diagnostic_payload(product: &NewProduct) -> String {
    let mut product = product.clone();
    for image in &mut product.images {
        image.attachment = format!("<{} bytes of base64>", image.attachment.len());
    }
    serde_json::to_string_pretty(&product).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
