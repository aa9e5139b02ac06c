use crate::config::StoreConfig;
use crate::domain::model::{CreatedProduct, NewProduct, ProductPage, StoreProduct};
use crate::domain::ports::CatalogClient;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use regex::Regex;
use reqwest::{header::LINK, Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

const PAGE_LIMIT: &str = "250";

static NEXT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+)>;\s*rel="next""#).expect("link header pattern is valid")
});

#[derive(Serialize)]
struct ProductEnvelope<'a> {
    product: &'a NewProduct,
}

#[derive(Deserialize)]
struct CreatedEnvelope {
    product: CreatedProduct,
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    products: Vec<StoreProduct>,
}

#[derive(Deserialize)]
struct CountEnvelope {
    count: u64,
}

/// Shopify REST Admin API 用戶端
pub struct ShopifyClient {
    config: StoreConfig,
    client: Client,
}

impl ShopifyClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, resource: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.endpoint(resource))
            .basic_auth(&self.config.api_key, Some(&self.config.password))
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("📡 Store responded with {}: {}", status, body);
        Err(SyncError::ApiStatusError {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CatalogClient for ShopifyClient {
    async fn create(&self, product: &NewProduct) -> Result<CreatedProduct> {
        let response = self
            .request(Method::POST, "products.json")
            .json(&ProductEnvelope { product })
            .send()
            .await?;
        let envelope: CreatedEnvelope = Self::check_status(response).await?.json().await?;

        tracing::debug!(
            "📡 Created product {} with {} variants",
            envelope.product.id,
            envelope.product.variants.len()
        );
        Ok(envelope.product)
    }

    async fn list(&self, page: Option<&str>) -> Result<ProductPage> {
        let mut request = self
            .request(Method::GET, "products.json")
            .query(&[("limit", PAGE_LIMIT)]);
        if let Some(page_info) = page {
            request = request.query(&[("page_info", page_info)]);
        }

        let response = Self::check_status(request.send().await?).await?;
        let next_page = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_info);
        let envelope: ProductsEnvelope = response.json().await?;

        Ok(ProductPage {
            products: envelope.products,
            next_page,
        })
    }

    async fn count(&self) -> Result<u64> {
        let response = self
            .request(Method::GET, "products/count.json")
            .send()
            .await?;
        let envelope: CountEnvelope = Self::check_status(response).await?.json().await?;
        Ok(envelope.count)
    }
}

/// 從 `Link` 標頭取出下一頁的 `page_info`
fn next_page_info(link: &str) -> Option<String> {
    let caps = NEXT_LINK.captures(link)?;
    let url = Url::parse(&caps[1]).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page_info")
        .map(|(_, value)| value.into_owned())
}
