use crate::domain::model::StoreProduct;
use crate::domain::ports::CatalogClient;
use crate::utils::error::Result;

/// 逐頁走訪商店中所有產品，回傳總數
pub async fn for_each_page<C, F>(client: &C, mut handler: F) -> Result<usize>
where
    C: CatalogClient + ?Sized,
    F: FnMut(&[StoreProduct]),
{
    let mut total = 0;
    let mut cursor: Option<String> = None;

    loop {
        let page = client.list(cursor.as_deref()).await?;
        tracing::debug!("📄 Received page with {} products", page.products.len());
        total += page.products.len();
        handler(&page.products);

        match page.next_page {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(total)
}
