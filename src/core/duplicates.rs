use crate::domain::model::{NewProduct, NewProductVariant};
use crate::utils::error::{Result, SyncError};
use serde::Serialize;

/// 兩個選項值組合相同的變體
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicatePair<'a> {
    pub index: usize,
    pub other_index: usize,
    pub variant: &'a NewProductVariant,
    pub other: &'a NewProductVariant,
}

/// Pairs each variant with the last variant sharing its option key, for
/// every variant that is not itself that last occurrence.
pub fn find_duplicates(product: &NewProduct) -> Vec<DuplicatePair<'_>> {
    let keys: Vec<String> = product
        .variants
        .iter()
        .map(NewProductVariant::option_key)
        .collect();

    keys.iter()
        .enumerate()
        .filter_map(|(index, key)| {
            let last = keys.iter().rposition(|k| k == key)?;
            (last != index).then(|| DuplicatePair {
                index,
                other_index: last,
                variant: &product.variants[index],
                other: &product.variants[last],
            })
        })
        .collect()
}

/// 存在重複變體時回傳錯誤，附上衝突的變體組合
pub fn ensure_unique_variants(product: &NewProduct) -> Result<()> {
    let duplicates = find_duplicates(product);
    if duplicates.is_empty() {
        return Ok(());
    }

    Err(SyncError::DuplicateVariantError {
        title: product.title.clone(),
        pairs: serde_json::to_string_pretty(&duplicates)?,
    })
}
