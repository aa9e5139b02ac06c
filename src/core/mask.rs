use crate::utils::error::{Result, SyncError};

pub const DEFAULT_PLACEHOLDER: char = '#';

/// 從 `input` 擷取指定位置的字元，依序填入 `pattern` 中的佔位符
///
/// Indices are character offsets. Each index replaces the first placeholder
/// still present in the partly filled pattern, so a placeholder character
/// copied from `input` is itself replaced by a later index. Extra
/// placeholders stay in the output and extra indices are ignored, but every
/// index must address a character of `input`.
pub fn mask(input: &str, indices: &[usize], pattern: &str, placeholder: char) -> Result<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut extracted = Vec::with_capacity(indices.len());
    for &index in indices {
        let c = chars
            .get(index)
            .copied()
            .ok_or_else(|| SyncError::IndexOutOfRangeError {
                input: input.to_string(),
                index,
                len: chars.len(),
            })?;
        extracted.push(c);
    }

    let mut masked = pattern.to_string();
    let mut buf = [0u8; 4];
    for c in extracted {
        let Some(pos) = masked.find(placeholder) else {
            break;
        };
        masked.replace_range(pos..pos + placeholder.len_utf8(), c.encode_utf8(&mut buf));
    }
    Ok(masked)
}
