use std::collections::HashMap;
use std::hash::Hash;

/// 依鍵值分組並保持出現順序
///
/// Items with a defined key join the group created at that key's first
/// occurrence. Items whose key is `None` become singleton groups at their own
/// position. Groups are emitted in order of first occurrence.
pub fn group_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Vec<Vec<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> Option<K>,
{
    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for item in items {
        match key_fn(&item) {
            Some(key) => match positions.get(&key) {
                Some(&index) => groups[index].push(item),
                None => {
                    positions.insert(key, groups.len());
                    groups.push(vec![item]);
                }
            },
            None => groups.push(vec![item]),
        }
    }

    groups
}
