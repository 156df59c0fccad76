use std::collections::HashSet;
use std::hash::Hash;

/// Keeps the first occurrence of every value, preserving order.
pub fn dedupe<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    dedupe_by_key(items, |item| item.clone())
}

/// Keeps the first item for each key, preserving order.
pub fn dedupe_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_seen_order() {
        assert_eq!(dedupe(vec!["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_dedupe_empty() {
        assert!(dedupe(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_dedupe_by_key_keeps_first_item() {
        let items = vec![("a.com", 1), ("b.com", 0), ("a.com", 2)];
        assert_eq!(
            dedupe_by_key(items, |(url, _)| *url),
            vec![("a.com", 1), ("b.com", 0)]
        );
    }
}
