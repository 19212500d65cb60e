//! Field key to destination anchor mapping.

use super::field::{FieldKey, normalize_key};

/// Ordered map from field key to its anchor coordinates (row, col).
///
/// A key may carry several anchors; each one receives the full value list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellLocationMap {
    entries: Vec<(FieldKey, Vec<(u32, u32)>)>,
}

impl CellLocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more anchor for `key`.
    pub fn add(&mut self, key: FieldKey, row: u32, col: u32) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, anchors)) => anchors.push((row, col)),
            None => self.entries.push((key, vec![(row, col)])),
        }
    }

    pub fn anchors(&self, key: &str) -> Option<&[(u32, u32)]> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, anchors)| anchors.as_slice())
    }

    /// Keys in first-seen order with their anchors.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &[(u32, u32)])> {
        self.entries.iter().map(|(k, a)| (k, a.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_accumulate() {
        let mut map = CellLocationMap::new();
        map.add("Unit Price".into(), 5, 3);
        map.add("sno".into(), 5, 1);
        map.add("unitprice".into(), 40, 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.anchors("unitprice"), Some(&[(5, 3), (40, 3)][..]));
        assert_eq!(map.anchors("Unit Price"), map.anchors("unitprice"));
        let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["unitprice", "sno"]);
    }
}
