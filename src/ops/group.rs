use indexmap::IndexMap;

use crate::model::{Group, ItemRecord};

/// Group key: title text before the first delimiter. A title without the
/// delimiter is its own key (degenerate singleton group).
pub fn derive_key<'a>(title: &'a str, delimiter: &str) -> &'a str {
    match title.split_once(delimiter) {
        Some((key, _)) => key,
        None => title,
    }
}

/// Partition records by derived key. Pure function.
///
/// Member order within a group equals input order, and the map iterates
/// groups in first-seen-key order — both matter for deterministic rewrites,
/// which is why this returns an `IndexMap` and not a `HashMap`.
pub fn group_records(records: Vec<ItemRecord>, delimiter: &str) -> IndexMap<String, Group> {
    let mut groups: IndexMap<String, Group> = IndexMap::new();
    for record in records {
        let key = derive_key(&record.title, delimiter).to_string();
        groups
            .entry(key.clone())
            .or_insert_with(|| Group::new(&key))
            .members
            .push(record);
    }
    groups
}
