use crate::models::{CatalogEntry, FilterCriteria};

/// Check whether an entry satisfies every non-empty criterion
///
/// Values are compared case-insensitively after trimming. A criterion on a key
/// the entry does not carry never matches.
#[inline]
pub fn matches_criteria(entry: &CatalogEntry, criteria: &FilterCriteria) -> bool {
    criteria
        .iter()
        .map(|(key, expected)| (key, expected.trim()))
        .filter(|(_, expected)| !expected.is_empty())
        .all(|(key, expected)| {
            entry
                .attribute(key)
                .is_some_and(|actual| actual.trim().to_lowercase() == expected.to_lowercase())
        })
}

/// Narrow entries to those matching all criteria, keeping their order
pub fn filter_entries<'a, I>(entries: I, criteria: &FilterCriteria) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    entries
        .into_iter()
        .filter(|entry| matches_criteria(entry, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use std::collections::BTreeMap;

    fn create_entry(id: &str, state: &str, city: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            location: GeoPoint::new(12.97, 77.59),
            attributes: BTreeMap::from([
                ("state".to_string(), state.to_string()),
                ("city".to_string(), city.to_string()),
            ]),
            details: serde_json::Map::new(),
        }
    }

    fn criteria(pairs: &[(&str, &str)]) -> FilterCriteria {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn entries() -> Vec<CatalogEntry> {
        vec![
            create_entry("1", "karnataka", "Bengaluru"),
            create_entry("2", "Maharashtra", "Pune"),
            create_entry("3", "Karnataka", "Mysuru"),
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let entries = entries();
        let filtered = filter_entries(&entries, &FilterCriteria::new());
        assert_eq!(filtered.len(), entries.len());
        assert!(filtered.iter().zip(&entries).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_case_insensitive_match() {
        let entries = entries();
        let filtered = filter_entries(&entries, &criteria(&[("state", "KARNATAKA")]));
        let ids: Vec<_> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let entries = entries();
        let filtered = filter_entries(&entries, &criteria(&[("state", "karnataka"), ("city", "mysuru")]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "3");
    }

    #[test]
    fn test_empty_value_is_ignored() {
        let entries = entries();
        let filtered = filter_entries(&entries, &criteria(&[("state", "  "), ("city", "pune")]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_unknown_key_yields_empty() {
        let entries = entries();
        assert!(filter_entries(&entries, &criteria(&[("district", "Udupi")])).is_empty());
    }
}
