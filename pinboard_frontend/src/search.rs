use crate::catalog::ImageCatalog;
use crate::models::ImageRecord;

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring match against the title or any single tag.
/// An empty (or whitespace-only) query matches every record.
pub fn matches(record: &ImageRecord, query: &str) -> bool {
    let needle = normalize_query(query);
    matches_normalized(record, &needle)
}

fn matches_normalized(record: &ImageRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Records matching `query`, in catalog order.
pub fn filter<'a>(catalog: &'a ImageCatalog, query: &str) -> Vec<&'a ImageRecord> {
    let needle = normalize_query(query);
    catalog
        .records()
        .iter()
        .filter(|record| matches_normalized(record, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ImageRecord {
        ImageRecord::new("1", "Sunset Over Water", "u", &["cat", "Ocean"])
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches(&record(), ""));
        assert!(matches(&record(), "   "));
        assert!(matches(&ImageRecord::new("2", "", "u", &[]), ""));
    }

    #[test]
    fn query_is_case_insensitive() {
        assert!(matches(&record(), "CAT"));
        assert!(matches(&record(), "ocean"));
        assert!(matches(&record(), "  sunset "));
    }

    #[test]
    fn substring_must_fall_inside_one_tag() {
        assert!(!matches(&record(), "cat,ocean"));
        assert!(!matches(&record(), "dog"));
    }

    #[test]
    fn filter_keeps_catalog_order() {
        let catalog = ImageCatalog::from_records(vec![
            ImageRecord::new("a", "Red fox", "u", &["animal"]),
            ImageRecord::new("b", "Blue sky", "u", &["weather"]),
            ImageRecord::new("c", "Arctic fox", "u", &[]),
        ]);
        let ids: Vec<&str> = filter(&catalog, "Fox").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(filter(&catalog, "").len(), 3);
    }
}
