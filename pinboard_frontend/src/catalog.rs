use crate::models::ImageRecord;

/// In-memory list of every record loaded for this session.
///
/// The list is only ever replaced wholesale; records are never merged.
#[derive(Debug, Default, Clone)]
pub struct ImageCatalog {
    records: Vec<ImageRecord>,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    /// Replaces the whole catalog.
    pub fn load(&mut self, records: Vec<ImageRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ImageRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Records sharing at least one tag with `record`, in catalog order,
    /// never including `record` itself.
    pub fn related_to(&self, record: &ImageRecord, limit: usize) -> Vec<&ImageRecord> {
        self.records
            .iter()
            .filter(|candidate| candidate.id != record.id && candidate.shares_tag_with(record))
            .take(limit)
            .collect()
    }

    pub fn recent(&self, limit: usize) -> &[ImageRecord] {
        &self.records[..self.records.len().min(limit)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ImageCatalog {
        ImageCatalog::from_records(vec![
            ImageRecord::new("a", "Alpha", "https://img/a.png", &["x"]),
            ImageRecord::new("b", "Beta", "https://img/b.png", &["x"]),
            ImageRecord::new("c", "Gamma", "https://img/c.png", &["y"]),
        ])
    }

    fn ids(records: &[&ImageRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn related_excludes_self_and_unrelated() {
        let catalog = sample();
        let b = catalog.find_by_id("b").expect("b").clone();
        assert_eq!(ids(&catalog.related_to(&b, 10)), vec!["a"]);
    }

    #[test]
    fn related_respects_limit_and_order() {
        let mut records = vec![ImageRecord::new("root", "", "u", &["t"])];
        for i in 0..30 {
            records.push(ImageRecord::new(format!("r{i}"), "", "u", &["t"]));
        }
        let catalog = ImageCatalog::from_records(records);
        let root = catalog.get(0).expect("root").clone();
        let related = catalog.related_to(&root, 20);
        assert_eq!(related.len(), 20);
        assert_eq!(related[0].id, "r0");
        assert!(related.iter().all(|r| r.id != "root"));
    }

    #[test]
    fn lookup_miss_is_none() {
        let catalog = sample();
        assert!(catalog.find_by_id("zzz").is_none());
        assert_eq!(catalog.index_of("c"), Some(2));
    }

    #[test]
    fn load_replaces_everything() {
        let mut catalog = sample();
        catalog.load(vec![ImageRecord::new("d", "Delta", "u", &[])]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_by_id("a").is_none());
    }

    #[test]
    fn recent_is_truncated_prefix() {
        let catalog = sample();
        assert_eq!(catalog.recent(2).len(), 2);
        assert_eq!(catalog.recent(18).len(), 3);
        assert!(ImageCatalog::new().recent(18).is_empty());
    }
}
