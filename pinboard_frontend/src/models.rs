use serde::{Deserialize, Serialize};

/// One image as served by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ImageRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        tags: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// True when the two records have at least one tag in common.
    pub fn shares_tag_with(&self, other: &ImageRecord) -> bool {
        self.tags.iter().any(|tag| {
            let tag = tag.to_lowercase();
            other.tags.iter().any(|t| t.to_lowercase() == tag)
        })
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_identifier_field() {
        let raw = r#"{"_id":"66a1","title":"Dunes","url":"https://cdn/x.jpg","tags":["sand","Desert"]}"#;
        let record: ImageRecord = serde_json::from_str(raw).expect("record");
        assert_eq!(record.id, "66a1");
        assert_eq!(record.tags, vec!["sand", "Desert"]);
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let raw = r#"{"_id":"1","title":"t","url":"u"}"#;
        let record: ImageRecord = serde_json::from_str(raw).expect("record");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn tag_overlap_ignores_case() {
        let a = ImageRecord::new("a", "", "u", &["Cat"]);
        let b = ImageRecord::new("b", "", "u", &["dog", "cat"]);
        let c = ImageRecord::new("c", "", "u", &["bird"]);
        assert!(a.shares_tag_with(&b));
        assert!(!a.shares_tag_with(&c));
    }
}
