//! Reference and category types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::citation::BucketKey;

/// Bibliographic data for the cited work
///
/// Every field is free text. Blank and missing fields are treated the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceFields {
    pub surname: Option<String>,
    pub given_name: Option<String>,
    /// Further authors, already formatted (`SOUZA, Maria; LIMA, João`)
    pub additional_authors: Option<String>,
    pub title: Option<String>,
    pub place: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<String>,
    pub edition: Option<String>,
    /// Page count
    pub pages: Option<String>,
    /// Document type, e.g. "Dissertação (Mestrado)"
    pub document_type: Option<String>,
    pub url: Option<String>,
    pub access_date: Option<String>,
}

/// Trimmed field value, `None` when blank
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ReferenceFields {
    pub fn surname(&self) -> Option<&str> {
        present(&self.surname)
    }

    pub fn given_name(&self) -> Option<&str> {
        present(&self.given_name)
    }

    pub fn additional_authors(&self) -> Option<&str> {
        present(&self.additional_authors)
    }

    pub fn title(&self) -> Option<&str> {
        present(&self.title)
    }

    pub fn place(&self) -> Option<&str> {
        present(&self.place)
    }

    pub fn publisher(&self) -> Option<&str> {
        present(&self.publisher)
    }

    pub fn year(&self) -> Option<&str> {
        present(&self.year)
    }

    pub fn edition(&self) -> Option<&str> {
        present(&self.edition)
    }

    pub fn pages(&self) -> Option<&str> {
        present(&self.pages)
    }

    pub fn document_type(&self) -> Option<&str> {
        present(&self.document_type)
    }

    pub fn url(&self) -> Option<&str> {
        present(&self.url)
    }

    pub fn access_date(&self) -> Option<&str> {
        present(&self.access_date)
    }
}

/// User-assigned names for color buckets
///
/// Cosmetic only: labels change section headings, never bucket contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLabels {
    labels: BTreeMap<BucketKey, String>,
}

impl CategoryLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a label; a blank label removes the assignment
    pub fn set(&mut self, key: BucketKey, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            self.labels.remove(&key);
        } else {
            self.labels.insert(key, label.to_string());
        }
    }

    pub fn remove(&mut self, key: &BucketKey) -> Option<String> {
        self.labels.remove(key)
    }

    pub fn get(&self, key: &BucketKey) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Heading for a bucket: its label, or the bucket name
    pub fn heading<'a>(&'a self, key: &'a BucketKey) -> &'a str {
        self.get(key).unwrap_or_else(|| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &str)> {
        self.labels.iter().map(|(key, label)| (key, label.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorBucket;

    #[test]
    fn test_blank_fields_read_as_missing() {
        let fields = ReferenceFields {
            surname: Some("  Silva ".to_string()),
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.surname(), Some("Silva"));
        assert_eq!(fields.title(), None);
        assert_eq!(fields.year(), None);
    }

    #[test]
    fn test_reference_fields_from_partial_json() {
        let fields: ReferenceFields =
            serde_json::from_str(r#"{"surname": "Freire", "givenName": "Paulo", "year": "1968"}"#)
                .unwrap();
        assert_eq!(fields.given_name(), Some("Paulo"));
        assert_eq!(fields.year(), Some("1968"));
        assert!(fields.url.is_none());
    }

    #[test]
    fn test_labels() {
        let mut labels = CategoryLabels::new();
        let green = BucketKey::from(ColorBucket::Green);

        labels.set(green.clone(), " Conceitos ");
        assert_eq!(labels.heading(&green), "Conceitos");

        let blue = BucketKey::from(ColorBucket::Blue);
        assert_eq!(labels.heading(&blue), "blue");

        labels.set(green.clone(), "  ");
        assert!(labels.get(&green).is_none());
        assert!(labels.is_empty());
    }

    #[test]
    fn test_labels_serialize_by_bucket_name() {
        let mut labels = CategoryLabels::new();
        labels.set(BucketKey::parse("amarelo"), "Definições");
        let json = serde_json::to_value(&labels).unwrap();
        assert_eq!(json, serde_json::json!({"yellow": "Definições"}));
    }
}
