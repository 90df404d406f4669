//! Wire payloads and their translation into [`VectorRecord`]s.
//!
//! Clients send column-oriented batches (`documents`, `embeddings`,
//! `metadatas`, `ids` as parallel arrays). The adapter zips them by position.
//! Optional arrays that are shorter than `embeddings` fall back to defaults
//! for the missing positions instead of failing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{VectorError, VectorResult};
use crate::models::{Metadata, TEXT_KEY, VectorRecord};

/// Body of `POST /add-vectors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InsertVectors {
    pub documents: Vec<Option<String>>,
    pub embeddings: Vec<Vec<f32>>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub metadatas: Option<Vec<Option<Metadata>>>,
    #[serde(default)]
    pub ids: Option<Vec<Option<String>>>,
}

/// Body of `PUT /update-vectors`.
///
/// A position whose embedding is `null` or missing is skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateVectors {
    pub ids: Vec<String>,
    pub embeddings: Vec<Option<Vec<f32>>>,
    #[serde(default)]
    pub documents: Option<Vec<Option<String>>>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub metadatas: Option<Vec<Option<Metadata>>>,
}

/// Id assigned to position `index` when the caller supplied none.
pub fn default_id(index: usize) -> String {
    format!("doc_{}", index)
}

/// `{text: document}` overlaid with the caller's metadata; caller keys win.
pub fn merge_metadata(document: Option<&str>, overlay: Option<&Metadata>) -> Metadata {
    let mut metadata = Metadata::new();
    if let Some(text) = document {
        metadata.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            metadata.insert(key.clone(), value.clone());
        }
    }
    metadata
}

fn nth<T>(items: Option<&Vec<Option<T>>>, index: usize) -> Option<&T> {
    items.and_then(|items| items.get(index)).and_then(Option::as_ref)
}

fn ensure_unique<'a>(ids: impl IntoIterator<Item = &'a str>) -> VectorResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(VectorError::Validation(format!(
                "duplicate id '{}' in request",
                id
            )));
        }
    }
    Ok(())
}

impl InsertVectors {
    /// One record per embedding, in request order.
    pub fn into_records(self) -> VectorResult<Vec<VectorRecord>> {
        let records: Vec<VectorRecord> = self
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(i, values)| {
                let id = nth(self.ids.as_ref(), i)
                    .cloned()
                    .unwrap_or_else(|| default_id(i));
                let document = self.documents.get(i).and_then(|d| d.as_deref());
                let metadata = merge_metadata(document, nth(self.metadatas.as_ref(), i));
                VectorRecord::new(id, values).with_metadata(metadata)
            })
            .collect();

        ensure_unique(records.iter().map(|r| r.id.as_str()))?;
        Ok(records)
    }
}

impl UpdateVectors {
    /// One record per id that has an embedding at the same position.
    ///
    /// An empty result is returned as-is; the caller decides how to report it.
    pub fn into_records(self) -> VectorResult<Vec<VectorRecord>> {
        let records: Vec<VectorRecord> = self
            .ids
            .into_iter()
            .enumerate()
            .filter_map(|(i, id)| {
                let values = self.embeddings.get(i).cloned().flatten()?;
                let document = nth(self.documents.as_ref(), i).map(String::as_str);
                let metadata = merge_metadata(document, nth(self.metadatas.as_ref(), i));
                Some(VectorRecord::new(id, values).with_metadata(metadata))
            })
            .collect();

        ensure_unique(records.iter().map(|r| r.id.as_str()))?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_insert_generates_positional_ids() {
        let payload: InsertVectors = parse(json!({
            "documents": ["a", "b"],
            "embeddings": [[0.1, 0.2], [0.3, 0.4]]
        }));
        let records = payload.into_records().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "doc_0");
        assert_eq!(records[1].id, "doc_1");
        assert_eq!(records[1].values, vec![0.3, 0.4]);
        assert_eq!(records[0].metadata, parse::<Metadata>(json!({"text": "a"})));
    }

    #[test]
    fn test_insert_uses_supplied_ids_and_fills_nulls() {
        let payload: InsertVectors = parse(json!({
            "documents": ["a", "b", "c"],
            "embeddings": [[1.0], [2.0], [3.0]],
            "ids": ["x", null]
        }));
        let ids: Vec<_> = payload
            .into_records()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, vec!["x", "doc_1", "doc_2"]);
    }

    #[test]
    fn test_caller_metadata_overrides_text() {
        let payload: InsertVectors = parse(json!({
            "documents": ["original"],
            "embeddings": [[1.0]],
            "metadatas": [{"text": "override", "source": "wiki"}]
        }));
        let record = payload.into_records().unwrap().remove(0);

        assert_eq!(
            record.metadata,
            parse::<Metadata>(json!({"text": "override", "source": "wiki"}))
        );
    }

    #[test]
    fn test_insert_with_fewer_documents_omits_text() {
        let payload: InsertVectors = parse(json!({
            "documents": [],
            "embeddings": [[1.0]],
            "metadatas": [{"k": 1}]
        }));
        let record = payload.into_records().unwrap().remove(0);

        assert_eq!(record.metadata, parse::<Metadata>(json!({"k": 1})));
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let payload: InsertVectors = parse(json!({
            "documents": ["a", "b"],
            "embeddings": [[1.0], [2.0]],
            "ids": ["same", "same"]
        }));
        let err = payload.into_records().unwrap_err();

        assert!(matches!(err, VectorError::Validation(_)));
        assert!(err.to_string().contains("same"));
    }

    #[test]
    fn test_insert_requires_embeddings() {
        let result = serde_json::from_value::<InsertVectors>(json!({"documents": ["a"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_skips_missing_embeddings() {
        let payload: UpdateVectors = parse(json!({
            "ids": ["a", "b", "c"],
            "embeddings": [[1.0], null],
            "documents": ["da", "db", "dc"]
        }));
        let records = payload.into_records().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[0].text(), Some("da"));
    }

    #[test]
    fn test_update_with_no_embeddings_yields_nothing() {
        let payload: UpdateVectors = parse(json!({
            "ids": ["a", "b"],
            "embeddings": [null, null]
        }));
        assert!(payload.into_records().unwrap().is_empty());
    }

    #[test]
    fn test_update_keeps_empty_embedding() {
        let payload: UpdateVectors = parse(json!({
            "ids": ["a"],
            "embeddings": [[]]
        }));
        let records = payload.into_records().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].values.is_empty());
        assert!(records[0].metadata.is_empty());
    }

    #[test]
    fn test_update_rejects_duplicate_ids() {
        let payload: UpdateVectors = parse(json!({
            "ids": ["a", "a"],
            "embeddings": [[1.0], [2.0]]
        }));
        assert!(matches!(
            payload.into_records(),
            Err(VectorError::Validation(_))
        ));
    }

    #[test]
    fn test_update_duplicate_skipped_position_is_allowed() {
        let payload: UpdateVectors = parse(json!({
            "ids": ["a", "a"],
            "embeddings": [[1.0], null]
        }));
        assert_eq!(payload.into_records().unwrap().len(), 1);
    }
}
