//! Record and list-envelope models for the document backend

use serde::Deserialize;
use serde_json::{Map, Value};

/// A single record from a backend collection.
///
/// Only the identity fields are typed; everything else (status, form_data,
/// file fields, cell table columns) varies per collection and stays in the
/// flattened `fields` map.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "collectionName", default)]
    pub collection_name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Look up a field expected to hold a non-empty string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Look up a field expected to hold a JSON object.
    pub fn field_object(&self, name: &str) -> Option<&Map<String, Value>> {
        self.fields.get(name).and_then(Value::as_object)
    }
}

/// Paged list envelope returned by `GET /api/collections/{c}/records`.
///
/// Only the fields pagination needs are kept; `page`/`perPage` are echoes of
/// the request and stay unparsed.
#[derive(Debug, Deserialize)]
pub struct RecordList {
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
    pub items: Vec<Record>,
}
