//! End-to-end form-filling workflow
//!
//! One trigger processes at most one uploaded project record: fetch it,
//! merge its form values with the cell table, patch the versioned template,
//! upload the result and mark the record processed. Every exit produces a
//! [`FillingResponse`] so the HTTP layer only serializes.

use std::collections::BTreeMap;

use log::{error, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::constants::{CELL_TABLE_COLLECTION, PROJECTS_COLLECTION, TEMPLATE_VERSION};
use crate::api::models::Record;
use crate::context::AppContext;
use crate::excel;

/// Filter expression selecting records awaiting processing.
const UPLOADED_FILTER: &str = "status=\"uploaded\"";

/// Body returned by the trigger route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FillingResponse {
    Success { record_id: String, file_url: String },
    Error { message: String },
}

impl FillingResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Process the first project record with status "uploaded", if any.
pub async fn process_next_uploaded(ctx: &AppContext) -> FillingResponse {
    info!("starting filling-form run");

    let records = match ctx
        .backend
        .list_filtered(PROJECTS_COLLECTION, UPLOADED_FILTER)
        .await
    {
        Ok(records) => records,
        Err(err) => {
            error!("failed to query project records: {err}");
            return FillingResponse::error("Failed to query project records");
        }
    };

    let Some(record) = records.into_iter().next() else {
        info!("no uploaded project records found");
        return FillingResponse::error("No records to process");
    };
    let record_id = record.id.clone();
    info!("processing project record {record_id}");

    let Some(software) = software_form_data(&record) else {
        warn!("record {record_id} has no form_data.software object");
        return FillingResponse::error("Record has no software form data");
    };

    let cell_table = match ctx.backend.list_all(CELL_TABLE_COLLECTION).await {
        Ok(records) => records,
        Err(err) => {
            error!("failed to load cell table: {err}");
            return FillingResponse::error("Failed to load cell table");
        }
    };

    let cell_values = merge_cell_values(&cell_table, &software);
    info!("merged {} form values into cell addresses", cell_values.len());

    let template = match ctx.backend.download_template(TEMPLATE_VERSION).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("failed to download application template: {err}");
            return FillingResponse::error("Failed to download application template");
        }
    };

    let patched = match excel::patch_workbook(&template, &cell_values) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("failed to update excel sheet: {err}");
            return FillingResponse::error("Failed to update Excel sheet");
        }
    };

    match ctx.backend.upload_processed(&record_id, patched).await {
        Ok(file_url) => FillingResponse::Success {
            record_id,
            file_url,
        },
        Err(err) => {
            error!("failed to upload processed application: {err}");
            FillingResponse::error("Upload failed")
        }
    }
}

/// Extract the `form_data.software` object from a project record.
fn software_form_data(record: &Record) -> Option<Map<String, Value>> {
    record
        .field_object("form_data")?
        .get("software")?
        .as_object()
        .cloned()
}

/// Intersect the cell table with the submitted form values.
///
/// Each cell table record pairs a field `name` with a `cell_index`. Names
/// without a form value are skipped, form keys without a cell table entry
/// are dropped. Values are carried over untouched.
pub fn merge_cell_values(
    cell_table: &[Record],
    software: &Map<String, Value>,
) -> BTreeMap<String, Value> {
    let mut cell_values = BTreeMap::new();
    for entry in cell_table {
        let (Some(name), Some(cell_index)) = (entry.field_str("name"), entry.field_str("cell_index"))
        else {
            continue;
        };
        if let Some(value) = software.get(name) {
            cell_values.insert(cell_index.to_string(), value.clone());
        }
    }
    cell_values
}
