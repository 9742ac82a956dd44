//! Spreadsheet patcher
//!
//! Loads a workbook from bytes, writes values into named cells on the active
//! sheet, and re-serializes. Value-only writes: existing formatting and all
//! untouched cells stay as they are in the template.

use std::collections::BTreeMap;
use std::io::Cursor;

use serde_json::Value;
use thiserror::Error;
use umya_spreadsheet::XlsxError;

/// Errors that can occur while patching a workbook
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("template bytes are empty")]
    EmptyTemplate,

    #[error("no cell values to write")]
    NoCellValues,

    #[error("failed to load workbook: {0}")]
    Load(#[source] XlsxError),

    #[error("failed to serialize workbook: {0}")]
    Save(#[source] XlsxError),
}

/// Write each `cell address -> value` pair into the active sheet of the
/// template and return the modified workbook as bytes.
///
/// Addresses are written verbatim; an address outside the sheet's current
/// bounds simply extends it. The input buffer is not modified.
pub fn patch_workbook(
    template: &[u8],
    cell_values: &BTreeMap<String, Value>,
) -> Result<Vec<u8>, PatchError> {
    if template.is_empty() {
        return Err(PatchError::EmptyTemplate);
    }
    if cell_values.is_empty() {
        return Err(PatchError::NoCellValues);
    }

    let mut book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(template), false)
        .map_err(PatchError::Load)?;

    let sheet = book.get_active_sheet_mut();
    for (address, value) in cell_values {
        let cell = sheet.get_cell_mut(address.as_str());
        match value {
            Value::String(s) => {
                cell.set_value(s.as_str());
            }
            Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    cell.set_value_number(f);
                } else {
                    cell.set_value(n.to_string());
                }
            }
            Value::Bool(b) => {
                cell.set_value_bool(*b);
            }
            Value::Null => {
                cell.set_value("");
            }
            other => {
                cell.set_value(other.to_string());
            }
        }
    }

    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out).map_err(PatchError::Save)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template_bytes() -> Vec<u8> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        sheet.get_cell_mut("A1").set_value("Application Form");
        sheet.get_cell_mut("B7").set_value("placeholder");
        let mut out = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out).unwrap();
        out.into_inner()
    }

    fn read_cell(bytes: &[u8], address: &str) -> String {
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
        book.get_active_sheet().get_value(address)
    }

    #[test]
    fn writes_mapped_cells_and_leaves_others_alone() {
        let template = template_bytes();
        let mut cells = BTreeMap::new();
        cells.insert("B7".to_string(), json!("Acme GmbH"));
        cells.insert("C12".to_string(), json!(42));

        let patched = patch_workbook(&template, &cells).unwrap();

        assert_eq!(read_cell(&patched, "B7"), "Acme GmbH");
        assert_eq!(read_cell(&patched, "C12"), "42");
        // Untouched cell keeps its template value
        assert_eq!(read_cell(&patched, "A1"), "Application Form");
        // Input buffer untouched
        assert_eq!(read_cell(&template, "B7"), "placeholder");
    }

    #[test]
    fn out_of_bounds_address_extends_the_sheet() {
        let template = template_bytes();
        let mut cells = BTreeMap::new();
        cells.insert("Z99".to_string(), json!("far away"));

        let patched = patch_workbook(&template, &cells).unwrap();
        assert_eq!(read_cell(&patched, "Z99"), "far away");
    }

    #[test]
    fn empty_template_is_rejected() {
        let mut cells = BTreeMap::new();
        cells.insert("B7".to_string(), json!("x"));

        let err = patch_workbook(&[], &cells).unwrap_err();
        assert!(matches!(err, PatchError::EmptyTemplate));
    }

    #[test]
    fn empty_mapping_is_rejected() {
        let template = template_bytes();
        let err = patch_workbook(&template, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, PatchError::NoCellValues));
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut cells = BTreeMap::new();
        cells.insert("B7".to_string(), json!("x"));

        let err = patch_workbook(b"not a workbook", &cells).unwrap_err();
        assert!(matches!(err, PatchError::Load(_)));
    }
}
