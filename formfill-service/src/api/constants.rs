//! Backend collection and field names shared across the workflow

/// Collection holding submitted project records.
pub const PROJECTS_COLLECTION: &str = "projects";

/// Collection mapping form field names to spreadsheet cell addresses.
pub const CELL_TABLE_COLLECTION: &str = "cellTable";

/// Collection holding versioned application templates.
pub const TEMPLATE_COLLECTION: &str = "software_application_base";

/// File field on a template record.
pub const TEMPLATE_FILE_FIELD: &str = "application_template";

/// File field on a project record once processed.
pub const PROCESSED_FILE_FIELD: &str = "application";

/// Template version the workflow fills.
pub const TEMPLATE_VERSION: &str = "v2";

/// MIME type for xlsx uploads.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Page size used when draining a collection.
pub const LIST_PER_PAGE: u32 = 200;
