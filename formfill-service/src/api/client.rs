//! HTTP client for the document backend

use log::{debug, info};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};

use super::constants::{
    LIST_PER_PAGE, PROCESSED_FILE_FIELD, PROJECTS_COLLECTION, TEMPLATE_COLLECTION,
    TEMPLATE_FILE_FIELD, XLSX_MIME,
};
use super::error::{BackendError, Result};
use super::models::{Record, RecordList};

/// Client for one backend instance, constructed once at startup and shared
/// across requests.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
    auth_token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            auth_token,
        }
    }

    /// List records in a collection matching a backend filter expression.
    pub async fn list_filtered(&self, collection: &str, filter: &str) -> Result<Vec<Record>> {
        self.list(collection, Some(filter)).await
    }

    /// List every record in a collection.
    pub async fn list_all(&self, collection: &str) -> Result<Vec<Record>> {
        self.list(collection, None).await
    }

    /// Drain a collection page by page until `totalItems` is reached.
    async fn list(&self, collection: &str, filter: Option<&str>) -> Result<Vec<Record>> {
        let url = format!("{}/api/collections/{}/records", self.base_url, collection);
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut query = vec![
                ("page", page.to_string()),
                ("perPage", LIST_PER_PAGE.to_string()),
            ];
            if let Some(filter) = filter {
                query.push(("filter", filter.to_string()));
            }

            debug!("fetching {collection} page {page} (filter: {filter:?})");
            let response = self
                .http
                .get(&url)
                .query(&query)
                .send()
                .await
                .map_err(|source| BackendError::Request {
                    url: url.clone(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(BackendError::Status {
                    status,
                    url: url.clone(),
                });
            }

            let batch: RecordList =
                response
                    .json()
                    .await
                    .map_err(|source| BackendError::Decode {
                        url: url.clone(),
                        source,
                    })?;

            let fetched = batch.items.len();
            let total = batch.total_items as usize;
            records.extend(batch.items);

            if fetched == 0 || records.len() >= total {
                break;
            }
            page += 1;
        }

        info!("fetched {} records from {}", records.len(), collection);
        Ok(records)
    }

    /// Fetch a single record by id.
    pub async fn get_one(&self, collection: &str, record_id: &str) -> Result<Record> {
        let url = format!(
            "{}/api/collections/{}/records/{}",
            self.base_url, collection, record_id
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status { status, url });
        }

        response
            .json()
            .await
            .map_err(|source| BackendError::Decode { url, source })
    }

    /// Download the application template matching an exact version string.
    ///
    /// The first matching record wins if the backend returns several.
    pub async fn download_template(&self, version: &str) -> Result<Vec<u8>> {
        let filter = format!("version=\"{version}\"");
        let records = self.list_filtered(TEMPLATE_COLLECTION, &filter).await?;

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound {
                collection: TEMPLATE_COLLECTION.to_string(),
                filter,
            })?;

        let filename =
            record
                .field_str(TEMPLATE_FILE_FIELD)
                .ok_or_else(|| BackendError::MissingFile {
                    record_id: record.id.clone(),
                    field: TEMPLATE_FILE_FIELD.to_string(),
                })?;

        let url = file_url(&self.base_url, &record.collection_id, &record.id, filename);
        let bytes = self.fetch_file(&url).await?;
        info!("downloaded {TEMPLATE_FILE_FIELD} for version {version} ({} bytes)", bytes.len());
        Ok(bytes)
    }

    async fn fetch_file(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status,
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| BackendError::Request {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    /// Attach a processed workbook to a project record and flip its status.
    ///
    /// Multipart PATCH with `status=processed` and the file part, then a
    /// re-fetch to learn the filename the backend actually stored. Returns
    /// the public download URL for that file.
    pub async fn upload_processed(&self, record_id: &str, workbook: Vec<u8>) -> Result<String> {
        let url = format!(
            "{}/api/collections/{}/records/{}",
            self.base_url, PROJECTS_COLLECTION, record_id
        );

        let part = Part::bytes(workbook)
            .file_name(processed_file_name(record_id))
            .mime_str(XLSX_MIME)
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;
        let form = Form::new()
            .text("status", "processed")
            .part(PROCESSED_FILE_FIELD, part);

        let mut request = self.http.patch(&url).multipart(form);
        if let Some(token) = &self.auth_token {
            request = request.header(AUTHORIZATION, token.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status { status, url });
        }

        // The backend renames uploaded files; read back the stored name.
        let updated = self.get_one(PROJECTS_COLLECTION, record_id).await?;
        let stored_name =
            updated
                .field_str(PROCESSED_FILE_FIELD)
                .ok_or_else(|| BackendError::MissingFile {
                    record_id: record_id.to_string(),
                    field: PROCESSED_FILE_FIELD.to_string(),
                })?;

        let file_url = file_url(&self.base_url, PROJECTS_COLLECTION, record_id, stored_name);
        info!(
            "application uploaded and record {record_id} status updated to 'processed'. File URL: {file_url}"
        );
        Ok(file_url)
    }
}

/// Public download URL for a stored file.
///
/// The backend accepts either the collection id or its name in the first
/// path segment.
pub fn file_url(base_url: &str, collection: &str, record_id: &str, filename: &str) -> String {
    format!("{base_url}/api/files/{collection}/{record_id}/{filename}")
}

/// Filename attached to the multipart upload for a processed record.
pub fn processed_file_name(record_id: &str) -> String {
    format!("processed_application_{record_id}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_url_follows_backend_path_pattern() {
        assert_eq!(
            file_url("http://localhost:8090", "col1", "rec1", "app.xlsx"),
            "http://localhost:8090/api/files/col1/rec1/app.xlsx"
        );
    }

    #[test]
    fn processed_file_name_embeds_record_id() {
        assert_eq!(
            processed_file_name("abc123"),
            "processed_application_abc123.xlsx"
        );
    }

    #[test]
    fn base_url_is_normalized() {
        let client = BackendClient::new("http://localhost:8090/", None);
        assert_eq!(client.base_url, "http://localhost:8090");
    }
}
