//! PocketBase Web API module
//!
//! Thin client for the document backend: collection queries, single-record
//! fetches, file download by constructed URL, and the multipart record patch
//! that attaches a processed application file.

pub mod client;
pub mod constants;
pub mod error;
pub mod models;

pub use client::BackendClient;
pub use error::BackendError;
pub use models::{Record, RecordList};
