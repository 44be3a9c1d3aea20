//! Import adapters for externally sourced materials.
//!
//! Two collaborators feed the store: the document-extraction service (raw
//! PDF bytes in, `{className, category}` records out) and the mock
//! cloud-folder crawl (folder link in, title list out). Both are
//! best-effort: a failure adds no tasks and is logged, never surfaced as a
//! blocking error.

pub mod drive;
pub mod gemini;

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};
use crate::store::TaskStore;
use crate::task::{Task, TaskSource};

pub use drive::{DriveCrawler, DRIVE_CRAWL_CATEGORY};
pub use gemini::GeminiExtractor;

/// One record produced by the document-extraction collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "className")]
    pub class_name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// The document-extraction collaborator: raw bytes in, records out.
pub trait DocumentExtractor {
    fn extract(&self, pdf: &[u8]) -> Result<Vec<ExtractedRecord>, ExtractionError>;
}

/// Run an extractor, mapping any failure to "no records" with a warning.
pub fn extract_best_effort(extractor: &dyn DocumentExtractor, pdf: &[u8]) -> Vec<ExtractedRecord> {
    match extractor.extract(pdf) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, "document extraction failed");
            Vec::new()
        }
    }
}

/// Merge extracted records into the store as AI-imported tasks.
///
/// Returns the number of tasks actually added after deduplication.
pub fn import_documents(
    store: &mut TaskStore,
    records: Vec<ExtractedRecord>,
    today: NaiveDate,
) -> Result<usize> {
    let batch = build_batch(
        store,
        records.into_iter().map(|r| (r.class_name, r.category)),
        TaskSource::AiImported,
        today,
    );
    store.insert_imported(batch)
}

/// Merge crawled titles into the store as cloud-imported tasks.
pub fn import_crawl(store: &mut TaskStore, titles: Vec<String>, today: NaiveDate) -> Result<usize> {
    let batch = build_batch(
        store,
        titles
            .into_iter()
            .map(|t| (t, Some(DRIVE_CRAWL_CATEGORY.to_string()))),
        TaskSource::CloudImported,
        today,
    );
    store.insert_imported(batch)
}

/// Map external records to tasks, dropping normalized-title duplicates when
/// the active strategy asks for it.
fn build_batch(
    store: &TaskStore,
    items: impl Iterator<Item = (String, Option<String>)>,
    source: TaskSource,
    today: NaiveDate,
) -> Vec<Task> {
    let dedup = store.strategy().dedup_imports();
    let existing: HashSet<String> = store
        .tasks()
        .iter()
        .map(|t| t.title.to_lowercase())
        .collect();

    let mut batch = Vec::new();
    for (title, category) in items {
        let title = title.trim();
        if title.is_empty() {
            continue;
        }
        if dedup && existing.contains(&title.to_lowercase()) {
            continue;
        }
        let mut task = Task::new(title, source);
        if let Some(category) = category {
            task = task.with_category(category);
        }
        store.strategy().on_add(&mut task, today);
        batch.push(task);
    }
    batch
}

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "studyhouse";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
