//! Import commands: document extraction, cloud crawl, sync-phase control.

use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;
use studyhouse_core::import::{extract_best_effort, import_crawl, import_documents};
use studyhouse_core::{Config, Database, DriveCrawler, GeminiExtractor};

#[derive(Subcommand)]
pub enum ImportAction {
    /// Extract materials from a curriculum PDF
    Pdf {
        /// Path to the PDF file
        path: PathBuf,
    },
    /// Crawl a cloud folder for materials (mock)
    Drive {
        /// Folder link
        link: String,
    },
    /// Finish the sync phase and move on to studying
    Finish,
    /// Re-open the sync phase
    Reopen,
}

pub fn run(action: ImportAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ImportAction::Pdf { path } => {
            let config = Config::load_or_default();
            let mut store = super::open_store()?;
            let bytes = std::fs::read(&path)?;

            let extractor = GeminiExtractor::new(config.extraction.model.as_str());
            let records = extract_best_effort(&extractor, &bytes);
            let added = import_documents(&mut store, records, super::today())?;

            println!("{}", json!({ "added": added }));
        }
        ImportAction::Drive { link } => {
            let mut store = super::open_store()?;
            let titles = DriveCrawler::new().crawl(&link)?;
            let added = import_crawl(&mut store, titles, super::today())?;

            println!("{}", json!({ "added": added }));
        }
        ImportAction::Finish => {
            let db = Database::open()?;
            db.save_sync_phase(false)?;
            println!("Sync phase closed. Time to study.");
        }
        ImportAction::Reopen => {
            let db = Database::open()?;
            db.save_sync_phase(true)?;
            println!("Sync phase re-opened.");
        }
    }
    Ok(())
}
