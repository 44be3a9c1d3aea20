//! Mock cloud-folder crawl.
//!
//! Stands in for a real Drive integration: accepts any non-empty folder
//! link, waits a fixed simulated delay, and returns a hardcoded file list.

use std::time::Duration;

use crate::error::ExtractionError;

/// Category stamped on every crawled task.
pub const DRIVE_CRAWL_CATEGORY: &str = "Drive Crawl";

const MOCK_DRIVE_FILES: [&str; 6] = [
    "Quantum Mechanics Lecture 01 - Wavefunctions",
    "Thermodynamics Lab Report Template",
    "Advanced Calculus Midterm Revision",
    "Linear Algebra - Eigenvalues.pdf",
    "Complex Variables Homework 4",
    "Special Relativity Reading List",
];

/// Simulated crawl latency.
pub const DEFAULT_CRAWL_DELAY: Duration = Duration::from_secs(3);

/// The mock crawl collaborator.
#[derive(Debug, Clone)]
pub struct DriveCrawler {
    delay: Duration,
}

impl Default for DriveCrawler {
    fn default() -> Self {
        Self {
            delay: DEFAULT_CRAWL_DELAY,
        }
    }
}

impl DriveCrawler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the simulated delay (tests use zero).
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Crawl the "folder". The link is not validated beyond non-emptiness.
    pub fn crawl(&self, folder_link: &str) -> Result<Vec<String>, ExtractionError> {
        if folder_link.trim().is_empty() {
            return Err(ExtractionError::EmptyFolderLink);
        }

        std::thread::sleep(self.delay);

        Ok(MOCK_DRIVE_FILES.iter().map(|f| f.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_link_is_rejected() {
        let crawler = DriveCrawler::with_delay(Duration::ZERO);
        assert!(matches!(
            crawler.crawl("  "),
            Err(ExtractionError::EmptyFolderLink)
        ));
    }

    #[test]
    fn crawl_returns_the_fixed_listing() {
        let crawler = DriveCrawler::with_delay(Duration::ZERO);
        let titles = crawler.crawl("https://drive.example/folder/abc").unwrap();
        assert_eq!(titles.len(), 6);
        assert!(titles.contains(&"Linear Algebra - Eigenvalues.pdf".to_string()));
    }
}
