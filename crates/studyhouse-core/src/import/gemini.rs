//! Gemini-backed document extraction.
//!
//! Sends the uploaded PDF inline to the generateContent endpoint with a
//! structured-JSON response schema and parses the returned record list. The
//! API key comes from the OS keyring; the base URL is injectable for tests.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde_json::json;

use super::keyring_store;
use super::{DocumentExtractor, ExtractedRecord};
use crate::error::ExtractionError;

const API_BASE: &str = "https://generativelanguage.googleapis.com";
const API_KEY_ENTRY: &str = "gemini_api_key";

const EXTRACTION_PROMPT: &str = "Extract all classes or course names from the tables in this \
curriculum PDF. For each class, provide the course title and if possible, its category \
(e.g., Core, Elective, Humanities). Return as a structured JSON list.";

/// Document extractor backed by the Gemini generateContent API.
pub struct GeminiExtractor {
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiExtractor {
    /// Load the API key from the keyring (empty if not stored yet).
    pub fn new(model: impl Into<String>) -> Self {
        let api_key = keyring_store::get(API_KEY_ENTRY)
            .ok()
            .flatten()
            .unwrap_or_default();
        Self {
            api_key,
            model: model.into(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Build an extractor with an explicit key, bypassing the keyring.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the extractor at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Persist the API key to the OS keyring.
    pub fn set_api_key(api_key: &str) -> Result<(), Box<dyn std::error::Error>> {
        keyring_store::set(API_KEY_ENTRY, api_key)
    }

    fn request_body(&self, pdf: &[u8]) -> serde_json::Value {
        json!({
            "contents": {
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": "application/pdf",
                            "data": BASE64.encode(pdf),
                        }
                    },
                    { "text": EXTRACTION_PROMPT },
                ]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "className": {
                                "type": "STRING",
                                "description": "The name of the class or course",
                            },
                            "category": {
                                "type": "STRING",
                                "description": "The category or department of the class",
                            },
                        },
                        "required": ["className"],
                    },
                },
            },
        })
    }
}

impl DocumentExtractor for GeminiExtractor {
    fn extract(&self, pdf: &[u8]) -> Result<Vec<ExtractedRecord>, ExtractionError> {
        if self.api_key.is_empty() {
            return Err(ExtractionError::NotConfigured);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = self.request_body(pdf);

        let rt = tokio::runtime::Runtime::new().map_err(ExtractionError::Runtime)?;
        let resp: serde_json::Value = rt.block_on(async {
            Client::new()
                .post(&url)
                .json(&body)
                .send()
                .await?
                .json()
                .await
        })?;

        if let Some(err) = resp.get("error") {
            return Err(ExtractionError::Api(err.to_string()));
        }

        let text = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ExtractionError::Malformed("missing response text".to_string()))?;

        serde_json::from_str(text).map_err(|err| ExtractionError::Malformed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(base_url: &str) -> GeminiExtractor {
        GeminiExtractor::with_api_key("test-key", "test-model").with_base_url(base_url)
    }

    #[test]
    fn missing_api_key_is_not_configured() {
        let extractor = GeminiExtractor::with_api_key("", "test-model");
        assert!(matches!(
            extractor.extract(b"%PDF-1.4"),
            Err(ExtractionError::NotConfigured)
        ));
    }

    #[test]
    fn parses_records_from_response_text() {
        let mut server = mockito::Server::new();
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "[{\"className\": \"Calculus\", \"category\": \"Core\"}]"
                    }]
                }
            }]
        });
        let mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let records = extractor(&server.url()).extract(b"%PDF-1.4").unwrap();
        mock.assert();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class_name, "Calculus");
        assert_eq!(records[0].category.as_deref(), Some("Core"));
    }

    #[test]
    fn api_error_objects_are_surfaced() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 400, "message": "bad request"}}"#)
            .create();

        assert!(matches!(
            extractor(&server.url()).extract(b"%PDF-1.4"),
            Err(ExtractionError::Api(_))
        ));
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create();

        assert!(matches!(
            extractor(&server.url()).extract(b"%PDF-1.4"),
            Err(ExtractionError::Malformed(_))
        ));
    }
}
