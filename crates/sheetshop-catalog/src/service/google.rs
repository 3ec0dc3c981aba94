//! Google Sheets REST API client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::error::{CatalogError, Result};
use crate::range::{A1Range, Dimension};
use crate::reference::SpreadsheetId;
use crate::service::SheetService;

/// Default Sheets API server
pub const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the Sheets API
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the API server (e.g., `https://sheets.googleapis.com`)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SHEETS_URL)
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Sheets API v4 client
pub struct GoogleSheetsService {
    config: ServiceConfig,
    client: Client,
    auth: Arc<dyn TokenProvider>,
}

impl GoogleSheetsService {
    /// Create a client; the authorization handle is used as-is
    pub fn new(config: ServiceConfig, auth: Arc<dyn TokenProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `{base}/v4/spreadsheets/{id}/{extra...}` with every segment escaped
    fn endpoint(&self, id: &SpreadsheetId, extra: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| CatalogError::transport(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::transport("API URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", id.as_str()])
            .extend(extra);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::status(
                status.as_u16(),
                format!("{}: {}", what, error_message(&body)),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::transport(format!("Invalid response for {}: {}", what, e)))
    }
}

// ---- Serde models for Sheets API JSON responses ----

#[derive(Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    #[serde(default)]
    properties: Option<SheetProperties>,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: Option<String>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Prefer the API's own error message over the raw body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.is_empty() => "no response body".to_string(),
        Err(_) => body.to_string(),
    }
}

/// Render a JSON cell as text
fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetService for GoogleSheetsService {
    fn name(&self) -> &str {
        "google-sheets"
    }

    async fn tab_titles(&self, id: &SpreadsheetId) -> Result<Vec<Option<String>>> {
        debug!("Fetching tab titles of spreadsheet {}", id);
        let url = self.endpoint(id, &[])?;
        let metadata: SpreadsheetMetadata = self
            .get(
                url,
                &[("fields", "sheets.properties.title")],
                &format!("spreadsheet '{}'", id),
            )
            .await?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.and_then(|p| p.title))
            .collect())
    }

    async fn values(
        &self,
        id: &SpreadsheetId,
        range: &A1Range,
        dimension: Dimension,
    ) -> Result<Vec<Vec<String>>> {
        let range_str = range.to_string();
        debug!(
            "Fetching values of '{}' from spreadsheet {} ({})",
            range_str,
            id,
            dimension.as_str()
        );
        let url = self.endpoint(id, &["values", &range_str])?;
        let body: ValueRange = self
            .get(
                url,
                &[("majorDimension", dimension.as_str())],
                &format!("range '{}'", range_str),
            )
            .await?;

        Ok(body
            .values
            .into_iter()
            .map(|line| line.into_iter().map(cell_to_string).collect())
            .collect())
    }
}
