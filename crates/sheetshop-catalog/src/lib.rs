//! # sheetshop-catalog
//!
//! Spreadsheet-backed catalog access for sheetshop - list the tabs of a
//! remote spreadsheet, read a tab as rows, and look up a single product row
//! by a primary-key column.
//!
//! ## Features
//!
//! - **Reference resolution**: Spreadsheet URL to document identifier
//! - **Google Sheets**: REST API v4 client using `reqwest`
//! - **Service accounts**: JWT-bearer token exchange with token reuse
//! - **Records**: Header-keyed rows with an explicit padding policy
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sheetshop_catalog::{
//!     CatalogProvider, GoogleSheetsService, ServiceAccountAuth, ServiceAccountKey, ServiceConfig,
//! };
//!
//! let key = ServiceAccountKey::from_file("google_creds.json")?;
//! let auth = Arc::new(ServiceAccountAuth::new(key)?);
//! let service = GoogleSheetsService::new(ServiceConfig::default(), auth)?;
//! let catalog = CatalogProvider::new(service);
//!
//! let tabs = catalog.list_tabs(url).await?;
//! let chair = catalog.find_row(url, &tabs[0], "Номер", "42").await?;
//! ```

pub mod auth;
pub mod column;
pub mod error;
pub mod provider;
pub mod range;
pub mod record;
pub mod reference;
pub mod service;

// Re-exports
pub use auth::{AuthError, ServiceAccountAuth, ServiceAccountKey, StaticToken, TokenProvider};
pub use column::{column_index, column_letter};
pub use error::{CatalogError, Result};
pub use provider::{CatalogProvider, DEFAULT_TAB_TITLE};
pub use range::{A1Range, Dimension};
pub use record::{Record, TabularData};
pub use reference::{resolve_id, SpreadsheetId};
pub use service::{
    GoogleSheetsService, MemorySheetService, ServiceConfig, SheetService, DEFAULT_SHEETS_URL,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
