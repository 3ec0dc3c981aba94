//! Remote tabular service implementations.
//!
//! This module contains adapters for the services that actually hold the
//! catalog spreadsheet (the Google Sheets REST API, an in-process table).

pub mod google;
pub mod memory;

pub use google::{GoogleSheetsService, ServiceConfig, DEFAULT_SHEETS_URL};
pub use memory::MemorySheetService;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::range::{A1Range, Dimension};
use crate::reference::SpreadsheetId;

/// The two reads the catalog needs from a remote spreadsheet
#[async_trait]
pub trait SheetService: Send + Sync {
    /// Human-readable name of this backend (e.g., "google-sheets")
    fn name(&self) -> &str;

    /// Titles of every tab, in the order the service reports them
    ///
    /// A tab without a title is reported as `None`, never skipped.
    async fn tab_titles(&self, id: &SpreadsheetId) -> Result<Vec<Option<String>>>;

    /// Cell values of a range
    ///
    /// # Arguments
    /// * `range` - Range in A1 notation (see [`A1Range`])
    /// * `dimension` - Whether the outer list holds rows or columns
    ///
    /// # Returns
    /// Cell values as strings. Trailing empty cells and trailing empty
    /// rows (or columns) may be omitted.
    async fn values(
        &self,
        id: &SpreadsheetId,
        range: &A1Range,
        dimension: Dimension,
    ) -> Result<Vec<Vec<String>>>;
}

#[async_trait]
impl<T: SheetService + ?Sized> SheetService for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn tab_titles(&self, id: &SpreadsheetId) -> Result<Vec<Option<String>>> {
        (**self).tab_titles(id).await
    }

    async fn values(
        &self,
        id: &SpreadsheetId,
        range: &A1Range,
        dimension: Dimension,
    ) -> Result<Vec<Vec<String>>> {
        (**self).values(id, range, dimension).await
    }
}
