//! In-process sheet service.
//!
//! Holds one spreadsheet in memory and answers reads the way the remote API
//! does, including the omission of trailing empty cells. Useful for tests
//! and for running the storefront without network access.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::column::column_index;
use crate::error::{CatalogError, Result};
use crate::range::{A1Range, Dimension};
use crate::reference::SpreadsheetId;
use crate::service::SheetService;

#[derive(Debug, Clone)]
struct MemoryTab {
    title: Option<String>,
    rows: Vec<Vec<String>>,
}

/// A single spreadsheet held in memory
#[derive(Debug)]
pub struct MemorySheetService {
    id: SpreadsheetId,
    tabs: RwLock<Vec<MemoryTab>>,
}

impl MemorySheetService {
    pub fn new(id: SpreadsheetId) -> Self {
        Self {
            id,
            tabs: RwLock::new(Vec::new()),
        }
    }

    /// Append a titled tab
    pub fn with_tab<R, C>(self, title: &str, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        self.set_tab(title, rows);
        self
    }

    /// Append a tab that has no title
    pub fn with_untitled_tab(self) -> Self {
        self.write_tabs().push(MemoryTab {
            title: None,
            rows: Vec::new(),
        });
        self
    }

    /// Replace (or append) the contents of a tab
    pub fn set_tab<R, C>(&self, title: &str, rows: R)
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let mut tabs = self.write_tabs();
        match tabs.iter_mut().find(|t| t.title.as_deref() == Some(title)) {
            Some(tab) => tab.rows = rows,
            None => tabs.push(MemoryTab {
                title: Some(title.to_string()),
                rows,
            }),
        }
    }

    pub fn id(&self) -> &SpreadsheetId {
        &self.id
    }

    fn write_tabs(&self) -> std::sync::RwLockWriteGuard<'_, Vec<MemoryTab>> {
        self.tabs.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_tabs(&self) -> std::sync::RwLockReadGuard<'_, Vec<MemoryTab>> {
        self.tabs.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_id(&self, id: &SpreadsheetId) -> Result<()> {
        if *id != self.id {
            return Err(CatalogError::status(
                404,
                format!("spreadsheet '{}': Requested entity was not found.", id),
            ));
        }
        Ok(())
    }

    /// Cells covered by the range, row-major, before trimming
    fn select(rows: &[Vec<String>], range: &A1Range) -> Result<Vec<Vec<String>>> {
        let selected = match range {
            A1Range::WholeTab(_) => rows.to_vec(),
            A1Range::HeaderRow(_) => rows.iter().take(1).cloned().collect(),
            A1Range::Row { row, .. } => {
                let index = usize::try_from(*row).unwrap_or(usize::MAX);
                if index == 0 {
                    return Err(unparsable(range));
                }
                rows.get(index - 1).cloned().into_iter().collect()
            }
            A1Range::ColumnFrom {
                column, start_row, ..
            } => {
                let col = column_index(column).ok_or_else(|| unparsable(range))? as usize - 1;
                let start = usize::try_from(*start_row).unwrap_or(usize::MAX);
                if start == 0 {
                    return Err(unparsable(range));
                }
                rows.iter()
                    .skip(start - 1)
                    .map(|row| vec![row.get(col).cloned().unwrap_or_default()])
                    .collect()
            }
        };
        Ok(selected)
    }
}

fn unparsable(range: &A1Range) -> CatalogError {
    CatalogError::status(400, format!("Unable to parse range: {}", range))
}

/// Swap rows and columns, filling holes with empty cells
fn transpose(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|col| {
            rows.iter()
                .map(|row| row.get(col).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Drop trailing empty cells of every line, then trailing empty lines
fn trim_trailing(mut lines: Vec<Vec<String>>) -> Vec<Vec<String>> {
    for line in lines.iter_mut() {
        while line.last().is_some_and(|cell| cell.is_empty()) {
            line.pop();
        }
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

#[async_trait]
impl SheetService for MemorySheetService {
    fn name(&self) -> &str {
        "memory"
    }

    async fn tab_titles(&self, id: &SpreadsheetId) -> Result<Vec<Option<String>>> {
        self.check_id(id)?;
        Ok(self.read_tabs().iter().map(|t| t.title.clone()).collect())
    }

    async fn values(
        &self,
        id: &SpreadsheetId,
        range: &A1Range,
        dimension: Dimension,
    ) -> Result<Vec<Vec<String>>> {
        self.check_id(id)?;
        let tabs = self.read_tabs();
        let tab = tabs
            .iter()
            .find(|t| t.title.as_deref() == Some(range.tab()))
            .ok_or_else(|| unparsable(range))?;

        let selected = Self::select(&tab.rows, range)?;
        let laid_out = match dimension {
            Dimension::Rows => selected,
            Dimension::Columns => transpose(selected),
        };
        Ok(trim_trailing(laid_out))
    }
}
