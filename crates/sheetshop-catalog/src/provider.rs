//! Catalog data provider.
//!
//! Stateless accessor over a [`SheetService`]: every call goes to the remote
//! side and nothing is remembered between calls. Concurrent callers can
//! share one provider behind an `Arc`.

use tracing::debug;

use crate::column::column_letter;
use crate::error::{CatalogError, Result};
use crate::range::{A1Range, Dimension};
use crate::record::{Record, TabularData};
use crate::reference::{resolve_id, SpreadsheetId};
use crate::service::SheetService;

/// Title reported for a tab that has none
pub const DEFAULT_TAB_TITLE: &str = "Лист1";

/// Reads catalog tabs, rows and single records from a spreadsheet
#[derive(Debug, Clone)]
pub struct CatalogProvider<S> {
    service: S,
}

impl<S: SheetService> CatalogProvider<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The underlying sheet service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Titles of every tab of the spreadsheet at `url`, in remote order
    ///
    /// Untitled tabs are reported as [`DEFAULT_TAB_TITLE`] so the list
    /// stays one-to-one with the remote tabs.
    pub async fn list_tabs(&self, url: &str) -> Result<Vec<String>> {
        let id = resolve_id(url)?;
        debug!("Listing tabs of {} via {}", id, self.service.name());
        let titles = self.service.tab_titles(&id).await?;

        Ok(titles
            .into_iter()
            .map(|title| title.unwrap_or_else(|| DEFAULT_TAB_TITLE.to_string()))
            .collect())
    }

    /// Every row of a tab, header first
    ///
    /// Returns `None` when the tab has no rows at all. A tab holding only
    /// its header comes back as data of length 1; deciding that such a
    /// catalog is empty is up to the caller.
    pub async fn get_values(&self, url: &str, tab: &str) -> Result<Option<TabularData>> {
        let id = resolve_id(url)?;
        let rows = self
            .service
            .values(&id, &A1Range::whole_tab(tab), Dimension::Rows)
            .await?;

        if rows.is_empty() {
            debug!(
                "Tab '{}' of {} has no rows ({})",
                tab,
                id,
                self.service.name()
            );
            return Ok(None);
        }
        Ok(Some(TabularData::new(rows)))
    }

    /// The header row of a tab; empty if the tab itself is empty
    pub async fn get_header(&self, url_or_id: &str, tab: &str) -> Result<Vec<String>> {
        let id = SpreadsheetId::parse(url_or_id)?;
        self.header_of(&id, tab).await
    }

    async fn header_of(&self, id: &SpreadsheetId, tab: &str) -> Result<Vec<String>> {
        let rows = self
            .service
            .values(id, &A1Range::header_row(tab), Dimension::Rows)
            .await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// Find the first row whose `key_column` cell equals `key_value`
    ///
    /// Reads the header, then the key column alone, then the matching row:
    /// three round trips, none cached. A row inserted or removed remotely
    /// between the column read and the row read shifts positions, and the
    /// record returned may then belong to a neighbouring row; callers that
    /// care should compare the key field of the result.
    ///
    /// Matching is exact string equality. Position 0 of the column is the
    /// header cell itself. A value that only exists in a trailing empty
    /// cell omitted by the remote side is not found.
    ///
    /// # Errors
    /// [`CatalogError::ColumnNotFound`] if `key_column` is not in the header.
    pub async fn find_row(
        &self,
        url_or_id: &str,
        tab: &str,
        key_column: &str,
        key_value: &str,
    ) -> Result<Option<Record>> {
        let id = SpreadsheetId::parse(url_or_id)?;
        let header = self.header_of(&id, tab).await?;

        let position = header
            .iter()
            .position(|name| name == key_column)
            .ok_or_else(|| CatalogError::ColumnNotFound {
                column: key_column.to_string(),
                tab: tab.to_string(),
            })?;
        let letter = column_letter(position as u32 + 1, 1)?;

        let columns = self
            .service
            .values(&id, &A1Range::column_from(tab, &letter, 1), Dimension::Columns)
            .await?;
        let matched = columns
            .first()
            .and_then(|cells| cells.iter().position(|cell| cell == key_value));

        let Some(index) = matched else {
            debug!(
                "No '{}' = '{}' in tab '{}' of {}",
                key_column, key_value, tab, id
            );
            return Ok(None);
        };

        let row_number = index as u32 + 1;
        debug!(
            "'{}' = '{}' found at row {} of tab '{}' ({})",
            key_column,
            key_value,
            row_number,
            tab,
            self.service.name()
        );
        let rows = self
            .service
            .values(&id, &A1Range::row(tab, row_number), Dimension::Rows)
            .await?;

        Ok(rows.first().map(|row| Record::from_row(&header, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MemorySheetService;

    const URL: &str = "https://docs.google.com/spreadsheets/d/shop42/edit#gid=0";

    fn provider() -> CatalogProvider<MemorySheetService> {
        let service = MemorySheetService::new(SpreadsheetId::parse("shop42").unwrap())
            .with_tab(
                "Стулья",
                vec![
                    vec!["Номер", "Название", "Ссылка на товар"],
                    vec!["1", "Табурет", "https://shop.example/1"],
                    vec!["42", "Стул"],
                ],
            )
            .with_tab("Пусто", Vec::<Vec<&str>>::new())
            .with_tab("Только шапка", vec![vec!["Номер", "Название"]]);
        CatalogProvider::new(service)
    }

    #[tokio::test]
    async fn test_service_name() {
        let provider = CatalogProvider::new(std::sync::Arc::new(
            MemorySheetService::new(SpreadsheetId::parse("shop42").unwrap()),
        ));
        assert_eq!(provider.service().name(), "memory");
    }

    #[tokio::test]
    async fn test_list_tabs_in_order() {
        let tabs = provider().list_tabs(URL).await.unwrap();
        assert_eq!(tabs, vec!["Стулья", "Пусто", "Только шапка"]);
    }

    #[tokio::test]
    async fn test_list_tabs_is_repeatable() {
        let provider = provider();
        let first = provider.list_tabs(URL).await.unwrap();
        let second = provider.list_tabs(URL).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_tabs_untitled_fallback() {
        let service = MemorySheetService::new(SpreadsheetId::parse("shop42").unwrap())
            .with_tab("A", vec![vec!["x"]])
            .with_untitled_tab();
        let tabs = CatalogProvider::new(service).list_tabs(URL).await.unwrap();
        assert_eq!(tabs, vec!["A", DEFAULT_TAB_TITLE]);
    }

    #[tokio::test]
    async fn test_list_tabs_malformed_url() {
        let err = provider().list_tabs("https://example.com").await.unwrap_err();
        assert!(matches!(err, CatalogError::MalformedReference(_)));
    }

    #[tokio::test]
    async fn test_get_values() {
        let data = provider().get_values(URL, "Стулья").await.unwrap().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.header(), ["Номер", "Название", "Ссылка на товар"]);
    }

    #[tokio::test]
    async fn test_get_values_empty_tab() {
        assert!(provider().get_values(URL, "Пусто").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_values_header_only() {
        let data = provider()
            .get_values(URL, "Только шапка")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(data.len(), 1);
        assert!(!data.has_data_rows());
    }

    #[tokio::test]
    async fn test_get_values_unknown_tab() {
        let err = provider().get_values(URL, "Столы").await.unwrap_err();
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_get_header() {
        let provider = provider();
        assert_eq!(
            provider.get_header("shop42", "Только шапка").await.unwrap(),
            vec!["Номер", "Название"]
        );
        assert!(provider.get_header(URL, "Пусто").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_row() {
        let record = provider()
            .find_row("shop42", "Стулья", "Номер", "1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["Номер", "Название", "Ссылка на товар"]
        );
        assert_eq!(record.get("Название"), Some("Табурет"));
        assert_eq!(record.get("Ссылка на товар"), Some("https://shop.example/1"));
    }

    #[tokio::test]
    async fn test_find_row_pads_short_row() {
        let record = provider()
            .find_row(URL, "Стулья", "Номер", "42")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.get("Название"), Some("Стул"));
        assert_eq!(record.get("Ссылка на товар"), Some(""));
    }

    #[tokio::test]
    async fn test_find_row_not_found() {
        let found = provider()
            .find_row("shop42", "Стулья", "Номер", "999")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_row_missing_column() {
        let err = provider()
            .find_row("shop42", "Стулья", "Артикул", "1")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ColumnNotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_row_matches_header_cell() {
        let record = provider()
            .find_row("shop42", "Стулья", "Номер", "Номер")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.get("Номер"), Some("Номер"));
    }

    #[tokio::test]
    async fn test_find_row_trimmed_empty_not_found() {
        let service = MemorySheetService::new(SpreadsheetId::parse("shop42").unwrap()).with_tab(
            "Лампы",
            vec![vec!["Название", "Номер"], vec!["Торшер", "5"], vec!["Бра", ""]],
        );
        let found = CatalogProvider::new(service)
            .find_row("shop42", "Лампы", "Номер", "")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_row_uses_column_letter() {
        let service = MemorySheetService::new(SpreadsheetId::parse("shop42").unwrap()).with_tab(
            "Лампы",
            vec![vec!["Название", "Цена", "Номер"], vec!["Торшер", "100", "5"]],
        );
        let record = CatalogProvider::new(service)
            .find_row("shop42", "Лампы", "Номер", "5")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.get("Название"), Some("Торшер"));
    }
}
