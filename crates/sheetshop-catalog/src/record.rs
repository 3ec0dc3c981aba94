//! Tabular data and header-keyed records.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

/// Rows of a tab in row-major order; the first row is the header
///
/// Data rows may be shorter than the header because the remote side
/// omits trailing empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabularData {
    rows: Vec<Vec<String>>,
}

impl TabularData {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows including the header
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The header row (empty if there are no rows)
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every row after the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// True when there is at least one row below the header
    pub fn has_data_rows(&self) -> bool {
        self.rows.len() >= 2
    }

    /// Data rows zipped against the header
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        let header = self.header();
        self.data_rows()
            .iter()
            .map(move |row| Record::from_row(header, row))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// One row keyed by column name, in header order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Pair a data row with the header by position
    ///
    /// A row shorter than the header is padded with empty values, so the
    /// keys always equal the header. Cells past the end of the header have
    /// no name and are dropped.
    pub fn from_row<H, V>(header: &[H], row: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        if row.len() > header.len() {
            debug!(
                "Dropping {} cell(s) beyond the {}-column header",
                row.len() - header.len(),
                header.len()
            );
        }

        let fields = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = row.get(i).map(|v| v.as_ref()).unwrap_or("");
                (name.as_ref().to_string(), value.to_string())
            })
            .collect();

        Self { fields }
    }

    /// Value of the field with this name
    ///
    /// When the header repeats a name, the last such column wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the field, or `""` if the column does not exist
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Project the record back onto a header, one value per column
    pub fn values_for<H: AsRef<str>>(&self, header: &[H]) -> Vec<String> {
        header
            .iter()
            .map(|name| self.get_or_empty(name.as_ref()).to_string())
            .collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // One entry per name, at its first position, holding the value `get` sees
        let mut seen = HashSet::new();
        let mut map = serializer.serialize_map(None)?;
        for (name, _) in &self.fields {
            if seen.insert(name.as_str()) {
                map.serialize_entry(name, self.get_or_empty(name))?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_keys_follow_header() {
        let header = strings(&["Номер", "Название"]);
        let record = Record::from_row(&header, &strings(&["42", "Стул"]));

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Номер", "Название"]);
        assert_eq!(record.get("Номер"), Some("42"));
        assert_eq!(record.get("Название"), Some("Стул"));
    }

    #[test]
    fn test_record_rezip_is_identical() {
        let header = strings(&["Номер", "Название"]);
        let record = Record::from_row(&header, &strings(&["42", "Стул"]));
        let again = Record::from_row(&header, &record.values_for(&header));
        assert_eq!(record, again);
    }

    #[test]
    fn test_short_row_is_padded() {
        let header = strings(&["Номер", "Название", "Цена"]);
        let record = Record::from_row(&header, &strings(&["7"]));

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("Название"), Some(""));
        assert_eq!(record.get("Цена"), Some(""));
    }

    #[test]
    fn test_long_row_is_truncated() {
        let header = strings(&["A"]);
        let record = Record::from_row(&header, &strings(&["1", "2", "3"]));
        assert_eq!(record.len(), 1);
        assert_eq!(record.values().collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn test_get_missing_key() {
        let record = Record::from_row(&strings(&["A"]), &strings(&["1"]));
        assert_eq!(record.get("B"), None);
        assert_eq!(record.get_or_empty("B"), "");
    }

    #[test]
    fn test_serialize_in_header_order() {
        let header = strings(&["b", "a"]);
        let record = Record::from_row(&header, &strings(&["2", "1"]));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let header = strings(&["Номер", "Цена", "Цена"]);
        let record = Record::from_row(&header, &strings(&["1", "100", "90"]));

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("Цена"), Some("90"));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Номер":"1","Цена":"90"}"#);
    }

    #[test]
    fn test_tabular_header_only() {
        let data = TabularData::new(vec![strings(&["Номер", "Название"])]);
        assert_eq!(data.len(), 1);
        assert!(!data.has_data_rows());
        assert!(data.data_rows().is_empty());
        assert_eq!(data.records().count(), 0);
    }

    #[test]
    fn test_tabular_records() {
        let data = TabularData::new(vec![
            strings(&["Номер", "Название"]),
            strings(&["1", "Стул"]),
            strings(&["2"]),
        ]);
        let records: Vec<Record> = data.records().collect();
        assert!(data.has_data_rows());
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Название"), Some(""));
    }

    #[test]
    fn test_tabular_empty() {
        let data = TabularData::default();
        assert!(data.is_empty());
        assert!(data.header().is_empty());
        assert!(data.data_rows().is_empty());
    }
}
