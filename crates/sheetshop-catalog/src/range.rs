//! Range expressions in the remote service's A1 addressing grammar.

use std::fmt;

/// A range inside one tab
///
/// Tab names are emitted as-is, without quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum A1Range {
    /// Every populated cell of the tab: `Tab`
    WholeTab(String),
    /// The first row only: `Tab!1:1`
    HeaderRow(String),
    /// One column from `start_row` to the bottom: `Tab!C1:C`
    ColumnFrom {
        tab: String,
        column: String,
        start_row: u32,
    },
    /// One full row: `Tab!7:7`
    Row { tab: String, row: u32 },
}

impl A1Range {
    pub fn whole_tab(tab: impl Into<String>) -> Self {
        A1Range::WholeTab(tab.into())
    }

    pub fn header_row(tab: impl Into<String>) -> Self {
        A1Range::HeaderRow(tab.into())
    }

    pub fn column_from(tab: impl Into<String>, column: impl Into<String>, start_row: u32) -> Self {
        A1Range::ColumnFrom {
            tab: tab.into(),
            column: column.into(),
            start_row,
        }
    }

    pub fn row(tab: impl Into<String>, row: u32) -> Self {
        A1Range::Row {
            tab: tab.into(),
            row,
        }
    }

    /// Name of the tab this range points into
    pub fn tab(&self) -> &str {
        match self {
            A1Range::WholeTab(tab) | A1Range::HeaderRow(tab) => tab,
            A1Range::ColumnFrom { tab, .. } | A1Range::Row { tab, .. } => tab,
        }
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            A1Range::WholeTab(tab) => write!(f, "{}", tab),
            A1Range::HeaderRow(tab) => write!(f, "{}!1:1", tab),
            A1Range::ColumnFrom {
                tab,
                column,
                start_row,
            } => write!(f, "{}!{}{}:{}", tab, column, start_row, column),
            A1Range::Row { tab, row } => write!(f, "{}!{}:{}", tab, row, row),
        }
    }
}

/// Layout of returned values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    /// Outer list is rows
    #[default]
    Rows,
    /// Outer list is columns
    Columns,
}

impl Dimension {
    /// Value of the `majorDimension` query parameter
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dimension::Rows => "ROWS",
            Dimension::Columns => "COLUMNS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_tab() {
        assert_eq!(A1Range::whole_tab("Стулья").to_string(), "Стулья");
    }

    #[test]
    fn test_header_row() {
        assert_eq!(A1Range::header_row("Chairs").to_string(), "Chairs!1:1");
    }

    #[test]
    fn test_column_from() {
        assert_eq!(
            A1Range::column_from("Chairs", "AB", 1).to_string(),
            "Chairs!AB1:AB"
        );
    }

    #[test]
    fn test_single_row() {
        assert_eq!(A1Range::row("Chairs", 7).to_string(), "Chairs!7:7");
    }

    #[test]
    fn test_tab_accessor() {
        assert_eq!(A1Range::row("Tables", 2).tab(), "Tables");
        assert_eq!(A1Range::column_from("Lamps", "C", 1).tab(), "Lamps");
    }

    #[test]
    fn test_dimension_names() {
        assert_eq!(Dimension::Rows.as_str(), "ROWS");
        assert_eq!(Dimension::Columns.as_str(), "COLUMNS");
        assert_eq!(Dimension::default(), Dimension::Rows);
    }
}
