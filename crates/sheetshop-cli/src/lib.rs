//! sheetshop CLI - Command-line interface library
//!
//! This library provides the CLI functionality for sheetshop:
//! - Catalog reads: list tabs, dump a tab, print a header, find a row
//! - Storefront: run the greeting, catalog and enquiry screens against
//!   the console
//!
//! # Library Usage
//!
//! ```ignore
//! use sheetshop_cli::{connect, load_settings, tabs_command, OutputFormat};
//!
//! let settings = load_settings(None)?;
//! let catalog = CatalogProvider::new(connect(&settings)?);
//! tabs_command(&catalog, &settings.shop.spreadsheet_url, OutputFormat::Json, &mut out).await?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # List catalog tabs
//! sheetshop tabs
//!
//! # Dump a tab as JSON records
//! sheetshop values "Стулья" --format json
//!
//! # Look a product up by number
//! sheetshop find "Стулья" 42
//!
//! # Send an enquiry to the admin chat, printed to the console
//! sheetshop request "Стулья" 42 --user ivan
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    browse_command, column_letter_command, find_command, header_command, request_command,
    start_command, tabs_command, values_command,
};
pub use app::{connect, load_settings, run_cli, OutputFormat};
