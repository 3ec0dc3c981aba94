//! Storefront configuration
//!
//! # Configuration File
//!
//! Settings are loaded from `sheetshop.toml` in the working directory,
//! then overridden by environment variables (`SHEET_URL`, `SHEET_ID`,
//! `SHEETS_CREDS_FILE`, `SHEETS_CREDS_JSON`, `ADMIN_CHAT_ID`,
//! `ADMIN_CHAT_URL`, `MANAGER_USERNAME`, `MANAGER_PHONE`, `SHEETS_API_URL`,
//! `SHEETS_TIMEOUT_SECS`):
//!
//! ```toml
//! [catalog]
//! spreadsheet_url = "https://docs.google.com/spreadsheets/d/1AbC/edit"
//! primary_key_column = "Номер"
//! link_column = "Ссылка на товар"
//!
//! [credentials]
//! file = "google_creds.json"
//!
//! [admin]
//! chat_id = -1001234567890
//! chat_url = "https://t.me/shop_admin"
//!
//! [manager]
//! username = "@shop_manager"
//! phone = "+7 900 000-00-00"
//!
//! [sheets]
//! timeout_secs = 30
//! ```

mod settings;


pub use settings::{
    AdminSettings, CatalogSettings, CredentialSettings, CredentialSource, ManagerSettings,
    Settings, SheetsSettings, ShopProfile, ValidatedSettings, CONFIG_FILE_NAME,
    DEFAULT_LINK_COLUMN, DEFAULT_PRIMARY_KEY_COLUMN,
};
