//! Configuration Settings
//!
//! Raw settings as read from `sheetshop.toml` and the environment, and the
//! validated form the storefront runs with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sheetshop_catalog::{resolve_id, ServiceConfig, SpreadsheetId, DEFAULT_SHEETS_URL};
use tracing::{debug, warn};

use crate::card::CardLayout;
use crate::error::ConfigError;
use crate::messenger::ChatId;

/// Settings file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "sheetshop.toml";

pub const DEFAULT_PRIMARY_KEY_COLUMN: &str = "Номер";
pub const DEFAULT_LINK_COLUMN: &str = "Ссылка на товар";

/// Accepted prefixes for the admin chat link
const LINK_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Which spreadsheet holds the catalog
    pub catalog: CatalogSettings,
    /// Service-account key
    pub credentials: CredentialSettings,
    /// Where enquiries go
    pub admin: AdminSettings,
    /// Contact printed under every card
    pub manager: ManagerSettings,
    /// Sheets API connection
    pub sheets: SheetsSettings,
}

/// Catalog spreadsheet settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub spreadsheet_url: Option<String>,
    /// Derived from `spreadsheet_url` when absent
    pub spreadsheet_id: Option<String>,
    pub primary_key_column: String,
    pub link_column: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            spreadsheet_url: None,
            spreadsheet_id: None,
            primary_key_column: DEFAULT_PRIMARY_KEY_COLUMN.to_string(),
            link_column: DEFAULT_LINK_COLUMN.to_string(),
        }
    }
}

/// Service-account key location; `json` wins when both are set
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CredentialSettings {
    /// Path to the key file
    pub file: Option<String>,
    /// Inline key JSON
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminSettings {
    pub chat_id: Option<i64>,
    pub chat_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ManagerSettings {
    pub username: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsSettings {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for SheetsSettings {
    fn default() -> Self {
        let service = ServiceConfig::default();
        Self {
            api_url: DEFAULT_SHEETS_URL.to_string(),
            timeout_secs: service.timeout_secs,
        }
    }
}

/// Where the service-account key comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    File(PathBuf),
    Json(String),
}

/// Shop-facing part of the validated settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopProfile {
    /// Used to list tabs and read whole tabs
    pub spreadsheet_url: String,
    /// Used for row lookups
    pub spreadsheet_id: SpreadsheetId,
    pub admin_chat: ChatId,
    pub admin_chat_url: String,
    pub card: CardLayout,
}

/// Settings that passed validation; never changed afterwards
#[derive(Debug, Clone)]
pub struct ValidatedSettings {
    pub shop: ShopProfile,
    pub credentials: CredentialSource,
    pub sheets: ServiceConfig,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read a settings file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Settings for a run: the given file (or `sheetshop.toml` in the
    /// working directory, if there is one), then the process environment
    /// on top.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE_NAME).is_file() => {
                Self::from_file(Path::new(CONFIG_FILE_NAME))?
            }
            None => {
                debug!("No {} found, using environment only", CONFIG_FILE_NAME);
                Self::default()
            }
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Overlay values from an environment lookup; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("SHEET_URL") {
            self.catalog.spreadsheet_url = Some(v);
        }
        if let Some(v) = get("SHEET_ID") {
            self.catalog.spreadsheet_id = Some(v);
        }
        if let Some(v) = get("SHEETS_CREDS_FILE") {
            self.credentials.file = Some(v);
        }
        if let Some(v) = get("SHEETS_CREDS_JSON") {
            self.credentials.json = Some(v);
        }
        if let Some(v) = get("ADMIN_CHAT_ID") {
            self.admin.chat_id = Some(parse_number("ADMIN_CHAT_ID", &v)?);
        }
        if let Some(v) = get("ADMIN_CHAT_URL") {
            self.admin.chat_url = Some(v);
        }
        if let Some(v) = get("MANAGER_USERNAME") {
            self.manager.username = Some(v);
        }
        if let Some(v) = get("MANAGER_PHONE") {
            self.manager.phone = Some(v);
        }
        if let Some(v) = get("SHEETS_API_URL") {
            self.sheets.api_url = v;
        }
        if let Some(v) = get("SHEETS_TIMEOUT_SECS") {
            self.sheets.timeout_secs = parse_number("SHEETS_TIMEOUT_SECS", &v)?;
        }
        Ok(())
    }

    /// Check every required key and derive what the storefront needs
    pub fn validate(&self) -> Result<ValidatedSettings, ConfigError> {
        let spreadsheet_url = required(&self.catalog.spreadsheet_url, "SHEET_URL")?;
        let from_url = resolve_id(&spreadsheet_url).map_err(|e| invalid("SHEET_URL", e))?;
        let spreadsheet_id = match non_empty(&self.catalog.spreadsheet_id) {
            Some(id) => {
                let id = SpreadsheetId::parse(&id).map_err(|e| invalid("SHEET_ID", e))?;
                if id != from_url {
                    warn!(
                        "SHEET_ID {} differs from the spreadsheet in SHEET_URL ({}); lookups use SHEET_ID",
                        id, from_url
                    );
                }
                id
            }
            None => from_url,
        };

        let credentials = match (
            non_empty(&self.credentials.json),
            non_empty(&self.credentials.file),
        ) {
            (Some(json), _) => CredentialSource::Json(json),
            (None, Some(file)) => CredentialSource::File(PathBuf::from(file)),
            (None, None) => return Err(ConfigError::MissingKey("SHEETS_CREDS_FILE")),
        };

        let admin_chat = self
            .admin
            .chat_id
            .map(ChatId)
            .ok_or(ConfigError::MissingKey("ADMIN_CHAT_ID"))?;
        let admin_chat_url = required(&self.admin.chat_url, "ADMIN_CHAT_URL")?;
        if !LINK_PREFIXES.iter().any(|p| admin_chat_url.starts_with(p)) {
            return Err(invalid("ADMIN_CHAT_URL", "must be an http(s) link"));
        }

        let manager_username = required(&self.manager.username, "MANAGER_USERNAME")?;
        let manager_phone = required(&self.manager.phone, "MANAGER_PHONE")?;

        for (key, column) in [
            ("primary_key_column", &self.catalog.primary_key_column),
            ("link_column", &self.catalog.link_column),
        ] {
            if column.trim().is_empty() {
                return Err(invalid(key, "column name is empty"));
            }
        }

        if self.sheets.timeout_secs == 0 {
            return Err(invalid("SHEETS_TIMEOUT_SECS", "must be at least 1"));
        }
        if !LINK_PREFIXES.iter().any(|p| self.sheets.api_url.starts_with(p)) {
            return Err(invalid("SHEETS_API_URL", "must be an http(s) URL"));
        }

        Ok(ValidatedSettings {
            shop: ShopProfile {
                spreadsheet_url,
                spreadsheet_id,
                admin_chat,
                admin_chat_url,
                card: CardLayout {
                    primary_key_column: self.catalog.primary_key_column.clone(),
                    link_column: self.catalog.link_column.clone(),
                    manager_username,
                    manager_phone,
                },
            },
            credentials,
            sheets: ServiceConfig::new(self.sheets.api_url.as_str())
                .with_timeout(self.sheets.timeout_secs),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, ConfigError> {
    non_empty(value).ok_or(ConfigError::MissingKey(key))
}

fn invalid(key: &'static str, message: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        message: message.to_string(),
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(key, e))
}
