//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sheetshop_bot::{
    ChatId, ConsoleMessenger, CredentialSource, Messenger, Settings, Storefront, ValidatedSettings,
};
use sheetshop_catalog::{
    column_letter, CatalogProvider, GoogleSheetsService, Record, ServiceAccountAuth,
    ServiceAccountKey, SheetService,
};

/// Output format for catalog reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripts
    Json,
}

#[derive(Parser)]
#[command(name = "sheetshop")]
#[command(author, version, about = "Spreadsheet catalogs for chat storefronts", long_about = None)]
struct Cli {
    /// Configuration file path (default: sheetshop.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog tabs
    Tabs {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print every row of a tab
    Values {
        /// Tab title
        tab: String,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the header row of a tab
    Header {
        /// Tab title
        tab: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Look up one row by its key column
    Find {
        /// Tab title
        tab: String,

        /// Value to match exactly
        value: String,

        /// Key column (default: the configured primary key column)
        #[arg(long)]
        column: Option<String>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Convert a column index to its letter name
    ColumnLetter {
        /// Column index
        index: u32,

        /// Index base, 0 or 1
        #[arg(long, default_value_t = 1)]
        base: u32,
    },

    /// Show the storefront greeting
    Start {
        /// Chat to address the messages to
        #[arg(long, default_value_t = 1)]
        chat: i64,
    },

    /// Show the product cards of a tab
    Browse {
        /// Tab title
        tab: String,

        #[arg(long, default_value_t = 1)]
        chat: i64,
    },

    /// Send a product enquiry to the admin chat
    Request {
        /// Tab title
        tab: String,

        /// Product number
        number: String,

        /// Username of the enquiring shopper
        #[arg(short, long)]
        user: String,

        #[arg(long, default_value_t = 1)]
        chat: i64,
    },
}

/// Run the CLI application
///
/// Parses arguments, sets up logging and dispatches to the appropriate
/// command.
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.config.as_deref();
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Tabs { format } => {
            let (settings, catalog) = open_catalog(config)?;
            tabs_command(&catalog, &settings.shop.spreadsheet_url, format, &mut out).await?;
        }
        Commands::Values { tab, format } => {
            let (settings, catalog) = open_catalog(config)?;
            let url = &settings.shop.spreadsheet_url;
            values_command(&catalog, url, &tab, format, &mut out).await?;
        }
        Commands::Header { tab, format } => {
            let (settings, catalog) = open_catalog(config)?;
            let id = settings.shop.spreadsheet_id.as_str();
            header_command(&catalog, id, &tab, format, &mut out).await?;
        }
        Commands::Find {
            tab,
            value,
            column,
            format,
        } => {
            let (settings, catalog) = open_catalog(config)?;
            let shop = &settings.shop;
            let column = column.unwrap_or_else(|| shop.card.primary_key_column.clone());
            find_command(
                &catalog,
                shop.spreadsheet_id.as_str(),
                &tab,
                &column,
                &value,
                format,
                &mut out,
            )
            .await?;
        }
        Commands::ColumnLetter { index, base } => {
            column_letter_command(index, base, &mut out)?;
        }
        Commands::Start { chat } => {
            let storefront = open_storefront(config)?;
            start_command(&storefront, ChatId(chat)).await?;
        }
        Commands::Browse { tab, chat } => {
            let storefront = open_storefront(config)?;
            browse_command(&storefront, ChatId(chat), &tab).await?;
        }
        Commands::Request {
            tab,
            number,
            user,
            chat,
        } => {
            let storefront = open_storefront(config)?;
            request_command(&storefront, ChatId(chat), &tab, &number, &user).await?;
        }
    }

    Ok(())
}

type RemoteCatalog = CatalogProvider<GoogleSheetsService>;

fn open_catalog(config: Option<&Path>) -> Result<(ValidatedSettings, RemoteCatalog)> {
    let settings = load_settings(config)?;
    let catalog = CatalogProvider::new(connect(&settings)?);
    Ok((settings, catalog))
}

fn open_storefront(
    config: Option<&Path>,
) -> Result<Storefront<GoogleSheetsService, ConsoleMessenger>> {
    let (settings, catalog) = open_catalog(config)?;
    Ok(Storefront::new(catalog, ConsoleMessenger, settings.shop))
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load and validate settings from a config file and the environment
pub fn load_settings(config_path: Option<&Path>) -> Result<ValidatedSettings> {
    if let Some(path) = config_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }
    let settings = Settings::load(config_path).context("Failed to load settings")?;
    settings.validate().context("Invalid configuration")
}

/// Build the Sheets API client from validated settings
pub fn connect(settings: &ValidatedSettings) -> Result<GoogleSheetsService> {
    let key = match &settings.credentials {
        CredentialSource::File(path) => ServiceAccountKey::from_file(path)
            .with_context(|| format!("Failed to load credentials: {}", path.display()))?,
        CredentialSource::Json(json) => {
            ServiceAccountKey::from_json(json).context("Failed to parse inline credentials")?
        }
    };
    debug!("Using service account {}", key.client_email);

    let auth = ServiceAccountAuth::new(key).context("Failed to set up authorization")?;
    GoogleSheetsService::new(settings.sheets.clone(), Arc::new(auth))
        .context("Failed to create Sheets client")
}

/// Execute the tabs command
pub async fn tabs_command<S: SheetService>(
    catalog: &CatalogProvider<S>,
    url: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let tabs = catalog.list_tabs(url).await.context("Failed to list tabs")?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&tabs)?)?,
        OutputFormat::Text => {
            for tab in &tabs {
                writeln!(out, "{}", tab)?;
            }
        }
    }
    Ok(())
}

/// Execute the values command
pub async fn values_command<S: SheetService>(
    catalog: &CatalogProvider<S>,
    url: &str,
    tab: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let data = catalog
        .get_values(url, tab)
        .await
        .with_context(|| format!("Failed to read tab '{}'", tab))?;

    match (format, data) {
        (OutputFormat::Json, data) => {
            let records: Vec<Record> = data.map(|d| d.records().collect()).unwrap_or_default();
            writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        }
        (OutputFormat::Text, None) => writeln!(out, "Tab '{}' is empty", tab)?,
        (OutputFormat::Text, Some(data)) => {
            for row in data.rows() {
                writeln!(out, "{}", row.join("\t"))?;
            }
        }
    }
    Ok(())
}

/// Execute the header command
pub async fn header_command<S: SheetService>(
    catalog: &CatalogProvider<S>,
    url_or_id: &str,
    tab: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let header = catalog
        .get_header(url_or_id, tab)
        .await
        .with_context(|| format!("Failed to read header of tab '{}'", tab))?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&header)?)?,
        OutputFormat::Text => {
            for (i, name) in header.iter().enumerate() {
                writeln!(out, "{}\t{}", column_letter(i as u32, 0)?, name)?;
            }
        }
    }
    Ok(())
}

/// Execute the find command
pub async fn find_command<S: SheetService>(
    catalog: &CatalogProvider<S>,
    url_or_id: &str,
    tab: &str,
    column: &str,
    value: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let found = catalog
        .find_row(url_or_id, tab, column, value)
        .await
        .with_context(|| format!("Failed to search tab '{}'", tab))?;

    match (format, found) {
        (OutputFormat::Json, found) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&found)?)?;
        }
        (OutputFormat::Text, None) => {
            writeln!(out, "No row with {} = '{}' in tab '{}'", column, value, tab)?;
        }
        (OutputFormat::Text, Some(record)) => {
            for (key, field) in record.iter() {
                writeln!(out, "{}: {}", key, field)?;
            }
        }
    }
    Ok(())
}

/// Execute the column-letter command
pub fn column_letter_command(index: u32, base: u32, out: &mut dyn Write) -> Result<()> {
    let letter = column_letter(index, base).context("Failed to convert column index")?;
    writeln!(out, "{}", letter)?;
    Ok(())
}

/// Execute the start command
pub async fn start_command<S: SheetService, M: Messenger>(
    storefront: &Storefront<S, M>,
    chat: ChatId,
) -> Result<()> {
    storefront.start(chat).await.context("Storefront failed")
}

/// Execute the browse command
pub async fn browse_command<S: SheetService, M: Messenger>(
    storefront: &Storefront<S, M>,
    chat: ChatId,
    tab: &str,
) -> Result<()> {
    storefront
        .open_catalog(chat, tab)
        .await
        .context("Storefront failed")
}

/// Execute the request command
///
/// Selects `tab` for the chat first, as opening it would.
pub async fn request_command<S: SheetService, M: Messenger>(
    storefront: &Storefront<S, M>,
    chat: ChatId,
    tab: &str,
    number: &str,
    user: &str,
) -> Result<()> {
    storefront.sessions().select_tab(chat, tab).await;
    storefront
        .send_request(chat, Some(user), number)
        .await
        .context("Storefront failed")
}
