//! # sheetshop-bot
//!
//! Chat storefront over a spreadsheet catalog: greet shoppers with the
//! catalog tabs, show product cards, and forward enquiries to the shop
//! admin.
//!
//! The storefront does not talk to a chat platform itself. It emits
//! [`Outgoing`] messages through a [`Messenger`] and reacts to packed
//! [`Action`] callbacks.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetshop_bot::{ChatId, ConsoleMessenger, Settings, Storefront};
//!
//! let settings = Settings::load(None)?.validate()?;
//! let storefront = Storefront::new(catalog, ConsoleMessenger, settings.shop);
//! storefront.start(ChatId(1)).await?;
//! ```

pub mod action;
pub mod card;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod messenger;
pub mod session;
pub mod storefront;

// Re-exports
pub use action::Action;
pub use card::{CardLayout, ProductCard};
pub use config::{CredentialSource, Settings, ShopProfile, ValidatedSettings};
pub use error::{ActionError, BotError, ConfigError, MessengerError, Result};
pub use keyboard::{Button, ButtonKind, Keyboard, KeyboardBuilder};
pub use messenger::{ChatId, ConsoleMessenger, Messenger, Outgoing, RecordingMessenger};
pub use session::{Session, SessionStore};
pub use storefront::Storefront;
