//! Storefront screens and button handlers.
//!
//! Each handler reads the catalog afresh, renders its screen and hands the
//! messages to the [`Messenger`]. A catalog read that fails is reported to
//! the shopper and logged; only delivery failures and undecodable callbacks
//! come back as errors.

use sheetshop_catalog::{CatalogError, CatalogProvider, SheetService};
use tracing::{info, warn};

use crate::action::Action;
use crate::card::{ProductCard, SEPARATOR};
use crate::config::ShopProfile;
use crate::error::Result;
use crate::keyboard::{Button, Keyboard, KeyboardBuilder};
use crate::messenger::{ChatId, Messenger, Outgoing};
use crate::session::SessionStore;

pub const GREETING: &str = "Добро пожаловать в наш магазин!";
pub const EMPTY_CATALOG: &str = "Каталог пуст!";
pub const CHOOSE_ACTION: &str = "Вы можете:";
pub const REQUEST_PENDING: &str = "Запрос отправляется...";
pub const REQUEST_SENT: &str =
    "Ваш запрос отправлен! Администратор магазина свяжется с вами в ближайшее время";
pub const NO_TAB_SELECTED: &str = "Сначала выберите каталог";
pub const CATALOG_UNAVAILABLE: &str = "Не удалось загрузить каталог, попробуйте позже";

const HOME_BUTTON: &str = "В главное меню";
const CONTACT_BUTTON: &str = "Связаться с продавцом";
const REQUEST_BUTTON: &str = "Запросить информацию о товаре";
const BACK_BUTTON: &str = "Назад";

/// The chat storefront of one shop
pub struct Storefront<S, M> {
    catalog: CatalogProvider<S>,
    messenger: M,
    sessions: SessionStore,
    shop: ShopProfile,
}

impl<S: SheetService, M: Messenger> Storefront<S, M> {
    pub fn new(catalog: CatalogProvider<S>, messenger: M, shop: ShopProfile) -> Self {
        Self {
            catalog,
            messenger,
            sessions: SessionStore::new(),
            shop,
        }
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn shop(&self) -> &ShopProfile {
        &self.shop
    }

    /// Greeting with one button per catalog tab
    pub async fn start(&self, chat: ChatId) -> Result<()> {
        info!("start for chat {}", chat);
        let tabs = match self.catalog.list_tabs(&self.shop.spreadsheet_url).await {
            Ok(tabs) => tabs,
            Err(e) => return self.report_failure(chat, "list tabs", &e).await,
        };

        let mut builder = KeyboardBuilder::new();
        for tab in tabs {
            match Button::callback(tab.as_str(), &Action::GoToCatalog(tab.clone())) {
                Ok(button) => builder = builder.button(button),
                Err(e) => warn!("Skipping tab '{}': {}", tab, e),
            }
        }

        self.send(Outgoing::with_keyboard(chat, GREETING, builder.adjust(2).build()))
            .await
    }

    /// Same screen as [`Storefront::start`]
    pub async fn go_home(&self, chat: ChatId) -> Result<()> {
        self.start(chat).await
    }

    /// Show every product of `tab`, one card each
    pub async fn open_catalog(&self, chat: ChatId, tab: &str) -> Result<()> {
        info!("chat {} opens catalog '{}'", chat, tab);
        self.sessions.select_tab(chat, tab).await;

        let data = match self.catalog.get_values(&self.shop.spreadsheet_url, tab).await {
            Ok(data) => data.filter(|d| d.has_data_rows()),
            Err(e) => return self.report_failure(chat, "read catalog", &e).await,
        };
        let Some(data) = data else {
            let keyboard = home_keyboard()?;
            return self
                .send(Outgoing::with_keyboard(chat, EMPTY_CATALOG, keyboard))
                .await;
        };

        for record in data.records() {
            let card = self.shop.card.render(&record);
            self.send_card(chat, card).await?;
        }
        Ok(())
    }

    async fn send_card(&self, chat: ChatId, card: ProductCard) -> Result<()> {
        let keyboard = self.card_keyboard(&card.number)?;

        if card.has_photos() {
            self.send(Outgoing::text(chat, SEPARATOR)).await?;
            self.send(Outgoing::MediaGroup {
                chat,
                photos: card.photos,
            })
            .await?;
            self.send(Outgoing::html(chat, card.text)).await?;
            self.send(Outgoing::with_keyboard(chat, CHOOSE_ACTION, keyboard))
                .await
        } else {
            let text = format!("{}{}\n\n{}", SEPARATOR, card.text, CHOOSE_ACTION);
            self.send(Outgoing::Text {
                chat,
                text,
                html: true,
                keyboard: Some(keyboard),
            })
            .await
        }
    }

    /// Contact, enquiry and back buttons of a card
    ///
    /// A product number too long for callback data gets no enquiry button;
    /// the card is still shown.
    fn card_keyboard(&self, number: &str) -> Result<Keyboard> {
        let mut builder = KeyboardBuilder::new()
            .button(Button::url(CONTACT_BUTTON, self.shop.admin_chat_url.as_str()));
        match Button::callback(REQUEST_BUTTON, &Action::SendRequest(number.to_string())) {
            Ok(button) => builder = builder.button(button),
            Err(e) => warn!("No request button for product '{}': {}", number, e),
        }
        Ok(builder
            .button(Button::callback(BACK_BUTTON, &Action::GoHome)?)
            .adjust(1)
            .build())
    }

    /// Forward a product enquiry to the admin chat
    ///
    /// The product is looked up in the tab the shopper opened last. When
    /// the row is gone, the admin still gets the request, with the product
    /// number in place of the link.
    pub async fn send_request(
        &self,
        chat: ChatId,
        username: Option<&str>,
        number: &str,
    ) -> Result<()> {
        info!("chat {} requests product '{}'", chat, number);
        self.send(Outgoing::text(chat, REQUEST_PENDING)).await?;

        let Some(tab) = self.sessions.selected_tab(chat).await else {
            let keyboard = home_keyboard()?;
            return self
                .send(Outgoing::with_keyboard(chat, NO_TAB_SELECTED, keyboard))
                .await;
        };

        let found = self
            .catalog
            .find_row(
                self.shop.spreadsheet_id.as_str(),
                &tab,
                &self.shop.card.primary_key_column,
                number,
            )
            .await;
        let product = match found {
            Ok(Some(record)) => match record.get(&self.shop.card.link_column) {
                Some(link) if !link.is_empty() => link.to_string(),
                _ => number.to_string(),
            },
            Ok(None) => {
                warn!("Product '{}' not found in tab '{}'", number, tab);
                number.to_string()
            }
            Err(e) => return self.report_failure(chat, "look up product", &e).await,
        };

        let who = match username {
            Some(name) => format!("@{}", name.trim_start_matches('@')),
            None => format!("id {}", chat),
        };
        let notice = format!("Пользователь {} запросил информацию о товаре {}", who, product);
        self.send(Outgoing::text(self.shop.admin_chat, notice)).await?;

        let keyboard = home_keyboard()?;
        self.send(Outgoing::with_keyboard(chat, REQUEST_SENT, keyboard))
            .await
    }

    /// Decode a button press and run its handler
    pub async fn dispatch(&self, chat: ChatId, username: Option<&str>, data: &str) -> Result<()> {
        let action = Action::parse(data).inspect_err(|e| {
            warn!("Ignoring callback from chat {}: {}", chat, e);
        })?;

        match action {
            Action::GoToCatalog(tab) => self.open_catalog(chat, &tab).await,
            Action::SendRequest(number) => self.send_request(chat, username, &number).await,
            Action::GoHome => self.go_home(chat).await,
        }
    }

    async fn report_failure(&self, chat: ChatId, what: &str, err: &CatalogError) -> Result<()> {
        warn!("Failed to {} for chat {}: {}", what, chat, err);
        self.send(Outgoing::text(chat, CATALOG_UNAVAILABLE)).await
    }

    async fn send(&self, message: Outgoing) -> Result<()> {
        Ok(self.messenger.send(message).await?)
    }
}

fn home_keyboard() -> Result<Keyboard> {
    Ok(KeyboardBuilder::new()
        .button(Button::callback(HOME_BUTTON, &Action::GoHome)?)
        .build())
}
