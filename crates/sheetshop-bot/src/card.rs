//! Product cards.
//!
//! A card is what a shopper sees for one catalog row: an HTML caption built
//! from the visible fields, the row's pictures, and the product number that
//! the enquiry button carries.

use sheetshop_catalog::Record;

/// Printed between two cards
pub const SEPARATOR: &str = "\n\n---------------------------------------\n\n";

/// Columns holding picture URLs
pub const PICTURE_FIELDS: [&str; 4] = ["Картинка 1", "Картинка 2", "Картинка 3", "Картинка 4"];

/// How rows are turned into cards for one shop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout {
    /// Column holding the product number; hidden from the caption
    pub primary_key_column: String,
    /// Column holding the product page link; hidden from the caption
    pub link_column: String,
    pub manager_username: String,
    pub manager_phone: String,
}

/// A rendered product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// HTML caption
    pub text: String,
    /// Picture URLs, in column order
    pub photos: Vec<String>,
    /// Product number; empty if the row has none
    pub number: String,
}

impl ProductCard {
    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }
}

impl CardLayout {
    /// Technical columns never shown in the caption
    pub fn is_technical(&self, field: &str) -> bool {
        PICTURE_FIELDS.contains(&field)
            || field == self.link_column
            || field == self.primary_key_column
    }

    pub fn render(&self, record: &Record) -> ProductCard {
        let mut photos = Vec::new();
        let mut visible = Vec::new();

        for (key, value) in record.iter() {
            if !self.is_technical(key) {
                visible.push(format!("<b>{}:</b> {}", html_escape(key), html_escape(value)));
            } else if PICTURE_FIELDS.contains(&key) && !value.is_empty() {
                photos.push(value.to_string());
            }
        }

        let text = format!(
            "{}\n\n{}\n{}",
            visible.join(", "),
            self.manager_username,
            self.manager_phone
        );

        ProductCard {
            text,
            photos,
            number: record.get_or_empty(&self.primary_key_column).to_string(),
        }
    }
}

/// Escape text placed inside the HTML caption
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
