//! Inline keyboards attached to outgoing messages.

use crate::action::Action;
use crate::error::ActionError;

/// Widest row the chat platform renders
pub const MAX_ROW_WIDTH: usize = 8;

/// What happens when a button is pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonKind {
    /// Packed [`Action`] sent back to the storefront
    Callback(String),
    /// Link opened by the client
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub kind: ButtonKind,
}

impl Button {
    /// Button that triggers `action`
    pub fn callback(text: impl Into<String>, action: &Action) -> Result<Self, ActionError> {
        Ok(Self {
            text: text.into(),
            kind: ButtonKind::Callback(action.pack()?),
        })
    }

    /// Button that opens `url`
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ButtonKind::Url(url.into()),
        }
    }
}

/// Buttons laid out in rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Every button, row by row
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Collects buttons, then cuts them into rows
#[derive(Debug, Clone)]
pub struct KeyboardBuilder {
    buttons: Vec<Button>,
    width: usize,
}

impl Default for KeyboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardBuilder {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            width: MAX_ROW_WIDTH,
        }
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    /// Lay buttons out `width` per row; the last row may be shorter
    pub fn adjust(mut self, width: usize) -> Self {
        self.width = width.clamp(1, MAX_ROW_WIDTH);
        self
    }

    pub fn build(self) -> Keyboard {
        let rows = self
            .buttons
            .chunks(self.width)
            .map(|row| row.to_vec())
            .collect();
        Keyboard { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab_button(tab: &str) -> Button {
        Button::callback(tab, &Action::GoToCatalog(tab.to_string())).unwrap()
    }

    #[test]
    fn test_adjust_two_per_row() {
        let keyboard = ["A", "B", "C"]
            .iter()
            .fold(KeyboardBuilder::new(), |b, tab| b.button(tab_button(tab)))
            .adjust(2)
            .build();

        assert_eq!(keyboard.rows.len(), 2);
        assert_eq!(keyboard.rows[0].len(), 2);
        assert_eq!(keyboard.rows[1][0].text, "C");
    }

    #[test]
    fn test_default_width() {
        let mut builder = KeyboardBuilder::new();
        for i in 0..10 {
            builder = builder.button(tab_button(&i.to_string()));
        }
        let keyboard = builder.build();
        assert_eq!(keyboard.rows.len(), 2);
        assert_eq!(keyboard.rows[0].len(), MAX_ROW_WIDTH);
    }

    #[test]
    fn test_empty_keyboard() {
        assert!(KeyboardBuilder::new().adjust(2).build().rows.is_empty());
    }

    #[test]
    fn test_button_kinds() {
        let link = Button::url("Связаться с продавцом", "https://t.me/shop_admin");
        assert_eq!(link.kind, ButtonKind::Url("https://t.me/shop_admin".to_string()));

        let home = Button::callback("В главное меню", &Action::GoHome).unwrap();
        assert_eq!(home.kind, ButtonKind::Callback("new-user:go-home:".to_string()));
    }
}
