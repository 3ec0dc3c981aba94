//! Callback actions attached to keyboard buttons.
//!
//! An action travels through the chat platform as a short string,
//! `new-user:<answer>:<value>`. The value may itself contain `:`; only the
//! first two separators are significant.

use std::fmt;

use crate::error::ActionError;

/// Prefix shared by every callback this storefront emits
pub const CALLBACK_PREFIX: &str = "new-user";

/// Upper bound on packed callback data, in bytes
pub const MAX_CALLBACK_LEN: usize = 64;

const GO_TO_CATALOG: &str = "go-to-catalog";
const SEND_REQUEST: &str = "send-request";
const GO_HOME: &str = "go-home";

/// What a button press asks the storefront to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the products of a tab
    GoToCatalog(String),
    /// Forward a product enquiry to the shop admin
    SendRequest(String),
    /// Back to the greeting screen
    GoHome,
}

impl Action {
    fn answer(&self) -> &'static str {
        match self {
            Action::GoToCatalog(_) => GO_TO_CATALOG,
            Action::SendRequest(_) => SEND_REQUEST,
            Action::GoHome => GO_HOME,
        }
    }

    fn value(&self) -> &str {
        match self {
            Action::GoToCatalog(tab) => tab,
            Action::SendRequest(number) => number,
            Action::GoHome => "",
        }
    }

    /// Encode as callback data
    ///
    /// # Errors
    /// [`ActionError::TooLong`] when the result would not fit in
    /// [`MAX_CALLBACK_LEN`] bytes (long tab titles, mostly).
    pub fn pack(&self) -> Result<String, ActionError> {
        let packed = format!("{}:{}:{}", CALLBACK_PREFIX, self.answer(), self.value());
        if packed.len() > MAX_CALLBACK_LEN {
            return Err(ActionError::TooLong {
                len: packed.len(),
                limit: MAX_CALLBACK_LEN,
            });
        }
        Ok(packed)
    }

    /// Decode callback data produced by [`Action::pack`]
    pub fn parse(data: &str) -> Result<Self, ActionError> {
        let mut parts = data.splitn(3, ':');
        if parts.next() != Some(CALLBACK_PREFIX) {
            return Err(ActionError::WrongPrefix(data.to_string()));
        }
        let (Some(answer), Some(value)) = (parts.next(), parts.next()) else {
            return Err(ActionError::Malformed(data.to_string()));
        };

        match answer {
            GO_TO_CATALOG => Ok(Action::GoToCatalog(value.to_string())),
            SEND_REQUEST => Ok(Action::SendRequest(value.to_string())),
            GO_HOME => Ok(Action::GoHome),
            other => Err(ActionError::UnknownAnswer(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.answer(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack() {
        assert_eq!(
            Action::GoToCatalog("Стулья".to_string()).pack().unwrap(),
            "new-user:go-to-catalog:Стулья"
        );
        assert_eq!(
            Action::SendRequest("42".to_string()).pack().unwrap(),
            "new-user:send-request:42"
        );
        assert_eq!(Action::GoHome.pack().unwrap(), "new-user:go-home:");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Action::parse("new-user:go-to-catalog:Стулья").unwrap(),
            Action::GoToCatalog("Стулья".to_string())
        );
        assert_eq!(Action::parse("new-user:go-home:").unwrap(), Action::GoHome);
        assert_eq!(
            Action::parse("new-user:send-request:").unwrap(),
            Action::SendRequest(String::new())
        );
    }

    #[test]
    fn test_value_may_contain_separator() {
        let action = Action::GoToCatalog("Лампы: новинки".to_string());
        assert_eq!(Action::parse(&action.pack().unwrap()).unwrap(), action);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Action::parse("admin:go-home:"),
            Err(ActionError::WrongPrefix(_))
        ));
        assert!(matches!(
            Action::parse("new-user:go-home"),
            Err(ActionError::Malformed(_))
        ));
        assert_eq!(
            Action::parse("new-user:buy:1"),
            Err(ActionError::UnknownAnswer("buy".to_string()))
        );
    }

    #[test]
    fn test_pack_too_long() {
        // Cyrillic letters take two bytes each
        let tab = "Д".repeat(30);
        let err = Action::GoToCatalog(tab).pack().unwrap_err();
        assert!(matches!(err, ActionError::TooLong { len: 83, limit: 64 }));
    }
}
