//! Message delivery.
//!
//! The storefront only produces [`Outgoing`] values; a [`Messenger`]
//! decides where they end up. Chat-platform transports live outside this
//! crate.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::MessengerError;
use crate::keyboard::{ButtonKind, Keyboard};

/// Chat identifier as assigned by the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Text {
        chat: ChatId,
        text: String,
        /// Render `text` as HTML
        html: bool,
        keyboard: Option<Keyboard>,
    },
    /// Pictures sent together as one album
    MediaGroup { chat: ChatId, photos: Vec<String> },
}

impl Outgoing {
    /// Plain text without keyboard
    pub fn text(chat: ChatId, text: impl Into<String>) -> Self {
        Outgoing::Text {
            chat,
            text: text.into(),
            html: false,
            keyboard: None,
        }
    }

    pub fn html(chat: ChatId, text: impl Into<String>) -> Self {
        Outgoing::Text {
            chat,
            text: text.into(),
            html: true,
            keyboard: None,
        }
    }

    pub fn with_keyboard(chat: ChatId, text: impl Into<String>, keyboard: Keyboard) -> Self {
        Outgoing::Text {
            chat,
            text: text.into(),
            html: false,
            keyboard: Some(keyboard),
        }
    }

    pub fn chat(&self) -> ChatId {
        match self {
            Outgoing::Text { chat, .. } | Outgoing::MediaGroup { chat, .. } => *chat,
        }
    }

    /// Text body; `None` for media groups
    pub fn text_body(&self) -> Option<&str> {
        match self {
            Outgoing::Text { text, .. } => Some(text),
            Outgoing::MediaGroup { .. } => None,
        }
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Outgoing::Text { keyboard, .. } => keyboard.as_ref(),
            Outgoing::MediaGroup { .. } => None,
        }
    }
}

/// Delivers outgoing messages
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, message: Outgoing) -> Result<(), MessengerError>;
}

/// Human-readable rendition of a message, as printed by [`ConsoleMessenger`]
pub fn render(message: &Outgoing) -> String {
    match message {
        Outgoing::Text {
            chat,
            text,
            html,
            keyboard,
        } => {
            let marker = if *html { " (html)" } else { "" };
            let mut out = format!("[chat {}]{}\n{}\n", chat, marker, text.trim());
            if let Some(keyboard) = keyboard {
                for row in &keyboard.rows {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|button| match &button.kind {
                            ButtonKind::Callback(data) => format!("[{} -> {}]", button.text, data),
                            ButtonKind::Url(url) => format!("[{} -> {}]", button.text, url),
                        })
                        .collect();
                    out.push_str(&cells.join(" "));
                    out.push('\n');
                }
            }
            out
        }
        Outgoing::MediaGroup { chat, photos } => {
            let mut out = format!("[chat {}] album of {}\n", chat, photos.len());
            for photo in photos {
                out.push_str("  ");
                out.push_str(photo);
                out.push('\n');
            }
            out
        }
    }
}

/// Prints messages to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send(&self, message: Outgoing) -> Result<(), MessengerError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", render(&message))?;
        Ok(())
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Outgoing>>,
    unreachable: Option<ChatId>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every delivery to `chat`
    pub fn unreachable(chat: ChatId) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            unreachable: Some(chat),
        }
    }

    /// Messages delivered so far, in order
    pub fn sent(&self) -> Vec<Outgoing> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Messages delivered to one chat
    pub fn sent_to(&self, chat: ChatId) -> Vec<Outgoing> {
        self.sent().into_iter().filter(|m| m.chat() == chat).collect()
    }

    /// Drain the recorded messages
    pub fn take(&self) -> Vec<Outgoing> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, message: Outgoing) -> Result<(), MessengerError> {
        if self.unreachable == Some(message.chat()) {
            return Err(MessengerError::Delivery {
                chat: message.chat(),
                message: "chat not found".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::keyboard::{Button, KeyboardBuilder};

    #[tokio::test]
    async fn test_recording_messenger() {
        let messenger = RecordingMessenger::new();
        messenger.send(Outgoing::text(ChatId(1), "hello")).await.unwrap();
        messenger
            .send(Outgoing::MediaGroup {
                chat: ChatId(2),
                photos: vec!["a.jpg".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(messenger.sent().len(), 2);
        assert_eq!(messenger.sent_to(ChatId(1))[0].text_body(), Some("hello"));
        assert_eq!(messenger.take().len(), 2);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_chat() {
        let messenger = RecordingMessenger::unreachable(ChatId(-100));
        let err = messenger
            .send(Outgoing::text(ChatId(-100), "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, MessengerError::Delivery { chat: ChatId(-100), .. }));
    }

    #[test]
    fn test_render_text_with_keyboard() {
        let keyboard = KeyboardBuilder::new()
            .button(Button::callback("Назад", &Action::GoHome).unwrap())
            .button(Button::url("Магазин", "https://t.me/shop"))
            .adjust(1)
            .build();
        let out = render(&Outgoing::with_keyboard(ChatId(5), "Вы можете:", keyboard));

        assert_eq!(
            out,
            "[chat 5]\nВы можете:\n[Назад -> new-user:go-home:]\n[Магазин -> https://t.me/shop]\n"
        );
    }

    #[test]
    fn test_render_media_group() {
        let out = render(&Outgoing::MediaGroup {
            chat: ChatId(5),
            photos: vec!["a.jpg".to_string(), "b.jpg".to_string()],
        });
        assert_eq!(out, "[chat 5] album of 2\n  a.jpg\n  b.jpg\n");
    }
}
