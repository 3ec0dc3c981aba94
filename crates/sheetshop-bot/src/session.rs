//! Per-chat conversation state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::messenger::ChatId;

/// What the storefront remembers about one chat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Tab the shopper opened last
    pub tab: Option<String>,
}

/// Sessions of every chat, shared between handlers
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<ChatId, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn select_tab(&self, chat: ChatId, tab: impl Into<String>) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(chat).or_default().tab = Some(tab.into());
    }

    pub async fn selected_tab(&self, chat: ChatId) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions.get(&chat).and_then(|s| s.tab.clone())
    }

    /// Forget everything about `chat`
    pub async fn clear(&self, chat: ChatId) {
        self.sessions.write().await.remove(&chat);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
