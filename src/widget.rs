use crate::conversation::ConversationStore;
use crate::error::InputRejected;
use crate::events::{Message, Theme, WidgetEvent};
use crate::gateway::AssistantGateway;
use crate::knowledge::KnowledgeBase;
use crate::prompts::{FAILURE_SENTINEL, greeting};
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};

/// Where the widget is in its open/send cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    OpenIdle,
    OpenPending,
}

/// View-facing flags; not part of the conversation itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub open: bool,
    pub pending: bool,
    pub draft: String,
}

/// Chat widget: owns the conversation and drives one request at a time
pub struct ChatWidget {
    store: ConversationStore,
    ui: UiState,
    theme: Theme,
    gateway: Arc<AssistantGateway>,
    knowledge: Arc<KnowledgeBase>,
    reply_rx: Option<oneshot::Receiver<String>>,
}

impl ChatWidget {
    pub fn new(gateway: Arc<AssistantGateway>, knowledge: Arc<KnowledgeBase>, theme: Theme) -> Self {
        let store = ConversationStore::initialize(greeting(gateway.owner()));

        Self {
            store,
            ui: UiState::default(),
            theme,
            gateway,
            knowledge,
            reply_rx: None,
        }
    }

    pub fn state(&self) -> WidgetState {
        match (self.ui.open, self.ui.pending) {
            (false, _) => WidgetState::Closed,
            (true, false) => WidgetState::OpenIdle,
            (true, true) => WidgetState::OpenPending,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.store
    }

    pub fn is_pending(&self) -> bool {
        self.ui.pending
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Swap the palette token; nothing else reacts to it
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.store.subscribe()
    }

    /// Show the widget
    pub fn open(&mut self) {
        if self.ui.open {
            return;
        }
        self.ui.open = true;
        self.store.notify(WidgetEvent::Opened);
        self.store.notify(WidgetEvent::ScrollToLatest);
    }

    /// Hide the widget. An in-flight request keeps running.
    pub fn close(&mut self) {
        if !self.ui.open {
            return;
        }
        self.ui.open = false;
        self.store.notify(WidgetEvent::Closed);
    }

    /// Same transition as [`close`](Self::close)
    pub fn minimize(&mut self) {
        self.close();
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.ui.draft = text.into();
    }

    /// Send the current draft.
    ///
    /// On success the user message is recorded, the draft is cleared and the
    /// request is started in the background; call [`settle`](Self::settle) or
    /// [`try_settle`](Self::try_settle) to apply the reply. Must be called
    /// from within a tokio runtime.
    pub fn submit(&mut self) -> Result<(), InputRejected> {
        if !self.ui.open {
            return Err(InputRejected::Closed);
        }
        if self.ui.pending || self.reply_rx.is_some() {
            return Err(InputRejected::Pending);
        }

        let query = self.store.append_user(&self.ui.draft)?.text().to_string();
        self.ui.pending = true;
        self.ui.draft.clear();

        let (tx, rx) = oneshot::channel();
        let gateway = Arc::clone(&self.gateway);
        let knowledge = Arc::clone(&self.knowledge);
        tokio::spawn(async move {
            let text = gateway.send(&query, &knowledge).await;
            // receiver gone means the widget was dropped
            let _ = tx.send(text);
        });

        self.reply_rx = Some(rx);
        tracing::debug!(messages = self.store.len(), "Query submitted");
        Ok(())
    }

    /// Apply the reply if it has arrived, without waiting
    pub fn try_settle(&mut self) -> Option<&Message> {
        let rx = self.reply_rx.as_mut()?;
        let text = match rx.try_recv() {
            Ok(text) => text,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => {
                tracing::error!("Chat task ended without a reply");
                FAILURE_SENTINEL.to_string()
            }
        };
        Some(self.finish(text))
    }

    /// Wait for the in-flight reply and apply it
    pub async fn settle(&mut self) -> Option<&Message> {
        let rx = self.reply_rx.take()?;
        let text = Self::receive(rx).await;
        Some(self.finish(text))
    }

    /// Submit `text` and wait for the reply.
    ///
    /// A rejected submission leaves the previous draft in place.
    pub async fn ask(&mut self, text: &str) -> Result<&Message, InputRejected> {
        let previous = std::mem::replace(&mut self.ui.draft, text.to_string());
        if let Err(err) = self.submit() {
            self.ui.draft = previous;
            return Err(err);
        }

        let text = match self.reply_rx.take() {
            Some(rx) => Self::receive(rx).await,
            None => FAILURE_SENTINEL.to_string(),
        };
        Ok(self.finish(text))
    }

    async fn receive(rx: oneshot::Receiver<String>) -> String {
        rx.await.unwrap_or_else(|_| {
            tracing::error!("Chat task ended without a reply");
            FAILURE_SENTINEL.to_string()
        })
    }

    fn finish(&mut self, text: String) -> &Message {
        self.reply_rx = None;
        self.ui.pending = false;
        self.ui.draft.clear();
        if !self.ui.open {
            tracing::debug!("Reply applied while widget is closed");
        }
        self.store.append_model(text)
    }
}
