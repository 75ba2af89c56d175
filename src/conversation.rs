//! Ordered message log for one chat widget.

use crate::error::InputRejected;
use crate::events::{Message, Role, WidgetEvent};
use tokio::sync::broadcast;

/// Buffered notifications per subscriber before it starts lagging
const EVENT_CAPACITY: usize = 64;

/// Append-only conversation with single-flight bookkeeping
pub struct ConversationStore {
    messages: Vec<Message>,
    pending: bool,
    events: broadcast::Sender<WidgetEvent>,
}

impl ConversationStore {
    /// Start a conversation holding only the greeting
    pub fn initialize(greeting: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            messages: vec![Message::model(greeting)],
            pending: false,
            events,
        }
    }

    /// Receive change notifications from now on
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, event: WidgetEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    /// Record a user turn and mark the conversation pending
    pub fn append_user(&mut self, text: &str) -> Result<&Message, InputRejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InputRejected::Empty);
        }
        if self.pending {
            return Err(InputRejected::Pending);
        }

        self.push(Message::user(text));
        self.set_pending(true);
        Ok(self.newest())
    }

    /// Record the model's reply and clear pending
    pub fn append_model(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::model(text));
        self.set_pending(false);
        self.newest()
    }

    fn push(&mut self, message: Message) {
        let role = message.role();
        self.messages.push(message);
        self.notify(WidgetEvent::MessageAppended {
            index: self.messages.len() - 1,
            role,
        });
        self.notify(WidgetEvent::ScrollToLatest);
    }

    fn set_pending(&mut self, pending: bool) {
        if self.pending != pending {
            self.pending = pending;
            self.notify(WidgetEvent::PendingChanged(pending));
        }
    }

    fn newest(&self) -> &Message {
        // the greeting is never removed, so there is always a last entry
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> &Message {
        self.newest()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of completed user/model pairs
    pub fn turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role() == Role::User)
            .count()
            - usize::from(self.pending)
    }
}
