use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Notifications published by the widget so a view can follow along
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// A message was appended at `index`
    MessageAppended { index: usize, role: Role },

    /// The pending flag flipped
    PendingChanged(bool),

    /// The widget became visible
    Opened,

    /// The widget was minimized or dismissed
    Closed,

    /// The view should bring the newest entry into sight
    ScrollToLatest,
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Prompt-style label shown in front of a message
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "> USER",
            Role::Model => "> SYSTEM",
        }
    }
}

/// One turn in the conversation. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: Uuid,
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Colour palette chosen by the presentation layer.
///
/// Carried through untouched; nothing in the chat core looks at the value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Amber,
    Pink,
    Green,
    Purple,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        assert_eq!(Role::Model.to_string(), "model");
    }

    #[test]
    fn test_message_keeps_text_verbatim() {
        let msg = Message::model("line one\nline two  ");
        assert_eq!(msg.role(), Role::Model);
        assert_eq!(msg.text(), "line one\nline two  ");
    }

    #[test]
    fn test_messages_get_distinct_ids() {
        let a = Message::user("hi");
        let b = Message::user("hi");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_theme_parses_case_insensitively() {
        assert_eq!(Theme::from_str("amber").unwrap(), Theme::Amber);
        assert_eq!(Theme::from_str("PURPLE").unwrap(), Theme::Purple);
        assert!(Theme::from_str("teal").is_err());
    }

    #[test]
    fn test_theme_palette() {
        let names: Vec<String> = Theme::iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["amber", "pink", "green", "purple"]);
        assert_eq!(Theme::default(), Theme::Amber);
    }
}
