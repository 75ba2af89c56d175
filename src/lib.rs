//! Knowledge-grounded chat assistant for an interactive portfolio.
//!
//! A [`ChatWidget`] owns the conversation and the open/pending flags, and
//! hands each accepted query to an [`AssistantGateway`], which asks a remote
//! model with the resume/project archive as context and always comes back
//! with displayable text.

pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod events;
pub mod gateway;
pub mod knowledge;
pub mod llm;
pub mod prompts;
pub mod widget;

pub use config::Config;
pub use conversation::ConversationStore;
pub use error::{GatewayError, InputRejected};
pub use events::{Message, Role, Theme, WidgetEvent};
pub use gateway::{AssistantGateway, Reply};
pub use knowledge::KnowledgeBase;
pub use llm::{GeminiClient, Generation, ModelBackend};
pub use prompts::{FAILURE_SENTINEL, NO_DATA_SENTINEL, NOT_FOUND_SENTINEL, RequestContext};
pub use widget::{ChatWidget, UiState, WidgetState};
