use crate::knowledge::KnowledgeBase;
use crate::llm::ModelBackend;
use crate::prompts::{FAILURE_SENTINEL, NO_DATA_SENTINEL, RequestContext};
use std::sync::Arc;

/// How a single exchange with the model ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The model answered with text
    Answer(String),
    /// The call succeeded but carried no text
    Empty,
    /// The call failed; details went to the log
    Failed,
}

impl Reply {
    /// Text appended to the conversation for this outcome
    pub fn into_text(self) -> String {
        match self {
            Reply::Answer(text) => text,
            Reply::Empty => NO_DATA_SENTINEL.to_string(),
            Reply::Failed => FAILURE_SENTINEL.to_string(),
        }
    }
}

/// Runs one knowledge-grounded request per user turn.
///
/// Holds no conversational state: each call sees only the archive and the
/// latest query.
#[derive(Clone)]
pub struct AssistantGateway {
    backend: Arc<dyn ModelBackend>,
    model: String,
    owner: String,
}

impl AssistantGateway {
    pub fn new(backend: Arc<dyn ModelBackend>, model: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            owner: owner.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Assemble the context for `query` without sending it
    pub fn context_for(&self, query: &str, knowledge: &KnowledgeBase) -> RequestContext {
        RequestContext::new(&self.owner, knowledge, query)
    }

    /// Ask the model and report which way it went
    pub async fn send_detailed(&self, query: &str, knowledge: &KnowledgeBase) -> Reply {
        let context = self.context_for(query, knowledge);
        let instruction = context.system_instruction();

        tracing::debug!(
            model = %self.model,
            query_len = query.len(),
            instruction_len = instruction.len(),
            "Sending query to model"
        );

        match self
            .backend
            .generate(&self.model, &instruction, context.query())
            .await
        {
            Ok(generation) => match generation.text {
                Some(text) if !text.is_empty() => Reply::Answer(text),
                _ => {
                    tracing::warn!(model = %self.model, "Model returned no text");
                    Reply::Empty
                }
            },
            Err(err) => {
                tracing::error!(model = %self.model, error = %err, "Chat request failed");
                Reply::Failed
            }
        }
    }

    /// Ask the model; always yields displayable text
    pub async fn send(&self, query: &str, knowledge: &KnowledgeBase) -> String {
        self.send_detailed(query, knowledge).await.into_text()
    }
}
