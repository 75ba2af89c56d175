use crate::knowledge::KnowledgeBase;

/// Reply used when the remote model could not be reached or understood.
pub const FAILURE_SENTINEL: &str = "CRITICAL ERROR: CONNECTION TO AI CORE FAILED.";

/// Reply used when the model answered with no text at all.
pub const NO_DATA_SENTINEL: &str = "ERROR: NO DATA RECEIVED.";

/// What the model is told to say when the archive has no answer.
pub const NOT_FOUND_SENTINEL: &str = "DATA NOT FOUND IN ARCHIVES";

/// Opening line of every conversation
pub fn greeting(owner: &str) -> String {
    format!(
        "SYSTEM INITIALIZED. I CAN ANSWER QUESTIONS ABOUT {}'S RESUME AND PROJECTS.",
        owner.to_uppercase()
    )
}

/// Everything the model is given for a single query.
///
/// Built fresh for every send and dropped once the call resolves.
#[derive(Debug, Clone)]
pub struct RequestContext {
    owner: String,
    knowledge: String,
    query: String,
}

impl RequestContext {
    pub fn new(owner: &str, knowledge: &KnowledgeBase, query: &str) -> Self {
        Self {
            owner: owner.to_string(),
            knowledge: knowledge.serialize(),
            query: query.to_string(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Persona preamble, archive, behaviour rules, then the query echoed back
    pub fn system_instruction(&self) -> String {
        format!(
            r#"You are an advanced AI Terminal Assistant for {owner}'s interactive portfolio.

YOUR KNOWLEDGE BASE:
{knowledge}

INSTRUCTIONS:
1. Answer questions based STRICTLY on the provided JSON data.
2. If the user asks about something not in the data, state that "{not_found}".
3. Keep answers concise, professional, but technical.
4. Adopt a slight "computer terminal" persona (e.g., "Scanning database...", "Retrieving records...").
5. You are helpful and want to showcase {owner}'s skills whenever they are relevant to the question.

Current User Query: {query}
"#,
            owner = self.owner,
            knowledge = self.knowledge,
            not_found = NOT_FOUND_SENTINEL,
            query = self.query,
        )
    }
}
