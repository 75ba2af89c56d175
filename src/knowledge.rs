use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Resume and project facts the assistant is allowed to answer from.
///
/// Loaded once and shared read-only; every request serializes the whole thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    resume: Value,
    projects: Value,
}

impl KnowledgeBase {
    pub fn new(resume: Value, projects: Value) -> Self {
        Self { resume, projects }
    }

    /// An empty archive, used when no knowledge file is configured
    pub fn empty() -> Self {
        Self::new(Value::Object(Default::default()), Value::Array(Vec::new()))
    }

    /// Parse a `{"resume": ..., "projects": ...}` document
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse knowledge base")
    }

    /// Load the knowledge base from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn resume(&self) -> &Value {
        &self.resume
    }

    pub fn projects(&self) -> &Value {
        &self.projects
    }

    /// Compact JSON blob handed to the model as context
    pub fn serialize(&self) -> String {
        // Value-only structs cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}
