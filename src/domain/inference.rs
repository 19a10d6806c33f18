use std::fmt;

use super::{ChatModel, Temperature};

/// Stemmed, stopword-free rendering of a document, used as background text
/// for the model. Empty when no document was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedContext(String);

impl NormalizedContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl fmt::Display for NormalizedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub question: String,
    pub context: NormalizedContext,
    pub model: ChatModel,
    pub temperature: Temperature,
}

/// What is actually sent to the completion backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: String,
    pub user_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    pub text: String,
}

impl InferenceResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
