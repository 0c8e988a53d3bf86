use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// A single entry in the question bank.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Question {
    /// Prompt announced in the trivia channel.
    pub prompt: String,
    /// Every answer the bot accepts, in display order.
    pub answers: Vec<String>,
}

impl Question {
    /// The answer shown when crediting a winner or giving up on a question.
    pub fn canonical(&self) -> &str {
        self.answers.first().map(String::as_str).unwrap_or_default()
    }
}
