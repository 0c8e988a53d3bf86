//! The question bank: a JSON file listing every question we can ask.

use crate::error::Error;
use model::question::Question;
use std::path::PathBuf;

/// Loader for the deployment's question file. The file is re-read on every
/// game start, so operators may edit it without restarting the service.
pub struct QuestionBank {
    path: PathBuf,
}

impl QuestionBank {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads and validates the bank. Unreadable, malformed, and empty banks
    /// all collapse into the same user-facing error after logging the cause.
    pub(crate) async fn load(&self) -> Result<Box<[Question]>, Error> {
        let path = self.path.display();
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("question bank {path} is unreadable: {err}");
                return Err(Error::NoQuestions);
            }
        };
        let questions: Vec<Question> = match serde_json::from_slice(&bytes) {
            Ok(questions) => questions,
            Err(err) => {
                log::error!("question bank {path} is malformed: {err}");
                return Err(Error::NoQuestions);
            }
        };
        if questions.is_empty() {
            log::error!("question bank {path} has no questions");
            return Err(Error::NoQuestions);
        }
        if questions.iter().any(unusable) {
            log::error!("question bank {path} has an entry with a blank prompt or no answers");
            return Err(Error::NoQuestions);
        }
        Ok(questions.into_boxed_slice())
    }
}

fn unusable(question: &Question) -> bool {
    question.prompt.trim().is_empty()
        || question.answers.is_empty()
        || question.answers.iter().any(|answer| answer.trim().is_empty())
}
