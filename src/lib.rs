pub mod command;
pub mod error;
pub mod render;
mod session;

pub use model::Quiz;
pub use session::{Flow, Session};

use std::path::Path;

/// Reads and parses a quiz definition from a JSON file.
pub async fn load_quiz(path: impl AsRef<Path>) -> error::Result<Quiz> {
    let bytes = tokio::fs::read(path).await?;
    let quiz: Quiz = serde_json::from_slice(&bytes)?;
    if quiz.questions.is_empty() {
        return Err(error::Error::NoQuestions);
    }
    Ok(quiz)
}
