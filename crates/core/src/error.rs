//! Error types for the nutrition analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Failed to read file: {0}")]
    Read(String),

    #[error("Classification failed")]
    Classification,

    #[error("Nutrition fetch failed")]
    Nutrition,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("GraphQL error: {0}")]
    GraphQL(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A failure that carried no message of its own (e.g. a panicking service)
    #[error("")]
    Unrecognized,
}

impl AnalyzerError {
    /// User-facing message, or `None` when the error has nothing to say
    pub fn message(&self) -> Option<String> {
        let text = self.to_string();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
