use thiserror::Error;

use crate::llm_client::LlmError;
use crate::toc::outline::OutlineError;

/// Application-level error type.
/// Subcommands return `Result<T, AppError>`; the CLI converts to `anyhow` at the edge.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed outline: {0}")]
    Outline(#[from] OutlineError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
