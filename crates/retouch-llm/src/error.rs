/// Errors produced while asking a remote model for an edit plan.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("missing model API key")]
    MissingApiKey,

    #[error("no model candidates configured")]
    NoCandidates,

    #[error("all models failed. Last error: {last_error}")]
    AllCandidatesExhausted { last_error: String, attempts: usize },

    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    #[error("plan parse error: {message}")]
    PlanParse { message: String, context: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
