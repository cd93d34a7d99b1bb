use retouch_llm::ModelError;

/// Failure reported by the host editing application.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    #[error("not implemented")]
    NotImplemented,

    #[error("no active document")]
    NoActiveDocument,

    #[error("layer not found: {0}")]
    LayerNotFound(String),

    #[error("host command failed: {0}")]
    CommandFailed(String),
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Unified error type for the retouch crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("no edit plan to execute")]
    NoPendingPlan,

    #[error("AI analysis failed: {0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Host(#[from] HostError),

    #[error("execution failed at operation {step}: {source}")]
    OperationFailed {
        step: usize,
        #[source]
        source: Box<CoreError>,
    },

    #[error("settings error: {0}")]
    Settings(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
