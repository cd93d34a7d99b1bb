pub mod client;
pub mod error;
pub mod extract;
pub mod request;
pub mod response;
pub mod settings;
pub mod transport;

pub use client::{AttemptFailure, AttemptFailureKind, ModelClient, StructuredReply, TextReply};
pub use error::{ModelError, ModelResult};
pub use extract::{extract_json_object, parse_json_object};
pub use request::{GenerateContentRequest, InlineImage};
pub use response::GenerateContentResponse;
pub use settings::ModelSettings;
pub use transport::{ModelTransport, ReqwestTransport, TransportError, TransportResponse};
