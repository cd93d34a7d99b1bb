use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{ModelError, ModelResult};
use crate::extract::parse_json_object;
use crate::request::{GenerateContentRequest, InlineImage};
use crate::response::GenerateContentResponse;
use crate::settings::ModelSettings;
use crate::transport::{ModelTransport, ReqwestTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailureKind {
    /// The transport never got a response.
    Network,
    /// HTTP 503; the client backs off before the next candidate.
    Overloaded,
    /// Any other non-success status.
    Status(u16),
}

/// One candidate that did not produce an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptFailure {
    pub model: String,
    pub kind: AttemptFailureKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct TextReply {
    pub model: String,
    pub text: String,
    pub failures: Vec<AttemptFailure>,
}

#[derive(Debug, Clone)]
pub struct StructuredReply<T> {
    pub value: T,
    pub model: String,
    pub raw_text: String,
    pub failures: Vec<AttemptFailure>,
}

/// Sends a prompt plus image to the configured model candidates, one at a
/// time, falling back to the next candidate on failure.
pub struct ModelClient {
    settings: ModelSettings,
    transport: Arc<dyn ModelTransport>,
}

impl ModelClient {
    pub fn new(settings: ModelSettings) -> ModelResult<Self> {
        let transport = ReqwestTransport::new(settings.request_timeout)?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    pub fn with_transport(settings: ModelSettings, transport: Arc<dyn ModelTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    pub async fn generate_text(&self, prompt: &str, image: &InlineImage) -> ModelResult<TextReply> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ModelError::MissingApiKey)?;
        if self.settings.models.is_empty() {
            return Err(ModelError::NoCandidates);
        }

        let request = GenerateContentRequest::new(prompt, image, &self.settings);
        let body = serde_json::to_value(&request)
            .map_err(|error| ModelError::Serialization(error.to_string()))?;

        let mut failures: Vec<AttemptFailure> = Vec::new();
        for model in &self.settings.models {
            let url = self.settings.endpoint(model);
            tracing::info!(model = %model, attempt = failures.len() + 1, "requesting edit plan");

            let response = match self.transport.post_json(&url, api_key, &body).await {
                Ok(response) => response,
                Err(error) => {
                    tracing::warn!(model = %model, "model request failed: {error}");
                    failures.push(AttemptFailure {
                        model: model.clone(),
                        kind: AttemptFailureKind::Network,
                        message: error.to_string(),
                    });
                    continue;
                }
            };

            if response.is_success() {
                let text = read_reply_text(&response.body)?;
                tracing::info!(
                    model = %model,
                    failed_candidates = failures.len(),
                    chars = text.len(),
                    "model replied"
                );
                return Ok(TextReply {
                    model: model.clone(),
                    text,
                    failures,
                });
            }

            let kind = if response.is_overloaded() {
                AttemptFailureKind::Overloaded
            } else {
                AttemptFailureKind::Status(response.status)
            };
            tracing::warn!(model = %model, status = response.status, "model returned an error status");
            failures.push(AttemptFailure {
                model: model.clone(),
                kind,
                message: format!("{} - {}", response.status, response.body),
            });

            if kind == AttemptFailureKind::Overloaded {
                tracing::debug!(
                    backoff_ms = self.settings.overload_backoff.as_millis() as u64,
                    "model overloaded, backing off"
                );
                tokio::time::sleep(self.settings.overload_backoff).await;
            }
        }

        let last_error = failures
            .last()
            .map(|failure| failure.message.clone())
            .unwrap_or_default();
        Err(ModelError::AllCandidatesExhausted {
            last_error,
            attempts: failures.len(),
        })
    }

    /// Like [`generate_text`](Self::generate_text), then parses the first JSON
    /// object in the reply into `T`.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        image: &InlineImage,
    ) -> ModelResult<StructuredReply<T>> {
        let reply = self.generate_text(prompt, image).await?;
        let value = parse_json_object(&reply.text)?;
        Ok(StructuredReply {
            value,
            model: reply.model,
            raw_text: reply.text,
            failures: reply.failures,
        })
    }
}

fn read_reply_text(body: &str) -> ModelResult<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|error| ModelError::InvalidResponse(error.to_string()))?;
    response
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| ModelError::InvalidResponse("response has no candidate text".to_string()))
}
