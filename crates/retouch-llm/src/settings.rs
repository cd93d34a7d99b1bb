use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODELS: &[&str] = &[
    "models/gemini-2.0-flash-exp",
    "models/gemini-1.5-flash",
    "models/gemini-1.5-flash-latest",
    "models/gemini-1.5-pro",
    "models/gemini-1.5-pro-latest",
];
const DEFAULT_TEMPERATURE: f64 = 0.1;
const DEFAULT_TOP_K: u32 = 40;
const DEFAULT_TOP_P: f64 = 0.95;
const DEFAULT_OVERLOAD_BACKOFF: Duration = Duration::from_secs(1);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection and sampling settings for the vision model.
///
/// `models` is tried in order; the first candidate that answers with a
/// success status wins.
#[derive(Clone)]
pub struct ModelSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub models: Vec<String>,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub overload_backoff: Duration,
    pub request_timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            models: DEFAULT_MODELS.iter().map(|model| model.to_string()).collect(),
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
            overload_backoff: DEFAULT_OVERLOAD_BACKOFF,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSettings")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("models", &self.models)
            .field("temperature", &self.temperature)
            .field("top_k", &self.top_k)
            .field("top_p", &self.top_p)
            .field("overload_backoff", &self.overload_backoff)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ModelSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("RETOUCH_MODEL_BASE_URL")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.base_url);
        let api_key = first_api_key([
            env::var("RETOUCH_API_KEY").ok(),
            env::var("GEMINI_API_KEY").ok(),
        ]);
        let models = env::var("RETOUCH_MODELS")
            .ok()
            .map(|value| parse_models(&value))
            .filter(|models| !models.is_empty())
            .unwrap_or(defaults.models);
        let temperature = env::var("RETOUCH_TEMPERATURE")
            .ok()
            .and_then(|value| value.parse::<f64>().ok())
            .unwrap_or(defaults.temperature);
        let request_timeout = env::var("RETOUCH_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            base_url,
            api_key,
            models,
            temperature,
            request_timeout,
            ..defaults
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `generateContent` endpoint for one model, without the key parameter.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model.trim_start_matches('/')
        )
    }
}

/// First non-blank key, so an empty variable does not hide the next one.
fn first_api_key<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|key| !key.trim().is_empty())
}

fn parse_models(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .map(str::to_string)
        .collect()
}
