//! Pulls a JSON object out of free-form model output.
//!
//! Replies may wrap the answer in prose or markdown fences. The first
//! balanced `{...}` span that parses as a JSON object is the payload.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// Returns the first balanced `{...}` substring of `text` that is valid JSON.
pub fn extract_json_object(text: &str) -> ModelResult<&str> {
    let bytes = text.as_bytes();
    let mut first_invalid: Option<serde_json::Error> = None;

    // Objects nested inside a rejected span are never the payload.
    let mut resume_at = 0;

    for (start, _) in text.match_indices('{') {
        if start < resume_at {
            continue;
        }
        let Some(end) = balanced_object_end(bytes, start) else {
            continue;
        };
        let candidate = &text[start..=end];
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(_)) => return Ok(candidate),
            Ok(_) => {}
            Err(error) => {
                first_invalid.get_or_insert(error);
                resume_at = end + 1;
            }
        }
    }

    let message = match first_invalid {
        Some(error) => format!("invalid JSON in model response: {error}"),
        None => "no JSON object found in model response".to_string(),
    };
    Err(ModelError::PlanParse {
        message,
        context: text.to_string(),
    })
}

/// Extracts the JSON object from `text` and deserializes it into `T`.
pub fn parse_json_object<T: DeserializeOwned>(text: &str) -> ModelResult<T> {
    let json = extract_json_object(text)?;
    serde_json::from_str(json).map_err(|error| ModelError::PlanParse {
        message: error.to_string(),
        context: json.to_string(),
    })
}

/// Index of the `}` closing the object opened at `start`, skipping braces
/// inside string literals.
fn balanced_object_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}
