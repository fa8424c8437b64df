// src/backend.rs

use thiserror::Error;

/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f32 = 0.1;
/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const MIN_NEW_TOKENS: u32 = 16;
/// Ceiling on generated tokens regardless of what the client asks for.
pub const MAX_NEW_TOKENS: u32 = 512;
/// Generated answers shorter than this are treated as degenerate.
pub const MIN_RESPONSE_CHARS: usize = 20;

const RESPONSE_MARKER: &str = "### Response:";
const THINK_END: &str = "</think>";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("model is not loaded")]
    NotLoaded,

    #[error("backend failure: {0}")]
    Backend(String),

    #[error("generation produced no response text")]
    MissingResponse,

    #[error("generated response too short ({len} < {min} chars)")]
    TooShort { len: usize, min: usize },
}

/// Bounded sampling parameters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    /// Clamps client-supplied advisory bounds into the supported range.
    pub fn clamped(max_length: i64, temperature: f64) -> Self {
        let temperature = if temperature.is_finite() {
            (temperature as f32).clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
        } else {
            DEFAULT_TEMPERATURE
        };
        let max_new_tokens =
            max_length.clamp(MIN_NEW_TOKENS as i64, MAX_NEW_TOKENS as i64) as u32;
        Self {
            max_new_tokens,
            temperature,
        }
    }
}

/// A text-generation backend.
///
/// Calls are synchronous and may be CPU-heavy; callers run them off the
/// async executor.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, GenerationError>;
}

/// Wraps a sanitized message in the instruction template the model was tuned on.
pub fn build_prompt(message: &str) -> String {
    format!(
        "Below is a medical instruction. Write an appropriate response.\n\n### Instruction:\n{message}\n\n{RESPONSE_MARKER}\n"
    )
}

/// Pulls the answer out of raw model output and rejects degenerate text.
///
/// Backends that echo the prompt are handled by taking whatever follows the
/// last response marker. A leading reasoning block is dropped.
pub fn extract_response(raw: &str) -> Result<String, GenerationError> {
    let after_marker = match raw.rfind(RESPONSE_MARKER) {
        Some(pos) => &raw[pos + RESPONSE_MARKER.len()..],
        None => raw,
    };
    let answer = match after_marker.rfind(THINK_END) {
        Some(pos) => &after_marker[pos + THINK_END.len()..],
        None => after_marker,
    };
    let answer = answer.trim();

    if answer.is_empty() {
        return Err(GenerationError::MissingResponse);
    }
    let len = answer.chars().count();
    if len < MIN_RESPONSE_CHARS {
        return Err(GenerationError::TooShort {
            len,
            min: MIN_RESPONSE_CHARS,
        });
    }
    Ok(answer.to_string())
}
