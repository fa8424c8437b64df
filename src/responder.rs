// src/responder.rs

use crate::backend::{self, GenerationError, GenerationParams};
use crate::categories::{self, EMPTY_MESSAGE_RESPONSE};
use crate::model::ModelState;

/// Turns a sanitized message into an answer.
///
/// Uses the loaded model when there is one and falls back to the keyword
/// table on every failure. Never returns an error.
#[derive(Clone)]
pub struct Responder {
    model: ModelState,
}

impl Responder {
    pub fn new(model: ModelState) -> Self {
        Self { model }
    }

    pub fn respond(&self, message: &str, max_length: i64, temperature: f64) -> String {
        if message.trim().is_empty() {
            return EMPTY_MESSAGE_RESPONSE.to_string();
        }

        let params = GenerationParams::clamped(max_length, temperature);
        match self.generate(message, &params) {
            Ok(text) => text,
            Err(GenerationError::NotLoaded) => rule_based(message),
            Err(reason) => {
                tracing::warn!(%reason, "Discarding model output, using rule-based answer");
                rule_based(message)
            }
        }
    }

    fn generate(&self, message: &str, params: &GenerationParams) -> Result<String, GenerationError> {
        let generator = self.model.generator().ok_or(GenerationError::NotLoaded)?;
        let raw = generator.generate(&backend::build_prompt(message), params)?;
        backend::extract_response(&raw)
    }
}

/// Canned answer for the first category the message matches.
pub fn rule_based(message: &str) -> String {
    if message.trim().is_empty() {
        return EMPTY_MESSAGE_RESPONSE.to_string();
    }
    let category = categories::classify(message);
    tracing::debug!(topic = %category.topic, "Matched response category");
    category.response.to_string()
}
