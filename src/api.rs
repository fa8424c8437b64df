// src/api.rs

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LENGTH: i64 = 200;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_max_length")]
    pub max_length: i64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_max_length() -> i64 {
    DEFAULT_MAX_LENGTH
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
    pub status: Status,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub model_loading: bool,
    pub service: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModelStatusResponse {
    pub loaded: bool,
    pub loading: bool,
    pub deployment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_fills_defaults() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(req.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn status_serializes_lowercase() {
        let body = serde_json::to_value(ChatResponse {
            response: "x".into(),
            status: Status::Error,
        })
        .unwrap();
        assert_eq!(body["status"], "error");
    }
}
