// src/handlers.rs

use super::api::{ChatRequest, ChatResponse, HealthResponse, ModelStatusResponse, Status};
use super::error::ServiceError;
use super::sanitize::sanitize;
use super::AppState;
use actix_web::{get, post, web, HttpResponse};

/// Appended once to every chat answer when enabled.
pub const DISCLAIMER: &str = "\n\n**⚠️ Medical Disclaimer:** This information is for educational purposes only and should not replace professional medical advice. Always consult healthcare professionals for medical concerns.";

/// Returned with `status: error` when answering fails unexpectedly.
pub const APOLOGY: &str =
    "I apologize, but I encountered an error processing your request. Please try again later.";

const SERVICE_NAME: &str = "medical_chatbot_api";
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Registers every route plus the JSON body error mapping.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::InvalidBody(err.to_string()).into()
    }))
    .service(index)
    .service(chat)
    .service(health)
    .service(model_status);
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/chat")]
pub async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ServiceError> {
    let ChatRequest {
        message,
        max_length,
        temperature,
    } = body.into_inner();

    let preview: String = message.chars().take(50).collect();
    tracing::info!(message = %preview, "Received chat request");

    let strict = state.options.reject_blank_messages;
    if strict && message.trim().is_empty() {
        tracing::warn!("Empty message received");
        return Err(ServiceError::BadRequest("Message cannot be empty".into()));
    }

    let message = sanitize(&message);
    if strict && message.is_empty() {
        tracing::warn!("Message empty after sanitizing");
        return Err(ServiceError::BadRequest("Invalid message content".into()));
    }

    // Inference can be CPU-bound, so keep it off the async workers.
    let responder = state.responder.clone();
    let result = web::block(move || responder.respond(&message, max_length, temperature)).await;

    let reply = match result {
        Ok(mut text) => {
            if state.options.append_disclaimer {
                text.push_str(DISCLAIMER);
            }
            tracing::info!("Response generated successfully");
            ChatResponse {
                response: text,
                status: Status::Success,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat error");
            ChatResponse {
                response: APOLOGY.to_string(),
                status: Status::Error,
            }
        }
    };

    Ok(HttpResponse::Ok().json(reply))
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model.is_loaded(),
        model_loading: state.model.is_loading(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[get("/model-status")]
pub async fn model_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ModelStatusResponse {
        loaded: state.model.is_loaded(),
        loading: state.model.is_loading(),
        deployment: "actix_server".to_string(),
    })
}
