//! HTTP-level tests for the chat API, driven through actix's test harness.

use actix_web::{http::StatusCode, test, web, App};
use medical_chatbot::api::{ChatResponse, HealthResponse, ModelStatusResponse, Status};
use medical_chatbot::backend::{GenerationError, GenerationParams, TextGenerator};
use medical_chatbot::categories::{classify, Topic, EMPTY_MESSAGE_RESPONSE};
use medical_chatbot::handlers::{self, APOLOGY, DISCLAIMER};
use medical_chatbot::model::ModelState;
use medical_chatbot::{AppState, ChatOptions};
use serde_json::json;
use std::sync::Arc;

struct FixedAnswer(&'static str);

impl TextGenerator for FixedAnswer {
    fn generate(&self, prompt: &str, _: &GenerationParams) -> Result<String, GenerationError> {
        Ok(format!("{prompt}{}", self.0))
    }
}

struct Panicking;

impl TextGenerator for Panicking {
    fn generate(&self, _: &str, _: &GenerationParams) -> Result<String, GenerationError> {
        panic!("backend crashed");
    }
}

fn state(model: ModelState, options: ChatOptions) -> web::Data<AppState> {
    web::Data::new(AppState::new(model, options))
}

macro_rules! app {
    ($data:expr) => {
        test::init_service(
            App::new()
                .app_data($data)
                .configure(handlers::configure),
        )
        .await
    };
}

async fn post_chat(
    data: web::Data<AppState>,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let app = app!(data);
    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

#[actix_web::test]
async fn hives_question_gets_allergy_answer_and_one_disclaimer() {
    let data = state(ModelState::new(), ChatOptions::default());
    let (status, body) = post_chat(data, json!({"message": "What should I do for hives?"})).await;
    let body: ChatResponse = serde_json::from_value(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, Status::Success);
    let allergy = classify("hives");
    assert_eq!(allergy.topic, Topic::Allergy);
    assert!(body.response.starts_with(allergy.response));
    assert!(body.response.ends_with(DISCLAIMER));
    assert_eq!(body.response.matches(DISCLAIMER).count(), 1);
    assert_eq!(body.response.len(), allergy.response.len() + DISCLAIMER.len());
}

#[actix_web::test]
async fn disclaimer_can_be_disabled() {
    let options = ChatOptions {
        append_disclaimer: false,
        ..ChatOptions::default()
    };
    let (_, body) = post_chat(state(ModelState::new(), options), json!({"message": "migraine"})).await;
    assert_eq!(body["response"], classify("migraine").response);
}

#[actix_web::test]
async fn blank_message_is_rejected() {
    let data = state(ModelState::new(), ChatOptions::default());
    let (status, body) = post_chat(data, json!({"message": "   "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message cannot be empty");
}

#[actix_web::test]
async fn control_only_message_is_rejected() {
    let data = state(ModelState::new(), ChatOptions::default());
    let (status, body) = post_chat(data, json!({"message": "\u{1}\u{2}\u{7f}"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid message content");
}

#[actix_web::test]
async fn lenient_mode_prompts_for_input() {
    let options = ChatOptions {
        append_disclaimer: false,
        reject_blank_messages: false,
    };
    let (status, body) = post_chat(state(ModelState::new(), options), json!({"message": ""})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["response"], EMPTY_MESSAGE_RESPONSE);
}

#[actix_web::test]
async fn malformed_body_is_unprocessable() {
    let data = state(ModelState::new(), ChatOptions::default());
    let (status, body) = post_chat(data, json!({"message": 42})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[actix_web::test]
async fn loaded_model_answer_is_used() {
    let model = ModelState::with_generator(Arc::new(FixedAnswer(
        "Rest, drink fluids, and check your temperature twice a day.",
    )));
    let (_, body) = post_chat(
        state(model, ChatOptions::default()),
        json!({"message": "I have a fever", "max_length": 5000, "temperature": 3.0}),
    )
    .await;

    assert_eq!(
        body["response"],
        format!("Rest, drink fluids, and check your temperature twice a day.{DISCLAIMER}")
    );
}

#[actix_web::test]
async fn crashing_backend_yields_apology_with_error_status() {
    let model = ModelState::with_generator(Arc::new(Panicking));
    let (status, body) = post_chat(
        state(model, ChatOptions::default()),
        json!({"message": "cough"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["response"], APOLOGY);
}

#[actix_web::test]
async fn health_reflects_model_state() {
    let model = ModelState::with_generator(Arc::new(FixedAnswer("unused")));
    let app = app!(state(model, ChatOptions::default()));

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
    assert!(!health.model_loading);

    let req = test::TestRequest::get().uri("/model-status").to_request();
    let status: ModelStatusResponse = test::call_and_read_body_json(&app, req).await;
    assert!(status.loaded);
    assert!(!status.loading);
}

#[actix_web::test]
async fn index_serves_html() {
    let app = app!(state(ModelState::new(), ChatOptions::default()));
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("/chat"));
}
