// src/lib.rs

pub mod api;
pub mod backend;
pub mod categories;
pub mod config;
pub mod error;
pub mod handlers;
#[cfg(feature = "llama")]
pub mod llama;
pub mod model;
pub mod responder;
pub mod sanitize;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use config::Settings;
use model::{ModelLoader, ModelState};
use responder::Responder;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Per-request behaviour switches taken from [`Settings`].
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    pub append_disclaimer: bool,
    pub reject_blank_messages: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            append_disclaimer: true,
            reject_blank_messages: true,
        }
    }
}

impl From<&Settings> for ChatOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            append_disclaimer: settings.append_disclaimer,
            reject_blank_messages: settings.reject_blank_messages,
        }
    }
}

/* ---------- Shared State ---------- */
pub struct AppState {
    pub model: ModelState,
    pub responder: Responder,
    pub options: ChatOptions,
}

impl AppState {
    pub fn new(model: ModelState, options: ChatOptions) -> Self {
        Self {
            responder: Responder::new(model.clone()),
            model,
            options,
        }
    }
}

/// Picks the model loader for the configured weights, if any.
pub fn model_loader(settings: &Settings) -> Option<Arc<dyn ModelLoader>> {
    let path = settings.model_path.as_ref()?;

    #[cfg(feature = "llama")]
    let loader: Option<Arc<dyn ModelLoader>> =
        Some(Arc::new(llama::LlamaLoader::new(path.clone())));

    #[cfg(not(feature = "llama"))]
    let loader = {
        tracing::warn!(
            model_path = %path.display(),
            "Built without the `llama` feature; ignoring MODEL_PATH"
        );
        None
    };

    loader
}

fn cors(settings: &Settings) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE])
        .max_age(3600);
    match &settings.cors_allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

/// Serves the API until shutdown, loading the model in the background.
pub async fn run(settings: Settings) -> std::io::Result<()> {
    let model = ModelState::new();
    let shutdown = CancellationToken::new();

    let loader_task = model_loader(&settings).map(|loader| {
        model::spawn_model_loader(
            model.clone(),
            loader,
            settings.model_load_delay,
            shutdown.clone(),
        )
    });
    if loader_task.is_none() {
        tracing::info!("No model configured, serving rule-based answers");
    }

    let app_state = web::Data::new(AppState::new(model, ChatOptions::from(&settings)));
    let server_settings = settings.clone();

    let (host, port) = settings.bind_addr();
    tracing::info!(%host, port, "Medical chatbot API starting");

    let result = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&server_settings))
            .app_data(app_state.clone())
            .configure(handlers::configure)
    })
    .bind((host, port))?
    .run()
    .await;

    shutdown.cancel();
    if let Some(task) = loader_task {
        task.abort();
    }
    result
}
