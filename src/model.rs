// src/model.rs

use crate::backend::TextGenerator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no model configured")]
    NotConfigured,

    #[error("failed to load model: {0}")]
    Backend(String),
}

/// Produces a ready generator. Loading is slow and blocking.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Arc<dyn TextGenerator>, LoadError>;
}

/// Outcome of a single [`ModelState::load_with`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// Another load is running or a model is already in place.
    Skipped,
}

#[derive(Default)]
struct Inner {
    loading: AtomicBool,
    generator: OnceLock<Arc<dyn TextGenerator>>,
}

/// Shared model status, written by the loader and read by request handlers.
///
/// Cloning hands out another view of the same state.
#[derive(Clone, Default)]
pub struct ModelState {
    inner: Arc<Inner>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state with a generator already in place.
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        let state = Self::new();
        let _ = state.inner.generator.set(generator);
        state
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.generator.get().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// The loaded generator, if any.
    pub fn generator(&self) -> Option<Arc<dyn TextGenerator>> {
        self.inner.generator.get().cloned()
    }

    /// Runs `loader` unless a load is in flight or already succeeded.
    pub fn load_with(&self, loader: &dyn ModelLoader) -> LoadOutcome {
        if self.is_loaded() {
            return LoadOutcome::Skipped;
        }
        if self
            .inner
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return LoadOutcome::Skipped;
        }

        tracing::info!("Loading text generation model");
        let outcome = match loader.load() {
            Ok(generator) => {
                let _ = self.inner.generator.set(generator);
                tracing::info!("Model loaded");
                LoadOutcome::Loaded
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load model, serving rule-based answers");
                LoadOutcome::Failed
            }
        };

        self.inner.loading.store(false, Ordering::Release);
        outcome
    }
}

/// Loads the model in the background after `delay`.
///
/// Cancelling `shutdown` before the delay elapses skips the load. Once the
/// blocking load has started it runs to completion.
pub fn spawn_model_loader(
    state: ModelState,
    loader: Arc<dyn ModelLoader>,
    delay: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<LoadOutcome> {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Model loading cancelled before start");
                return LoadOutcome::Skipped;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        match tokio::task::spawn_blocking(move || state.load_with(loader.as_ref())).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Model loader task failed");
                LoadOutcome::Failed
            }
        }
    })
}
