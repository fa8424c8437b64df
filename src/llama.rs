// src/llama.rs

use crate::backend::{GenerationError, GenerationParams, TextGenerator};
use crate::model::{LoadError, ModelLoader};
use llama_cpp_2::{
    context::params::LlamaContextParams,
    llama_backend::LlamaBackend,
    llama_batch::LlamaBatch,
    model::{params::LlamaModelParams, AddBos, LlamaModel, Special},
    sampling::LlamaSampler,
};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

const CONTEXT_SIZE: u32 = 2048;
const SAMPLER_SEED: u32 = 1234;

/// Loads GGUF weights from disk into a [`LlamaGenerator`].
pub struct LlamaLoader {
    model_path: PathBuf,
}

impl LlamaLoader {
    pub fn new(model_path: PathBuf) -> Self {
        Self { model_path }
    }
}

impl ModelLoader for LlamaLoader {
    fn load(&self) -> Result<Arc<dyn TextGenerator>, LoadError> {
        if !self.model_path.is_file() {
            return Err(LoadError::Backend(format!(
                "model file not found: {}",
                self.model_path.display()
            )));
        }

        let backend = LlamaBackend::init().map_err(|e| LoadError::Backend(e.to_string()))?;
        // For better performance, consider offloading layers to the GPU
        // let model_params = LlamaModelParams::default().with_n_gpu_layers(35);
        let model_params = LlamaModelParams::default();
        let model = LlamaModel::load_from_file(&backend, &self.model_path, &model_params)
            .map_err(|e| LoadError::Backend(e.to_string()))?;

        tracing::info!(model_path = %self.model_path.display(), "GGUF model loaded");
        Ok(Arc::new(LlamaGenerator { backend, model }))
    }
}

/// Local causal LM running through llama.cpp.
pub struct LlamaGenerator {
    backend: LlamaBackend,
    model: LlamaModel,
}

fn backend_err(stage: &str, e: impl std::fmt::Display) -> GenerationError {
    GenerationError::Backend(format!("{stage}: {e}"))
}

impl TextGenerator for LlamaGenerator {
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, GenerationError> {
        let model = &self.model;
        let max_new_tokens = params.max_new_tokens as usize;

        // 1. Build context
        let ctx_params = LlamaContextParams::default()
            .with_n_ctx(NonZeroU32::new(CONTEXT_SIZE))
            .with_n_batch(512);
        let mut ctx = model
            .new_context(&self.backend, ctx_params)
            .map_err(|e| backend_err("create context", e))?;

        // 2. Tokenize and feed prompt
        let toks = model
            .str_to_token(prompt, AddBos::Always)
            .map_err(|e| backend_err("tokenize prompt", e))?;
        if toks.is_empty() || toks.len() + max_new_tokens > CONTEXT_SIZE as usize {
            return Err(GenerationError::Backend(format!(
                "prompt of {} tokens does not fit the context window",
                toks.len()
            )));
        }

        let mut batch = LlamaBatch::new(toks.len() + max_new_tokens, 1);
        let last_idx = toks.len() as i32 - 1;
        for (i, t) in (0_i32..).zip(toks.iter()) {
            batch
                .add(*t, i, &[0], i == last_idx)
                .map_err(|e| backend_err("fill batch", e))?;
        }
        ctx.decode(&mut batch)
            .map_err(|e| backend_err("decode prompt", e))?;

        // 3. Sample until EOS or the token budget runs out
        let mut sampler = LlamaSampler::chain_simple([
            LlamaSampler::temp(params.temperature),
            LlamaSampler::dist(SAMPLER_SEED),
        ]);
        let eos = model.token_eos();
        let mut out = String::new();
        let mut pos = batch.n_tokens();

        for _ in 0..max_new_tokens {
            let next_id = sampler.sample(&ctx, batch.n_tokens() - 1);
            sampler.accept(next_id);
            if next_id == eos {
                break;
            }

            let bytes = model
                .token_to_bytes(next_id, Special::Tokenize)
                .map_err(|e| backend_err("detokenize", e))?;
            out.push_str(&String::from_utf8_lossy(&bytes));

            batch.clear();
            batch
                .add(next_id, pos, &[0], true)
                .map_err(|e| backend_err("fill batch", e))?;
            ctx.decode(&mut batch)
                .map_err(|e| backend_err("decode token", e))?;
            pos += 1;
        }

        Ok(out)
    }
}
