//! Follow-up question generation.
//!
//! After a plant is opened the app asks a gentle follow-up question built
//! from the plant's latest reflection. Two generators implement the same
//! interface: one backed by Gemini, one that picks from a fixed list. The
//! Gemini generator falls back to the fixed list on any failure, so a
//! follow-up is always produced.

use crate::catalog::{Category, FALLBACK_FOLLOW_UPS};
use async_trait::async_trait;
use gemini::{Gemini, Request};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

/// Default model for follow-up questions.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Produces the next question to ask about a plant.
#[async_trait]
pub trait FollowUpGenerator: Send + Sync {
    /// Generate a follow-up question. Always returns non-empty text.
    async fn follow_up(
        &self,
        category: Category,
        original_prompt: &str,
        prior_answer: &str,
    ) -> String;

    /// Short label for logs and the status bar.
    fn name(&self) -> &str;
}

/// Picks uniformly from [`FALLBACK_FOLLOW_UPS`].
pub struct FallbackFollowUps {
    rng: Mutex<StdRng>,
}

impl FallbackFollowUps {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic picks for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Pick one of the fixed questions.
    pub fn pick(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        FALLBACK_FOLLOW_UPS
            .choose(&mut *rng)
            .copied()
            .unwrap_or(FALLBACK_FOLLOW_UPS[0])
            .to_string()
    }
}

impl Default for FallbackFollowUps {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FollowUpGenerator for FallbackFollowUps {
    async fn follow_up(&self, _category: Category, _original_prompt: &str, _prior_answer: &str) -> String {
        self.pick()
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Settings for the Gemini-backed generator.
#[derive(Debug, Clone)]
pub struct FollowUpConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(0.9),
            max_output_tokens: None,
        }
    }
}

/// Asks Gemini for a follow-up, once, falling back to the fixed list.
pub struct GeminiFollowUps {
    client: Gemini,
    config: FollowUpConfig,
    fallback: FallbackFollowUps,
}

impl GeminiFollowUps {
    pub fn new(client: Gemini, config: FollowUpConfig) -> Self {
        Self {
            client,
            config,
            fallback: FallbackFollowUps::new(),
        }
    }

    /// Replace the fallback picker (seeded pickers make failures deterministic).
    pub fn with_fallback(mut self, fallback: FallbackFollowUps) -> Self {
        self.fallback = fallback;
        self
    }

    async fn request(
        &self,
        category: Category,
        original_prompt: &str,
        prior_answer: &str,
    ) -> Result<String, gemini::Error> {
        let mut request = Request::prompt(build_prompt(category, original_prompt, prior_answer))
            .with_model(self.config.model.clone());
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max) = self.config.max_output_tokens {
            request = request.with_max_output_tokens(max);
        }

        let text = self.client.generate(request).await?.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(gemini::Error::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl FollowUpGenerator for GeminiFollowUps {
    async fn follow_up(&self, category: Category, original_prompt: &str, prior_answer: &str) -> String {
        match self.request(category, original_prompt, prior_answer).await {
            Ok(question) => question,
            Err(e) => {
                tracing::warn!(error = %e, model = %self.config.model, "follow-up generation failed, using fallback");
                self.fallback.pick()
            }
        }
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

/// Choose a generator once, at construction time.
///
/// A usable credential selects Gemini; anything else selects the fixed list.
pub fn select_generator(api_key: Option<&str>, config: FollowUpConfig) -> Arc<dyn FollowUpGenerator> {
    match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => {
            tracing::info!(model = %config.model, "using Gemini for follow-up questions");
            let client = Gemini::new(key).with_model(config.model.clone());
            Arc::new(GeminiFollowUps::new(client, config))
        }
        None => {
            tracing::info!("no Gemini API key, using built-in follow-up questions");
            Arc::new(FallbackFollowUps::new())
        }
    }
}

/// The instruction sent to the model.
pub fn build_prompt(category: Category, original_prompt: &str, prior_answer: &str) -> String {
    format!(
        "You are a compassionate, gentle therapist assistant in a gardening app called \"Reasons Garden\".\n\
         The user just planted a seed representing the therapeutic factor: \"{category}\".\n\
         \n\
         Original Prompt: \"{original_prompt}\"\n\
         User's Answer: \"{prior_answer}\"\n\
         \n\
         Please generate a single, short, warm, and non-judgmental follow-up question to help them reflect deeper or appreciate this strength.\n\
         Keep it under 20 words. Do not be clinical. Be poetic but grounded."
    )
}
