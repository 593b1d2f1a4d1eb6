//! GardenSession - the primary public API for the journaling garden.
//!
//! This module ties the in-memory [`Garden`], its on-disk store and the
//! follow-up generator together. Every mutation is written through to disk
//! before the call returns.

use crate::catalog::Category;
use crate::followup::{select_generator, FollowUpConfig, FollowUpGenerator, DEFAULT_MODEL};
use crate::garden::{now_millis, Garden, PlantEntry};
use crate::persist::{GardenStore, PersistError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Default directory for garden data, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "garden_data";

/// Errors from GardenSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Persist(#[from] PersistError),
}

/// Configuration for opening a garden session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding the stored garden.
    pub data_dir: PathBuf,

    /// Gemini credential. `None` selects the built-in follow-ups.
    pub api_key: Option<String>,

    /// Model used for follow-up questions.
    pub model: String,

    /// Temperature for follow-up generation.
    pub temperature: Option<f32>,

    /// Cap on generated tokens.
    pub max_output_tokens: Option<u32>,
}

impl SessionConfig {
    /// Create a config storing the garden in `data_dir`, with no credential.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let defaults = FollowUpConfig::default();
        Self {
            data_dir: data_dir.into(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
        }
    }

    /// Create a config with the credential read from `GEMINI_API_KEY` or `API_KEY`.
    pub fn from_env(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_key: gemini::api_key_from_env(),
            ..Self::new(data_dir)
        }
    }

    /// Set the Gemini credential.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Drop any credential, forcing the built-in follow-ups.
    pub fn offline(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set temperature for generation.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Cap generated tokens.
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    fn follow_up_config(&self) -> FollowUpConfig {
        FollowUpConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Everything needed to ask for a follow-up without borrowing the session.
///
/// Taken as a snapshot so the call can run on another task while the
/// session keeps serving the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUpRequest {
    pub plant_id: String,
    pub category: Category,
    pub question: String,
    pub answer: String,
}

impl FollowUpRequest {
    /// Run the request against `generator`.
    pub async fn run(&self, generator: &dyn FollowUpGenerator) -> String {
        generator
            .follow_up(self.category, &self.question, &self.answer)
            .await
    }
}

/// A journaling garden session.
///
/// The session is the sole owner of the plants. Callers read them through
/// [`GardenSession::garden`] and change them only through the methods here.
pub struct GardenSession {
    garden: Garden,
    store: GardenStore,
    generator: Arc<dyn FollowUpGenerator>,
    rng: StdRng,
    first_run: bool,
}

impl GardenSession {
    /// Open the garden described by `config`, loading whatever is stored.
    pub async fn open(config: SessionConfig) -> Self {
        let generator = select_generator(config.api_key.as_deref(), config.follow_up_config());
        let store = GardenStore::in_dir(&config.data_dir);
        Self::with_parts(store, generator, StdRng::from_entropy()).await
    }

    /// Open a session from explicit parts (tests use seeded rngs and scripted generators).
    pub async fn with_parts(
        store: GardenStore,
        generator: Arc<dyn FollowUpGenerator>,
        rng: StdRng,
    ) -> Self {
        let loaded = store.load().await;
        Self {
            garden: loaded.garden,
            store,
            generator,
            rng,
            first_run: loaded.first_run,
        }
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    pub fn plant(&self, id: &str) -> Option<&PlantEntry> {
        self.garden.get(id)
    }

    /// True when nothing was stored at startup.
    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    pub fn storage_path(&self) -> &Path {
        self.store.path()
    }

    /// Shared handle to the follow-up generator.
    pub fn generator(&self) -> Arc<dyn FollowUpGenerator> {
        Arc::clone(&self.generator)
    }

    /// Pick the category offered in the planting dialog.
    pub fn start_planting(&mut self) -> Category {
        Category::random(&mut self.rng)
    }

    /// Plant a seed answering `category`'s base prompt and save the garden.
    ///
    /// Returns `Ok(None)` when `answer` is blank. On a storage error the
    /// plant stays in the in-memory garden.
    pub async fn plant_seed(
        &mut self,
        category: Category,
        answer: &str,
    ) -> Result<Option<PlantEntry>, SessionError> {
        let planted = self
            .garden
            .plant(category, answer, &mut self.rng, now_millis())
            .cloned();

        if planted.is_some() {
            self.save().await?;
        }
        Ok(planted)
    }

    /// Record a reflection on plant `id`, grow it, and save the garden.
    ///
    /// Returns `Ok(None)` for an unknown id or blank answer.
    pub async fn reflect(
        &mut self,
        id: &str,
        question: &str,
        answer: &str,
    ) -> Result<Option<PlantEntry>, SessionError> {
        let updated = self
            .garden
            .append_reflection(id, question, answer, now_millis())
            .cloned();

        if updated.is_some() {
            self.save().await?;
        }
        Ok(updated)
    }

    /// Snapshot what the generator needs to ask about plant `id`.
    pub fn follow_up_request(&self, id: &str) -> Option<FollowUpRequest> {
        let plant = self.garden.get(id)?;
        let latest = plant.latest_reflection()?;
        Some(FollowUpRequest {
            plant_id: plant.id.clone(),
            category: plant.category,
            question: latest.question.clone(),
            answer: latest.answer.clone(),
        })
    }

    /// Generate the next question for plant `id`. `None` for an unknown id.
    pub async fn follow_up(&self, id: &str) -> Option<String> {
        let request = self.follow_up_request(id)?;
        Some(request.run(self.generator.as_ref()).await)
    }

    /// Write the whole garden to disk.
    pub async fn save(&self) -> Result<(), SessionError> {
        self.store.save(&self.garden).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config() {
        let config = SessionConfig::new("/tmp/garden")
            .with_api_key("secret")
            .with_model("gemini-2.0-flash")
            .with_temperature(0.5)
            .with_max_output_tokens(40);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/garden"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.max_output_tokens, Some(40));

        let offline = config.offline();
        assert!(offline.api_key.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_follow_up_config_carries_settings() {
        let config = SessionConfig::new("x").with_model("m").with_max_output_tokens(8);
        let follow_up = config.follow_up_config();
        assert_eq!(follow_up.model, "m");
        assert_eq!(follow_up.max_output_tokens, Some(8));
    }
}
