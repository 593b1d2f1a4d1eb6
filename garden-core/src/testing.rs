//! Testing utilities for the garden.
//!
//! This module provides tools for integration testing:
//! - `ScriptedFollowUps` for deterministic follow-ups without API calls
//! - `TestHarness` for scripted planting and reflecting scenarios
//! - `unreachable_gemini` for exercising the fallback path offline

use crate::catalog::Category;
use crate::followup::{FallbackFollowUps, FollowUpConfig, FollowUpGenerator, GeminiFollowUps};
use crate::garden::PlantEntry;
use crate::persist::GardenStore;
use crate::session::{GardenSession, SessionError};
use async_trait::async_trait;
use gemini::Gemini;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Returned once the scripted questions run out.
pub const SCRIPT_EXHAUSTED: &str = "What else would you like to say about this?";

/// A seeded rng for reproducible gardens.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A Gemini-backed generator whose every call fails to connect.
pub fn unreachable_gemini(fallback_seed: u64) -> GeminiFollowUps {
    let client = Gemini::new("test-key").with_base_url("http://127.0.0.1:9");
    GeminiFollowUps::new(client, FollowUpConfig::default())
        .with_fallback(FallbackFollowUps::seeded(fallback_seed))
}

/// One call seen by [`ScriptedFollowUps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpCall {
    pub category: Category,
    pub original_prompt: String,
    pub prior_answer: String,
}

/// A generator that returns scripted questions in order and records its calls.
#[derive(Default)]
pub struct ScriptedFollowUps {
    questions: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<FollowUpCall>>,
}

impl ScriptedFollowUps {
    pub fn new<I, S>(questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            questions: Mutex::new(questions.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a question to the end of the script.
    pub fn queue(&self, question: impl Into<String>) {
        self.questions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(question.into());
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<FollowUpCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl FollowUpGenerator for ScriptedFollowUps {
    async fn follow_up(&self, category: Category, original_prompt: &str, prior_answer: &str) -> String {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(FollowUpCall {
                category,
                original_prompt: original_prompt.to_string(),
                prior_answer: prior_answer.to_string(),
            });

        self.questions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| SCRIPT_EXHAUSTED.to_string())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Test harness for running garden scenarios.
pub struct TestHarness {
    /// The session under test.
    pub session: GardenSession,
    /// The scripted generator the session asks.
    pub follow_ups: Arc<ScriptedFollowUps>,
}

impl TestHarness {
    /// Open a session storing its garden in `dir`, with rng seed 0.
    pub async fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_seed(dir, 0).await
    }

    pub async fn with_seed(dir: impl AsRef<Path>, seed: u64) -> Self {
        let follow_ups = Arc::new(ScriptedFollowUps::default());
        let generator: Arc<dyn FollowUpGenerator> = follow_ups.clone();
        let session =
            GardenSession::with_parts(GardenStore::in_dir(dir), generator, seeded_rng(seed)).await;
        Self {
            session,
            follow_ups,
        }
    }

    /// Queue the next follow-up question.
    pub fn expect_question(&mut self, question: impl Into<String>) -> &mut Self {
        self.follow_ups.queue(question);
        self
    }

    /// Plant a seed answering `category`'s base prompt.
    pub async fn plant(
        &mut self,
        category: Category,
        answer: &str,
    ) -> Result<Option<PlantEntry>, SessionError> {
        self.session.plant_seed(category, answer).await
    }

    /// Open plant `id`, take the scripted question, and answer it.
    pub async fn water(&mut self, id: &str, answer: &str) -> Result<Option<PlantEntry>, SessionError> {
        let Some(question) = self.session.follow_up(id).await else {
            return Ok(None);
        };
        self.session.reflect(id, &question, answer).await
    }

    /// Number of plants in the garden.
    pub fn plant_count(&self) -> usize {
        self.session.garden().len()
    }
}
