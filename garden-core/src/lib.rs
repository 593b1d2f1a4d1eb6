//! Reflective journaling garden.
//!
//! This crate provides:
//! - A catalog of eight therapeutic prompts, one per plant category
//! - Plants that grow one stage per reflection, up to maturity
//! - A garden store persisted as a single JSON file
//! - Follow-up questions from Gemini, with a built-in fallback list
//!
//! # Quick Start
//!
//! ```ignore
//! use garden_core::{GardenSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = GardenSession::open(SessionConfig::from_env("garden_data")).await;
//!
//!     let category = session.start_planting();
//!     println!("{}", category.prompt().question);
//!
//!     if let Some(plant) = session.plant_seed(category, "my daughter's wedding").await? {
//!         let question = session.follow_up(&plant.id).await.unwrap_or_default();
//!         session.reflect(&plant.id, &question, "her laughter").await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod followup;
pub mod garden;
pub mod growth;
pub mod persist;
pub mod session;
pub mod testing;

// Primary public API
pub use catalog::{Category, PromptDefinition, FALLBACK_FOLLOW_UPS};
pub use followup::{FallbackFollowUps, FollowUpGenerator, GeminiFollowUps};
pub use garden::{Garden, PlantEntry, ReflectionEntry, Wildlife};
pub use growth::PlantStage;
pub use persist::{GardenStore, LoadedGarden, PersistError};
pub use session::{FollowUpRequest, GardenSession, SessionConfig, SessionError};
pub use testing::{ScriptedFollowUps, TestHarness};
