//! The garden: an ordered collection of planted reflections.
//!
//! `Garden` holds every plant and applies the two mutations the app allows,
//! planting a new entry and appending a reflection to an existing one. It
//! performs no I/O; callers write the collection through
//! [`crate::persist::GardenStore`] after each mutation.

use crate::catalog::Category;
use crate::growth::PlantStage;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use thiserror::Error;

/// Horizontal planting band, in percent of the garden width.
pub const POSITION_X_RANGE: Range<f64> = 10.0..90.0;

/// Vertical planting band, in percent of the garden height.
pub const POSITION_Y_RANGE: Range<f64> = 35.0..70.0;

/// One question and the user's answer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionEntry {
    pub question: String,
    pub answer: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// A planted entry and its reflection history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantEntry {
    pub id: String,
    pub category: Category,
    pub stage: PlantStage,
    #[serde(rename = "x")]
    pub position_x: f64,
    #[serde(rename = "y")]
    pub position_y: f64,
    pub reflections: Vec<ReflectionEntry>,
    /// Informational only; growth never depends on it.
    #[serde(rename = "lastWatered")]
    pub last_modified: i64,
}

impl PlantEntry {
    /// The most recent reflection. Every plant has at least one.
    pub fn latest_reflection(&self) -> Option<&ReflectionEntry> {
        self.reflections.last()
    }

    /// The answer to the category's base prompt.
    pub fn first_answer(&self) -> &str {
        self.reflections
            .first()
            .map(|r| r.answer.as_str())
            .unwrap_or_default()
    }
}

/// A stored collection that breaks one of the garden's invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GardenInvariantError {
    #[error("plant {0} has no reflections")]
    NoReflections(String),

    #[error("plant id {0} appears more than once")]
    DuplicateId(String),

    #[error("plant with empty id")]
    EmptyId,
}

/// Residents of the garden scene, unlocked by the number of plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wildlife {
    Owl,
    Butterflies,
    Toucan,
    Tiger,
}

impl Wildlife {
    pub const ALL: [Wildlife; 4] = [
        Wildlife::Owl,
        Wildlife::Butterflies,
        Wildlife::Toucan,
        Wildlife::Tiger,
    ];

    /// Minimum number of plants before this resident appears.
    pub fn appears_at(self) -> usize {
        match self {
            Wildlife::Owl => 0,
            Wildlife::Butterflies => 1,
            Wildlife::Toucan => 3,
            Wildlife::Tiger => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Wildlife::Owl => "Owl",
            Wildlife::Butterflies => "Butterflies",
            Wildlife::Toucan => "Toucan",
            Wildlife::Tiger => "Tiger",
        }
    }
}

/// Counts shown alongside the garden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenSummary {
    pub plants: usize,
    pub mature: usize,
    pub reflections: usize,
    /// Plants per category, catalog order, zero counts included.
    pub by_category: Vec<(Category, usize)>,
}

/// The ordered collection of plants, in planting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Garden {
    plants: Vec<PlantEntry>,
}

impl Garden {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a garden from existing plants, checking the invariants.
    pub fn from_plants(plants: Vec<PlantEntry>) -> Result<Self, GardenInvariantError> {
        let garden = Self { plants };
        garden.validate()?;
        Ok(garden)
    }

    pub fn plants(&self) -> &[PlantEntry] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PlantEntry> {
        self.plants.iter().find(|p| p.id == id)
    }

    /// Plant a new seed answering `category`'s base prompt.
    ///
    /// Returns `None` without touching the garden when `answer` is blank.
    pub fn plant<R: Rng + ?Sized>(
        &mut self,
        category: Category,
        answer: &str,
        rng: &mut R,
        now: i64,
    ) -> Option<&PlantEntry> {
        if answer.trim().is_empty() {
            return None;
        }

        let id = self.fresh_id(rng);
        let plant = PlantEntry {
            id,
            category,
            stage: PlantStage::Seed,
            position_x: rng.gen_range(POSITION_X_RANGE),
            position_y: rng.gen_range(POSITION_Y_RANGE),
            reflections: vec![ReflectionEntry {
                question: category.prompt().question.to_string(),
                answer: answer.to_string(),
                timestamp: now,
            }],
            last_modified: now,
        };

        tracing::debug!(id = %plant.id, category = %category, "planted seed");
        self.plants.push(plant);
        self.plants.last()
    }

    /// Record a reflection on plant `id` and grow it one stage.
    ///
    /// Returns `None` when the id is unknown or `answer` is blank.
    pub fn append_reflection(
        &mut self,
        id: &str,
        question: &str,
        answer: &str,
        now: i64,
    ) -> Option<&PlantEntry> {
        if answer.trim().is_empty() {
            return None;
        }

        let plant = self.plants.iter_mut().find(|p| p.id == id)?;
        plant.stage = plant.stage.advanced();
        plant.reflections.push(ReflectionEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: now,
        });
        plant.last_modified = now;

        tracing::debug!(
            id = %plant.id,
            stage = %plant.stage,
            reflections = plant.reflections.len(),
            "watered plant"
        );
        Some(&*plant)
    }

    /// Check the invariants a loaded collection must satisfy.
    pub fn validate(&self) -> Result<(), GardenInvariantError> {
        let mut seen = HashSet::new();
        for plant in &self.plants {
            if plant.id.is_empty() {
                return Err(GardenInvariantError::EmptyId);
            }
            if plant.reflections.is_empty() {
                return Err(GardenInvariantError::NoReflections(plant.id.clone()));
            }
            if !seen.insert(plant.id.as_str()) {
                return Err(GardenInvariantError::DuplicateId(plant.id.clone()));
            }
        }
        Ok(())
    }

    /// Residents currently visiting the garden.
    pub fn wildlife(&self) -> Vec<Wildlife> {
        Wildlife::ALL
            .into_iter()
            .filter(|w| self.plants.len() >= w.appears_at())
            .collect()
    }

    pub fn summary(&self) -> GardenSummary {
        let by_category = Category::ALL
            .into_iter()
            .map(|c| (c, self.plants.iter().filter(|p| p.category == c).count()))
            .collect();

        GardenSummary {
            plants: self.plants.len(),
            mature: self.plants.iter().filter(|p| p.stage.is_mature()).count(),
            reflections: self.plants.iter().map(|p| p.reflections.len()).sum(),
            by_category,
        }
    }

    fn fresh_id<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        loop {
            let id = uuid::Builder::from_random_bytes(rng.gen())
                .into_uuid()
                .to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl<'a> IntoIterator for &'a Garden {
    type Item = &'a PlantEntry;
    type IntoIter = std::slice::Iter<'a, PlantEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.plants.iter()
    }
}

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_plant_creates_seed_with_base_prompt() {
        let mut garden = Garden::new();
        let plant = garden
            .plant(Category::Altruism, "my sister", &mut rng(), 1_000)
            .cloned()
            .expect("plant should be created");

        assert_eq!(plant.stage, PlantStage::Seed);
        assert_eq!(plant.category, Category::Altruism);
        assert_eq!(plant.reflections.len(), 1);
        assert_eq!(plant.reflections[0].question, Category::Altruism.prompt().question);
        assert_eq!(plant.reflections[0].answer, "my sister");
        assert_eq!(plant.reflections[0].timestamp, 1_000);
        assert_eq!(plant.last_modified, 1_000);
        assert!(Uuid::parse_str(&plant.id).is_ok());
        assert_eq!(garden.len(), 1);
    }

    #[test]
    fn test_plant_rejects_blank_answer() {
        let mut garden = Garden::new();
        assert!(garden.plant(Category::Hope, "", &mut rng(), 0).is_none());
        assert!(garden.plant(Category::Hope, " \t\n", &mut rng(), 0).is_none());
        assert!(garden.is_empty());
    }

    #[test]
    fn test_positions_stay_inside_band() {
        let mut garden = Garden::new();
        let mut rng = rng();
        for i in 0..200 {
            garden.plant(Category::Cohesion, "home", &mut rng, i);
        }
        for plant in &garden {
            assert!(POSITION_X_RANGE.contains(&plant.position_x));
            assert!(POSITION_Y_RANGE.contains(&plant.position_y));
        }
    }

    #[test]
    fn test_ids_are_unique_and_seeded() {
        let mut a = Garden::new();
        let mut b = Garden::new();
        let (mut rng_a, mut rng_b) = (rng(), rng());
        for i in 0..50 {
            a.plant(Category::Hope, "x", &mut rng_a, i);
            b.plant(Category::Hope, "x", &mut rng_b, i);
        }
        assert_eq!(a, b);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_append_reflection_grows_plant() {
        let mut garden = Garden::new();
        let id = garden
            .plant(Category::Hope, "the wedding", &mut rng(), 0)
            .map(|p| p.id.clone())
            .unwrap();

        let plant = garden
            .append_reflection(&id, "What else?", "her laughter", 5)
            .unwrap();
        assert_eq!(plant.stage, PlantStage::Seedling);
        assert_eq!(plant.reflections.len(), 2);
        assert_eq!(plant.reflections[1].question, "What else?");
        assert_eq!(plant.last_modified, 5);
    }

    #[test]
    fn test_append_reflection_unknown_id_is_noop() {
        let mut garden = Garden::new();
        garden.plant(Category::Hope, "a", &mut rng(), 0);
        let before = garden.clone();
        assert!(garden.append_reflection("missing", "q", "a", 1).is_none());
        assert_eq!(garden, before);
    }

    #[test]
    fn test_append_reflection_blank_answer_is_noop() {
        let mut garden = Garden::new();
        let id = garden.plant(Category::Hope, "a", &mut rng(), 0).unwrap().id.clone();
        let before = garden.clone();
        assert!(garden.append_reflection(&id, "q", "   ", 1).is_none());
        assert_eq!(garden, before);
    }

    #[test]
    fn test_validate_rejects_broken_collections() {
        let mut garden = Garden::new();
        garden.plant(Category::Hope, "a", &mut rng(), 0);
        let mut plants = garden.plants().to_vec();

        let mut empty = plants[0].clone();
        empty.reflections.clear();
        assert!(matches!(
            Garden::from_plants(vec![empty]),
            Err(GardenInvariantError::NoReflections(_))
        ));

        let mut nameless = plants[0].clone();
        nameless.id.clear();
        assert!(matches!(
            Garden::from_plants(vec![nameless]),
            Err(GardenInvariantError::EmptyId)
        ));

        plants.push(plants[0].clone());
        assert!(matches!(
            Garden::from_plants(plants),
            Err(GardenInvariantError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_wildlife_thresholds() {
        let mut garden = Garden::new();
        let mut rng = rng();
        assert_eq!(garden.wildlife(), vec![Wildlife::Owl]);

        garden.plant(Category::Hope, "a", &mut rng, 0);
        assert_eq!(garden.wildlife(), vec![Wildlife::Owl, Wildlife::Butterflies]);

        garden.plant(Category::Hope, "b", &mut rng, 0);
        garden.plant(Category::Hope, "c", &mut rng, 0);
        assert!(garden.wildlife().contains(&Wildlife::Toucan));
        assert!(!garden.wildlife().contains(&Wildlife::Tiger));

        garden.plant(Category::Hope, "d", &mut rng, 0);
        garden.plant(Category::Hope, "e", &mut rng, 0);
        assert_eq!(garden.wildlife(), Wildlife::ALL.to_vec());
    }

    #[test]
    fn test_summary() {
        let mut garden = Garden::new();
        let mut rng = rng();
        let id = garden.plant(Category::Hope, "a", &mut rng, 0).unwrap().id.clone();
        garden.plant(Category::Catharsis, "b", &mut rng, 0);
        for _ in 0..4 {
            garden.append_reflection(&id, "q", "more", 1);
        }

        let summary = garden.summary();
        assert_eq!(summary.plants, 2);
        assert_eq!(summary.mature, 1);
        assert_eq!(summary.reflections, 6);
        assert!(summary.by_category.contains(&(Category::Hope, 1)));
        assert!(summary.by_category.contains(&(Category::Existential, 0)));
        assert_eq!(summary.by_category.len(), 8);
    }

    #[test]
    fn test_wire_format_uses_original_field_names() {
        let mut garden = Garden::new();
        garden.plant(Category::Hope, "a", &mut rng(), 7);
        let json = serde_json::to_value(&garden).unwrap();
        let plant = &json[0];
        assert_eq!(plant["category"], "Hope");
        assert_eq!(plant["stage"], 0);
        assert_eq!(plant["lastWatered"], 7);
        assert!(plant["x"].is_f64());
        assert!(plant["y"].is_f64());
        assert_eq!(plant["reflections"][0]["timestamp"], 7);
    }
}
