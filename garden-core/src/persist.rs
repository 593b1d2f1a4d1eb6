//! Garden persistence.
//!
//! The whole garden lives in one JSON file holding the ordered array of
//! plants. It is read once at startup and rewritten in full after every
//! mutation. There is no versioning: anything that does not decode into a
//! valid garden is treated as an empty one.

use crate::garden::{Garden, GardenInvariantError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// File name of the stored garden inside the data directory.
pub const STORAGE_FILE: &str = "reasons_garden_plants.json";

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid garden: {0}")]
    InvalidGarden(#[from] GardenInvariantError),
}

/// Result of loading the garden at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGarden {
    pub garden: Garden,
    /// Nothing was stored yet; the orientation dialog should be shown.
    pub first_run: bool,
}

/// File-backed storage for a single garden.
#[derive(Debug, Clone)]
pub struct GardenStore {
    path: PathBuf,
}

impl GardenStore {
    /// Store the garden at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the garden as [`STORAGE_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the garden, never failing.
    ///
    /// A missing file is a first run. Unreadable or malformed contents are
    /// logged and replaced by an empty garden.
    pub async fn load(&self) -> LoadedGarden {
        match self.read().await {
            Ok(Some(garden)) => {
                tracing::info!(path = %self.path.display(), plants = garden.len(), "loaded garden");
                LoadedGarden {
                    garden,
                    first_run: false,
                }
            }
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no stored garden, starting fresh");
                LoadedGarden {
                    garden: Garden::new(),
                    first_run: true,
                }
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to load garden, starting empty");
                LoadedGarden {
                    garden: Garden::new(),
                    first_run: false,
                }
            }
        }
    }

    /// Read the stored garden. `Ok(None)` when nothing has been stored.
    pub async fn read(&self) -> Result<Option<Garden>, PersistError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&content).map(Some)
    }

    /// Overwrite the stored garden with `garden`.
    pub async fn save(&self, garden: &Garden) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Write beside the target and rename so a crash never leaves half a file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encode(garden)?).await?;
        fs::rename(&staging, &self.path).await?;

        tracing::debug!(path = %self.path.display(), plants = garden.len(), "saved garden");
        Ok(())
    }
}

/// Serialize a garden to its stored form.
pub fn encode(garden: &Garden) -> Result<String, PersistError> {
    Ok(serde_json::to_string(garden)?)
}

/// Parse and validate a stored garden.
pub fn decode(content: &str) -> Result<Garden, PersistError> {
    let garden: Garden = serde_json::from_str(content)?;
    garden.validate()?;
    Ok(garden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn sample_garden() -> Garden {
        let mut rng = StdRng::seed_from_u64(3);
        let mut garden = Garden::new();
        let id = garden
            .plant(Category::Existential, "keep going", &mut rng, 10)
            .map(|p| p.id.clone())
            .unwrap();
        garden.plant(Category::Cohesion, "my choir", &mut rng, 20);
        garden.append_reflection(&id, "What does that look like?", "showing up", 30);
        garden
    }

    #[test]
    fn test_encode_decode() {
        let garden = sample_garden();
        let decoded = decode(&encode(&garden).unwrap()).unwrap();
        assert_eq!(decoded, garden);
    }

    #[test]
    fn test_decode_rejects_structural_garbage() {
        assert!(matches!(decode("not json"), Err(PersistError::Json(_))));
        assert!(matches!(decode(r#"{"plants": []}"#), Err(PersistError::Json(_))));
        assert!(matches!(decode(""), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_bad_stage_and_category() {
        let bad_stage = r#"[{"id":"a","category":"Hope","stage":7,"x":50,"y":50,
            "reflections":[{"question":"q","answer":"a","timestamp":1}],"lastWatered":1}]"#;
        assert!(decode(bad_stage).is_err());

        let bad_category = r#"[{"id":"a","category":"Despair","stage":0,"x":50,"y":50,
            "reflections":[{"question":"q","answer":"a","timestamp":1}],"lastWatered":1}]"#;
        assert!(decode(bad_category).is_err());
    }

    #[test]
    fn test_decode_rejects_empty_reflections() {
        let content = r#"[{"id":"a","category":"Hope","stage":0,"x":50,"y":50,
            "reflections":[],"lastWatered":1}]"#;
        assert!(matches!(decode(content), Err(PersistError::InvalidGarden(_))));
    }

    #[test]
    fn test_decode_accepts_integer_positions() {
        let content = r#"[{"id":"a","category":"Hope","stage":2,"x":50,"y":40,
            "reflections":[{"question":"q","answer":"a","timestamp":1}],"lastWatered":1}]"#;
        let garden = decode(content).unwrap();
        assert_eq!(garden.plants()[0].position_x, 50.0);
    }

    #[test]
    fn test_in_dir_path() {
        let store = GardenStore::in_dir("/data");
        assert!(store.path().ends_with(STORAGE_FILE));
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = GardenStore::in_dir(temp_dir.path().join("nested").join("garden"));

        store.save(&sample_garden()).await.expect("Save should succeed");

        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = GardenStore::in_dir(temp_dir.path());
        assert!(store.read().await.expect("Read should succeed").is_none());
    }
}
