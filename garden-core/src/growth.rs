//! Plant growth stages.
//!
//! Growth is linear and one-way: every reflection moves a plant one stage
//! forward until it is mature, after which reflections still accumulate but
//! the stage stays put.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Growth stage of a plant. Stored on disk as its number (0-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlantStage {
    #[default]
    Seed = 0,
    Seedling = 1,
    Sprout = 2,
    Bloom = 3,
    Mature = 4,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid plant stage: {0} (expected 0-4)")]
pub struct InvalidStage(pub u8);

impl PlantStage {
    pub const ALL: [PlantStage; 5] = [
        PlantStage::Seed,
        PlantStage::Seedling,
        PlantStage::Sprout,
        PlantStage::Bloom,
        PlantStage::Mature,
    ];

    /// The stage a reflection moves this plant to.
    pub fn advanced(self) -> PlantStage {
        match self {
            PlantStage::Seed => PlantStage::Seedling,
            PlantStage::Seedling => PlantStage::Sprout,
            PlantStage::Sprout => PlantStage::Bloom,
            PlantStage::Bloom | PlantStage::Mature => PlantStage::Mature,
        }
    }

    pub fn is_mature(self) -> bool {
        self == PlantStage::Mature
    }

    pub fn name(self) -> &'static str {
        match self {
            PlantStage::Seed => "Seed",
            PlantStage::Seedling => "Seedling",
            PlantStage::Sprout => "Sprout",
            PlantStage::Bloom => "Bloom",
            PlantStage::Mature => "Mature",
        }
    }
}

impl From<PlantStage> for u8 {
    fn from(stage: PlantStage) -> u8 {
        stage as u8
    }
}

impl TryFrom<u8> for PlantStage {
    type Error = InvalidStage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PlantStage::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidStage(value))
    }
}

impl fmt::Display for PlantStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
