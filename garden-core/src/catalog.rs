//! Prompt catalog for the garden.
//!
//! Each of the eight therapeutic factors has a base prompt that the user
//! answers when planting, a short description, and the colours used to draw
//! its plant.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic follow-up questions used when no generation backend answers.
pub const FALLBACK_FOLLOW_UPS: [&str; 5] = [
    "How does recognizing this strength change your perspective today?",
    "What small step can you take to honor this reason for living?",
    "Why is this particular anchor important to you right now?",
    "How does this connect to your sense of purpose?",
    "What would you tell a friend who possesses this same strength?",
];

/// A therapeutic factor a plant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Universality,
    Altruism,
    Hope,
    Interpersonal,
    Existential,
    Catharsis,
    Cohesion,
    Information,
}

/// Static prompt data for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptDefinition {
    pub category: Category,
    /// The base prompt answered when planting.
    pub question: &'static str,
    /// Accent colour for labels, as `#RRGGBB`.
    pub color: &'static str,
    /// Colour of the plant's flower, as `#RRGGBB`.
    pub flower_color: &'static str,
    pub description: &'static str,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Category; 8] = [
        Category::Universality,
        Category::Altruism,
        Category::Hope,
        Category::Interpersonal,
        Category::Existential,
        Category::Catharsis,
        Category::Cohesion,
        Category::Information,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Universality => "Universality",
            Category::Altruism => "Altruism",
            Category::Hope => "Hope",
            Category::Interpersonal => "Interpersonal",
            Category::Existential => "Existential",
            Category::Catharsis => "Catharsis",
            Category::Cohesion => "Cohesion",
            Category::Information => "Information",
        }
    }

    /// The catalog entry for this category.
    pub fn prompt(&self) -> PromptDefinition {
        let category = *self;
        match self {
            Category::Universality => PromptDefinition {
                category,
                question: "In your moments of struggle, what shared human experience reminds you that you are not isolated?",
                color: "#C65D3B",
                flower_color: "#C65D3B",
                description: "Connection to the shared human condition (Protective Factor: Connectedness).",
            },
            Category::Altruism => PromptDefinition {
                category,
                question: "Who relies on you, and how does your care for them anchor you to life?",
                color: "#E8B923",
                flower_color: "#E8B923",
                description: "Responsibility to family and others (Reasons for Living Inventory).",
            },
            Category::Hope => PromptDefinition {
                category,
                question: "What is one 'unfinished story' or future joy that you are determined to stay for?",
                color: "#2D5016",
                flower_color: "#F4EBD9",
                description: "Cultivating positive emotion and optimism (PERMA).",
            },
            Category::Interpersonal => PromptDefinition {
                category,
                question: "Which relationship in your life acts as a safe harbor, and how does it strengthen you?",
                color: "#C65D3B",
                flower_color: "#E8B923",
                description: "The protective power of authentic connection (Protective Factors).",
            },
            Category::Existential => PromptDefinition {
                category,
                question: "If life is asking a question of you right now, what is your answer through action?",
                color: "#5C4033",
                flower_color: "#C65D3B",
                description: "Finding meaning by taking responsibility for your existence (Frankl).",
            },
            Category::Catharsis => PromptDefinition {
                category,
                question: "Think of a recent emotional storm you weathered. What inner resource helped you survive it?",
                color: "#2D5016",
                flower_color: "#E8B923",
                description: "Trusting your coping beliefs and survival skills (RFL).",
            },
            Category::Cohesion => PromptDefinition {
                category,
                question: "Where do you find a sense of 'tribe' or safety that makes the world feel like home?",
                color: "#5C4033",
                flower_color: "#F4EBD9",
                description: "Belonging and social integration (Protective Factors).",
            },
            Category::Information => PromptDefinition {
                category,
                question: "What have you learned about your own resilience that proves you can handle difficult things?",
                color: "#C65D3B",
                flower_color: "#5C4033",
                description: "Recognizing mastery and self-efficacy (PERMA).",
            },
        }
    }

    /// Pick a category uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Category {
        *Category::ALL
            .choose(rng)
            .unwrap_or(&Category::Universality)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a `#RRGGBB` colour into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
