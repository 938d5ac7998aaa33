//! The scoring policy: every configurable weight the engine uses, in one
//! immutable value passed explicitly into the scorers. Defaults match the
//! documented factor sets (everything 1.0, blend 70/30); a `policy.ron`
//! file next to the binary overrides them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub macro_factors: MacroFactors,
    pub scorer_factors: ScorerFactors,
    pub rule_factors: RuleFactors,
    pub blend: BlendWeights,
    pub actions: ActionWeights,
}

/// Per-macro base weights, stretched into dynamic factors by how far the
/// live goal diverges from the baseline goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroFactors {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fibers: f64,
    pub energy: f64,
}

impl Default for MacroFactors {
    fn default() -> Self {
        Self {
            protein: 1.0,
            carbs: 1.0,
            fats: 1.0,
            fibers: 1.0,
            energy: 1.0,
        }
    }
}

/// Weights of the three goal-fit scorers in the aggregated base score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerFactors {
    pub density: f64,
    pub satiety: f64,
    pub euclidean: f64,
}

impl ScorerFactors {
    pub fn sum(&self) -> f64 {
        self.density + self.satiety + self.euclidean
    }
}

impl Default for ScorerFactors {
    fn default() -> Self {
        Self {
            density: 1.0,
            satiety: 1.0,
            euclidean: 1.0,
        }
    }
}

/// Weights of the nine rule scores in the aggregated base score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFactors {
    pub protein_overrule: f64,
    pub low_carbs_overrule: f64,
    pub low_fat_overrule: f64,
    pub sugar_content: f64,
    pub sodium_content: f64,
    pub saturated_fat: f64,
    pub cholesterol: f64,
    pub caloric_density: f64,
    pub good_fats: f64,
}

impl RuleFactors {
    pub fn sum(&self) -> f64 {
        self.protein_overrule
            + self.low_carbs_overrule
            + self.low_fat_overrule
            + self.sugar_content
            + self.sodium_content
            + self.saturated_fat
            + self.cholesterol
            + self.caloric_density
            + self.good_fats
    }
}

impl Default for RuleFactors {
    fn default() -> Self {
        Self {
            protein_overrule: 1.0,
            low_carbs_overrule: 1.0,
            low_fat_overrule: 1.0,
            sugar_content: 1.0,
            sodium_content: 1.0,
            saturated_fat: 1.0,
            cholesterol: 1.0,
            caloric_density: 1.0,
            good_fats: 1.0,
        }
    }
}

/// How the nutritional base score and the behavioral similarity signal mix
/// into the final ranked score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub base: f64,
    pub similarity: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            base: 0.7,
            similarity: 0.3,
        }
    }
}

/// How strongly each logged action pulls the behavior vector toward the
/// dish it touched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionWeights {
    pub liked: f64,
    pub ordered: f64,
    pub add_to_cart: f64,
    pub download: f64,
    pub viewed: f64,
    pub searched: f64,
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            liked: 1.0,
            ordered: 0.9,
            add_to_cart: 0.8,
            download: 0.7,
            viewed: 0.5,
            searched: 0.4,
        }
    }
}

impl Policy {
    /// Defaults layered under `policy.default.ron` and `policy.ron` in the
    /// working directory, when present.
    pub fn load_from_files() -> Self {
        let default_path = Path::new("policy.default.ron");
        let override_path = Path::new("policy.ron");

        let mut policy = if default_path.exists() {
            fs::read_to_string(default_path)
                .ok()
                .and_then(|content| ron::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            Self::default()
        };

        if override_path.exists() {
            if let Ok(content) = fs::read_to_string(override_path) {
                if let Ok(overrides) = ron::from_str::<Self>(&content) {
                    policy = overrides;
                }
            }
        }

        policy
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading policy file {}: {e}", path.display()))?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("parsing policy file {}: {e}", path.display()))
    }
}
