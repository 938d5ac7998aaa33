//! The user side of a scoring request: live nutritional targets, hunger
//! level, and the dynamic weighting derived from how far the live goal has
//! drifted from the fixed baseline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::policy::MacroFactors;

/// Target grams per macro and target kcal for energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGoal {
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fibers: f64,
    pub energy: f64,
}

impl Default for UserGoal {
    fn default() -> Self {
        Self {
            proteins: 22.0,
            carbs: 22.0,
            fats: 19.0,
            fibers: 7.0,
            energy: 300.0,
        }
    }
}

/// The fixed reference each macro goal is measured against.
pub const BASELINE_GOAL: f64 = 1.0;

/// Signed percent deviation of the live goal from the baseline goal, per
/// macro. A weighting signal, not a nutrient value: energy has no baseline
/// and stays at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PercentageDifference {
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fibers: f64,
    pub energy: f64,
}

impl PercentageDifference {
    pub fn from_goal(goal: &UserGoal) -> Self {
        let diff = |live: f64| {
            let pct = ((live - BASELINE_GOAL) / BASELINE_GOAL) * 100.0;
            (pct * 100.0).round() / 100.0
        };
        Self {
            proteins: diff(goal.proteins),
            carbs: diff(goal.carbs),
            fats: diff(goal.fats),
            fibers: diff(goal.fibers),
            energy: 0.0,
        }
    }
}

/// Per-macro weights after applying the goal drift to the policy's base
/// factors: `base × (1 + difference / 100)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicFactors {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fibers: f64,
    pub energy: f64,
}

impl DynamicFactors {
    pub fn new(base: &MacroFactors, diff: &PercentageDifference) -> Self {
        Self {
            protein: base.protein * (1.0 + diff.proteins / 100.0),
            carbs: base.carbs * (1.0 + diff.carbs / 100.0),
            fats: base.fats * (1.0 + diff.fats / 100.0),
            fibers: base.fibers * (1.0 + diff.fibers / 100.0),
            energy: base.energy * (1.0 + diff.energy / 100.0),
        }
    }

    pub fn sum(&self) -> f64 {
        self.protein + self.carbs + self.fats + self.fibers + self.energy
    }
}

/// Self-reported hunger; anything unrecognized is treated as `Medium`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum HungerLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl HungerLevel {
    pub fn parse(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}
