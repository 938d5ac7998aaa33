//! Satiety estimate: macro grams per kcal, weighted by the dynamic
//! factors, then stretched or dampened by the user's hunger level.

use crate::goal::{DynamicFactors, HungerLevel};
use crate::nutrients::MacroAmounts;

/// Fixed normalization constant for the scaled satiety score.
pub const SATIETY_SCALE: f64 = 100.0 / 5.0;

const HIGH_HUNGER_DAMPING: f64 = -0.3;
const LOW_HUNGER_AMPLIFICATION: f64 = 0.5;

/// Weighted sum of the macro/energy ratios. Energy is floored to 1 kcal so
/// an energy-free record cannot divide by zero.
pub fn satiety_index(macros: &MacroAmounts, factors: &DynamicFactors) -> f64 {
    let energy = if macros.energy == 0.0 {
        1.0
    } else {
        macros.energy
    };
    factors.protein * (macros.proteins / energy)
        + factors.carbs * (macros.carbs / energy)
        + factors.fats * (macros.fats / energy)
        + factors.fibers * (macros.fibers / energy)
}

/// A hungry user is steered away from high-satiety dishes, a sated one
/// toward them; medium hunger is neutral.
pub fn scaled_satiety_score(index: f64, hunger: HungerLevel) -> f64 {
    let multiplier = match hunger {
        HungerLevel::High => 1.0 + HIGH_HUNGER_DAMPING * index,
        HungerLevel::Medium => 1.0,
        HungerLevel::Low => 1.0 + LOW_HUNGER_AMPLIFICATION * index,
    };
    multiplier * SATIETY_SCALE
}
