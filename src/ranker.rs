//! Ranks a menu for one user: nutritional base score per dish, blended
//! with the cosine similarity between the user's behavior vector and the
//! dish's feature vector.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::features::{cosine_similarity, FeatureTable};
use crate::goal::{HungerLevel, PercentageDifference, UserGoal};
use crate::menu::Dish;
use crate::nutrients::MacroAmounts;
use crate::policy::Policy;
use crate::scoring::{calculate_dish_score, DishScore};

/// One ranked dish, ready for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub dish_name: String,
    pub final_score: f64,
    pub base_score: f64,
    pub cosine_score: f64,
    pub nutrients: MacroAmounts,
    pub timing_category: Vec<String>,
    pub distributed_percentage: BTreeMap<String, String>,
    #[serde(skip)]
    pub breakdown: DishScore,
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Scores every dish. A structurally malformed dish is kept in the output
/// with a zero base score so the caller sees it ranked last instead of
/// silently dropped.
pub fn rank_menu(
    menu: &[&Dish],
    hunger: HungerLevel,
    goal: &UserGoal,
    policy: &Policy,
    table: &FeatureTable,
    user_vector: Option<&[f64]>,
) -> Vec<ScoreResult> {
    let diff = PercentageDifference::from_goal(goal);
    menu.iter()
        .map(|dish| score_one(dish, hunger, goal, &diff, policy, table, user_vector))
        .collect()
}

fn score_one(
    dish: &Dish,
    hunger: HungerLevel,
    goal: &UserGoal,
    diff: &PercentageDifference,
    policy: &Policy,
    table: &FeatureTable,
    user_vector: Option<&[f64]>,
) -> ScoreResult {
    let breakdown = match calculate_dish_score(dish, hunger, goal, diff, policy) {
        Ok(breakdown) => breakdown,
        Err(e) => {
            warn!(dish = %dish.dish_name, error = %e, "dish could not be scored");
            DishScore::default()
        }
    };

    let cosine = match (user_vector, table.vector(&dish.dish_name)) {
        (Some(user), Some(features)) => cosine_similarity(user, features),
        _ => 0.0,
    };

    let final_score = policy.blend.base * breakdown.base + policy.blend.similarity * cosine * 100.0;

    let nutrients = dish
        .macro_nutrients()
        .map(MacroAmounts::from_entries)
        .unwrap_or_default();

    ScoreResult {
        dish_name: dish.dish_name.clone(),
        final_score: round_to(final_score, 2),
        base_score: round_to(breakdown.base, 2),
        cosine_score: round_to(cosine, 3),
        nutrients,
        timing_category: dish.timing_categories().to_vec(),
        distributed_percentage: dish.distributed_percentage.clone(),
        breakdown,
    }
}

/// Per-macro minima and maxima across every scorable dish on the menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientRange {
    pub min: MacroAmounts,
    pub max: MacroAmounts,
}

/// `None` when no dish on the menu carries a macro-nutrient list.
pub fn nutrient_extremes(menu: &[Dish]) -> Option<NutrientRange> {
    let mut range: Option<NutrientRange> = None;
    for dish in menu {
        let Ok(entries) = dish.macro_nutrients() else {
            continue;
        };
        let macros = MacroAmounts::from_entries(entries);
        range = Some(match range {
            None => NutrientRange {
                min: macros,
                max: macros,
            },
            Some(range) => NutrientRange {
                min: range.min.field_min(&macros),
                max: range.max.field_max(&macros),
            },
        });
    }
    range
}

/// Flags goals the menu cannot satisfy: a goal above every dish's maximum
/// or below every dish's minimum.
pub fn goal_coverage_warnings(range: &NutrientRange, goal: &UserGoal) -> Vec<String> {
    let fields = [
        ("proteins", range.min.proteins, range.max.proteins, goal.proteins),
        ("carbs", range.min.carbs, range.max.carbs, goal.carbs),
        ("fats", range.min.fats, range.max.fats, goal.fats),
        ("fibers", range.min.fibers, range.max.fibers, goal.fibers),
        ("energy", range.min.energy, range.max.energy, goal.energy),
    ];

    let mut warnings = Vec::new();
    for (name, min, max, target) in fields {
        if target > max {
            warnings.push(format!(
                "no dish reaches your {name} goal ({target:.0} > menu max {max:.0}); \
                 the menu may not meet it"
            ));
        } else if target < min {
            warnings.push(format!(
                "every dish is above your {name} goal ({target:.0} < menu min {min:.0}); \
                 the menu may exceed it"
            ));
        }
    }
    warnings
}
