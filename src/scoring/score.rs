//! The aggregator: runs every scorer and rule for one dish and folds them
//! into the nutritional base score.

use crate::goal::{DynamicFactors, HungerLevel, PercentageDifference, UserGoal};
use crate::menu::{Dish, MenuError};
use crate::nutrients::{DetailedNutrients, MacroAmounts};
use crate::policy::Policy;

use super::density::density_score;
use super::distance::euclidean_distance_score;
use super::overrules::{low_carbs_overrule, low_fat_overrule, protein_overrule};
use super::rules::{
    caloric_density_rule, cholesterol_rule, good_fats_rule, per_100g, saturated_fat_rule,
    sodium_content_rule, sugar_content_rule,
};
use super::satiety::{satiety_index, scaled_satiety_score};
use super::EPSILON;

/// The nine rule outputs, each already in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuleScores {
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

/// Full per-dish breakdown; `base` is the weighted average the blender
/// consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DishScore {
    pub density: f64,
    pub satiety: f64,
    pub euclidean: f64,
    pub rules: RuleScores,
    pub base: f64,
}

/// Scores one dish against the user's goal and hunger level under the
/// given policy. Fails only on a structurally malformed record; every
/// other irregularity degrades to a 0 sub-score.
pub fn calculate_dish_score(
    dish: &Dish,
    hunger: HungerLevel,
    goal: &UserGoal,
    diff: &PercentageDifference,
    policy: &Policy,
) -> Result<DishScore, MenuError> {
    let serving_size = dish.serving_size();
    let macros = MacroAmounts::from_entries(dish.macro_nutrients()?);
    let detailed = DetailedNutrients::from_entries(dish.nutrient_entries()?);
    let split = dish.macro_split();
    let factors = DynamicFactors::new(&policy.macro_factors, diff);

    let density = density_score(&macros, &split, goal, &factors);
    let euclidean = euclidean_distance_score(&macros, goal, &factors);
    let satiety = scaled_satiety_score(satiety_index(&macros, &factors), hunger);

    let rules = RuleScores {
        protein_overrule: protein_overrule(&split),
        low_carbs_overrule: low_carbs_overrule(&split),
        low_fat_overrule: low_fat_overrule(&split),
        sugar_content: sugar_content_rule(per_100g(detailed.free_sugars, serving_size)),
        sodium_content: sodium_content_rule(detailed.sodium, serving_size),
        saturated_fat: saturated_fat_rule(detailed.saturated_fat, serving_size),
        cholesterol: cholesterol_rule(detailed.cholesterol, serving_size),
        caloric_density: caloric_density_rule(macros.energy, serving_size),
        good_fats: good_fats_rule(
            detailed.polyunsaturated_fat,
            detailed.monounsaturated_fat,
            serving_size,
        ),
    };

    let scorers = &policy.scorer_factors;
    let rule_factors = &policy.rule_factors;
    let weighted = density * scorers.density
        + satiety * scorers.satiety
        + euclidean * scorers.euclidean
        + rules.protein_overrule * rule_factors.protein_overrule
        + rules.low_carbs_overrule * rule_factors.low_carbs_overrule
        + rules.low_fat_overrule * rule_factors.low_fat_overrule
        + rules.sugar_content * rule_factors.sugar_content
        + rules.sodium_content * rule_factors.sodium_content
        + rules.saturated_fat * rule_factors.saturated_fat
        + rules.cholesterol * rule_factors.cholesterol
        + rules.caloric_density * rule_factors.caloric_density
        + rules.good_fats * rule_factors.good_fats;

    let base = weighted / (scorers.sum() + rule_factors.sum() + EPSILON);

    Ok(DishScore {
        density,
        satiety,
        euclidean,
        rules,
        base,
    })
}
