mod density;
mod distance;
mod overrules;
pub mod rules;
mod satiety;
mod score;

/// Guard against division by zero in every weighted average.
pub const EPSILON: f64 = 1e-6;

pub use density::density_score;
pub use distance::{euclidean_distance_score, OUTLIER_DISTANCE, OUTLIER_PENALTY};
pub use overrules::{low_carbs_overrule, low_fat_overrule, protein_overrule};
pub use rules::{
    caloric_density_rule, cholesterol_rule, fiber_content_rule, good_fats_rule, per_100g,
    saturated_fat_rule, sodium_content_rule, sugar_content_rule,
};
pub use satiety::{satiety_index, scaled_satiety_score, SATIETY_SCALE};
pub use score::{calculate_dish_score, DishScore, RuleScores};
