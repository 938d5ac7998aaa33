//! Distance-to-goal: absolute macro and energy values against the goal's,
//! with a single veto penalty when any component strays too far.

use crate::goal::{DynamicFactors, UserGoal};
use crate::nutrients::MacroAmounts;

use super::EPSILON;

/// Distance beyond which the whole score is vetoed, in the nutrient's
/// native unit (grams, kcal for energy).
pub const OUTLIER_DISTANCE: f64 = 30.0;
/// Multiplier applied to the entire score when any component is an
/// outlier. A veto, not per-component clipping.
pub const OUTLIER_PENALTY: f64 = 0.2;

pub fn euclidean_distance_score(
    macros: &MacroAmounts,
    goal: &UserGoal,
    factors: &DynamicFactors,
) -> f64 {
    let components = [
        (macros.proteins, goal.proteins, factors.protein),
        (macros.carbs, goal.carbs, factors.carbs),
        (macros.fats, goal.fats, factors.fats),
        (macros.fibers, goal.fibers, factors.fibers),
        (macros.energy, goal.energy, factors.energy),
    ];

    let mut weighted_total = 0.0;
    let mut outlier = false;
    for (actual, target, weight) in components {
        let distance = (actual - target).abs();
        if distance > OUTLIER_DISTANCE {
            outlier = true;
        }
        let score = ((1.0 - distance / (target + EPSILON)) * 100.0).clamp(0.0, 100.0);
        weighted_total += score * weight;
    }

    let score = weighted_total / (factors.sum() + EPSILON);
    if outlier {
        score * OUTLIER_PENALTY
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::PercentageDifference;
    use crate::policy::MacroFactors;

    fn unit_factors() -> DynamicFactors {
        DynamicFactors::new(&MacroFactors::default(), &PercentageDifference::default())
    }

    #[test]
    fn test_exact_match_scores_100() {
        let goal = UserGoal::default();
        let macros = MacroAmounts {
            energy: 300.0,
            proteins: 22.0,
            carbs: 22.0,
            fats: 19.0,
            fibers: 7.0,
        };
        let score = euclidean_distance_score(&macros, &goal, &unit_factors());
        assert!((score - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_no_penalty_at_exactly_30() {
        let goal = UserGoal::default();
        // energy 30 kcal under goal, every other distance zero
        let macros = MacroAmounts {
            energy: 270.0,
            proteins: 22.0,
            carbs: 22.0,
            fats: 19.0,
            fibers: 7.0,
        };
        let score = euclidean_distance_score(&macros, &goal, &unit_factors());
        // energy component: (1 - 30/300) × 100 = 90, averaged over 5
        assert!((score - (4.0 * 100.0 + 90.0) / 5.0).abs() < 0.01);
    }

    #[test]
    fn test_outlier_applies_exact_veto_multiplier() {
        let goal = UserGoal::default();
        let near = MacroAmounts {
            energy: 270.0,
            proteins: 22.0,
            carbs: 22.0,
            fats: 19.0,
            fibers: 7.0,
        };
        let unpenalized = euclidean_distance_score(&near, &goal, &unit_factors());

        let outlier = MacroAmounts {
            energy: 269.0,
            proteins: 22.0,
            carbs: 22.0,
            fats: 19.0,
            fibers: 7.0,
        };
        let penalized = euclidean_distance_score(&outlier, &goal, &unit_factors());

        // one component past 30 → whole score × 0.2 exactly
        let expected = (4.0 * 100.0 + (1.0 - 31.0 / (300.0 + EPSILON)) * 100.0) / 5.0 * 0.2;
        assert!((penalized - expected).abs() < 0.01);
        assert!(penalized < unpenalized);
    }

    #[test]
    fn test_component_distance_clamped_to_zero() {
        let goal = UserGoal {
            proteins: 5.0,
            carbs: 5.0,
            fats: 5.0,
            fibers: 5.0,
            energy: 10.0,
        };
        // distances far beyond the goal magnitude would go negative
        let macros = MacroAmounts {
            energy: 500.0,
            proteins: 200.0,
            carbs: 200.0,
            fats: 200.0,
            fibers: 200.0,
        };
        let score = euclidean_distance_score(&macros, &goal, &unit_factors());
        assert_eq!(score, 0.0);
    }
}
