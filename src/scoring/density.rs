//! Macro-density fit: how close the dish's percentage split sits to the
//! split implied by the user's goal, with overshoot capped rather than
//! rewarded.

use crate::goal::{DynamicFactors, UserGoal};
use crate::menu::MacroSplit;
use crate::nutrients::MacroAmounts;

use super::EPSILON;

// kcal per gram, used to translate gram goals into an implied energy split
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;
const KCAL_PER_G_FIBER: f64 = 2.0;

fn non_zero(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

/// `min(1, actual/ideal)` — a dish is never rewarded for overshooting the
/// goal split.
fn capped_ratio(actual: f64, ideal: f64) -> f64 {
    (actual / non_zero(ideal)).min(1.0)
}

pub fn density_score(
    macros: &MacroAmounts,
    split: &MacroSplit,
    goal: &UserGoal,
    factors: &DynamicFactors,
) -> f64 {
    // zero goal energy falls back to ε instead of raising; the implied
    // percentages blow up and the components read as 0
    let goal_energy = goal.energy.max(EPSILON);
    let protein_goal_pct = goal.proteins * KCAL_PER_G_PROTEIN / goal_energy * 100.0;
    let carbs_goal_pct = goal.carbs * KCAL_PER_G_CARBS / goal_energy * 100.0;
    let fats_goal_pct = goal.fats * KCAL_PER_G_FAT / goal_energy * 100.0;
    let fiber_goal_pct = goal.fibers * KCAL_PER_G_FIBER / goal_energy * 100.0;

    let score_protein = factors.protein * capped_ratio(split.proteins.unwrap_or(0.0), protein_goal_pct);
    let score_carbs = factors.carbs * capped_ratio(split.carbs.unwrap_or(0.0), carbs_goal_pct);
    let score_fats = factors.fats * capped_ratio(split.fats.unwrap_or(0.0), fats_goal_pct);
    let score_fiber = factors.fibers * capped_ratio(split.fibers.unwrap_or(0.0), fiber_goal_pct);
    let score_energy = factors.energy * (macros.energy / (goal.energy + EPSILON)).min(1.0);

    (score_protein + score_carbs + score_fats + score_fiber + score_energy) * 100.0
        / (factors.sum() + EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::PercentageDifference;
    use crate::policy::MacroFactors;

    fn unit_factors() -> DynamicFactors {
        DynamicFactors::new(&MacroFactors::default(), &PercentageDifference::default())
    }

    fn split(proteins: f64, carbs: f64, fats: f64, fibers: f64) -> MacroSplit {
        MacroSplit {
            proteins: Some(proteins),
            carbs: Some(carbs),
            fats: Some(fats),
            fibers: Some(fibers),
        }
    }

    #[test]
    fn test_perfect_fit_scores_100() {
        // goal: 300 kcal, 22g protein → 29.33%, 22g carbs → 29.33%,
        // 19g fat → 57%, 7g fiber → 4.67%; a dish at or above every
        // implied percentage and at goal energy caps every ratio at 1
        let goal = UserGoal::default();
        let macros = MacroAmounts {
            energy: 300.0,
            ..Default::default()
        };
        let score = density_score(
            &macros,
            &split(30.0, 30.0, 60.0, 5.0),
            &goal,
            &unit_factors(),
        );
        assert!((score - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_component_never_exceeds_its_factor() {
        let goal = UserGoal::default();
        let macros = MacroAmounts {
            energy: 5000.0,
            ..Default::default()
        };
        // wild overshoot on every macro still caps each component ratio at 1
        let score = density_score(
            &macros,
            &split(90.0, 90.0, 90.0, 90.0),
            &goal,
            &unit_factors(),
        );
        assert!(score <= 100.0 + 0.01);
    }

    #[test]
    fn test_zero_goal_macro_uses_fallback_divisor() {
        let goal = UserGoal {
            proteins: 0.0,
            ..UserGoal::default()
        };
        // implied protein pct is 0 → divisor falls back to 1, the 20%
        // actual is capped at ratio 1 rather than dividing by zero
        let score = density_score(
            &MacroAmounts::default(),
            &split(20.0, 0.0, 0.0, 0.0),
            &goal,
            &unit_factors(),
        );
        assert!(score.is_finite());
        assert!((score - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_goal_energy_does_not_raise() {
        let goal = UserGoal {
            energy: 0.0,
            ..UserGoal::default()
        };
        let macros = MacroAmounts {
            energy: 250.0,
            ..Default::default()
        };
        let score = density_score(&macros, &split(20.0, 50.0, 25.0, 5.0), &goal, &unit_factors());
        assert!(score.is_finite());
    }

    #[test]
    fn test_malformed_percentage_reads_zero() {
        let bad = MacroSplit {
            proteins: None,
            carbs: Some(50.0),
            fats: Some(25.0),
            fibers: Some(5.0),
        };
        let with_zero = split(0.0, 50.0, 25.0, 5.0);
        let goal = UserGoal::default();
        let macros = MacroAmounts::default();
        assert_eq!(
            density_score(&macros, &bad, &goal, &unit_factors()),
            density_score(&macros, &with_zero, &goal, &unit_factors())
        );
    }
}
