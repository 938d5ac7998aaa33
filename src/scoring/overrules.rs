//! Macro-ratio heuristics scoring the dish's self-reported percentage
//! split against literature-derived ideal bands. Each returns a
//! whole-point score in [0, 100], or 0 when any of the three percentages
//! failed to parse.

use crate::menu::MacroSplit;

const PROTEIN_PRIMARY: (f64, f64) = (8.0, 43.0);
const PROTEIN_SECONDARY_LOW: (f64, f64) = (3.0, 8.0);
const PROTEIN_SECONDARY_HIGH: (f64, f64) = (44.0, 58.0);

fn clamp_round(score: f64) -> f64 {
    score.round().clamp(0.0, 100.0)
}

fn in_band(value: f64, band: (f64, f64)) -> bool {
    value >= band.0 && value <= band.1
}

fn in_primary_band(protein: f64) -> bool {
    in_band(protein, PROTEIN_PRIMARY)
}

fn in_secondary_band(protein: f64) -> bool {
    in_band(protein, PROTEIN_SECONDARY_LOW) || in_band(protein, PROTEIN_SECONDARY_HIGH)
}

/// Band score: full marks inside, 2 points per percentage point of
/// distance to the nearer bound outside.
fn band_score(value: f64, band: (f64, f64)) -> f64 {
    if in_band(value, band) {
        100.0
    } else {
        let distance = (value - band.0).abs().min((value - band.1).abs());
        (100.0 - distance * 2.0).max(0.0)
    }
}

/// Protein scored across the nested bands shared by the low-carb and
/// low-fat rules: primary [8,43] → 100, secondary [3,8]∪[44,58] → 80,
/// otherwise distance-penalized from 80.
fn nested_protein_score(protein: f64) -> f64 {
    if in_primary_band(protein) {
        100.0
    } else if in_secondary_band(protein) {
        80.0
    } else {
        let distance = if protein < 3.0 {
            (protein - 3.0).abs()
        } else if protein > 8.0 && protein < 44.0 {
            (protein - 8.0).abs().min((protein - 44.0).abs())
        } else {
            (protein - 58.0).abs()
        };
        (80.0 - distance * 2.0).max(0.0)
    }
}

fn excess_penalty(value: f64, limit: f64, rate: f64) -> f64 {
    if value > limit {
        (value - limit) * rate
    } else {
        0.0
    }
}

/// Protein-forward: protein band [8,43], carbs penalized above 65%, fats
/// above 30%. Final = 0.5·protein − 0.25·carbs − 0.25·fats.
pub fn protein_overrule(split: &MacroSplit) -> f64 {
    let Some((protein, carbs, fats)) = split.ratio_inputs() else {
        return 0.0;
    };

    let protein_score = band_score(protein, PROTEIN_PRIMARY);
    let carbs_penalty = excess_penalty(carbs, 65.0, 1.5);
    let fats_penalty = excess_penalty(fats, 30.0, 1.5);

    clamp_round(protein_score * 0.5 - carbs_penalty * 0.25 - fats_penalty * 0.25)
}

/// Low-carb: carbs band [45,60] in the primary role, nested protein
/// scoring, and a fats penalty that tightens (>10% at 2 pts) when protein
/// sits in the secondary band. Final = 0.4·carbs + 0.4·protein −
/// 0.2·fats.
pub fn low_carbs_overrule(split: &MacroSplit) -> f64 {
    let Some((protein, carbs, fats)) = split.ratio_inputs() else {
        return 0.0;
    };

    let carbs_score = band_score(carbs, (45.0, 60.0));
    let protein_score = nested_protein_score(protein);

    let fats_penalty = if in_primary_band(protein) {
        excess_penalty(fats, 35.0, 1.5)
    } else if in_secondary_band(protein) {
        excess_penalty(fats, 10.0, 2.0)
    } else {
        excess_penalty(fats, 35.0, 1.5)
    };

    clamp_round(carbs_score * 0.4 + protein_score * 0.4 - fats_penalty * 0.2)
}

/// Low-fat: fats band [15,30] in the primary role, nested protein scoring,
/// and a carbs penalty that tightens (>60% at 2 pts) when protein sits in
/// the secondary band. Final = 0.4·fats + 0.4·protein − 0.2·carbs.
pub fn low_fat_overrule(split: &MacroSplit) -> f64 {
    let Some((protein, carbs, fats)) = split.ratio_inputs() else {
        return 0.0;
    };

    let fats_score = band_score(fats, (15.0, 30.0));
    let protein_score = nested_protein_score(protein);

    let carbs_penalty = if in_primary_band(protein) {
        excess_penalty(carbs, 65.0, 1.5)
    } else if in_secondary_band(protein) {
        excess_penalty(carbs, 60.0, 2.0)
    } else {
        excess_penalty(carbs, 65.0, 1.5)
    };

    clamp_round(fats_score * 0.4 + protein_score * 0.4 - carbs_penalty * 0.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(proteins: f64, carbs: f64, fats: f64) -> MacroSplit {
        MacroSplit {
            proteins: Some(proteins),
            carbs: Some(carbs),
            fats: Some(fats),
            fibers: Some(0.0),
        }
    }

    #[test]
    fn test_protein_overrule_ideal_band() {
        // 20/50/25: protein in band, no carb or fat excess → 0.5 × 100
        assert_eq!(protein_overrule(&split(20.0, 50.0, 25.0)), 50.0);
        assert_eq!(protein_overrule(&split(8.0, 0.0, 0.0)), 50.0);
        assert_eq!(protein_overrule(&split(43.0, 0.0, 0.0)), 50.0);
    }

    #[test]
    fn test_protein_overrule_distance_penalty() {
        // protein 4: distance 4 from the lower bound → 100 - 4*2 = 92
        assert_eq!(protein_overrule(&split(4.0, 50.0, 25.0)), 46.0);
        // protein 50: nearer bound is 43 → 100 - 7*2 = 86
        assert_eq!(protein_overrule(&split(50.0, 50.0, 25.0)), 43.0);
    }

    #[test]
    fn test_protein_overrule_cross_macro_penalties() {
        // carbs 77 → penalty 18, fats 40 → penalty 15; 50 - 4.5 - 3.75
        assert_eq!(protein_overrule(&split(20.0, 77.0, 40.0)), 42.0);
    }

    #[test]
    fn test_low_carbs_overrule_ideal() {
        // carbs 50 and protein 20 both full marks, fats under 35
        assert_eq!(low_carbs_overrule(&split(20.0, 50.0, 30.0)), 80.0);
    }

    #[test]
    fn test_low_carbs_fats_penalty_depends_on_protein_band() {
        // secondary protein band: fats over 10% penalized at 2 pts/pt
        // carbs 50 → 40, protein 5 → 32, fats 30 → -(20*2)*0.2 = -8
        assert_eq!(low_carbs_overrule(&split(5.0, 50.0, 30.0)), 64.0);
        // primary band: same fats are under the looser 35% limit
        assert_eq!(low_carbs_overrule(&split(20.0, 50.0, 30.0)), 80.0);
        // primary band over 35%: 40 + 40 - (4*1.5)*0.2 = 78.8 → 79
        assert_eq!(low_carbs_overrule(&split(20.0, 50.0, 39.0)), 79.0);
    }

    #[test]
    fn test_low_fat_overrule_ideal() {
        assert_eq!(low_fat_overrule(&split(20.0, 50.0, 25.0)), 80.0);
    }

    #[test]
    fn test_low_fat_carbs_penalty_depends_on_protein_band() {
        // secondary band: carbs 70 → (70-60)*2 = 20, minus 0.2×20 = 4
        // fats 20 → 40, protein 5 → 32
        assert_eq!(low_fat_overrule(&split(5.0, 70.0, 20.0)), 68.0);
        // primary band: carbs 71 → (71-65)*1.5 = 9, minus 0.2×9 = 1.8
        // 40 + 40 - 1.8 = 78.2 → 78
        assert_eq!(low_fat_overrule(&split(20.0, 71.0, 20.0)), 78.0);
    }

    #[test]
    fn test_nested_protein_bands() {
        assert_eq!(nested_protein_score(20.0), 100.0);
        assert_eq!(nested_protein_score(5.0), 80.0);
        assert_eq!(nested_protein_score(50.0), 80.0);
        // below every band: distance from 3
        assert_eq!(nested_protein_score(1.0), 76.0);
        // above every band: distance from 58
        assert_eq!(nested_protein_score(70.0), 56.0);
        // the sliver between the primary and upper secondary band
        assert_eq!(nested_protein_score(43.5), 79.0);
    }

    #[test]
    fn test_malformed_split_scores_zero() {
        let bad = MacroSplit {
            proteins: Some(20.0),
            carbs: None,
            fats: Some(25.0),
            fibers: Some(5.0),
        };
        assert_eq!(protein_overrule(&bad), 0.0);
        assert_eq!(low_carbs_overrule(&bad), 0.0);
        assert_eq!(low_fat_overrule(&bad), 0.0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        for p in [0.0, 30.0, 95.0] {
            for c in [0.0, 55.0, 100.0] {
                for f in [0.0, 25.0, 100.0] {
                    for score in [
                        protein_overrule(&split(p, c, f)),
                        low_carbs_overrule(&split(p, c, f)),
                        low_fat_overrule(&split(p, c, f)),
                    ] {
                        assert!((0.0..=100.0).contains(&score));
                    }
                }
            }
        }
    }
}
