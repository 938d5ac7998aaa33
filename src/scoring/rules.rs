//! Threshold-based nutrient rules. Each rule normalizes a raw amount to a
//! per-100g basis, maps it through a piecewise-linear curve, and returns a
//! whole-point score in [0, 100]. The band thresholds and decay rates come
//! from dietary guideline literature and are deliberately literal.

/// `value × 100 / serving_size`, or 0 when the serving size is not
/// positive (a zero serving disables per-100g normalization entirely).
pub fn per_100g(value: f64, serving_size: f64) -> f64 {
    if serving_size > 0.0 {
        value * 100.0 / serving_size
    } else {
        0.0
    }
}

fn clamp_round(score: f64) -> f64 {
    score.round().clamp(0.0, 100.0)
}

/// Free sugars as a percentage of serving weight. Bands: ≤10 full marks,
/// then −2, −3 (from 80), and −4 (from 50) points per percentage point.
pub fn sugar_content_rule(sugar_pct: f64) -> f64 {
    if !sugar_pct.is_finite() {
        return 0.0;
    }
    let score = if sugar_pct <= 10.0 {
        100.0
    } else if sugar_pct <= 20.0 {
        (100.0 - (sugar_pct - 10.0) * 2.0).max(0.0)
    } else if sugar_pct <= 30.0 {
        (80.0 - (sugar_pct - 20.0) * 3.0).max(0.0)
    } else {
        (50.0 - (sugar_pct - 30.0) * 4.0).max(0.0)
    };
    score.round()
}

/// Sodium in mg per 100g. Bands at 400/800/1200 mg.
pub fn sodium_content_rule(sodium: f64, serving_size: f64) -> f64 {
    if !sodium.is_finite() || !serving_size.is_finite() {
        return 0.0;
    }
    let sodium_per_100g = per_100g(sodium, serving_size);
    let score = if sodium_per_100g <= 400.0 {
        100.0
    } else if sodium_per_100g <= 800.0 {
        (100.0 - (sodium_per_100g - 400.0) * 0.05).max(0.0)
    } else if sodium_per_100g <= 1200.0 {
        (80.0 - (sodium_per_100g - 800.0) * 0.075).max(0.0)
    } else {
        (50.0 - (sodium_per_100g - 1200.0) * 0.1).max(0.0)
    };
    score.round()
}

/// Saturated fat in mg per 100g. Bands at 2000/5000/7000 mg.
pub fn saturated_fat_rule(saturated_fat: f64, serving_size: f64) -> f64 {
    if !saturated_fat.is_finite() || !serving_size.is_finite() {
        return 0.0;
    }
    let fat_per_100g = per_100g(saturated_fat, serving_size);
    let score = if fat_per_100g <= 2000.0 {
        100.0
    } else if fat_per_100g <= 5000.0 {
        (100.0 - (fat_per_100g - 2000.0) * 0.033).max(0.0)
    } else if fat_per_100g <= 7000.0 {
        (80.0 - (fat_per_100g - 5000.0) * 0.05).max(0.0)
    } else {
        (50.0 - (fat_per_100g - 7000.0) * 0.067).max(0.0)
    };
    score.round()
}

/// Cholesterol in mg per 100g. Bands at 75/150/200 mg; the last band
/// starts from 60, not 50.
pub fn cholesterol_rule(cholesterol: f64, serving_size: f64) -> f64 {
    if !cholesterol.is_finite() || !serving_size.is_finite() {
        return 0.0;
    }
    let cholesterol_per_100g = per_100g(cholesterol, serving_size);
    let score = if cholesterol_per_100g <= 75.0 {
        100.0
    } else if cholesterol_per_100g <= 150.0 {
        (100.0 - (cholesterol_per_100g - 75.0) * 0.266).max(0.0)
    } else if cholesterol_per_100g <= 200.0 {
        (80.0 - (cholesterol_per_100g - 150.0) * 0.4).max(0.0)
    } else {
        (60.0 - (cholesterol_per_100g - 200.0) * 0.5).max(0.0)
    };
    score.round()
}

/// Energy in kcal per 100g. Bands at 200/300/400 kcal.
pub fn caloric_density_rule(energy: f64, serving_size: f64) -> f64 {
    if !energy.is_finite() || !serving_size.is_finite() {
        return 0.0;
    }
    let caloric_density = per_100g(energy, serving_size);
    let score = if caloric_density <= 200.0 {
        100.0
    } else if caloric_density <= 300.0 {
        (100.0 - (caloric_density - 200.0) * 0.2).max(0.0)
    } else if caloric_density <= 400.0 {
        (80.0 - (caloric_density - 300.0) * 0.3).max(0.0)
    } else {
        (50.0 - (caloric_density - 400.0) * 0.4).max(0.0)
    };
    score.round()
}

/// Poly- plus monounsaturated fat in mg per 100g. The one rewarding curve:
/// rises 50→80 up to 500 mg, 80→90 up to 2000 mg, then 90→100. The floor
/// clamps at the band edges are kept as specified even though they leave
/// the curve locally flat.
pub fn good_fats_rule(polyunsaturated_fat: f64, monounsaturated_fat: f64, serving_size: f64) -> f64 {
    if !polyunsaturated_fat.is_finite()
        || !monounsaturated_fat.is_finite()
        || !serving_size.is_finite()
    {
        return 0.0;
    }
    let good_fats_per_100g = per_100g(polyunsaturated_fat + monounsaturated_fat, serving_size);
    let score = if good_fats_per_100g <= 500.0 {
        (50.0 + (good_fats_per_100g / 500.0) * 30.0).max(0.0)
    } else if good_fats_per_100g <= 2000.0 {
        (80.0 + ((good_fats_per_100g - 500.0) / 1500.0) * 10.0).max(80.0)
    } else {
        (90.0 + ((good_fats_per_100g - 2000.0) / 1000.0) * 5.0).min(100.0)
    };
    score.round()
}

/// Fiber quality: ratio of fiber to carbohydrates plus absolute fiber per
/// 100g, with a bonus for essential nutrients. Not part of the default
/// scoring policy; kept until its weighting is decided.
pub fn fiber_content_rule(
    fiber: f64,
    carbohydrates: f64,
    serving_size: f64,
    has_essential_nutrients: bool,
) -> f64 {
    if !fiber.is_finite() || !carbohydrates.is_finite() || !serving_size.is_finite() {
        return 0.0;
    }
    if serving_size <= 0.0 || carbohydrates <= 0.0 {
        return 0.0;
    }

    let fiber_per_100g = fiber * 100.0 / serving_size;
    let carbs_per_100g = carbohydrates * 100.0 / serving_size;
    let fiber_ratio = if carbs_per_100g > 0.0 {
        (fiber_per_100g / carbs_per_100g) * 100.0
    } else {
        0.0
    };

    let fiber_ratio_score = if fiber_ratio <= 2.5 {
        (50.0 + (fiber_ratio / 2.5) * 20.0).max(0.0)
    } else if fiber_ratio <= 5.0 {
        (70.0 + ((fiber_ratio - 2.5) / 2.5) * 10.0).max(70.0)
    } else if fiber_ratio <= 10.0 {
        (80.0 + ((fiber_ratio - 5.0) / 5.0) * 10.0).max(80.0)
    } else {
        (90.0 + ((fiber_ratio - 10.0) / 5.0) * 5.0).min(100.0)
    };

    let fiber_per_100g_score = if fiber_per_100g <= 1.5 {
        (50.0 + (fiber_per_100g / 1.5) * 20.0).max(0.0)
    } else if fiber_per_100g <= 2.5 {
        (70.0 + (fiber_per_100g - 1.5) * 10.0).max(70.0)
    } else {
        (80.0 + ((fiber_per_100g - 2.5) / 2.5) * 15.0).min(100.0)
    };

    let nutrients_bonus = if has_essential_nutrients { 10.0 } else { 0.0 };

    clamp_round(fiber_ratio_score * 0.4 + fiber_per_100g_score * 0.4 + nutrients_bonus * 0.2)
}
