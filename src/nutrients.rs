//! Flattens the nested nutrient payload of a dish record into the two
//! shapes the scorers consume: the five named macro nutrients and the
//! coded detailed nutrients. Absent entries read as 0.0; only a missing
//! list (handled in `menu`) is a hard error.

use serde::{Deserialize, Serialize};

/// A `{name, value}` entry in the computed macro-nutrient list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MacroNutrient {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

/// A `{name, quantity}` entry in the detailed nutrient list, keyed by
/// nutrient code.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamedNutrient {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
}

/// The nutrient codes recognized in the detailed list.
pub const NUTRIENT_CODES: &[&str] = &[
    "ENERC",
    "PROTCNT",
    "CHOAVLDF",
    "FATCE",
    "FIBTG",
    "FASAT",
    "FAPU",
    "FAMU",
    "TCHO",
    "CHOLC",
    "NA",
    "TOTALFREESUGARS",
];

pub fn macro_value(entries: &[MacroNutrient], name: &str) -> f64 {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.value)
        .unwrap_or(0.0)
}

fn quantity_of(entries: &[NamedNutrient], code: &str) -> f64 {
    entries
        .iter()
        .find(|entry| entry.name == code)
        .map(|entry| entry.quantity)
        .unwrap_or(0.0)
}

/// Absolute macro amounts per serving: grams, kcal for energy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroAmounts {
    pub energy: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fibers: f64,
}

impl MacroAmounts {
    pub fn from_entries(entries: &[MacroNutrient]) -> Self {
        Self {
            energy: macro_value(entries, "energy"),
            proteins: macro_value(entries, "proteins"),
            carbs: macro_value(entries, "carbs"),
            fats: macro_value(entries, "fats"),
            fibers: macro_value(entries, "fibers"),
        }
    }

    pub fn field_min(&self, other: &Self) -> Self {
        Self {
            energy: self.energy.min(other.energy),
            proteins: self.proteins.min(other.proteins),
            carbs: self.carbs.min(other.carbs),
            fats: self.fats.min(other.fats),
            fibers: self.fibers.min(other.fibers),
        }
    }

    pub fn field_max(&self, other: &Self) -> Self {
        Self {
            energy: self.energy.max(other.energy),
            proteins: self.proteins.max(other.proteins),
            carbs: self.carbs.max(other.carbs),
            fats: self.fats.max(other.fats),
            fibers: self.fibers.max(other.fibers),
        }
    }
}

/// Detailed nutrient quantities read by code from the dish's nutrient
/// list. Quantities are in the units the record carries (mg for sodium,
/// cholesterol and the fat fractions; grams for sugars and fiber; kcal for
/// energy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DetailedNutrients {
    /// ENERC
    pub energy: f64,
    /// PROTCNT
    pub protein: f64,
    /// CHOAVLDF
    pub available_carbs: f64,
    /// FATCE
    pub fat: f64,
    /// FIBTG
    pub fiber: f64,
    /// FASAT
    pub saturated_fat: f64,
    /// FAPU
    pub polyunsaturated_fat: f64,
    /// FAMU
    pub monounsaturated_fat: f64,
    /// TCHO
    pub total_carbohydrate: f64,
    /// CHOLC
    pub cholesterol: f64,
    /// NA
    pub sodium: f64,
    /// TOTALFREESUGARS
    pub free_sugars: f64,
}

impl DetailedNutrients {
    pub fn from_entries(entries: &[NamedNutrient]) -> Self {
        Self {
            energy: quantity_of(entries, "ENERC"),
            protein: quantity_of(entries, "PROTCNT"),
            available_carbs: quantity_of(entries, "CHOAVLDF"),
            fat: quantity_of(entries, "FATCE"),
            fiber: quantity_of(entries, "FIBTG"),
            saturated_fat: quantity_of(entries, "FASAT"),
            polyunsaturated_fat: quantity_of(entries, "FAPU"),
            monounsaturated_fat: quantity_of(entries, "FAMU"),
            total_carbohydrate: quantity_of(entries, "TCHO"),
            cholesterol: quantity_of(entries, "CHOLC"),
            sodium: quantity_of(entries, "NA"),
            free_sugars: quantity_of(entries, "TOTALFREESUGARS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, quantity: f64) -> NamedNutrient {
        NamedNutrient {
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_macro_amounts_defaults_for_absent_names() {
        let entries = vec![
            MacroNutrient {
                name: "energy".to_string(),
                value: 250.0,
            },
            MacroNutrient {
                name: "proteins".to_string(),
                value: 12.0,
            },
        ];
        let macros = MacroAmounts::from_entries(&entries);
        assert_eq!(macros.energy, 250.0);
        assert_eq!(macros.proteins, 12.0);
        assert_eq!(macros.carbs, 0.0);
        assert_eq!(macros.fibers, 0.0);
    }

    #[test]
    fn test_detailed_nutrients_absent_codes_read_zero() {
        let entries = vec![entry("NA", 500.0), entry("TOTALFREESUGARS", 15.0)];
        let detailed = DetailedNutrients::from_entries(&entries);
        assert_eq!(detailed.sodium, 500.0);
        assert_eq!(detailed.free_sugars, 15.0);
        // FAPU/FAMU are frequently absent and must not fail extraction
        assert_eq!(detailed.polyunsaturated_fat, 0.0);
        assert_eq!(detailed.monounsaturated_fat, 0.0);
        assert_eq!(detailed.cholesterol, 0.0);
    }

    #[test]
    fn test_field_extremes() {
        let a = MacroAmounts {
            energy: 100.0,
            proteins: 5.0,
            carbs: 40.0,
            fats: 2.0,
            fibers: 1.0,
        };
        let b = MacroAmounts {
            energy: 300.0,
            proteins: 2.0,
            carbs: 10.0,
            fats: 9.0,
            fibers: 4.0,
        };
        let min = a.field_min(&b);
        let max = a.field_max(&b);
        assert_eq!(min.energy, 100.0);
        assert_eq!(min.proteins, 2.0);
        assert_eq!(max.carbs, 40.0);
        assert_eq!(max.fibers, 4.0);
    }
}
