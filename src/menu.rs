use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::nutrients::{MacroNutrient, NamedNutrient};

/// A structurally malformed dish record. Parse-level problems (bad
/// percentage strings, absent optional nutrients) are recovered locally by
/// the scorers and never reach this type.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("dish '{dish}' is missing required field '{path}'")]
    MissingField { dish: String, path: &'static str },
}

/// One dish record as stored in the menu document. Everything below
/// `dish_variants` is optional at the serde level; the accessor methods
/// decide which absences are hard errors and which get defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Dish {
    pub dish_name: String,
    #[serde(default)]
    pub dish_variants: Option<DishVariants>,
    #[serde(default)]
    pub distributed_percentage: BTreeMap<String, String>,
    #[serde(default)]
    pub timing_category: Option<OneOrMany>,
    #[serde(default)]
    pub dish_type: Option<OneOrMany>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DishVariants {
    #[serde(default)]
    pub normal: Option<VariantServings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantServings {
    #[serde(default)]
    pub full: Option<ServingData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServingData {
    #[serde(default)]
    pub calculate_nutrients: Option<CalculatedNutrients>,
    #[serde(default)]
    pub nutrients: Option<Vec<NamedNutrient>>,
    #[serde(default)]
    pub serving: Option<Serving>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalculatedNutrients {
    #[serde(default)]
    pub macro_nutrients: Option<Vec<MacroNutrient>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Serving {
    #[serde(default)]
    pub size: f64,
}

/// Fields like `timing_category` appear as a single string or a list of
/// strings depending on the upstream record.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

impl Dish {
    fn full(&self) -> Option<&ServingData> {
        self.dish_variants.as_ref()?.normal.as_ref()?.full.as_ref()
    }

    /// Serving size in grams; 0.0 when unset, which disables every per-100g
    /// normalization downstream.
    pub fn serving_size(&self) -> f64 {
        self.full()
            .and_then(|f| f.serving.as_ref())
            .map(|s| s.size)
            .unwrap_or(0.0)
    }

    /// The computed macro-nutrient list. Required: a dish without it cannot
    /// be scored at all.
    pub fn macro_nutrients(&self) -> Result<&[MacroNutrient], MenuError> {
        self.full()
            .and_then(|f| f.calculate_nutrients.as_ref())
            .and_then(|c| c.macro_nutrients.as_deref())
            .ok_or_else(|| MenuError::MissingField {
                dish: self.dish_name.clone(),
                path: "dish_variants.normal.full.calculate_nutrients.macro_nutrients",
            })
    }

    /// The detailed nutrient list. Required as a list; individual codes
    /// inside it may be absent and default to 0.0.
    pub fn nutrient_entries(&self) -> Result<&[NamedNutrient], MenuError> {
        self.full()
            .and_then(|f| f.nutrients.as_deref())
            .ok_or_else(|| MenuError::MissingField {
                dish: self.dish_name.clone(),
                path: "dish_variants.normal.full.nutrients",
            })
    }

    /// Parses the `"22%"`-style percentage strings once, at the ingestion
    /// boundary. Rules never re-parse strings.
    pub fn macro_split(&self) -> MacroSplit {
        MacroSplit::from_percentages(&self.distributed_percentage)
    }

    pub fn timing_categories(&self) -> &[String] {
        self.timing_category
            .as_ref()
            .map(OneOrMany::as_slice)
            .unwrap_or(&[])
    }

    pub fn dish_types(&self) -> &[String] {
        self.dish_type
            .as_ref()
            .map(OneOrMany::as_slice)
            .unwrap_or(&[])
    }
}

/// The dish's self-reported macro composition, parsed from percentage
/// strings. A missing field reads as 0%, a malformed one as `None`: the
/// macro-ratio rules fail closed (score 0) on `None` while the density
/// scorer treats it as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroSplit {
    pub proteins: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub fibers: Option<f64>,
}

impl MacroSplit {
    pub fn from_percentages(raw: &BTreeMap<String, String>) -> Self {
        Self {
            proteins: split_field(raw, "proteins"),
            carbs: split_field(raw, "carbs"),
            fats: split_field(raw, "fats"),
            fibers: split_field(raw, "fibers"),
        }
    }

    /// The protein/carbs/fats triple the macro-ratio rules evaluate, or
    /// `None` if any of the three failed to parse.
    pub fn ratio_inputs(&self) -> Option<(f64, f64, f64)> {
        Some((self.proteins?, self.carbs?, self.fats?))
    }
}

fn split_field(raw: &BTreeMap<String, String>, key: &str) -> Option<f64> {
    match raw.get(key) {
        None => Some(0.0),
        Some(value) => parse_percentage(value),
    }
}

/// `"22%"` → 22.0. `None` for anything that is not a number once the
/// percent signs are gone.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    raw.replace('%', "").trim().parse::<f64>().ok()
}

/// Loads a menu from JSON: either a bare array of dishes or a document
/// with a top-level `menu` array.
pub fn load_menu(path: &Path) -> Result<Vec<Dish>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading menu file {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).context("parsing menu JSON")?;
    let dishes = match value {
        serde_json::Value::Object(mut doc) => doc
            .remove("menu")
            .context("menu document has no 'menu' array")?,
        other => other,
    };
    serde_json::from_value(dishes).context("parsing menu dishes")
}
