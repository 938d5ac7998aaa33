//! Interaction log ingestion and the behavior vector built from it: a
//! weighted average of the feature vectors of every dish the user touched.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::Display;

use crate::features::FeatureTable;
use crate::policy::ActionWeights;

/// A logged user action. Unrecognized action names deserialize to
/// `Unknown` instead of rejecting the whole log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Liked,
    Ordered,
    AddToCart,
    Download,
    Viewed,
    Searched,
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Pull strength toward the touched dish; unknown actions contribute
    /// nothing.
    pub fn weight(&self, weights: &ActionWeights) -> f64 {
        match self {
            Self::Liked => weights.liked,
            Self::Ordered => weights.ordered,
            Self::AddToCart => weights.add_to_cart,
            Self::Download => weights.download,
            Self::Viewed => weights.viewed,
            Self::Searched => weights.searched,
            Self::Unknown => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub timestamp: String,
    pub action: Action,
    pub dish: String,
    pub user_id: String,
}

/// Loads the interaction log from a JSON array of records.
pub fn load_interaction_log(path: &Path) -> Result<Vec<Interaction>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading interaction log {}", path.display()))?;
    serde_json::from_str(&content).context("parsing interaction log")
}

/// The user's behavior vector: feature vectors of interacted dishes,
/// weighted by action strength and normalized by total absolute weight.
/// Interactions naming dishes absent from the feature table are skipped.
/// `None` when nothing usable remains.
pub fn build_user_vector(
    log: &[Interaction],
    user_id: &str,
    table: &FeatureTable,
    weights: &ActionWeights,
) -> Option<Vec<f64>> {
    let mut accumulated = vec![0.0; table.dimension()];
    let mut total_weight = 0.0;

    for interaction in log.iter().filter(|i| i.user_id == user_id) {
        let Some(features) = table.vector(&interaction.dish) else {
            continue;
        };
        let weight = interaction.action.weight(weights);
        for (slot, feature) in accumulated.iter_mut().zip(features) {
            *slot += weight * feature;
        }
        total_weight += weight.abs();
    }

    if total_weight <= 0.0 {
        return None;
    }
    for slot in &mut accumulated {
        *slot /= total_weight;
    }
    Some(accumulated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_table() -> FeatureTable {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(
            b"dish_name,spice,sweetness\n\
              Poha,0.4,0.1\n\
              Jalebi,0.0,0.9\n",
        )
        .expect("write csv");
        FeatureTable::from_csv_path(file.path()).expect("parse table")
    }

    fn interaction(action: Action, dish: &str, user_id: &str) -> Interaction {
        Interaction {
            timestamp: "2024-05-01T12:00:00Z".to_string(),
            action,
            dish: dish.to_string(),
            user_id: user_id.to_string(),
        }
    }

    #[test]
    fn test_action_deserialization() {
        let action: Action = serde_json::from_str("\"add_to_cart\"").unwrap();
        assert_eq!(action, Action::AddToCart);
        let action: Action = serde_json::from_str("\"hovered\"").unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn test_action_weights() {
        let weights = ActionWeights::default();
        assert_eq!(Action::Liked.weight(&weights), 1.0);
        assert_eq!(Action::Ordered.weight(&weights), 0.9);
        assert_eq!(Action::Searched.weight(&weights), 0.4);
        assert_eq!(Action::Unknown.weight(&weights), 0.0);
    }

    #[test]
    fn test_empty_log_yields_no_vector() {
        let table = sample_table();
        let vector = build_user_vector(&[], "u1", &table, &ActionWeights::default());
        assert!(vector.is_none());
    }

    #[test]
    fn test_single_like_yields_that_dish() {
        let table = sample_table();
        let log = [interaction(Action::Liked, "Poha", "u1")];
        let vector = build_user_vector(&log, "u1", &table, &ActionWeights::default())
            .expect("one weighted interaction");
        assert!((vector[0] - 0.4).abs() < 1e-9);
        assert!((vector[1] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_other_users_and_unknown_dishes_are_skipped() {
        let table = sample_table();
        let log = [
            interaction(Action::Liked, "Poha", "u2"),
            interaction(Action::Ordered, "Off-Menu Special", "u1"),
            interaction(Action::Unknown, "Jalebi", "u1"),
        ];
        // the unknown action carries zero weight, so nothing accumulates
        let vector = build_user_vector(&log, "u1", &table, &ActionWeights::default());
        assert!(vector.is_none());
    }

    #[test]
    fn test_weighted_average_over_two_dishes() {
        let table = sample_table();
        let log = [
            interaction(Action::Liked, "Poha", "u1"),
            interaction(Action::Viewed, "Jalebi", "u1"),
        ];
        let vector = build_user_vector(&log, "u1", &table, &ActionWeights::default())
            .expect("two weighted interactions");
        // (1.0×0.4 + 0.5×0.0) / 1.5 and (1.0×0.1 + 0.5×0.9) / 1.5
        assert!((vector[0] - 0.4 / 1.5).abs() < 1e-9);
        assert!((vector[1] - 0.55 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_load_interaction_log() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(
            br#"[{"timestamp": "2024-05-01T09:30:00Z", "action": "liked", "dish": "Poha", "user_id": "u1"}]"#,
        )
        .expect("write log");
        let log = load_interaction_log(file.path()).expect("parse log");
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, Action::Liked);
        assert_eq!(log[0].dish, "Poha");
    }
}
