//! The dish feature table: one numeric vector per dish, loaded from CSV.
//! Behavior vectors and similarity lookups both live in this space.

use anyhow::{Context, Result};
use simsimd::SpatialSimilarity;
use std::collections::HashMap;
use std::path::Path;

const NAME_COLUMN: &str = "dish_name";

/// Numeric dish features keyed by dish name. Columns that fail to parse as
/// a number in any row are dropped wholesale so every kept vector has the
/// same dimension.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: HashMap<String, Vec<f64>>,
}

impl FeatureTable {
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("reading feature table {}", path.display()))?;

        let headers = reader
            .headers()
            .context("reading feature table headers")?
            .clone();
        let name_index = headers
            .iter()
            .position(|h| h == NAME_COLUMN)
            .with_context(|| format!("feature table has no '{NAME_COLUMN}' column"))?;

        let mut raw_rows: Vec<(String, Vec<Option<f64>>)> = Vec::new();
        for record in reader.records() {
            let record = record.context("reading feature table row")?;
            let name = record
                .get(name_index)
                .unwrap_or_default()
                .trim()
                .to_string();
            if name.is_empty() {
                continue;
            }
            let values = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != name_index)
                .map(|(_, field)| field.trim().parse::<f64>().ok())
                .collect();
            raw_rows.push((name, values));
        }

        let candidate_columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != name_index)
            .map(|(_, h)| h.to_string())
            .collect();

        // keep a column only if it parsed in every row
        let kept: Vec<usize> = (0..candidate_columns.len())
            .filter(|&col| raw_rows.iter().all(|(_, values)| values[col].is_some()))
            .collect();

        let columns = kept
            .iter()
            .map(|&col| candidate_columns[col].clone())
            .collect();
        let rows = raw_rows
            .into_iter()
            .map(|(name, values)| {
                let vector = kept
                    .iter()
                    .map(|&col| values[col].unwrap_or(0.0))
                    .collect();
                (name, vector)
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn vector(&self, dish_name: &str) -> Option<&[f64]> {
        self.rows.get(dish_name).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn dimension(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cosine similarity in [-1, 1]; 0.0 on dimension mismatch or degenerate
/// vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    f64::cosine(a, b).map(|distance| 1.0 - distance).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table_from(csv: &str) -> FeatureTable {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(csv.as_bytes()).expect("write csv");
        FeatureTable::from_csv_path(file.path()).expect("parse table")
    }

    #[test]
    fn test_loads_numeric_columns() {
        let table = table_from(
            "dish_name,spice,sweetness\n\
             Poha,0.4,0.1\n\
             Jalebi,0.0,0.9\n",
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 2);
        assert_eq!(table.vector("Poha"), Some([0.4, 0.1].as_slice()));
        assert!(table.vector("Unknown Dish").is_none());
    }

    #[test]
    fn test_non_numeric_column_is_dropped() {
        let table = table_from(
            "dish_name,cuisine,spice\n\
             Poha,maharashtrian,0.4\n\
             Jalebi,rajasthani,0.0\n",
        );
        assert_eq!(table.columns(), ["spice"]);
        assert_eq!(table.vector("Jalebi"), Some([0.0].as_slice()));
    }

    #[test]
    fn test_column_with_one_bad_cell_is_dropped() {
        let table = table_from(
            "dish_name,spice,sweetness\n\
             Poha,0.4,0.1\n\
             Jalebi,n/a,0.9\n",
        );
        assert_eq!(table.columns(), ["sweetness"]);
    }

    #[test]
    fn test_cosine_of_identical_vectors() {
        let v = [0.3, 0.5, 0.2];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_of_mismatched_dimensions() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }
}
