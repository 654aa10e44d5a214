//! Category protection pivot
//!
//! Reshapes the long (category, is_protected) counts into one row per
//! category with `not_protected`, `protected` and `percent_protected`.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fmt;

/// Protection counts for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProtection {
    pub category: String,
    pub not_protected: u64,
    pub protected: u64,
    /// protected / (protected + not_protected); NaN when both are 0
    pub percent_protected: f64,
}

impl CategoryProtection {
    pub fn new(category: impl Into<String>, not_protected: u64, protected: u64) -> Self {
        let total = protected + not_protected;
        let percent_protected = if total == 0 {
            f64::NAN
        } else {
            protected as f64 / total as f64
        };

        Self {
            category: category.into(),
            not_protected,
            protected,
            percent_protected,
        }
    }

    pub fn total(&self) -> u64 {
        self.protected + self.not_protected
    }
}

/// Wide protection table, rows sorted by category label
#[derive(Debug, Clone)]
pub struct CategoryPivot {
    rows: Vec<CategoryProtection>,
}

impl CategoryPivot {
    /// Pivot the output of `species_per_category_protection`
    ///
    /// Missing (category, flag) combinations become 0 before the ratio is
    /// taken.
    pub fn from_counts(counts: &DataFrame) -> Result<Self> {
        let species = col("species");
        let is_protected = col("is_protected");

        let wide = counts
            .clone()
            .lazy()
            .group_by([col("category")])
            .agg([
                species.clone().filter(is_protected.clone().not()).sum().alias("not_protected"),
                species.filter(is_protected).sum().alias("protected"),
            ])
            .with_columns([
                col("not_protected").fill_null(lit(0)).cast(DataType::Int64),
                col("protected").fill_null(lit(0)).cast(DataType::Int64),
            ])
            .sort(["category"], Default::default())
            .collect()
            .with_context(|| "Failed to pivot category protection counts")?;

        let categories = wide.column("category")?.str()?;
        let not_protected = wide.column("not_protected")?.i64()?;
        let protected = wide.column("protected")?.i64()?;

        let rows = categories
            .into_iter()
            .zip(not_protected.into_iter())
            .zip(protected.into_iter())
            .filter_map(|((category, not_protected), protected)| {
                Some(CategoryProtection::new(
                    category?,
                    not_protected.unwrap_or(0).max(0) as u64,
                    protected.unwrap_or(0).max(0) as u64,
                ))
            })
            .collect();

        Ok(Self { rows })
    }

    #[cfg(test)]
    pub(crate) fn from_rows(mut rows: Vec<CategoryProtection>) -> Self {
        rows.sort_by(|a, b| a.category.cmp(&b.category));
        Self { rows }
    }

    pub fn rows(&self) -> &[CategoryProtection] {
        &self.rows
    }

    /// Look up a category by name
    pub fn get(&self, category: &str) -> Option<&CategoryProtection> {
        self.rows.iter().find(|row| row.category == category)
    }

    pub fn categories(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.category.clone()).collect()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let categories: Vec<&str> = self.rows.iter().map(|r| r.category.as_str()).collect();
        let not_protected: Vec<u64> = self.rows.iter().map(|r| r.not_protected).collect();
        let protected: Vec<u64> = self.rows.iter().map(|r| r.protected).collect();
        let percent: Vec<f64> = self.rows.iter().map(|r| r.percent_protected).collect();

        let df = df![
            "category" => categories,
            "not_protected" => not_protected,
            "protected" => protected,
            "percent_protected" => percent,
        ]?;
        Ok(df)
    }
}

impl fmt::Display for CategoryPivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_dataframe() {
            Ok(df) => write!(f, "{}", df),
            Err(e) => write!(f, "<pivot unavailable: {}>", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn long_counts() -> DataFrame {
        df![
            "category" => &["Bird", "Bird", "Fish", "Mammal", "Mammal", "Nonvascular Plant"],
            "is_protected" => &[false, true, true, false, true, false],
            "species" => &[413i64, 75, 5, 146, 30, 328],
        ].unwrap()
    }

    #[test]
    fn test_pivot_fills_missing_combinations() {
        let pivot = CategoryPivot::from_counts(&long_counts()).unwrap();

        assert_eq!(pivot.categories(), vec!["Bird", "Fish", "Mammal", "Nonvascular Plant"]);

        let fish = pivot.get("Fish").unwrap();
        assert_eq!(fish.not_protected, 0);
        assert_eq!(fish.protected, 5);
        assert_eq!(fish.percent_protected, 1.0);

        let plants = pivot.get("Nonvascular Plant").unwrap();
        assert_eq!(plants.protected, 0);
        assert_eq!(plants.percent_protected, 0.0);
    }

    #[test]
    fn test_percent_protected() {
        let pivot = CategoryPivot::from_counts(&long_counts()).unwrap();

        let mammal = pivot.get("Mammal").unwrap();
        assert_eq!(mammal.total(), 176);
        assert_relative_eq!(mammal.percent_protected, 30.0 / 176.0, epsilon = 1e-12);

        for row in pivot.rows() {
            assert!((0.0..=1.0).contains(&row.percent_protected));
        }
    }

    #[test]
    fn test_null_category_is_skipped() {
        let counts = df![
            "category" => &[Some("Bird"), None],
            "is_protected" => &[true, false],
            "species" => &[75i64, 3],
        ].unwrap();

        let pivot = CategoryPivot::from_counts(&counts).unwrap();

        assert_eq!(pivot.categories(), vec!["Bird"]);
        assert!(pivot.get("").is_none());
    }

    #[test]
    fn test_empty_category_is_nan() {
        let row = CategoryProtection::new("Amphibian", 0, 0);
        assert!(row.percent_protected.is_nan());
    }

    #[test]
    fn test_to_dataframe() {
        let pivot = CategoryPivot::from_rows(vec![
            CategoryProtection::new("Mammal", 146, 30),
            CategoryProtection::new("Bird", 413, 75),
        ]);

        let df = pivot.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 4);
        assert_eq!(df.column("category").unwrap().str().unwrap().get(0), Some("Bird"));
    }
}
