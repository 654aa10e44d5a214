//! Chi-squared test of independence on 2x2 protection tables
//!
//! Rows are two categories, columns are (not_protected, protected). The test
//! applies Yates' continuity correction, as is standard for one degree of
//! freedom.

use crate::error::AnalysisError;
use crate::pivot::{CategoryPivot, CategoryProtection};
use std::fmt;

/// 2x2 table of species counts
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    pub rows: [String; 2],
    /// `counts[row] = [not_protected, protected]`
    pub counts: [[u64; 2]; 2],
}

/// Result of a chi-squared independence test
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquaredTest {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: u32,
    pub expected: [[f64; 2]; 2],
}

impl ContingencyTable {
    pub fn new(rows: [String; 2], counts: [[u64; 2]; 2]) -> Self {
        Self { rows, counts }
    }

    /// Build the table for two categories looked up by name
    pub fn from_pivot(pivot: &CategoryPivot, first: &str, second: &str) -> Result<Self, AnalysisError> {
        let a = lookup(pivot, first)?;
        let b = lookup(pivot, second)?;

        Ok(Self::new(
            [a.category.clone(), b.category.clone()],
            [[a.not_protected, a.protected], [b.not_protected, b.protected]],
        ))
    }

    fn row_totals(&self) -> [f64; 2] {
        [
            (self.counts[0][0] + self.counts[0][1]) as f64,
            (self.counts[1][0] + self.counts[1][1]) as f64,
        ]
    }

    fn column_totals(&self) -> [f64; 2] {
        [
            (self.counts[0][0] + self.counts[1][0]) as f64,
            (self.counts[0][1] + self.counts[1][1]) as f64,
        ]
    }

    /// Pearson chi-squared test with Yates' correction
    ///
    /// Each observed cell is moved toward its expected value by at most 0.5
    /// before computing `sum((O - E)^2 / E)`. With one degree of freedom the
    /// survival function is `erfc(sqrt(x / 2))`.
    pub fn chi2_contingency(&self) -> Result<ChiSquaredTest, AnalysisError> {
        let row_totals = self.row_totals();
        let column_totals = self.column_totals();
        let grand_total: f64 = row_totals.iter().sum();

        if row_totals.contains(&0.0) || column_totals.contains(&0.0) {
            return Err(AnalysisError::DegenerateTable {
                rows: self.rows.clone(),
            });
        }

        let mut expected = [[0.0; 2]; 2];
        let mut statistic = 0.0;

        for (i, row_total) in row_totals.iter().enumerate() {
            for (j, column_total) in column_totals.iter().enumerate() {
                let e = row_total * column_total / grand_total;
                let o = self.counts[i][j] as f64;

                let diff = e - o;
                let corrected = o + diff.signum() * diff.abs().min(0.5);

                expected[i][j] = e;
                statistic += (corrected - e).powi(2) / e;
            }
        }

        let p_value = libm::erfc((statistic / 2.0).sqrt());

        Ok(ChiSquaredTest {
            statistic,
            p_value,
            dof: 1,
            expected,
        })
    }
}

fn lookup<'a>(pivot: &'a CategoryPivot, category: &str) -> Result<&'a CategoryProtection, AnalysisError> {
    pivot.get(category).ok_or_else(|| AnalysisError::UnknownCategory {
        category: category.to_string(),
        available: pivot.categories(),
    })
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.iter().map(|r| r.len()).max().unwrap_or(0).max(8);
        writeln!(f, "{:width$}  {:>13}  {:>9}", "", "not_protected", "protected", width = width)?;
        for (name, counts) in self.rows.iter().zip(self.counts.iter()) {
            writeln!(f, "{:width$}  {:>13}  {:>9}", name, counts[0], counts[1], width = width)?;
        }
        Ok(())
    }
}
