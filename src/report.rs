//! Console output
//!
//! Results are printed to stdout in pipeline order; diagnostics go through
//! `tracing` instead.

use crate::error::AnalysisError;
use crate::stats::{ChiSquaredTest, ContingencyTable};
use crate::summary::{ObservationOverview, SpeciesOverview};
use polars::prelude::*;
use std::fmt::Display;

pub fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(70));
    println!("{}", title);
    println!("{}", "=".repeat(70));
}

pub fn print_section(title: &str) {
    println!("\n{}", title);
    println!("{}", "-".repeat(title.len()));
}

/// Print a table under a heading
pub fn print_table(title: &str, table: &impl Display) {
    print_section(title);
    println!("{}", table);
}

/// First `n` rows of a frame, like a `head()` preview
pub fn print_head(title: &str, df: &DataFrame, n: usize) {
    print_table(title, &df.head(Some(n)));
}

pub fn print_species_overview(overview: &SpeciesOverview) {
    print_section("Species table");
    println!("Different species in table: {}", overview.distinct_species);
    println!("Rows in table: {}", overview.rows);
    println!("Categories: {:?}", overview.categories);
    let statuses: Vec<&str> = overview
        .statuses
        .iter()
        .map(|s| s.as_deref().unwrap_or("<missing>"))
        .collect();
    println!("Conservation statuses: {:?}", statuses);
}

pub fn print_observation_overview(overview: &ObservationOverview) {
    print_section("Observations table");
    println!("Observation rows: {}", overview.rows);
    println!("Distinct species observed: {}", overview.distinct_species);
    println!("Parks: {}", overview.parks);
}

pub fn print_significance(table: &ContingencyTable, test: Result<&ChiSquaredTest, &AnalysisError>) {
    print_section(&format!("Chi-squared test: {} vs {}", table.rows[0], table.rows[1]));
    print!("{}", table);
    match test {
        Ok(test) => {
            println!("chi2 = {:.6}, dof = {}", test.statistic, test.dof);
            println!("p-value = {}", test.p_value);
        }
        Err(_) => println!("p-value undefined (zero row or column total)"),
    }
}

pub fn print_weeks(park: &str, weekly_count: Option<i64>, weeks: Option<f64>) {
    match (weekly_count, weeks) {
        (Some(count), Some(weeks)) => {
            println!("{}: {} sheep/week -> {} weeks", park, count, weeks);
        }
        (Some(count), None) => {
            println!("{}: {} sheep/week -> undefined (no sightings)", park, count);
        }
        _ => println!("{}: no sheep observations recorded", park),
    }
}
