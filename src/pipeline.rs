//! Survey analysis pipeline
//!
//! Runs every stage top to bottom: load, clean, aggregate, pivot, test,
//! filter/join, chart, sample size. Input and schema problems abort the run;
//! a chart that cannot be written, or a comparison whose table has a zero
//! marginal, is recorded and the run continues.

use crate::aggregate::{
    observations_by_park, park_total, species_per_category_protection, species_per_status,
};
use crate::charts::BarChart;
use crate::cleaning::{fill_missing_status, tag_species};
use crate::config::AnalysisConfig;
use crate::data::SurveyData;
use crate::error::AnalysisError;
use crate::pivot::CategoryPivot;
use crate::report;
use crate::sheep::{join_observations, select_sheep_species, sheep_rows};
use crate::stats::{ChiSquaredTest, ContingencyTable};
use crate::summary::{ObservationOverview, SpeciesOverview};
use anyhow::Result;
use polars::prelude::*;
use std::path::PathBuf;

/// One category comparison
///
/// `test` is `Err(AnalysisError::DegenerateTable)` when the p-value is undefined.
#[derive(Debug, Clone)]
pub struct Significance {
    pub table: ContingencyTable,
    pub test: Result<ChiSquaredTest, AnalysisError>,
}

/// Sample-size outcome for one park
#[derive(Debug, Clone, PartialEq)]
pub struct ParkWeeks {
    pub park: String,
    pub weekly_count: Option<i64>,
    pub weeks: Option<f64>,
}

/// Everything the run computed
#[derive(Debug)]
pub struct AnalysisReport {
    pub species_overview: SpeciesOverview,
    pub observation_overview: ObservationOverview,
    pub protection_counts: DataFrame,
    pub category_pivot: CategoryPivot,
    pub significance: Vec<Significance>,
    pub sheep_observations: DataFrame,
    pub park_totals: DataFrame,
    pub relative_mde_percent: f64,
    pub weeks: Vec<ParkWeeks>,
    pub charts_written: Vec<PathBuf>,
    pub chart_failures: Vec<AnalysisError>,
}

/// Run the full analysis described by `config`
pub fn run(config: &AnalysisConfig) -> Result<AnalysisReport> {
    report::print_banner("National Parks Biodiversity Analysis");

    let data = SurveyData::load(&config.species_path, &config.observations_path)?;
    let mut charts_written = Vec::new();
    let mut chart_failures = Vec::new();

    // Species overview
    report::print_head("Species head", &data.species, 5);
    let species_overview = SpeciesOverview::from_frame(&data.species)?;
    report::print_species_overview(&species_overview);

    report::print_table(
        "Species per conservation status (missing status excluded)",
        &species_per_status(&data.species)?,
    );

    // Cleaning and status buckets
    let cleaned = fill_missing_status(&data.species, &config.no_intervention_label)?;
    let protection_counts = species_per_status(&cleaned)?;
    report::print_table("Species per conservation status", &protection_counts);

    let status_chart = BarChart::from_frame(
        &protection_counts,
        "conservation_status",
        "species",
        "Conservation Status",
        "Number of Species",
    )?
    .log_scale();
    record_chart(
        status_chart.draw(&config.status_chart_path()),
        config.status_chart_path(),
        &mut charts_written,
        &mut chart_failures,
    );

    // Protection by category
    let tagged = tag_species(&cleaned, &config.no_intervention_label, &config.sheep_term)?;
    report::print_head("Species with protection flag", &tagged, 5);

    let category_counts = species_per_category_protection(&tagged)?;
    report::print_head("Species per category and protection", &category_counts, 5);

    let category_pivot = CategoryPivot::from_counts(&category_counts)?;
    report::print_table("Category protection", &category_pivot);

    let mut significance = Vec::with_capacity(config.comparisons.len());
    for (first, second) in &config.comparisons {
        let table = ContingencyTable::from_pivot(&category_pivot, first, second)?;
        let test = table.chi2_contingency();
        match &test {
            Ok(t) => tracing::debug!("{} vs {}: chi2 = {}, p = {}", first, second, t.statistic, t.p_value),
            Err(e) => tracing::warn!("{}", e),
        }
        report::print_significance(&table, test.as_ref());
        significance.push(Significance { table, test });
    }

    // Observations
    report::print_head("Observations head", &data.observations, 5);
    let observation_overview = ObservationOverview::from_frame(&data.observations)?;
    report::print_observation_overview(&observation_overview);

    report::print_table("Rows with sheep in a common name", &sheep_rows(&tagged)?);

    let sheep_species = select_sheep_species(&tagged, &config.sheep_category)?;
    report::print_table("Sheep species", &sheep_species);

    let sheep_observations = join_observations(&sheep_species, &data.observations)?;
    report::print_table("Sheep observations", &sheep_observations);

    let park_totals = observations_by_park(&sheep_observations)?;
    report::print_table("Sheep observations per park (7 days)", &park_totals);

    let sheep_chart = BarChart::from_frame(
        &park_totals,
        "park_name",
        "observations",
        "Observations of Sheep per Week",
        "Observations",
    )?
    .with_size(1600, 400);
    record_chart(
        sheep_chart.draw(&config.sheep_chart_path()),
        config.sheep_chart_path(),
        &mut charts_written,
        &mut chart_failures,
    );

    // Sample size
    let plan = config.sample_size;
    let relative_mde_percent = plan.relative_mde_percent();
    report::print_section("Foot and mouth study sample size");
    println!("Minimum detectable effect (% of baseline): {}", relative_mde_percent);
    println!("Required sample size per park: {}", plan.required_sample_size);

    let mut weeks = Vec::new();
    for park in [&config.baseline_park, &config.treatment_park] {
        let weekly_count = park_total(&park_totals, park)?;
        let park_weeks = ParkWeeks {
            park: park.clone(),
            weekly_count,
            weeks: weekly_count.and_then(|count| plan.weeks_to_observe(count)),
        };
        report::print_weeks(park, park_weeks.weekly_count, park_weeks.weeks);
        weeks.push(park_weeks);
    }

    Ok(AnalysisReport {
        species_overview,
        observation_overview,
        protection_counts,
        category_pivot,
        significance,
        sheep_observations,
        park_totals,
        relative_mde_percent,
        weeks,
        charts_written,
        chart_failures,
    })
}

fn record_chart(
    outcome: Result<(), AnalysisError>,
    path: PathBuf,
    written: &mut Vec<PathBuf>,
    failures: &mut Vec<AnalysisError>,
) {
    match outcome {
        Ok(()) => written.push(path),
        Err(e) => {
            tracing::error!("{}", e);
            failures.push(e);
        }
    }
}
