//! Result export utilities.
//!
//! CSV pairs every result with the parameters that produced it; JSON keeps
//! the full result including the accepted-position histogram.

use std::fs::File;
use std::path::Path;

use crate::metrics::ExperimentResult;
use crate::parameters::ParameterSet;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;

/// Export results to a JSON array.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    results: &[ExperimentResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    json::export_to_json_impl(results, file)
}

/// Export results with their parameters to CSV, paired by index.
///
/// # Errors
///
/// Returns an error if `results` is empty, if the two slices differ in
/// length, or if file creation or CSV writing fails.
pub fn export_to_csv(
    results: &[ExperimentResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.is_empty() {
        return Err("No results to export".into());
    }
    let file = File::create(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}
