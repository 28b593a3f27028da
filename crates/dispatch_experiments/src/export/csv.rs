use crate::metrics::ExperimentResult;
use crate::parameters::ParameterSet;

pub(crate) fn export_to_csv_impl(
    results: &[ExperimentResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.len() != parameter_sets.len() {
        return Err(format!(
            "Results length ({}) doesn't match parameter_sets length ({})",
            results.len(),
            parameter_sets.len()
        )
        .into());
    }

    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "experiment_id",
        "run_id",
        "seed",
        "trials",
        "origin_lat",
        "origin_lon",
        "partner_count",
        "max_distance_m",
        "accept_probability",
        "max_attempts",
        "sampling_policy",
        "accepted",
        "unavailable",
        "acceptance_rate",
        "avg_attempts",
        "median_attempts",
        "p90_attempts",
        "max_attempts_used",
        "avg_accepted_position",
        "avg_pickup_distance_m",
        "median_pickup_distance_m",
        "p90_pickup_distance_m",
    ])?;

    for (result, param_set) in results.iter().zip(parameter_sets.iter()) {
        wtr.write_record([
            &param_set.experiment_id,
            &param_set.run_id.to_string(),
            &param_set.seed.to_string(),
            &param_set.trials.to_string(),
            &param_set.origin.lat.to_string(),
            &param_set.origin.lon.to_string(),
            &param_set.partner_count.to_string(),
            &param_set.max_distance_m.to_string(),
            &param_set.accept_probability.to_string(),
            &param_set.max_attempts.to_string(),
            &param_set.sampling_policy.as_str().to_string(),
            &result.accepted.to_string(),
            &result.unavailable.to_string(),
            &result.acceptance_rate.to_string(),
            &result.avg_attempts.to_string(),
            &result.median_attempts.to_string(),
            &result.p90_attempts.to_string(),
            &result.max_attempts_used.to_string(),
            &result.avg_accepted_position.to_string(),
            &result.avg_pickup_distance_m.to_string(),
            &result.median_pickup_distance_m.to_string(),
            &result.p90_pickup_distance_m.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
