//! Example: how acceptance probability and the retry cap shape dispatch.
//!
//! Sweeps the coin-flip acceptance probability against the retry cap and both
//! sampling policies, then prints the acceptance rate of every combination
//! and exports the full results.

use dispatch_core::SamplingPolicy;
use dispatch_experiments::{export_to_csv, export_to_json, run_parallel_experiments, ParameterSpace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting acceptance sweep...");

    let space = ParameterSpace::grid()
        .experiment_id("acceptance-sweep")
        .trials(2_000)
        .accept_probability(vec![0.1, 0.25, 0.5, 0.75])
        .max_attempts(vec![1, 3, 10])
        .sampling_policy(vec![SamplingPolicy::UniformDisk, SamplingPolicy::UniformBox]);

    let parameter_sets = space.generate();
    println!("Generated {} parameter combinations", parameter_sets.len());

    let results = run_parallel_experiments(parameter_sets.clone(), None)?;

    println!("\n  p_accept  attempts  policy         served   avg pickup");
    for (params, result) in parameter_sets.iter().zip(&results) {
        println!(
            "  {:>8.2}  {:>8}  {:<13}  {:>6.1}%  {:>8.0} m",
            params.accept_probability,
            params.max_attempts,
            params.sampling_policy.as_str(),
            result.acceptance_rate * 100.0,
            result.avg_pickup_distance_m,
        );
    }

    export_to_csv(&results, &parameter_sets, "acceptance_sweep.csv")?;
    export_to_json(&results, "acceptance_sweep.json")?;
    println!("\nExported to acceptance_sweep.csv and acceptance_sweep.json");

    Ok(())
}
