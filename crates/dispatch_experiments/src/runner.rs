//! Parallel experiment execution using rayon.
//!
//! Each parameter set drives its own [`MatchingService`] with latency
//! disabled, so a sweep of thousands of riders finishes in moments.

use dispatch_core::{MatchError, MatchMode, MatchingService, RiderRequest};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::metrics::{ExperimentResult, TrialOutcome};
use crate::parameters::ParameterSet;

/// Match `param_set.trials` riders at the configured origin and summarize.
///
/// # Errors
///
/// Fails if the origin itself is rejected by the pipeline (for example it
/// lies outside the service area). Exhausted retries are recorded, not errors.
pub fn run_single_experiment(param_set: &ParameterSet) -> Result<ExperimentResult, MatchError> {
    let service = MatchingService::new(param_set.matching_config());
    let mut trials = Vec::with_capacity(param_set.trials);

    for trial in 0..param_set.trials {
        let rider = RiderRequest::new(trial as i64, param_set.origin);
        let outcome = service.match_rider_immediate(&rider, MatchMode::Simulated);
        trials.push(TrialOutcome::from_match(outcome)?);
    }

    let result = ExperimentResult::from_trials(&trials);
    debug!(
        run_id = param_set.run_id,
        acceptance_rate = result.acceptance_rate,
        avg_attempts = result.avg_attempts,
        "experiment finished"
    );
    Ok(result)
}

/// Run every parameter set in parallel with a progress bar.
///
/// Results come back in the order of `parameter_sets`.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Result<Vec<ExperimentResult>, MatchError> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// Run every parameter set in parallel, optionally drawing a progress bar.
///
/// `num_threads` sizes a dedicated rayon pool; `None` uses rayon's default.
/// The first failing parameter set aborts the sweep.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<ExperimentResult>, MatchError> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        Some(progress_bar(total as u64))
    } else {
        None
    };

    let run = || {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_experiment(param_set);
                if let Some(ref progress_bar) = pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>, _>>()
    };

    let pool = match num_threads {
        Some(threads) => rayon::ThreadPoolBuilder::new().num_threads(threads).build(),
        None => rayon::ThreadPoolBuilder::new().build(),
    };
    let results = match pool {
        Ok(pool) => pool.install(run),
        Err(err) => {
            warn!(error = %err, "failed to build thread pool, using the global pool");
            run()
        }
    };

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }
    results
}

fn progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        Ok(style) => bar.set_style(style.progress_chars("#>-")),
        Err(err) => warn!(error = %err, "invalid progress template"),
    }
    bar
}
