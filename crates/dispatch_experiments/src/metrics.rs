//! Aggregate metrics over the riders matched for one parameter set.

use dispatch_core::{MatchError, MatchOutcome, MatchResult};
use serde::{Deserialize, Serialize};

/// What happened to a single rider in a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialOutcome {
    Accepted {
        attempts: u32,
        position: usize,
        distance_m: f64,
    },
    Unavailable {
        attempts: u32,
    },
}

impl TrialOutcome {
    /// Classify a pipeline result. Request errors other than exhaustion are
    /// returned unchanged; they mean the parameter set itself is unusable.
    pub fn from_match(result: Result<MatchOutcome, MatchError>) -> Result<Self, MatchError> {
        match result {
            Ok(outcome) => match outcome.result {
                MatchResult::Accepted {
                    candidate,
                    position,
                    attempts,
                } => Ok(TrialOutcome::Accepted {
                    attempts,
                    position,
                    distance_m: candidate.distance_m,
                }),
                // Nearest mode has no decision; the nearest partner counts as first-offer acceptance.
                MatchResult::Ranked(ranked) => Ok(TrialOutcome::Accepted {
                    attempts: 1,
                    position: 0,
                    distance_m: ranked.nearest().map_or(0.0, |entry| entry.distance_m),
                }),
            },
            Err(MatchError::NoPartnerAvailable { attempts }) => {
                Ok(TrialOutcome::Unavailable { attempts })
            }
            Err(err) => Err(err),
        }
    }

    pub fn attempts(&self) -> u32 {
        match *self {
            TrialOutcome::Accepted { attempts, .. } | TrialOutcome::Unavailable { attempts } => {
                attempts
            }
        }
    }
}

/// Summary of one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub trials: usize,
    pub accepted: usize,
    pub unavailable: usize,
    pub acceptance_rate: f64,

    pub avg_attempts: f64,
    pub median_attempts: f64,
    pub p90_attempts: f64,
    pub max_attempts_used: u32,

    pub avg_accepted_position: f64,
    /// `accepted_position_counts[i]` riders were served by the partner ranked `i`.
    pub accepted_position_counts: Vec<usize>,

    pub avg_pickup_distance_m: f64,
    pub median_pickup_distance_m: f64,
    pub p90_pickup_distance_m: f64,
}

impl ExperimentResult {
    pub fn from_trials(trials: &[TrialOutcome]) -> Self {
        let mut attempts = Vec::with_capacity(trials.len());
        let mut positions = Vec::new();
        let mut distances = Vec::new();
        let mut accepted_position_counts: Vec<usize> = Vec::new();

        for trial in trials {
            attempts.push(f64::from(trial.attempts()));
            if let TrialOutcome::Accepted {
                position,
                distance_m,
                ..
            } = *trial
            {
                positions.push(position as f64);
                distances.push(distance_m);
                if accepted_position_counts.len() <= position {
                    accepted_position_counts.resize(position + 1, 0);
                }
                accepted_position_counts[position] += 1;
            }
        }

        let accepted = distances.len();
        let acceptance_rate = if trials.is_empty() {
            0.0
        } else {
            accepted as f64 / trials.len() as f64
        };

        let (avg_attempts, median_attempts, p90_attempts) = calculate_stats(&attempts);
        let (avg_accepted_position, _, _) = calculate_stats(&positions);
        let (avg_pickup_distance_m, median_pickup_distance_m, p90_pickup_distance_m) =
            calculate_stats(&distances);

        ExperimentResult {
            trials: trials.len(),
            accepted,
            unavailable: trials.len() - accepted,
            acceptance_rate,
            avg_attempts,
            median_attempts,
            p90_attempts,
            max_attempts_used: trials.iter().map(TrialOutcome::attempts).max().unwrap_or(0),
            avg_accepted_position,
            accepted_position_counts,
            avg_pickup_distance_m,
            median_pickup_distance_m,
            p90_pickup_distance_m,
        }
    }
}

/// Average, median and P90 of `values`; zeros when empty.
pub(crate) fn calculate_stats(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let avg = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };
    let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
    let p90 = sorted[p90_idx.min(sorted.len() - 1)];

    (avg, median, p90)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_empty_slice_are_zero() {
        assert_eq!(calculate_stats(&[]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn stats_median_and_p90() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let (avg, median, p90) = calculate_stats(&values);
        assert_eq!(avg, 5.5);
        assert_eq!(median, 5.5);
        assert_eq!(p90, 9.0);
    }

    #[test]
    fn result_counts_positions_and_unavailable() {
        let trials = [
            TrialOutcome::Accepted {
                attempts: 1,
                position: 0,
                distance_m: 100.0,
            },
            TrialOutcome::Accepted {
                attempts: 2,
                position: 2,
                distance_m: 300.0,
            },
            TrialOutcome::Unavailable { attempts: 10 },
            TrialOutcome::Accepted {
                attempts: 1,
                position: 0,
                distance_m: 200.0,
            },
        ];
        let result = ExperimentResult::from_trials(&trials);

        assert_eq!(result.trials, 4);
        assert_eq!(result.accepted, 3);
        assert_eq!(result.unavailable, 1);
        assert_eq!(result.acceptance_rate, 0.75);
        assert_eq!(result.max_attempts_used, 10);
        assert_eq!(result.accepted_position_counts, vec![2, 0, 1]);
        assert_eq!(result.avg_pickup_distance_m, 200.0);
        assert_eq!(result.median_pickup_distance_m, 200.0);
    }

    #[test]
    fn exhaustion_is_a_trial_other_errors_are_not() {
        let exhausted = TrialOutcome::from_match(Err(MatchError::NoPartnerAvailable { attempts: 4 }));
        assert_eq!(exhausted, Ok(TrialOutcome::Unavailable { attempts: 4 }));

        let outside = TrialOutcome::from_match(Err(MatchError::OutOfServiceArea { coordinate: None }));
        assert!(outside.is_err());
    }
}
