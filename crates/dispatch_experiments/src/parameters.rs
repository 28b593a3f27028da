//! Parameter variation framework for exploring the matching pipeline.
//!
//! A [`ParameterSpace`] lists candidate values per knob; [`ParameterSpace::generate`]
//! expands them into the full grid of [`ParameterSet`]s. Knobs left empty use
//! the live dispatch defaults.

use dispatch_core::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DISTANCE_M, DEFAULT_PARTNER_COUNT};
use dispatch_core::matching::decision::DEFAULT_ACCEPT_PROBABILITY;
use dispatch_core::{Coordinate, MatchingConfig, SamplingPolicy};
use serde::Serialize;

/// Central Bogotá; the default rider location for every trial.
pub const DEFAULT_ORIGIN: Coordinate = Coordinate::new(4.65, -74.08);
/// Riders matched per parameter set.
pub const DEFAULT_TRIALS: usize = 1_000;

/// One point of the grid: a complete matching configuration plus trial count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    pub experiment_id: String,
    pub run_id: usize,
    pub seed: u64,
    pub trials: usize,
    pub origin: Coordinate,
    pub partner_count: usize,
    pub max_distance_m: f64,
    pub accept_probability: f64,
    pub max_attempts: u32,
    pub sampling_policy: SamplingPolicy,
}

impl ParameterSet {
    /// Matching configuration for this point, without simulated latency.
    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig::default()
            .without_latency()
            .with_seed(self.seed)
            .with_partner_count(self.partner_count)
            .with_max_distance_m(self.max_distance_m)
            .with_accept_probability(self.accept_probability)
            .with_max_attempts(self.max_attempts)
            .with_sampling_policy(self.sampling_policy)
    }
}

/// Holds all parameter variations to explore.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    experiment_id: String,
    seed: u64,
    trials: usize,
    origin: Coordinate,
    partner_counts: Vec<usize>,
    max_distances_m: Vec<f64>,
    accept_probabilities: Vec<f64>,
    max_attempts: Vec<u32>,
    sampling_policies: Vec<SamplingPolicy>,
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self {
            experiment_id: "dispatch-sweep".to_string(),
            seed: 42,
            trials: DEFAULT_TRIALS,
            origin: DEFAULT_ORIGIN,
            partner_counts: Vec::new(),
            max_distances_m: Vec::new(),
            accept_probabilities: Vec::new(),
            max_attempts: Vec::new(),
            sampling_policies: Vec::new(),
        }
    }
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a grid search. Alias for [`ParameterSpace::new`].
    pub fn grid() -> Self {
        Self::new()
    }

    pub fn experiment_id(mut self, experiment_id: impl Into<String>) -> Self {
        self.experiment_id = experiment_id.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn origin(mut self, origin: Coordinate) -> Self {
        self.origin = origin;
        self
    }

    pub fn partner_count(mut self, counts: Vec<usize>) -> Self {
        self.partner_counts = counts;
        self
    }

    pub fn max_distance_m(mut self, distances: Vec<f64>) -> Self {
        self.max_distances_m = distances;
        self
    }

    pub fn accept_probability(mut self, probabilities: Vec<f64>) -> Self {
        self.accept_probabilities = probabilities;
        self
    }

    pub fn max_attempts(mut self, attempts: Vec<u32>) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn sampling_policy(mut self, policies: Vec<SamplingPolicy>) -> Self {
        self.sampling_policies = policies;
        self
    }

    /// Expand the grid. Every set gets a distinct seed derived from the space seed.
    pub fn generate(&self) -> Vec<ParameterSet> {
        let partner_counts = or_default(&self.partner_counts, DEFAULT_PARTNER_COUNT);
        let max_distances_m = or_default(&self.max_distances_m, DEFAULT_MAX_DISTANCE_M);
        let accept_probabilities =
            or_default(&self.accept_probabilities, DEFAULT_ACCEPT_PROBABILITY);
        let max_attempts = or_default(&self.max_attempts, DEFAULT_MAX_ATTEMPTS);
        let sampling_policies = or_default(&self.sampling_policies, SamplingPolicy::default());

        let mut sets = Vec::new();
        for &partner_count in &partner_counts {
            for &max_distance_m in &max_distances_m {
                for &accept_probability in &accept_probabilities {
                    for &max_attempts in &max_attempts {
                        for &sampling_policy in &sampling_policies {
                            let run_id = sets.len();
                            sets.push(ParameterSet {
                                experiment_id: self.experiment_id.clone(),
                                run_id,
                                seed: self.seed.wrapping_add(run_id as u64),
                                trials: self.trials,
                                origin: self.origin,
                                partner_count,
                                max_distance_m,
                                accept_probability,
                                max_attempts,
                                sampling_policy,
                            });
                        }
                    }
                }
            }
        }
        sets
    }
}

fn or_default<T: Clone>(values: &[T], default: T) -> Vec<T> {
    if values.is_empty() {
        vec![default]
    } else {
        values.to_vec()
    }
}
