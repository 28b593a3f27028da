use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::matching::decision::DEFAULT_ACCEPT_PROBABILITY;
use crate::spatial::ServiceArea;
use crate::spawner::SamplingPolicy;

/// Partners generated per attempt.
pub const DEFAULT_PARTNER_COUNT: usize = 5;
/// Maximum distance of a generated partner from the rider, in meters.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 2000.0;
/// Full generate/rank/select passes before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Tuning knobs for the matching pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Rectangle in which riders are served.
    pub service_area: ServiceArea,
    /// Number of partners generated per attempt.
    pub partner_count: usize,
    /// Maximum generation radius around the rider (meters).
    pub max_distance_m: f64,
    /// Footprint used when scattering partners.
    pub sampling_policy: SamplingPolicy,
    /// Probability (0.0–1.0) that an offered partner accepts.
    pub accept_probability: f64,
    /// Simulated wait before each partner answers an offer.
    pub decision_latency: Duration,
    /// Simulated processing time between pipeline stages.
    pub stage_latency: Duration,
    /// Cap on full pipeline passes when every partner declines. Zero is treated as one.
    pub max_attempts: u32,
    /// Seed for RNG (for reproducibility). Request `k` uses `seed + k`.
    /// When `None`, each request draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            service_area: ServiceArea::default(),
            partner_count: DEFAULT_PARTNER_COUNT,
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
            sampling_policy: SamplingPolicy::default(),
            accept_probability: DEFAULT_ACCEPT_PROBABILITY,
            decision_latency: Duration::ZERO,
            stage_latency: Duration::ZERO,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl MatchingConfig {
    /// Same latency for every offer and every stage, as in live dispatch.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.decision_latency = latency;
        self.stage_latency = latency;
        self
    }

    /// Drop all simulated latency, for fast automated callers.
    pub fn without_latency(self) -> Self {
        self.with_latency(Duration::ZERO)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_partner_count(mut self, partner_count: usize) -> Self {
        self.partner_count = partner_count;
        self
    }

    pub fn with_max_distance_m(mut self, max_distance_m: f64) -> Self {
        self.max_distance_m = max_distance_m;
        self
    }

    pub fn with_sampling_policy(mut self, sampling_policy: SamplingPolicy) -> Self {
        self.sampling_policy = sampling_policy;
        self
    }

    pub fn with_accept_probability(mut self, accept_probability: f64) -> Self {
        self.accept_probability = accept_probability;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_service_area(mut self, service_area: ServiceArea) -> Self {
        self.service_area = service_area;
        self
    }

    pub(crate) fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_live_dispatch() {
        let config = MatchingConfig::default();
        assert_eq!(config.partner_count, 5);
        assert_eq!(config.max_distance_m, 2000.0);
        assert_eq!(config.sampling_policy, SamplingPolicy::UniformDisk);
        assert_eq!(config.accept_probability, 0.5);
        assert_eq!(config.service_area, ServiceArea::BOGOTA);
    }

    #[test]
    fn latency_builders_touch_both_delays() {
        let config = MatchingConfig::default().with_latency(Duration::from_secs(5));
        assert_eq!(config.decision_latency, Duration::from_secs(5));
        assert_eq!(config.stage_latency, Duration::from_secs(5));

        let config = config.without_latency();
        assert!(config.decision_latency.is_zero());
        assert!(config.stage_latency.is_zero());
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let config = MatchingConfig::default().with_max_attempts(0);
        assert_eq!(config.effective_max_attempts(), 1);
    }
}
