//! The request-scoped matching pipeline.
//!
//! Every call to [`MatchingService::match_rider`] owns its partners and its
//! RNG from start to finish: validate → generate → rank → (select). Nothing
//! produced for one rider is visible to another call, so concurrent requests
//! cannot corrupt each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::MatchingConfig;
use crate::error::MatchError;
use crate::matching::{
    rank_partners, CoinFlip, DecisionModel, PartnerSelector, RankedPartner, RankedPartners,
    SelectionOutcome,
};
use crate::partners::PartnerSet;
use crate::request::RiderRequest;
use crate::spawner::generate_partners;

/// What a match request should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Generate and rank only; return the full ranked list.
    Nearest,
    /// Generate, rank and walk the list with simulated accept/reject,
    /// retrying the whole pipeline on full rejection.
    Simulated,
}

/// Payload of a successful match.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Ranked(RankedPartners),
    Accepted {
        candidate: RankedPartner,
        /// Index of the accepting partner in its ranked list.
        position: usize,
        /// Pipeline passes used, starting at 1.
        attempts: u32,
    },
}

/// A successful match together with the partners of the final attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub rider: RiderRequest,
    pub partners: PartnerSet,
    pub result: MatchResult,
}

/// Orchestrates validation, generation, ranking and selection for one rider.
#[derive(Debug)]
pub struct MatchingService {
    config: MatchingConfig,
    selector: PartnerSelector,
    requests_started: AtomicU64,
}

impl MatchingService {
    /// Service whose partners accept with `config.accept_probability`.
    pub fn new(config: MatchingConfig) -> Self {
        let decision = Arc::new(CoinFlip::new(config.accept_probability));
        Self::with_decision_model(config, decision)
    }

    pub fn with_decision_model(config: MatchingConfig, decision: Arc<dyn DecisionModel>) -> Self {
        let selector = PartnerSelector::new(decision, config.decision_latency);
        Self {
            config,
            selector,
            requests_started: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Decode a JSON request body and match it.
    pub async fn match_request_body(
        &self,
        body: &[u8],
        mode: MatchMode,
    ) -> Result<MatchOutcome, MatchError> {
        let request = RiderRequest::from_json_body(body)?;
        self.match_rider(&request, mode).await
    }

    /// Run the pipeline for one rider, honouring the configured latencies.
    pub async fn match_rider(
        &self,
        request: &RiderRequest,
        mode: MatchMode,
    ) -> Result<MatchOutcome, MatchError> {
        self.validate(request)?;
        let mut rng = self.request_rng();
        let max_attempts = self.config.effective_max_attempts();

        for attempt in 1..=max_attempts {
            pause(self.config.stage_latency).await;
            let partners = self.generate(request, &mut rng);
            pause(self.config.stage_latency).await;
            let ranked = rank_partners(request.location, &partners);
            pause(self.config.stage_latency).await;

            let selection = match mode {
                MatchMode::Nearest => return Ok(self.ranked(request, partners, ranked)),
                MatchMode::Simulated => self.selector.select(&ranked, &mut rng).await,
            };
            if let Some(outcome) = self.accepted(request, partners, selection, attempt) {
                return Ok(outcome);
            }
        }

        Err(self.exhausted(request, max_attempts))
    }

    /// Same pipeline as [`MatchingService::match_rider`] with every latency skipped.
    pub fn match_rider_immediate(
        &self,
        request: &RiderRequest,
        mode: MatchMode,
    ) -> Result<MatchOutcome, MatchError> {
        self.validate(request)?;
        let mut rng = self.request_rng();
        let max_attempts = self.config.effective_max_attempts();

        for attempt in 1..=max_attempts {
            let partners = self.generate(request, &mut rng);
            let ranked = rank_partners(request.location, &partners);

            let selection = match mode {
                MatchMode::Nearest => return Ok(self.ranked(request, partners, ranked)),
                MatchMode::Simulated => self.selector.select_immediate(&ranked, &mut rng),
            };
            if let Some(outcome) = self.accepted(request, partners, selection, attempt) {
                return Ok(outcome);
            }
        }

        Err(self.exhausted(request, max_attempts))
    }

    fn validate(&self, request: &RiderRequest) -> Result<(), MatchError> {
        if self.config.service_area.contains(request.location) {
            return Ok(());
        }
        warn!(
            user_id = request.user_id,
            location = ?request.location,
            "rider outside service area"
        );
        Err(MatchError::OutOfServiceArea {
            coordinate: Some(request.location),
        })
    }

    fn request_rng(&self) -> StdRng {
        let request_index = self.requests_started.fetch_add(1, Ordering::Relaxed);
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(request_index)),
            None => StdRng::from_entropy(),
        }
    }

    fn generate(&self, request: &RiderRequest, rng: &mut StdRng) -> PartnerSet {
        debug!(user_id = request.user_id, "generating partners");
        generate_partners(
            request.location,
            self.config.partner_count,
            self.config.max_distance_m,
            self.config.sampling_policy,
            rng,
        )
    }

    fn ranked(
        &self,
        request: &RiderRequest,
        partners: PartnerSet,
        ranked: RankedPartners,
    ) -> MatchOutcome {
        info!(
            user_id = request.user_id,
            nearest = ?ranked.nearest().map(|entry| entry.partner.id),
            "ranked partners for rider"
        );
        MatchOutcome {
            rider: *request,
            partners,
            result: MatchResult::Ranked(ranked),
        }
    }

    fn accepted(
        &self,
        request: &RiderRequest,
        partners: PartnerSet,
        selection: SelectionOutcome,
        attempt: u32,
    ) -> Option<MatchOutcome> {
        match selection {
            SelectionOutcome::Accepted {
                candidate,
                position,
            } => {
                info!(
                    user_id = request.user_id,
                    partner = candidate.partner.id,
                    position,
                    attempt,
                    distance_m = candidate.distance_m,
                    "partner accepted the ride"
                );
                Some(MatchOutcome {
                    rider: *request,
                    partners,
                    result: MatchResult::Accepted {
                        candidate,
                        position,
                        attempts: attempt,
                    },
                })
            }
            SelectionOutcome::Exhausted => {
                debug!(user_id = request.user_id, attempt, "retrying match");
                None
            }
        }
    }

    fn exhausted(&self, request: &RiderRequest, attempts: u32) -> MatchError {
        warn!(
            user_id = request.user_id,
            attempts, "no partner available for rider"
        );
        MatchError::NoPartnerAvailable { attempts }
    }
}

async fn pause(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::AlwaysAccept;
    use crate::spatial::Coordinate;

    fn rider() -> RiderRequest {
        RiderRequest::new(1, Coordinate::new(4.65, -74.08))
    }

    #[test]
    fn nearest_mode_returns_full_ranking() {
        let service = MatchingService::new(MatchingConfig::default().with_seed(3));
        let outcome = service
            .match_rider_immediate(&rider(), MatchMode::Nearest)
            .expect("match");

        assert_eq!(outcome.partners.len(), 5);
        match outcome.result {
            MatchResult::Ranked(ranked) => assert_eq!(ranked.len(), 5),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn always_accept_takes_nearest_on_first_attempt() {
        let service = MatchingService::with_decision_model(
            MatchingConfig::default().with_seed(3),
            Arc::new(AlwaysAccept),
        );
        let outcome = service
            .match_rider_immediate(&rider(), MatchMode::Simulated)
            .expect("match");

        let nearest = rank_partners(rider().location, &outcome.partners)
            .nearest()
            .copied()
            .expect("nearest");
        assert_eq!(
            outcome.result,
            MatchResult::Accepted {
                candidate: nearest,
                position: 0,
                attempts: 1,
            }
        );
    }

    #[test]
    fn refusing_partners_exhaust_the_retry_budget() {
        let service = MatchingService::new(
            MatchingConfig::default()
                .with_accept_probability(0.0)
                .with_max_attempts(4),
        );
        let err = service
            .match_rider_immediate(&rider(), MatchMode::Simulated)
            .expect_err("nobody accepts");
        assert_eq!(err, MatchError::NoPartnerAvailable { attempts: 4 });
    }

    #[test]
    fn outside_area_is_rejected_before_generation() {
        let service = MatchingService::new(MatchingConfig::default());
        let request = RiderRequest::new(2, Coordinate::new(0.0, 0.0));
        let err = service
            .match_rider_immediate(&request, MatchMode::Nearest)
            .expect_err("outside");
        assert_eq!(
            err,
            MatchError::OutOfServiceArea {
                coordinate: Some(Coordinate::new(0.0, 0.0))
            }
        );
    }
}
