use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use super::decision::DecisionModel;
use super::types::{RankedPartner, RankedPartners, SelectionOutcome};

/// Offers the ride to ranked partners one at a time until one accepts.
///
/// Each offer waits `decision_latency` before the decision model answers,
/// modelling the dispatch round trip. The wait is a `tokio` sleep, so other
/// requests on the same runtime keep making progress.
#[derive(Debug, Clone)]
pub struct PartnerSelector {
    decision: Arc<dyn DecisionModel>,
    decision_latency: Duration,
}

impl PartnerSelector {
    pub fn new(decision: Arc<dyn DecisionModel>, decision_latency: Duration) -> Self {
        Self {
            decision,
            decision_latency,
        }
    }

    pub fn decision_latency(&self) -> Duration {
        self.decision_latency
    }

    /// Walk `ranked` in order, suspending before each decision.
    pub async fn select<R: Rng + Send>(
        &self,
        ranked: &RankedPartners,
        rng: &mut R,
    ) -> SelectionOutcome {
        for (position, candidate) in ranked.iter().enumerate() {
            if !self.decision_latency.is_zero() {
                tokio::time::sleep(self.decision_latency).await;
            }
            if self.offer(candidate, position, rng) {
                return SelectionOutcome::Accepted {
                    candidate: *candidate,
                    position,
                };
            }
        }
        tracing::warn!(candidates = ranked.len(), "no partner accepted the ride");
        SelectionOutcome::Exhausted
    }

    /// Same walk as [`PartnerSelector::select`] without any suspension.
    pub fn select_immediate<R: Rng>(&self, ranked: &RankedPartners, rng: &mut R) -> SelectionOutcome {
        ranked
            .iter()
            .enumerate()
            .find(|(position, candidate)| self.offer(candidate, *position, rng))
            .map(|(position, candidate)| SelectionOutcome::Accepted {
                candidate: *candidate,
                position,
            })
            .unwrap_or(SelectionOutcome::Exhausted)
    }

    fn offer<R: Rng>(&self, candidate: &RankedPartner, position: usize, rng: &mut R) -> bool {
        let accepted = self.decision.accepts(candidate, position, rng);
        tracing::debug!(
            partner = candidate.partner.id,
            position,
            distance_m = candidate.distance_m,
            accepted,
            "partner decision"
        );
        accepted
    }
}
