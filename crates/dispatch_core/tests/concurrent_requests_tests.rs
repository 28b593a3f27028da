use std::sync::Arc;
use std::time::Duration;

use dispatch_core::spatial::{distance_m, Coordinate};
use dispatch_core::{MatchMode, MatchResult, MatchingConfig, MatchingService, RiderRequest};

fn riders() -> Vec<RiderRequest> {
    // Spread across the service area so partner sets cannot overlap.
    (0..8)
        .map(|idx| {
            let lat = 4.50 + 0.035 * idx as f64;
            let lon = -74.26 + 0.03 * idx as f64;
            RiderRequest::new(idx, Coordinate::new(lat, lon))
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_keep_their_own_partners() {
    let service = Arc::new(MatchingService::new(
        MatchingConfig::default()
            .with_seed(11)
            .with_latency(Duration::from_millis(5)),
    ));

    let handles: Vec<_> = riders()
        .into_iter()
        .map(|rider| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let outcome = service.match_rider(&rider, MatchMode::Simulated).await;
                (rider, outcome)
            })
        })
        .collect();

    for handle in handles {
        let (rider, outcome) = handle.await.expect("task completes");
        let outcome = outcome.expect("fair coin accepts within budget");

        assert_eq!(outcome.rider, rider);
        for partner in &outcome.partners {
            assert!(distance_m(rider.location, partner.location) <= 2000.0 * 2f64.sqrt() + 1e-6);
        }
        let MatchResult::Accepted { candidate, .. } = outcome.result else {
            panic!("simulated mode returns an acceptance");
        };
        assert_eq!(outcome.partners.get(candidate.partner.id), Some(&candidate.partner));
    }
}

#[tokio::test(start_paused = true)]
async fn latency_suspends_instead_of_blocking() {
    let latency = Duration::from_secs(2);
    let service = Arc::new(MatchingService::new(
        MatchingConfig::default()
            .with_seed(3)
            .with_accept_probability(1.0)
            .with_latency(latency),
    ));

    let started = tokio::time::Instant::now();
    let handles: Vec<_> = riders()
        .into_iter()
        .map(|rider| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.match_rider(&rider, MatchMode::Simulated).await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("task completes").expect("match");
    }

    // Eight riders share one current-thread runtime; they overlap instead of queueing.
    assert!(started.elapsed() < latency * 8);
}
