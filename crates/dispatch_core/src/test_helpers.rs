//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures so unit tests, integration tests and benchmarks agree on
//! the same rider locations and seeds.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::partners::PartnerSet;
use crate::request::RiderRequest;
use crate::spatial::Coordinate;
use crate::spawner::{generate_partners, SamplingPolicy};

/// Seed used by tests that need a reproducible RNG.
pub const TEST_SEED: u64 = 42;

/// A rider location in central Bogotá, well inside the service area.
pub const TEST_ORIGIN: Coordinate = Coordinate::new(4.65, -74.08);

/// A location far outside the service area.
pub const OUTSIDE_ORIGIN: Coordinate = Coordinate::new(0.0, 0.0);

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}

pub fn test_rider(user_id: i64) -> RiderRequest {
    RiderRequest::new(user_id, TEST_ORIGIN)
}

/// Five partners within 2 km of [`TEST_ORIGIN`], generated with [`TEST_SEED`].
pub fn test_partner_set() -> PartnerSet {
    generate_partners(
        TEST_ORIGIN,
        5,
        2000.0,
        SamplingPolicy::UniformDisk,
        &mut seeded_rng(),
    )
}

/// JSON body for a single rider request.
pub fn rider_body(user_id: i64, location: Coordinate) -> Vec<u8> {
    format!(
        r#"[{{"userid": {user_id}, "userlocation": [{}, {}]}}]"#,
        location.lat, location.lon
    )
    .into_bytes()
}
