//! Synthetic partner generation around a rider.
//!
//! Partners are scattered around the origin within a maximum radius given in
//! meters and converted to degrees with the fixed scale factor from
//! [`crate::spatial`]. Two sampling policies exist and produce different
//! footprints; a deployment picks one explicitly.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::partners::{Partner, PartnerSet};
use crate::spatial::{meters_to_degrees, Coordinate};

/// How partner positions are drawn around the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamplingPolicy {
    /// Uniform over the disk of radius `R`: angle uniform in `[0, 2π)`,
    /// radius `R·√u`. The square root keeps the density uniform over the
    /// area instead of over the radius.
    #[default]
    UniformDisk,
    /// Each axis uniform in `[origin − R, origin + R]`. The footprint is a
    /// square, so corners reach `√2·R` from the origin.
    UniformBox,
}

impl SamplingPolicy {
    /// Draw a `(d_lat, d_lon)` offset in degrees.
    pub fn sample_offset<R: Rng + ?Sized>(&self, radius_deg: f64, rng: &mut R) -> (f64, f64) {
        match self {
            SamplingPolicy::UniformDisk => {
                let angle = TAU * rng.gen::<f64>();
                let radius = radius_deg * rng.gen::<f64>().sqrt();
                (radius * angle.cos(), radius * angle.sin())
            }
            SamplingPolicy::UniformBox => (
                rng.gen_range(-radius_deg..=radius_deg),
                rng.gen_range(-radius_deg..=radius_deg),
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingPolicy::UniformDisk => "UniformDisk",
            SamplingPolicy::UniformBox => "UniformBox",
        }
    }
}

/// Generate `count` partners around `origin` within `max_meters`.
///
/// Identifiers run `0..count` in generation order. A negative or non-finite
/// radius is treated as zero.
pub fn generate_partners<R: Rng + ?Sized>(
    origin: Coordinate,
    count: usize,
    max_meters: f64,
    policy: SamplingPolicy,
    rng: &mut R,
) -> PartnerSet {
    let max_meters = if max_meters.is_finite() {
        max_meters.max(0.0)
    } else {
        0.0
    };
    let radius_deg = meters_to_degrees(max_meters);

    let partners: PartnerSet = (0..count)
        .map(|idx| {
            let (d_lat, d_lon) = policy.sample_offset(radius_deg, rng);
            Partner::new(idx as u32, origin.offset(d_lat, d_lon))
        })
        .collect();

    tracing::debug!(
        count,
        max_meters,
        policy = policy.as_str(),
        partners = ?partners,
        "generated partners"
    );
    partners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{distance_m, METERS_PER_DEGREE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ORIGIN: Coordinate = Coordinate::new(4.65, -74.08);
    const TOLERANCE_M: f64 = 1e-6;

    fn euclidean_m(a: Coordinate, b: Coordinate) -> f64 {
        ((a.lat - b.lat).powi(2) + (a.lon - b.lon).powi(2)).sqrt() * METERS_PER_DEGREE
    }

    #[test]
    fn generates_requested_count_with_sequential_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let partners = generate_partners(ORIGIN, 5, 2000.0, SamplingPolicy::UniformDisk, &mut rng);

        assert_eq!(partners.len(), 5);
        let ids: Vec<u32> = partners.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn disk_partners_stay_inside_radius() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let partners =
                generate_partners(ORIGIN, 5, 2000.0, SamplingPolicy::UniformDisk, &mut rng);
            for partner in &partners {
                assert!(euclidean_m(ORIGIN, partner.location) <= 2000.0 + TOLERANCE_M);
                assert!(
                    distance_m(ORIGIN, partner.location) <= 2000.0 * 2f64.sqrt() + TOLERANCE_M
                );
            }
        }
    }

    #[test]
    fn box_partners_stay_inside_square() {
        let mut rng = StdRng::seed_from_u64(13);
        let radius_deg = meters_to_degrees(2000.0);
        for _ in 0..200 {
            let partners =
                generate_partners(ORIGIN, 5, 2000.0, SamplingPolicy::UniformBox, &mut rng);
            for partner in &partners {
                assert!((partner.location.lat - ORIGIN.lat).abs() <= radius_deg + 1e-12);
                assert!((partner.location.lon - ORIGIN.lon).abs() <= radius_deg + 1e-12);
                assert!(distance_m(ORIGIN, partner.location) <= 4000.0 + TOLERANCE_M);
            }
        }
    }

    #[test]
    fn same_seed_same_partners() {
        let first = generate_partners(
            ORIGIN,
            5,
            2000.0,
            SamplingPolicy::UniformDisk,
            &mut StdRng::seed_from_u64(99),
        );
        let second = generate_partners(
            ORIGIN,
            5,
            2000.0,
            SamplingPolicy::UniformDisk,
            &mut StdRng::seed_from_u64(99),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn zero_count_yields_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let partners = generate_partners(ORIGIN, 0, 2000.0, SamplingPolicy::UniformBox, &mut rng);
        assert!(partners.is_empty());
    }

    #[test]
    fn invalid_radius_collapses_to_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        for radius in [-10.0, f64::NAN, f64::INFINITY] {
            for policy in [SamplingPolicy::UniformDisk, SamplingPolicy::UniformBox] {
                let partners = generate_partners(ORIGIN, 3, radius, policy, &mut rng);
                for partner in &partners {
                    assert_eq!(distance_m(ORIGIN, partner.location), 0.0);
                }
            }
        }
    }
}
