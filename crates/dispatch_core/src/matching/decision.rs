use rand::RngCore;

use super::types::RankedPartner;

/// Default probability that a partner accepts a ride offer.
pub const DEFAULT_ACCEPT_PROBABILITY: f64 = 0.5;

/// Decides whether a partner accepts a ride offer.
///
/// The selector asks the model once per candidate, in ranked order, and stops
/// at the first acceptance. Implementations draw any randomness from the
/// request's own RNG so that seeded runs are reproducible.
pub trait DecisionModel: Send + Sync + std::fmt::Debug {
    /// Return `true` if `candidate`, offered the ride at ranked `position`,
    /// accepts it.
    fn accepts(&self, candidate: &RankedPartner, position: usize, rng: &mut dyn RngCore) -> bool;
}

/// Independent Bernoulli trial per candidate. The default is a fair coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinFlip {
    accept_probability: f64,
}

impl CoinFlip {
    /// Probabilities outside `[0, 1]` are clamped; NaN falls back to the default.
    pub fn new(accept_probability: f64) -> Self {
        let accept_probability = if accept_probability.is_nan() {
            DEFAULT_ACCEPT_PROBABILITY
        } else {
            accept_probability.clamp(0.0, 1.0)
        };
        Self { accept_probability }
    }

    pub fn accept_probability(&self) -> f64 {
        self.accept_probability
    }
}

impl Default for CoinFlip {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPT_PROBABILITY)
    }
}

impl DecisionModel for CoinFlip {
    fn accepts(&self, _candidate: &RankedPartner, _position: usize, rng: &mut dyn RngCore) -> bool {
        use rand::Rng;
        rng.gen_bool(self.accept_probability)
    }
}

/// Every candidate accepts, so the nearest partner always wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysAccept;

impl DecisionModel for AlwaysAccept {
    fn accepts(&self, _candidate: &RankedPartner, _position: usize, _rng: &mut dyn RngCore) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partners::Partner;
    use crate::spatial::Coordinate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate() -> RankedPartner {
        RankedPartner {
            partner: Partner::new(0, Coordinate::new(4.65, -74.08)),
            distance_m: 120.0,
        }
    }

    #[test]
    fn coin_flip_clamps_probability() {
        assert_eq!(CoinFlip::new(1.5).accept_probability(), 1.0);
        assert_eq!(CoinFlip::new(-0.2).accept_probability(), 0.0);
        assert_eq!(CoinFlip::new(f64::NAN).accept_probability(), 0.5);
    }

    #[test]
    fn certain_coin_flips_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(5);
        let always = CoinFlip::new(1.0);
        let never = CoinFlip::new(0.0);
        for position in 0..50 {
            assert!(always.accepts(&candidate(), position, &mut rng));
            assert!(!never.accepts(&candidate(), position, &mut rng));
        }
    }

    #[test]
    fn fair_coin_lands_both_ways() {
        let mut rng = StdRng::seed_from_u64(21);
        let coin = CoinFlip::default();
        let accepted = (0..1000)
            .filter(|position| coin.accepts(&candidate(), *position, &mut rng))
            .count();
        assert!((350..=650).contains(&accepted), "accepted {accepted} of 1000");
    }

    #[test]
    fn always_accept_accepts() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(AlwaysAccept.accepts(&candidate(), 4, &mut rng));
    }
}
