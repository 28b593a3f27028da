//! Location-based partner dispatch.
//!
//! Given a rider's coordinates, the matching pipeline generates a handful of
//! synthetic partners around the rider, ranks them by distance and either
//! returns the ranked list or walks it with a simulated accept/reject decision.
//!
//! - [`spatial`]: coordinates, the service area and the scaled Manhattan distance
//! - [`spawner`]: synthetic partner generation around an origin
//! - [`matching`]: ranking, decision models and the sequential selector
//! - [`service`]: the request-scoped pipeline tying the steps together

pub mod config;
pub mod error;
pub mod matching;
pub mod partners;
pub mod request;
pub mod service;
pub mod spatial;
pub mod spawner;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::MatchingConfig;
pub use error::MatchError;
pub use partners::{Partner, PartnerSet};
pub use request::RiderRequest;
pub use service::{MatchMode, MatchOutcome, MatchResult, MatchingService};
pub use spatial::{Coordinate, ServiceArea};
pub use spawner::SamplingPolicy;
