use crate::spatial::Coordinate;

/// Client-facing message for a missing or undecodable rider request.
pub const BAD_LOCATION_INFO: &str = "Bad user location information";
/// Client-facing message for a rider outside the service area.
pub const BAD_COORDINATES: &str = "Bad coordinates";
/// Client-facing message when every retry ended without an acceptance.
pub const NO_PARTNER_AVAILABLE: &str = "No partner available";

/// Per-request matching failures. None of them affect other requests.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// Body missing, empty or not a rider request.
    #[error("malformed rider request: {reason}")]
    MalformedRequest { reason: String },
    /// Location missing, not a finite pair, or outside the service area.
    #[error("rider location {coordinate:?} is outside the service area")]
    OutOfServiceArea { coordinate: Option<Coordinate> },
    /// No partner accepted within the retry budget.
    #[error("no partner accepted the ride after {attempts} attempts")]
    NoPartnerAvailable { attempts: u32 },
}

impl MatchError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        MatchError::MalformedRequest {
            reason: reason.into(),
        }
    }

    /// Message returned to the caller as a JSON string.
    pub fn client_message(&self) -> &'static str {
        match self {
            MatchError::MalformedRequest { .. } => BAD_LOCATION_INFO,
            MatchError::OutOfServiceArea { .. } => BAD_COORDINATES,
            MatchError::NoPartnerAvailable { .. } => NO_PARTNER_AVAILABLE,
        }
    }
}
