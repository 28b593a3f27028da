use serde::{Deserialize, Serialize};

use crate::error::{MatchError, BAD_LOCATION_INFO};
use crate::spatial::Coordinate;

/// A rider asking for a partner. `user_id` is opaque and not checked for uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiderRequest {
    #[serde(rename = "userid")]
    pub user_id: i64,
    #[serde(rename = "userlocation")]
    pub location: Coordinate,
}

/// Request as it arrives on the wire; the location is validated afterwards.
#[derive(Debug, Deserialize)]
struct RiderRequestWire {
    #[serde(default)]
    userid: i64,
    #[serde(default)]
    userlocation: Vec<f64>,
}

impl RiderRequest {
    pub fn new(user_id: i64, location: Coordinate) -> Self {
        Self { user_id, location }
    }

    /// Decode a request body of the form `[{"userid": 1, "userlocation": [lat, lon]}]`.
    ///
    /// Only the first element is used. An empty body or an empty array is a
    /// [`MatchError::MalformedRequest`]; a location that is not two finite
    /// numbers is reported as [`MatchError::OutOfServiceArea`].
    pub fn from_json_body(body: &[u8]) -> Result<Self, MatchError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(MatchError::malformed(BAD_LOCATION_INFO));
        }

        let requests: Vec<RiderRequestWire> =
            serde_json::from_slice(body).map_err(|err| MatchError::malformed(err.to_string()))?;
        let first = requests
            .into_iter()
            .next()
            .ok_or_else(|| MatchError::malformed("request array is empty"))?;

        let location = Coordinate::from_slice(&first.userlocation)
            .ok_or(MatchError::OutOfServiceArea { coordinate: None })?;

        Ok(Self::new(first.userid, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_first_request() {
        let body = br#"[{"userid": 7, "userlocation": [4.65, -74.08]}, {"userid": 8, "userlocation": [0, 0]}]"#;
        let request = RiderRequest::from_json_body(body).expect("valid request");
        assert_eq!(request, RiderRequest::new(7, Coordinate::new(4.65, -74.08)));
    }

    #[test]
    fn empty_body_is_malformed() {
        for body in [&b""[..], b"   \n"] {
            let err = RiderRequest::from_json_body(body).expect_err("empty body");
            assert!(matches!(err, MatchError::MalformedRequest { .. }));
            assert_eq!(err.client_message(), BAD_LOCATION_INFO);
        }
    }

    #[test]
    fn empty_array_is_malformed() {
        let err = RiderRequest::from_json_body(b"[]").expect_err("empty array");
        assert!(matches!(err, MatchError::MalformedRequest { .. }));
    }

    #[test]
    fn broken_json_is_malformed() {
        let err = RiderRequest::from_json_body(b"[{\"userid\": ").expect_err("broken json");
        assert!(matches!(err, MatchError::MalformedRequest { .. }));

        let err = RiderRequest::from_json_body(br#"{"userid": 1}"#).expect_err("object, not array");
        assert!(matches!(err, MatchError::MalformedRequest { .. }));
    }

    #[test]
    fn empty_location_is_invalid_coordinates() {
        let err = RiderRequest::from_json_body(br#"[{"userid": 1, "userlocation": []}]"#)
            .expect_err("empty location");
        assert_eq!(err, MatchError::OutOfServiceArea { coordinate: None });

        let err = RiderRequest::from_json_body(br#"[{"userid": 1}]"#).expect_err("missing location");
        assert_eq!(err, MatchError::OutOfServiceArea { coordinate: None });
    }
}
