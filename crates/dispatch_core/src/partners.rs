use serde::{Deserialize, Serialize};

use crate::spatial::Coordinate;

/// A simulated driver. Identifiers are only meaningful within one match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(rename = "partnerid")]
    pub id: u32,
    #[serde(rename = "partnerlocation")]
    pub location: Coordinate,
}

impl Partner {
    pub fn new(id: u32, location: Coordinate) -> Self {
        Self { id, location }
    }
}

/// Partners generated for a single request, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerSet(Vec<Partner>);

impl PartnerSet {
    pub fn new(partners: Vec<Partner>) -> Self {
        Self(partners)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Partner> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Partner] {
        &self.0
    }

    /// Look up a partner by identifier.
    pub fn get(&self, id: u32) -> Option<&Partner> {
        self.0.iter().find(|partner| partner.id == id)
    }
}

impl FromIterator<Partner> for PartnerSet {
    fn from_iter<I: IntoIterator<Item = Partner>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PartnerSet {
    type Item = &'a Partner;
    type IntoIter = std::slice::Iter<'a, Partner>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partner_uses_wire_field_names() {
        let partner = Partner::new(3, Coordinate::new(4.6, -74.1));
        let json = serde_json::to_value(partner).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"partnerid": 3, "partnerlocation": [4.6, -74.1]})
        );
    }

    #[test]
    fn get_finds_by_id_not_position() {
        let set: PartnerSet = [
            Partner::new(4, Coordinate::new(4.6, -74.1)),
            Partner::new(0, Coordinate::new(4.7, -74.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.get(0).map(|p| p.location.lat), Some(4.7));
        assert!(set.get(1).is_none());
    }
}
