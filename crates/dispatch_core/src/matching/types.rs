use serde::Serialize;

use crate::partners::{Partner, PartnerSet};

/// A partner together with its distance to the rider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedPartner {
    #[serde(flatten)]
    pub partner: Partner,
    pub distance_m: f64,
}

/// Partners ordered by ascending distance to a reference coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedPartners(Vec<RankedPartner>);

impl RankedPartners {
    /// Wrap entries that are already sorted ascending by distance.
    pub(crate) fn from_sorted(entries: Vec<RankedPartner>) -> Self {
        debug_assert!(entries
            .windows(2)
            .all(|pair| pair[0].distance_m <= pair[1].distance_m));
        Self(entries)
    }

    /// The closest partner, if any were ranked.
    pub fn nearest(&self) -> Option<&RankedPartner> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedPartner> {
        self.0.iter()
    }

    /// Partners in ranked order, without distances.
    pub fn partners(&self) -> PartnerSet {
        self.0.iter().map(|entry| entry.partner).collect()
    }

    pub fn into_entries(self) -> Vec<RankedPartner> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RankedPartners {
    type Item = &'a RankedPartner;
    type IntoIter = std::slice::Iter<'a, RankedPartner>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of walking a ranked list with the selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    /// `candidate` accepted the ride; `position` is its index in the ranked list.
    Accepted {
        candidate: RankedPartner,
        position: usize,
    },
    /// Every candidate declined.
    Exhausted,
}

impl SelectionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SelectionOutcome::Accepted { .. })
    }
}
