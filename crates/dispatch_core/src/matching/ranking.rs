use crate::partners::PartnerSet;
use crate::spatial::{distance_m, Coordinate};

use super::types::{RankedPartner, RankedPartners};

/// Order partners by ascending distance to `origin`.
///
/// The sort is stable, so partners at equal distance keep their generation
/// order. The input set is left untouched.
pub fn rank_partners(origin: Coordinate, partners: &PartnerSet) -> RankedPartners {
    let mut entries: Vec<RankedPartner> = partners
        .iter()
        .map(|partner| RankedPartner {
            partner: *partner,
            distance_m: distance_m(origin, partner.location),
        })
        .collect();
    entries.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    let ranked = RankedPartners::from_sorted(entries);
    tracing::debug!(
        order = ?ranked.iter().map(|entry| entry.partner.id).collect::<Vec<_>>(),
        "ranked partners"
    );
    ranked
}
