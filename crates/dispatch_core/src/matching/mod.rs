pub mod decision;
pub mod ranking;
pub mod selector;
pub mod types;

pub use decision::{AlwaysAccept, CoinFlip, DecisionModel};
pub use ranking::rank_partners;
pub use selector::PartnerSelector;
pub use types::{RankedPartner, RankedPartners, SelectionOutcome};
