#![no_std]
#![allow(clippy::too_many_arguments)]

mod contract;
mod errors;
mod events;
mod ledger;
mod pricing;
mod resolution;
mod storage;
mod types;

#[cfg(test)]
mod test_properties;

pub use contract::{PhasedSaleContract, PhasedSaleContractClient};
pub use errors::Error;
pub use events::{PhaseClosedEvent, PhaseCreatedEvent, PurchasedEvent, SaleInitializedEvent};
pub use pricing::{cost_due, effective_rate};
pub use types::{CloseReason, Phase, SaleConfig, DISCOUNT_DENOMINATOR};
