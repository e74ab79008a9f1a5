use soroban_sdk::{contracttype, Address, Env};

/// Discounts are expressed out of this denominator (1000 = 100.0%).
pub const DISCOUNT_DENOMINATOR: u32 = 1_000;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub admin: Address,
    pub beneficiary: Address, // Holds the sale tokens and receives payment
    pub sale_token: Address,
    pub payment_token: Address, // Settlement asset, usually the native SAC
    pub max_supply: i128,
    pub base_price: i128, // Token units per smallest settlement unit
    pub min_purchase: i128,
    pub refund_excess: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Phase {
    pub discount_bps: u32,
    pub end_time: u64,
    pub supply: i128,    // Allocation at creation
    pub remaining: i128, // Units still for sale
    pub closed: bool,
}

impl Phase {
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.end_time
    }

    /// A live phase can serve purchases right now.
    pub fn is_live(&self, now: u64) -> bool {
        !self.closed && self.remaining > 0 && !self.is_expired(now)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum CloseReason {
    Exhausted = 0,
    Expired = 1,
}

#[contracttype]
pub enum DataKey {
    Config,
    Unallocated,
    PhaseCount,
    CurrentPhase,
    TotalSold,
    TotalRaised,
    Phase(u32),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
