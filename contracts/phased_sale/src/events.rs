use crate::types::CloseReason;
use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Indexers subscribe via topic pattern ("SALE", symbol_short!("…")).

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleInitializedEvent {
    pub admin: Address,
    pub beneficiary: Address,
    pub sale_token: Address,
    pub max_supply: i128,
    pub base_price: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PhaseCreatedEvent {
    pub index: u32,
    pub discount_bps: u32,
    pub end_time: u64,
    pub supply: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PhaseClosedEvent {
    pub index: u32,
    pub reason: CloseReason,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PurchasedEvent {
    pub buyer: Address,
    pub recipient: Address,
    pub amount: i128,
    pub phase_index: u32,
    pub cost_due: i128,
    /// What was actually pulled from the buyer; above `cost_due` only when excess is retained.
    pub cost_paid: i128,
}

pub fn emit_sale_initialized(
    env: &Env,
    admin: Address,
    beneficiary: Address,
    sale_token: Address,
    max_supply: i128,
    base_price: i128,
) {
    env.events().publish(
        ("SALE", symbol_short!("init")),
        SaleInitializedEvent {
            admin,
            beneficiary,
            sale_token,
            max_supply,
            base_price,
        },
    );
}

pub fn emit_phase_created(env: &Env, index: u32, discount_bps: u32, end_time: u64, supply: i128) {
    env.events().publish(
        ("SALE", symbol_short!("PH_NEW")),
        PhaseCreatedEvent {
            index,
            discount_bps,
            end_time,
            supply,
        },
    );
}

pub fn emit_phase_closed(env: &Env, index: u32, reason: CloseReason) {
    env.events().publish(
        ("SALE", symbol_short!("PH_CLOSE")),
        PhaseClosedEvent {
            index,
            reason,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_purchased(
    env: &Env,
    buyer: Address,
    recipient: Address,
    amount: i128,
    phase_index: u32,
    cost_due: i128,
    cost_paid: i128,
) {
    env.events().publish(
        ("SALE", symbol_short!("PURCHASE")),
        PurchasedEvent {
            buyer,
            recipient,
            amount,
            phase_index,
            cost_due,
            cost_paid,
        },
    );
}
