use crate::errors::Error;
use crate::types::*;
use soroban_sdk::Env;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_unallocated(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Unallocated)
        .unwrap_or(0)
}

pub fn set_unallocated(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::Unallocated, &amount);
}

pub fn get_phase_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PhaseCount)
        .unwrap_or(0)
}

pub fn set_phase_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PhaseCount, &count);
}

pub fn get_current_phase(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::CurrentPhase)
        .unwrap_or(0)
}

pub fn set_current_phase(env: &Env, index: u32) {
    env.storage().instance().set(&DataKey::CurrentPhase, &index);
}

pub fn get_total_sold(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSold)
        .unwrap_or(0)
}

pub fn set_total_sold(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalSold, &amount);
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn get_phase(env: &Env, index: u32) -> Option<Phase> {
    env.storage().persistent().get(&DataKey::Phase(index))
}

pub fn set_phase(env: &Env, index: u32, phase: &Phase) {
    env.storage().persistent().set(&DataKey::Phase(index), phase);
}
