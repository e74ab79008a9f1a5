use crate::errors::Error;
use crate::events;
use crate::ledger;
use crate::pricing;
use crate::resolution::{self, Resolution};
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Phased Token Sale with Discount Rollover"
);

#[contract]
pub struct PhasedSaleContract;

#[contractimpl]
impl PhasedSaleContract {
    /// Initialize the sale. Must be called exactly once.
    pub fn initialize(
        env: Env,
        admin: Address,
        beneficiary: Address,
        sale_token: Address,
        payment_token: Address,
        max_supply: i128,
        base_price: i128,
        min_purchase: i128,
        refund_excess: bool,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        if max_supply <= 0 || base_price <= 0 || min_purchase <= 0 {
            return Err(Error::InvalidConfig);
        }

        let config = SaleConfig {
            admin: admin.clone(),
            beneficiary: beneficiary.clone(),
            sale_token: sale_token.clone(),
            payment_token,
            max_supply,
            base_price,
            min_purchase,
            refund_excess,
        };

        set_config(&env, &config);
        set_unallocated(&env, max_supply);
        set_phase_count(&env, 0);
        set_current_phase(&env, 0);
        set_total_sold(&env, 0);
        set_total_raised(&env, 0);

        events::emit_sale_initialized(&env, admin, beneficiary, sale_token, max_supply, base_price);
        Ok(())
    }

    /// Allocate `supply` units of the unallocated pool to a new phase. Admin only.
    pub fn create_phase(
        env: Env,
        caller: Address,
        discount_bps: u32,
        end_time: u64,
        supply: i128,
    ) -> Result<u32, Error> {
        let config = get_config(&env)?;
        caller.require_auth();
        if caller != config.admin {
            return Err(Error::Unauthorized);
        }

        if discount_bps > DISCOUNT_DENOMINATOR {
            return Err(Error::InvalidDiscount);
        }
        if end_time <= get_ledger_timestamp(&env) {
            return Err(Error::InvalidEndTime);
        }
        if supply <= 0 {
            return Err(Error::InvalidAmount);
        }
        let unallocated = get_unallocated(&env);
        if supply > unallocated {
            return Err(Error::InsufficientUnallocatedSupply);
        }

        let index = get_phase_count(&env);
        let phase = Phase {
            discount_bps,
            end_time,
            supply,
            remaining: supply,
            closed: false,
        };

        set_phase(&env, index, &phase);
        set_phase_count(&env, index + 1);
        set_unallocated(&env, unallocated - supply);

        log!(&env, "phase created", index, supply);
        events::emit_phase_created(&env, index, discount_bps, end_time, supply);
        Ok(index)
    }

    /// Buy `amount` token units for `recipient`, offering up to `payment` settlement units.
    ///
    /// Returns the settlement amount actually taken from `buyer`.
    pub fn buy(
        env: Env,
        buyer: Address,
        recipient: Address,
        amount: i128,
        payment: i128,
    ) -> Result<i128, Error> {
        let config = get_config(&env)?;
        buyer.require_auth();

        if amount < config.min_purchase {
            return Err(Error::BelowMinimumPurchase);
        }
        if payment < 0 {
            return Err(Error::InvalidAmount);
        }

        let now = get_ledger_timestamp(&env);
        let resolved = resolution::resolve(&env, now);
        if !resolved.is_open(&env) {
            return Err(Error::SaleClosed);
        }
        let index = resolved.index;
        let mut phase = get_phase(&env, index).ok_or(Error::PhaseNotFound)?;

        let cost = pricing::cost_due(amount, config.base_price, phase.discount_bps)?;
        if payment < cost {
            return Err(Error::InsufficientPayment);
        }
        if amount > phase.remaining {
            return Err(Error::InsufficientPhaseSupply);
        }

        let charge = if config.refund_excess { cost } else { payment };

        // Pre-flight both collaborators so ordinary failures happen before any effect.
        ledger::check_token_reserve(&env, &config.sale_token, &config.beneficiary, amount)?;
        ledger::check_payment_funds(&env, &config.payment_token, &buyer, charge)?;

        ledger::collect_payment(
            &env,
            &config.payment_token,
            &buyer,
            &config.beneficiary,
            charge,
        )?;
        ledger::deliver_tokens(
            &env,
            &config.sale_token,
            &config.beneficiary,
            &recipient,
            amount,
        )?;

        resolution::apply(&env, &resolved);

        phase.remaining -= amount;
        let exhausted = phase.remaining == 0;
        if exhausted {
            phase.closed = true;
        }
        set_phase(&env, index, &phase);

        let total_sold = get_total_sold(&env)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let total_raised = get_total_raised(&env)
            .checked_add(charge)
            .ok_or(Error::ArithmeticOverflow)?;
        set_total_sold(&env, total_sold);
        set_total_raised(&env, total_raised);

        if exhausted {
            let next = resolution::next_with_supply(&env, index);
            set_current_phase(&env, next);
            log!(&env, "phase exhausted", index, next);
            events::emit_phase_closed(&env, index, CloseReason::Exhausted);
        }

        events::emit_purchased(&env, buyer, recipient, amount, index, cost, charge);
        Ok(charge)
    }

    /// Persist phase resolution as of now and return the active index.
    /// Anyone may call this; it only closes expired phases.
    pub fn sync_phases(env: Env) -> Result<u32, Error> {
        get_config(&env)?;
        let resolved = resolution::resolve(&env, get_ledger_timestamp(&env));
        resolution::apply(&env, &resolved);
        Ok(resolved.index)
    }

    // View functions

    /// Units not yet assigned to any phase.
    pub fn supply(env: Env) -> Result<i128, Error> {
        get_config(&env)?;
        Ok(get_unallocated(&env))
    }

    pub fn total_phases(env: Env) -> Result<u32, Error> {
        get_config(&env)?;
        Ok(get_phase_count(&env))
    }

    /// Active phase index as of now, equal to `total_phases` when nothing is on sale.
    pub fn current_phase(env: Env) -> Result<u32, Error> {
        get_config(&env)?;
        Ok(resolution::resolve(&env, get_ledger_timestamp(&env)).index)
    }

    /// Active phase index as last persisted by a purchase or `sync_phases`.
    pub fn stored_current_phase(env: Env) -> Result<u32, Error> {
        get_config(&env)?;
        Ok(get_current_phase(&env))
    }

    /// Phase snapshot with expiry applied as of now.
    pub fn phase(env: Env, index: u32) -> Result<Phase, Error> {
        let phase = get_phase(&env, index).ok_or(Error::PhaseNotFound)?;
        Ok(resolution::observed(phase, get_ledger_timestamp(&env)))
    }

    /// Phase snapshot exactly as stored.
    pub fn stored_phase(env: Env, index: u32) -> Result<Phase, Error> {
        get_phase(&env, index).ok_or(Error::PhaseNotFound)
    }

    /// Cost of `amount` units in the phase that would serve a purchase now.
    pub fn quote(env: Env, amount: i128) -> Result<i128, Error> {
        let config = get_config(&env)?;
        let phase = Self::active_phase(&env)?;
        pricing::cost_due(amount, config.base_price, phase.discount_bps)
    }

    /// Token units per settlement unit in the phase that would serve a purchase now.
    pub fn effective_rate(env: Env) -> Result<i128, Error> {
        let config = get_config(&env)?;
        let phase = Self::active_phase(&env)?;
        pricing::effective_rate(config.base_price, phase.discount_bps)
    }

    pub fn price(env: Env) -> Result<i128, Error> {
        Ok(get_config(&env)?.base_price)
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        get_config(&env)
    }

    pub fn total_sold(env: Env) -> Result<i128, Error> {
        get_config(&env)?;
        Ok(get_total_sold(&env))
    }

    pub fn total_raised(env: Env) -> Result<i128, Error> {
        get_config(&env)?;
        Ok(get_total_raised(&env))
    }
}

impl PhasedSaleContract {
    fn active_phase(env: &Env) -> Result<Phase, Error> {
        let Resolution { index, .. } = resolution::resolve(env, get_ledger_timestamp(env));
        get_phase(env, index).ok_or(Error::SaleClosed)
    }
}
