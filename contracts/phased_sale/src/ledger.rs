use crate::errors::Error;
use soroban_sdk::{token, Address, Env};

/// Beneficiary must hold and have approved at least `amount` sale tokens for this contract.
pub fn check_token_reserve(
    env: &Env,
    sale_token: &Address,
    beneficiary: &Address,
    amount: i128,
) -> Result<(), Error> {
    let client = token::Client::new(env, sale_token);
    let spender = env.current_contract_address();
    if client.balance(beneficiary) < amount || client.allowance(beneficiary, &spender) < amount {
        return Err(Error::LedgerTransferFailed);
    }
    Ok(())
}

/// Buyer must hold `amount` of the settlement asset.
pub fn check_payment_funds(
    env: &Env,
    payment_token: &Address,
    buyer: &Address,
    amount: i128,
) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    if token::Client::new(env, payment_token).balance(buyer) < amount {
        return Err(Error::CurrencyTransferFailed);
    }
    Ok(())
}

/// Move sold tokens out of the beneficiary's allowance to `recipient`.
pub fn deliver_tokens(
    env: &Env,
    sale_token: &Address,
    beneficiary: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<(), Error> {
    let client = token::Client::new(env, sale_token);
    match client.try_transfer_from(
        &env.current_contract_address(),
        beneficiary,
        recipient,
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::LedgerTransferFailed),
    }
}

/// Forward settlement currency from the buyer to the beneficiary.
pub fn collect_payment(
    env: &Env,
    payment_token: &Address,
    buyer: &Address,
    beneficiary: &Address,
    amount: i128,
) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let client = token::Client::new(env, payment_token);
    match client.try_transfer(buyer, beneficiary, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::CurrencyTransferFailed),
    }
}
