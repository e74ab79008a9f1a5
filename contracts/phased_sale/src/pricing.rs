use crate::errors::Error;
use crate::types::DISCOUNT_DENOMINATOR;

// floor(a * b / d) with overflow checks
#[inline]
fn mul_div_floor(a: i128, b: i128, d: i128) -> Result<i128, Error> {
    a.checked_mul(b)
        .and_then(|p| p.checked_div(d))
        .ok_or(Error::ArithmeticOverflow)
}

// ceil(n / d) for n >= 0, d > 0
#[inline]
fn div_ceil(n: i128, d: i128) -> Result<i128, Error> {
    let q = n.checked_div(d).ok_or(Error::ArithmeticOverflow)?;
    let r = n.checked_rem(d).ok_or(Error::ArithmeticOverflow)?;
    if r == 0 {
        Ok(q)
    } else {
        q.checked_add(1).ok_or(Error::ArithmeticOverflow)
    }
}

/// Share of the base price still charged under `discount_bps`, out of 1000.
fn charged_share(discount_bps: u32) -> Result<i128, Error> {
    if discount_bps > DISCOUNT_DENOMINATOR {
        return Err(Error::InvalidDiscount);
    }
    Ok((DISCOUNT_DENOMINATOR - discount_bps) as i128)
}

/// Token units received per smallest settlement unit:
/// `base_price * 1000 / (1000 - discount_bps)`, floored.
///
/// A 100% discount has no finite rate and reports `i128::MAX`.
pub fn effective_rate(base_price: i128, discount_bps: u32) -> Result<i128, Error> {
    let share = charged_share(discount_bps)?;
    if share == 0 {
        return Ok(i128::MAX);
    }
    mul_div_floor(base_price, DISCOUNT_DENOMINATOR as i128, share)
}

/// Settlement units owed for `amount` token units: `ceil(amount / effective_rate)`.
///
/// The rate is floored first, so rounding always favours the beneficiary.
/// A 100% discount costs nothing.
pub fn cost_due(amount: i128, base_price: i128, discount_bps: u32) -> Result<i128, Error> {
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    if base_price <= 0 {
        return Err(Error::InvalidConfig);
    }
    if charged_share(discount_bps)? == 0 {
        return Ok(0);
    }
    let rate = effective_rate(base_price, discount_bps)?;
    div_ceil(amount, rate)
}
