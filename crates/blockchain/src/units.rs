use ethers_core::types::U256;
use shared::{Error, Result};

/// Convert a decimal string into an integer count of smallest units.
///
/// Only plain decimal notation is accepted: no sign, no exponent. Trailing
/// zeros past `decimals` are harmless, any other excess precision is an error.
pub fn parse_units(text: &str, decimals: u32) -> Result<U256> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidAmount("Amount is empty".to_string()));
    }

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(Error::InvalidAmount(format!("'{}' is not a number", text)));
    }

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(int_part) || !is_digits(frac_part) {
        return Err(Error::InvalidAmount(format!("'{}' is not a decimal number", text)));
    }

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.len() > decimals as usize {
        return Err(Error::InvalidAmount(format!(
            "'{}' has more than {} decimal places",
            text, decimals
        )));
    }

    let digits = format!(
        "{}{:0<width$}",
        int_part,
        frac_part,
        width = decimals as usize
    );
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(digits)
        .map_err(|_| Error::InvalidAmount(format!("'{}' is too large", text)))
}

/// [`parse_units`] for a transfer, which must move a positive quantity
pub fn parse_transfer_amount(text: &str, decimals: u32) -> Result<U256> {
    let amount = parse_units(text, decimals)?;
    if amount.is_zero() {
        return Err(Error::InvalidAmount(
            "Amount must be greater than zero".to_string(),
        ));
    }
    Ok(amount)
}

/// Render smallest units as a decimal string, without trailing zeros
pub fn format_units(amount: U256, decimals: u32) -> String {
    let base = U256::exp10(decimals as usize);
    let whole = amount / base;
    let frac = amount % base;

    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
