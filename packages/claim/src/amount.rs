use std::str::FromStr;

use cosmwasm_std::Uint256;

/// Supply at or above this many units is displayed as unbounded.
///
/// Also substituted for an available supply that cannot be parsed, which is how
/// the contract reports an unlimited claim condition.
pub const SUPPLY_SENTINEL: u128 = 1_000_000_000;

/// Why an upstream amount string could not be read as a non-negative integer.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,
    #[error("Amount is negative: {raw}")]
    Negative { raw: String },
    #[error("Amount is not an integer: {raw}")]
    Invalid { raw: String },
    #[error("Amount does not fit in 256 bits: {raw}")]
    Overflow { raw: String },
}

/// Parse a base-unit integer as reported by the chain.
///
/// Accepts decimal digits or `0x`-prefixed hex, with an optional leading minus
/// sign. Negative zero parses as zero; any other negative value is an error so
/// that callers decide how to treat it.
pub fn parse_amount(raw: &str) -> Result<Uint256, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    match trimmed.strip_prefix('-') {
        Some(magnitude) => {
            let magnitude = parse_unsigned(magnitude, raw)?;
            if magnitude.is_zero() {
                Ok(magnitude)
            } else {
                Err(AmountError::Negative { raw: raw.to_owned() })
            }
        }
        None => parse_unsigned(trimmed, raw),
    }
}

fn parse_unsigned(digits: &str, raw: &str) -> Result<Uint256, AmountError> {
    let invalid = || AmountError::Invalid { raw: raw.to_owned() };
    let overflow = || AmountError::Overflow { raw: raw.to_owned() };

    if let Some(hex_digits) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if hex_digits.is_empty() {
            return Err(invalid());
        }
        let hex_digits = hex_digits.trim_start_matches('0');
        if hex_digits.len() > 64 {
            return Err(overflow());
        }
        let padded = format!("{hex_digits:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(padded, &mut bytes).map_err(|_| invalid())?;
        return Ok(Uint256::from_be_bytes(bytes));
    }

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    Uint256::from_str(digits).map_err(|_| overflow())
}

/// Render a base-unit amount with the given number of decimals.
///
/// Output always carries at least one fractional digit and strips trailing
/// zeros beyond that: `1000000000000000000` at 18 decimals is `1.0`, zero is
/// `0.0`.
pub fn format_units(value: Uint256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = usize::from(decimals);

    let (whole, fraction) = if digits.len() > decimals {
        let (whole, fraction) = digits.split_at(digits.len() - decimals);
        (whole.to_owned(), fraction.to_owned())
    } else {
        ("0".to_owned(), format!("{digits:0>decimals$}"))
    };

    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    format!("{whole}.{fraction}")
}
