use alloy::primitives::{utils::parse_units, U256};

use super::error::{WorkflowError, WorkflowResult};

/// Converts a fixed-point integer into a decimal value
///
/// Values whose integer part does not fit in a `u128` saturate to `f64::MAX`
pub fn divide_by_precision_f64(value: U256, precision: u8) -> f64 {
    let scale = U256::from(10).pow(U256::from(precision));

    let (quotient, remainder) = value.div_rem(scale);

    let (Ok(quotient), Ok(remainder), Ok(scale)) = (
        u128::try_from(quotient),
        u128::try_from(remainder),
        u128::try_from(scale),
    ) else {
        return f64::MAX;
    };

    quotient as f64 + (remainder as f64) / (scale as f64)
}

/// Converts a decimal value into a fixed-point integer with `precision` decimals
///
/// Digits beyond `precision` are truncated, matching the protocol's rounding down.
///
/// # Errors
///
/// Returns an error for negative, NaN or infinite values
pub fn multiply_by_precision(value: f64, precision: u8) -> WorkflowResult<U256> {
    if !value.is_finite() || value < 0.0 {
        return Err(WorkflowError::Conversion(format!(
            "{} cannot be represented as a token amount",
            value
        )));
    }

    // Display for f64 never uses exponent notation
    let repr = value.to_string();
    let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let fraction = &fraction[..fraction.len().min(precision as usize)];

    let normalized = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };

    parse_units(&normalized, precision)
        .map(|units| units.get_absolute())
        .map_err(|e| WorkflowError::Conversion(format!("{}: {}", normalized, e)))
}
