//! Numeric conversion and formatting utilities.
//!
//! Functions for converting raw base-unit token amounts (decimal strings from
//! the RPC layer) into UI-unit floats with proper decimal handling and
//! precision preservation, plus the guarded ratio helpers used by the
//! processed-dataset transform.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use once_cell::sync::Lazy;
use std::str::FromStr;

// ============================================
// Raw Amount Conversions
// ============================================

/// Parse a raw base-unit amount string to f64 with decimal adjustment.
///
/// Token amounts arrive from the RPC endpoint as integer strings in base
/// units (e.g. `"1500000000"` with 9 decimals for 1.5 tokens). Uses
/// BigDecimal for the division so values beyond 2^53 base units do not lose
/// precision before the final rounding to f64.
///
/// # Arguments
/// * `amount` - The raw amount as a decimal string
/// * `decimals` - The token's decimal places
///
/// # Returns
/// * `Some(f64)` if parsing succeeds and the value is finite and
///   non-negative, `None` otherwise
pub fn amount_to_f64(amount: &str, decimals: u8) -> Option<f64> {
    let big_value = BigDecimal::from_str(amount).ok()?;

    let adjusted = big_value / big_pow10(decimals);

    let result = adjusted.to_f64()?;

    if result.is_finite() && result >= 0.0 {
        Some(result)
    } else {
        None
    }
}

// ============================================
// Ratio Helpers
// ============================================

/// Percentage of `whole` represented by `part`.
///
/// Returns 0.0 when `whole` is zero or non-finite so a token with no
/// reported supply never produces an infinite concentration figure.
pub fn share_pct(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }
    part / whole * 100.0
}

/// Percentage change from `previous` to `current`.
///
/// Returns 0.0 when `previous` is zero or non-finite.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 || !previous.is_finite() || !current.is_finite() {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

// ============================================
// Internal Helpers
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u8) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp as u32))
    }
}
