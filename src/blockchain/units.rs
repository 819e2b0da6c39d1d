// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decimal amount conversion to and from smallest units (wei or token units).
//!
//! All arithmetic is on integers; amounts never pass through floating point.

use alloy::primitives::U256;

use super::client::ChainError;

/// Parse a human-readable amount to wei (or token units).
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "0.01")
/// * `decimals` - Number of decimals (18 for native currency, token-defined otherwise)
///
/// # Returns
/// * `Ok(U256)` - Amount in smallest unit
/// * `Err` - If the string is not a plain non-negative decimal or has too many fraction digits
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, ChainError> {
    let amount = amount.trim();
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() || !is_digits(whole) {
        return Err(ChainError::InvalidAmount(format!(
            "`{amount}` is not a decimal number"
        )));
    }
    if !fraction.is_empty() && !is_digits(fraction) {
        return Err(ChainError::InvalidAmount(format!(
            "`{amount}` is not a decimal number"
        )));
    }
    if fraction.len() > decimals as usize {
        return Err(ChainError::InvalidAmount(format!(
            "`{amount}` has too many decimal places (max {decimals})"
        )));
    }

    // Pad with zeros to match decimals
    let padded = format!("{whole}{fraction:0<width$}", width = decimals as usize);
    U256::from_str_radix(&padded, 10)
        .map_err(|_| ChainError::InvalidAmount(format!("`{amount}` is out of range")))
}

/// Format wei (or token units) to a human-readable amount.
///
/// Trailing fraction zeros are dropped; no precision is lost, so
/// `parse_amount(&format_amount(x, d), d) == x`.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        format!("{}.{}", whole, decimal_str.trim_end_matches('0'))
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
