//! # Numeral Codec
//!
//! Bank, register and address ids are written as zero-padded numerals in a
//! configurable base (2–36, digits `0-9` then `a-z`).
//!
//! - [`encode`] never fails. A base outside `[2, 36]` is clamped to 10.
//! - [`decode`] does not clamp. Callers validate the base once, when the
//!   [`Config`](crate::config::Config) is loaded.

use crate::error::CodecError;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encode `value` in `base`, left-padding the digit portion with zeros to `width`.
///
/// The sign (if any) is not counted towards the width: `encode(-5, 10, 3)` is `-005`.
pub fn encode(value: i64, base: u32, width: usize) -> String {
    let base = if (MIN_BASE..=MAX_BASE).contains(&base) {
        base
    } else {
        10
    };

    if value == 0 {
        return "0".repeat(width.max(1));
    }

    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(DIGITS[(magnitude % base as u64) as usize]);
        magnitude /= base as u64;
    }

    let mut out = String::with_capacity(width.max(digits.len()) + 1);
    if value < 0 {
        out.push('-');
    }
    for _ in digits.len()..width {
        out.push('0');
    }
    out.extend(digits.iter().rev().map(|&d| d as char));
    out
}

/// Decode a numeral written in `base`. Letters are accepted in either case.
pub fn decode(token: &str, base: u32) -> Result<i64, CodecError> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    if digits.is_empty() {
        return Err(CodecError::Empty);
    }

    let mut acc: i64 = 0;
    for c in digits.chars() {
        let digit = c
            .to_digit(MAX_BASE)
            .filter(|d| *d < base)
            .ok_or(CodecError::InvalidDigit { digit: c, base })?;
        // Accumulate towards the sign so that i64::MIN stays representable.
        acc = acc
            .checked_mul(base as i64)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit as i64)
                } else {
                    v.checked_add(digit as i64)
                }
            })
            .ok_or_else(|| CodecError::Overflow(token.to_string()))?;
    }
    Ok(acc)
}

/// True when `base` is one the codec can decode with.
pub fn is_valid_base(base: u32) -> bool {
    (MIN_BASE..=MAX_BASE).contains(&base)
}
