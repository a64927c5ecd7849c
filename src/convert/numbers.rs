//! Numeric token conversions.
//!
//! Integers accept an optional sign followed by an optional base prefix
//! (`0x`/`0X` hex, `0o`/`0O` octal, `0b`/`0B` binary), otherwise decimal.
//! The magnitude is parsed at full `u128` width and then range-checked
//! down into the target type, so "too large" and "too negative" stay
//! distinguishable for every width. Floats parse the full token; a
//! result that rounds to an infinity the input did not spell out is an
//! overflow, while subnormal underflow toward zero passes silently.

use std::num::IntErrorKind;

use super::FromToken;
use crate::error::ConvertError;

/// Sign and magnitude of an integer token.
struct IntParts {
    negative: bool,
    magnitude: u128,
}

fn parse_int_parts(token: &str) -> Result<IntParts, ConvertError> {
    if token.is_empty() {
        return Err(ConvertError::EmptyArgument);
    }
    let (negative, unsigned) = match token.as_bytes()[0] {
        b'+' => (false, &token[1..]),
        b'-' => (true, &token[1..]),
        _ => (false, token),
    };
    let (radix, digits) = match unsigned.as_bytes() {
        [b'0', b'x' | b'X', ..] => (16, &unsigned[2..]),
        [b'0', b'o' | b'O', ..] => (8, &unsigned[2..]),
        [b'0', b'b' | b'B', ..] => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    // A bare sign or bare prefix has no digits; a second sign would
    // otherwise be accepted by from_str_radix.
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(ConvertError::InvalidInteger(token.to_string()));
    }
    match u128::from_str_radix(digits, radix) {
        Ok(magnitude) => Ok(IntParts {
            negative,
            magnitude,
        }),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Err(if negative {
            ConvertError::IntegerUnderflow
        } else {
            ConvertError::IntegerOverflow
        }),
        Err(_) => Err(ConvertError::InvalidInteger(token.to_string())),
    }
}

macro_rules! impl_from_token_unsigned {
    ($($t:ty),+ $(,)?) => {$(
        impl FromToken for $t {
            fn from_token(token: &str) -> Result<Self, ConvertError> {
                let IntParts { negative, magnitude } = parse_int_parts(token)?;
                if negative && magnitude != 0 {
                    return Err(ConvertError::IntegerUnderflow);
                }
                <$t>::try_from(magnitude).map_err(|_| ConvertError::IntegerOverflow)
            }
        }
    )+};
}

macro_rules! impl_from_token_signed {
    ($($t:ty),+ $(,)?) => {$(
        impl FromToken for $t {
            fn from_token(token: &str) -> Result<Self, ConvertError> {
                let IntParts { negative, magnitude } = parse_int_parts(token)?;
                if negative {
                    if magnitude > <$t>::MIN.unsigned_abs() as u128 {
                        return Err(ConvertError::IntegerUnderflow);
                    }
                    Ok((magnitude as i128).wrapping_neg() as $t)
                } else {
                    if magnitude > <$t>::MAX as u128 {
                        return Err(ConvertError::IntegerOverflow);
                    }
                    Ok(magnitude as $t)
                }
            }
        }
    )+};
}

impl_from_token_unsigned!(u8, u16, u32, u64, usize);
impl_from_token_signed!(i8, i16, i32, i64, isize);

/// True for tokens that spell a non-finite value out explicitly
/// (`inf`, `infinity`, `nan`, optionally signed, any case).
fn is_non_finite_literal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    unsigned.eq_ignore_ascii_case("inf")
        || unsigned.eq_ignore_ascii_case("infinity")
        || unsigned.eq_ignore_ascii_case("nan")
}

macro_rules! impl_from_token_float {
    ($($t:ty),+ $(,)?) => {$(
        impl FromToken for $t {
            fn from_token(token: &str) -> Result<Self, ConvertError> {
                if token.is_empty() {
                    return Err(ConvertError::EmptyArgument);
                }
                let value: $t = token
                    .parse()
                    .map_err(|_| ConvertError::InvalidFloat(token.to_string()))?;
                if value.is_infinite() && !is_non_finite_literal(token) {
                    return Err(if value.is_sign_positive() {
                        ConvertError::FloatOverflow
                    } else {
                        ConvertError::FloatUnderflow
                    });
                }
                Ok(value)
            }
        }
    )+};
}

impl_from_token_float!(f32, f64);
