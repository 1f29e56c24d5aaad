use std::fmt::Write as _;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::kind::SupportedValueType},
};

/// Parses hexadecimal digits (without the `0x` prefix) into big-endian bytes.
///
/// An odd number of digits is padded with a leading zero nibble.
///
/// ## Example
/// ```
/// use mathex::util::bytes::parse_hex_digits;
///
/// assert_eq!(parse_hex_digits("0A1f"), Some(vec![0x0A, 0x1F]));
/// assert_eq!(parse_hex_digits("abc"), Some(vec![0x0A, 0xBC]));
/// assert_eq!(parse_hex_digits("xyz"), None);
/// ```
#[must_use]
pub fn parse_hex_digits(digits: &str) -> Option<Vec<u8>> {
    if digits.is_empty() {
        return None;
    }
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    padded.as_bytes()
          .chunks(2)
          .map(|pair| {
              let text = std::str::from_utf8(pair).ok()?;
              u8::from_str_radix(text, 16).ok()
          })
          .collect()
}

/// Parses binary digits (without the `0b` prefix) into big-endian bytes,
/// grouping eight bits at a time starting from the right.
///
/// ## Example
/// ```
/// use mathex::util::bytes::parse_binary_digits;
///
/// assert_eq!(parse_binary_digits("101"), Some(vec![0b101]));
/// assert_eq!(parse_binary_digits("100000001"), Some(vec![0x01, 0x01]));
/// ```
#[must_use]
pub fn parse_binary_digits(digits: &str) -> Option<Vec<u8>> {
    if digits.is_empty() || !digits.chars().all(|c| c == '0' || c == '1') {
        return None;
    }
    let width = digits.len().div_ceil(8) * 8;
    let padded = format!("{digits:0>width$}");
    padded.as_bytes()
          .chunks(8)
          .map(|octet| {
              let text = std::str::from_utf8(octet).ok()?;
              u8::from_str_radix(text, 2).ok()
          })
          .collect()
}

/// Renders bytes as an uppercase `0x` hexadecimal literal.
///
/// ## Example
/// ```
/// use mathex::util::bytes::format_hex;
///
/// assert_eq!(format_hex(&[0x0A, 0xFF]), "0x0AFF");
/// ```
#[must_use]
pub fn format_hex(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(2 + bytes.len() * 2);
    text.push_str("0x");
    for byte in bytes {
        let _ = write!(text, "{byte:02X}");
    }
    text
}

/// Interprets up to eight big-endian bytes as an `i64`.
///
/// ## Errors
/// Returns `RuntimeError::InvalidCast` if there are more than eight bytes.
pub fn bytes_to_i64(bytes: &[u8]) -> EvalResult<i64> {
    if bytes.len() > 8 {
        return Err(RuntimeError::InvalidCast { value: format_hex(bytes),
                                               from:  SupportedValueType::ByteArray,
                                               to:    SupportedValueType::Integer, });
    }
    let mut buffer = [0_u8; 8];
    buffer[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(buffer))
}

/// Interprets exactly eight big-endian bytes as an `f64`.
///
/// ## Errors
/// Returns `RuntimeError::InvalidCast` if the length is not eight.
pub fn bytes_to_f64(bytes: &[u8]) -> EvalResult<f64> {
    let buffer: [u8; 8] =
        bytes.try_into()
             .map_err(|_| RuntimeError::InvalidCast { value: format_hex(bytes),
                                                      from:  SupportedValueType::ByteArray,
                                                      to:    SupportedValueType::Numeric, })?;
    Ok(f64::from_be_bytes(buffer))
}

/// Applies a bytewise operation to two arrays aligned on their last byte.
///
/// The shorter array is padded with leading zero bytes, so `0x01 & 0xFF01`
/// behaves like `0x0001 & 0xFF01`.
///
/// ## Example
/// ```
/// use mathex::util::bytes::bytewise;
///
/// assert_eq!(bytewise(&[0x0F], &[0xF0, 0xFF], |a, b| a | b), vec![0xF0, 0xFF]);
/// ```
#[must_use]
pub fn bytewise(left: &[u8], right: &[u8], op: impl Fn(u8, u8) -> u8) -> Vec<u8> {
    let width = left.len().max(right.len());
    let pad = |bytes: &[u8]| {
        let mut padded = vec![0_u8; width - bytes.len()];
        padded.extend_from_slice(bytes);
        padded
    };
    pad(left).into_iter()
             .zip(pad(right))
             .map(|(a, b)| op(a, b))
             .collect()
}

/// Concatenates two byte arrays.
#[must_use]
pub fn stitch(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut joined = Vec::with_capacity(left.len() + right.len());
    joined.extend_from_slice(left);
    joined.extend_from_slice(right);
    joined
}
