//! Stack utilities for script numbers and booleans.
use crate::util::{Error, Result};

/// Operand size limit for arithmetic opcodes.
pub const MAX_NUM_LEN: usize = 4;
/// Operand size limit for `OP_CHECKLOCKTIMEVERIFY`, which accepts 5-byte numbers.
pub const MAX_LOCKTIME_LEN: usize = 5;

/// Pops a bool from the stack, decoding the top item.
///
/// # Errors
/// - Empty stack.
///
/// # Examples
/// ```
/// use eris::script::stack::pop_bool;
/// let mut stack = vec![vec![1]];
/// assert_eq!(pop_bool(&mut stack).unwrap(), true);
/// ```
#[inline]
pub fn pop_bool(stack: &mut Vec<Vec<u8>>) -> Result<bool> {
    let top = stack.pop().ok_or(Error::ScriptError("Empty stack for bool".to_string()))?;
    Ok(decode_bool(&top))
}

/// Pops a number from the stack.
///
/// # Errors
/// - Empty stack.
/// - Item longer than `max_len` or not minimally encoded.
#[inline]
pub fn pop_num(stack: &mut Vec<Vec<u8>>, max_len: usize) -> Result<i64> {
    let top = stack.pop().ok_or(Error::ScriptError("Empty stack for num".to_string()))?;
    decode_num(&top, max_len)
}

/// Decodes a stack item to bool (non-zero true).
///
/// Negative zero (`0x80` as the last byte, zeros elsewhere) is false.
///
/// # Examples
/// ```
/// use eris::script::stack::decode_bool;
/// assert_eq!(decode_bool(&[1]), true);
/// assert_eq!(decode_bool(&[0, 0, 128]), false);
/// ```
#[inline]
pub fn decode_bool(s: &[u8]) -> bool {
    if s.is_empty() {
        return false;
    }
    for &byte in &s[..s.len() - 1] {
        if byte != 0 {
            return true;
        }
    }
    (s[s.len() - 1] & 127) != 0
}

/// Decodes a little-endian sign-magnitude script number.
///
/// # Errors
/// - Longer than `max_len` bytes.
/// - Non-minimal encoding (a redundant trailing zero or sign byte).
///
/// # Examples
/// ```
/// use eris::script::stack::decode_num;
/// assert_eq!(decode_num(&[1], 4).unwrap(), 1);
/// assert_eq!(decode_num(&[129], 4).unwrap(), -1);
/// ```
pub fn decode_num(s: &[u8], max_len: usize) -> Result<i64> {
    if s.len() > max_len {
        return Err(Error::ScriptError(format!("Num too long: {} bytes", s.len())));
    }
    let len = s.len();
    if len == 0 {
        return Ok(0);
    }
    if s[len - 1] & 127 == 0 && (len == 1 || s[len - 2] & 128 == 0) {
        return Err(Error::ScriptError("Non-minimal number".to_string()));
    }
    let mut magnitude = 0i64;
    for (i, &byte) in s.iter().enumerate() {
        let byte = if i == len - 1 { byte & 127 } else { byte };
        magnitude |= (byte as i64) << (8 * i);
    }
    Ok(if s[len - 1] & 128 != 0 { -magnitude } else { magnitude })
}

/// Encodes a number as a minimal stack item (little-endian, sign in the MSB).
///
/// Zero encodes to the empty item. A magnitude whose top byte has the high bit
/// set gets an extra byte to carry the sign.
///
/// # Examples
/// ```
/// use eris::script::stack::encode_num;
/// assert_eq!(encode_num(1), vec![1]);
/// assert_eq!(encode_num(-1), vec![129]);
/// assert_eq!(encode_num(128), vec![128, 0]);
/// ```
#[inline]
pub fn encode_num(val: i64) -> Vec<u8> {
    if val == 0 {
        return vec![];
    }
    let mut abs = val.unsigned_abs();
    let mut v = Vec::with_capacity(9);
    while abs > 0 {
        v.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    let last = v.len() - 1;
    if v[last] & 128 != 0 {
        v.push(if val < 0 { 128 } else { 0 });
    } else if val < 0 {
        v[last] |= 128;
    }
    v
}
