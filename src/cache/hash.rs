//! Key shortening hash.
//!
//! 32-bit rolling hash (`h = h * 31 + c`, wrapping) rendered in base 36.
//! It is not collision resistant; callers that key on it must verify the
//! original input on read.

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hashes the UTF-16 code units of `input`.
pub fn short_hash(input: &str) -> String {
    let hash = input.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5).wrapping_sub(acc).wrapping_add(i32::from(unit))
    });
    to_base36(hash.unsigned_abs())
}

fn to_base36(mut n: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
