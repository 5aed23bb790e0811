//! Mod-11 check digit used by account numbers.

/// Computes the mod-11 check digit of `input`.
///
/// Characters are weighted right to left with weights cycling `2, 3, .., 9, 2, 3, ..`.
/// A decimal digit contributes its numeric value and a letter contributes its position in the
/// alphabet (`A = 1` .. `Z = 26`).
///
/// The digit is `11 - (sum % 11)`, reduced by 10 when it reaches 10 or more. A remainder of 0
/// therefore yields 1 and a remainder of 1 yields 0.
///
/// The function is total: characters outside `0-9`/`A-Z` are still folded into the sum using
/// their offset from `'A'`, and the result is always in `0..=11`. For the inputs account
/// numbers are built from it is always in `0..=9`.
///
/// # Arguments
///
/// * `input` - Characters to checksum, typically the prefix followed by the numeric body.
///
/// # Returns
///
/// Returns the check digit.
pub fn check_digit(input: &str) -> u8 {
    let mut sum: i64 = 0;
    let mut weight: i64 = 2;

    for c in input.chars().rev() {
        let value = match c.to_digit(10) {
            Some(d) => i64::from(d),
            None => i64::from(u32::from(c)) - i64::from(u32::from('A')) + 1,
        };

        sum += value * weight;
        weight += 1;
        if weight > 9 {
            weight = 2;
        }
    }

    let mut digit = 11 - (sum % 11);
    if digit >= 10 {
        digit -= 10;
    }

    digit as u8
}
