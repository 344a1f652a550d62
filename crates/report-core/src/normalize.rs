//! Nominal-size correction for raw inch measurements
//!
//! Surveyors record tape readings with one decimal place; the "accurate"
//! report variant maps each reading onto the nominal size the reading
//! stands for. The mapping works on the first decimal digit against a
//! per-axis offset, wrapping through `8 - |delta|` into the previous whole
//! inch when the digit falls short. The offsets (4 for length, 2 for
//! breadth) and the wrap are survey convention and must not be replaced by
//! an ordinary rounding rule.

/// Digit offset applied to length readings.
pub const LENGTH_OFFSET: i32 = 4;

/// Digit offset applied to breadth readings.
pub const BREADTH_OFFSET: i32 = 2;

/// Convert a raw reading into its nominal size.
///
/// `value` must be non-negative (guaranteed by upstream validation). Pure
/// and deterministic; the same input always yields the same output.
pub fn nominal_inches(value: f64, offset: i32) -> f64 {
    let delta = first_decimal_digit(value) - offset;
    if delta < 0 {
        value.floor() - 1.0 + f64::from(8 - delta.abs()) / 10.0
    } else {
        value.floor() + f64::from(delta) / 10.0
    }
}

/// First digit after the decimal point, 0 for whole numbers.
///
/// Taken from the shortest decimal display form rather than by scaling,
/// so binary representation artifacts cannot shift the digit (0.3 scaled
/// by 10 floors to 2).
fn first_decimal_digit(value: f64) -> i32 {
    let text = value.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map_or(0, |d| d as i32),
        None => 0,
    }
}
