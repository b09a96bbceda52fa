//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Constant every generated fraction is multiplied by. Reduces to `9/2`.
pub const DEFAULT_MULTIPLIER: &str = "846122553600669882/188027234133482196";

/// Bit width of a randomly generated numerator.
pub const DEFAULT_FRACTION_BITS: usize = 150;

/// Widest numerator we will generate. Keeps a mistyped width from trying to
/// allocate more memory than the machine has.
pub const MAX_FRACTION_BITS: usize = 1 << 20;

/// Largest divisor used to derive a denominator from its numerator.
pub const MAX_DENOMINATOR_DIVISOR: u32 = 10;

/// Format a number with comma separators (e.g. 1,234,567).
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}
