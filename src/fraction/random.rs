//! Random fraction generation.

use num_bigint::{BigInt, BigUint};
use rand::RngExt;
use rand::rngs::StdRng;

use super::{BigFraction, FractionError};
use crate::consts::{MAX_DENOMINATOR_DIVISOR, MAX_FRACTION_BITS};

/// A random fraction whose numerator has at most `bits` bits and whose
/// denominator is the numerator divided by a random integer in
/// `1..=MAX_DENOMINATOR_DIVISOR`, so the value sits between 1 and about 10
/// while numerator and denominator stay large.
///
/// Fails with [`FractionError::ZeroDenominator`] when the numerator comes
/// out smaller than the divisor, which for realistic widths essentially
/// means `bits == 0`, and with [`FractionError::TooWide`] above
/// [`MAX_FRACTION_BITS`].
pub fn make_big_fraction(
    rng: &mut StdRng,
    bits: usize,
    reduced: bool,
) -> Result<BigFraction, FractionError> {
    if bits > MAX_FRACTION_BITS {
        return Err(FractionError::TooWide {
            bits,
            max: MAX_FRACTION_BITS,
        });
    }
    let numerator = BigInt::from(random_biguint(rng, bits));
    let divisor: u32 = rng.random_range(1..=MAX_DENOMINATOR_DIVISOR);
    let denominator = &numerator / BigInt::from(divisor);
    BigFraction::new(numerator, denominator, reduced)
}

fn random_biguint(rng: &mut StdRng, bits: usize) -> BigUint {
    let words = bits.div_ceil(32);
    let digits: Vec<u32> = (0..words).map(|_| rng.random()).collect();
    BigUint::new(digits) >> (words * 32 - bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_fraction() {
        let a = make_big_fraction(&mut StdRng::seed_from_u64(7), 150, true).unwrap();
        let b = make_big_fraction(&mut StdRng::seed_from_u64(7), 150, true).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn numerator_fits_bit_width() {
        let mut rng = StdRng::seed_from_u64(11);
        for bits in [1, 31, 32, 33, 150] {
            let n = random_biguint(&mut rng, bits);
            assert!(n.bits() <= bits as u64, "{bits} bits gave {}", n.bits());
        }
    }

    #[test]
    fn reduced_flag_reduces() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let f = make_big_fraction(&mut rng, 150, true).unwrap();
            assert!(f.is_reduced());
        }
    }

    #[test]
    fn value_is_at_least_one() {
        // numerator / (numerator / k) >= 1 for any k >= 1
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let f = make_big_fraction(&mut rng, 150, false).unwrap();
            assert!(f.numerator() >= f.denominator());
            assert!(!f.denominator().is_zero());
        }
    }

    #[test]
    fn zero_bits_has_no_denominator() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            make_big_fraction(&mut rng, 0, true).unwrap_err(),
            FractionError::ZeroDenominator
        );
    }

    #[test]
    fn width_above_limit_rejected_before_allocating() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            make_big_fraction(&mut rng, usize::MAX, true).unwrap_err(),
            FractionError::TooWide {
                bits: usize::MAX,
                max: MAX_FRACTION_BITS,
            }
        );
    }

    #[test]
    fn width_at_limit_accepted() {
        let mut rng = StdRng::seed_from_u64(2);
        let f = make_big_fraction(&mut rng, MAX_FRACTION_BITS, false).unwrap();
        assert!(f.numerator().bits() <= MAX_FRACTION_BITS as u64);
    }

    #[test]
    fn one_bit_is_zero_or_one() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let n = random_biguint(&mut rng, 1);
            assert!(n.is_zero() || n.is_one());
        }
    }
}
