use std::sync::OnceLock;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::runtime::Runtime;

use tandem::demo::{DemoConfig, make_fraction};
use tandem::fraction::BigFraction;
use tandem::fraction::random::make_big_fraction;
use tandem::{Producer, WorkerPool, join};

fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().unwrap())
}

fn reference(f: &BigFraction) -> BigRational {
    BigRational::new(f.numerator().clone(), f.denominator().clone())
}

fn assert_matches_reference(actual: &BigFraction, expected: &BigRational) {
    assert_eq!(actual.numerator(), expected.numer());
    assert_eq!(actual.denominator(), expected.denom());
}

// ============================================================================
// Generators
// ============================================================================

fn arb_big_int() -> impl Strategy<Value = BigInt> {
    (any::<bool>(), prop::collection::vec(any::<u32>(), 0..5)).prop_map(|(negative, digits)| {
        let n = BigInt::from(BigUint::new(digits));
        if negative { -n } else { n }
    })
}

fn arb_fraction() -> impl Strategy<Value = BigFraction> {
    (
        arb_big_int(),
        arb_big_int().prop_filter("denominator must be non-zero", |d| !d.is_zero()),
        any::<bool>(),
    )
        .prop_map(|(n, d, reduced)| BigFraction::new(n, d, reduced).unwrap())
}

// ============================================================================
// Fixed cases
// ============================================================================

#[tokio::test]
async fn halves_join_to_one() {
    let pool = WorkerPool::current().unwrap();
    let a = BigFraction::new(2, 4, false).unwrap();
    let b = BigFraction::new(3, 6, false).unwrap();

    let sum = join(
        Producer::from_fn(&pool, move || Ok(a)),
        Producer::from_fn(&pool, move || Ok(b)),
        |a, b| a + b,
    )
    .start()
    .await
    .unwrap();

    assert_eq!(sum.to_string(), "1/1");
    assert_eq!(sum.to_mixed_string(), "1");
}

#[test]
fn default_multiplier_is_nine_halves() {
    let k: BigFraction = tandem::consts::DEFAULT_MULTIPLIER.parse().unwrap();
    assert_eq!(k, BigFraction::new(9, 2, false).unwrap());
    assert_eq!(k.reduce().to_mixed_string(), "4 1/2");
}

// ============================================================================
// Multiply-then-add against num-rational
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Joining `f1*k` and `f2*k` with `+` matches the reference arithmetic.
    #[test]
    fn scaled_join_matches_reference(
        f1 in arb_fraction(),
        f2 in arb_fraction(),
        k in arb_fraction(),
    ) {
        let expected = reference(&f1) * reference(&k) + reference(&f2) * reference(&k);

        let actual = runtime().block_on(async move {
            let pool = WorkerPool::current().unwrap();
            let (k1, k2) = (k.clone(), k);
            join(
                Producer::from_fn(&pool, move || Ok(&f1 * &k1)),
                Producer::from_fn(&pool, move || Ok(&f2 * &k2)),
                |a, b| a + b,
            )
            .start()
            .await
            .unwrap()
        });

        assert_matches_reference(&actual, &expected);
    }

    /// The seeded factory feeds the same arithmetic: the joined result equals
    /// `(raw(s1) * k) + (raw(s2) * k)` with the raw fractions rebuilt here.
    #[test]
    fn seeded_factory_join_matches_reference(
        s1 in any::<u64>(),
        s2 in any::<u64>(),
        k in arb_fraction(),
        bits in 16usize..200,
    ) {
        let config = DemoConfig { multiplier: k.clone(), bits, reduced: true };
        let raw1 = make_big_fraction(&mut StdRng::seed_from_u64(s1), config.bits, true);
        let raw2 = make_big_fraction(&mut StdRng::seed_from_u64(s2), config.bits, true);
        prop_assume!(raw1.is_ok() && raw2.is_ok());
        let (raw1, raw2) = (raw1.unwrap(), raw2.unwrap());

        let expected = reference(&raw1) * reference(&k) + reference(&raw2) * reference(&k);

        let actual = runtime().block_on(async move {
            let pool = WorkerPool::current().unwrap();
            join(
                make_fraction(&pool, s1, &config),
                make_fraction(&pool, s2, &config),
                |a, b| a + b,
            )
            .start()
            .await
            .unwrap()
        });

        assert_matches_reference(&actual, &expected);
    }

    /// Value equality agrees with the reference regardless of reduction.
    #[test]
    fn equality_matches_reference(a in arb_fraction(), b in arb_fraction()) {
        prop_assert_eq!(a == b, reference(&a) == reference(&b));
    }

    /// Mixed rendering splits into a whole part and a proper remainder.
    #[test]
    fn mixed_string_round_trips_value(f in arb_fraction()) {
        let mixed = f.to_mixed_string();
        let (whole, rest) = match mixed.split_once(' ') {
            Some((whole, rest)) => (whole.to_string(), Some(rest.to_string())),
            None if mixed.contains('/') => ("0".to_string(), Some(mixed.clone())),
            None => (mixed.clone(), None),
        };
        let whole: BigInt = whole.parse().unwrap();
        let mut value = BigRational::from_integer(whole.clone());
        if let Some(rest) = rest {
            let part = reference(&rest.trim_start_matches('-').parse::<BigFraction>().unwrap());
            let negative = whole < BigInt::zero() || rest.starts_with('-');
            value = if negative { value - part } else { value + part };
        }
        prop_assert_eq!(value, reference(&f));
    }
}
