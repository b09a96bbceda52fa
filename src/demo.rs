//! The fraction-combining demonstration.
//!
//! Two random fractions are built and scaled on the worker pool, added once
//! both are ready, and the sum is printed as a mixed number.

use std::sync::Arc;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::consts::DEFAULT_FRACTION_BITS;
use crate::display::Sink;
use crate::fraction::BigFraction;
use crate::fraction::random::make_big_fraction;
use crate::join::join;
use crate::pool::WorkerPool;
use crate::producer::{Producer, attach_success_continuation};

/// Settings for one combine round.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Constant each generated fraction is multiplied by.
    pub multiplier: BigFraction,
    /// Bit width of each generated numerator.
    pub bits: usize,
    /// Reduce generated fractions before scaling them.
    pub reduced: bool,
}

impl DemoConfig {
    pub fn new(multiplier: BigFraction) -> Self {
        Self {
            multiplier,
            bits: DEFAULT_FRACTION_BITS,
            reduced: true,
        }
    }
}

/// A producer that, once started, builds a random fraction from `seed` on
/// the pool and multiplies it by the configured constant.
pub fn make_fraction(pool: &WorkerPool, seed: u64, config: &DemoConfig) -> Producer<BigFraction> {
    let DemoConfig {
        multiplier,
        bits,
        reduced,
    } = config.clone();
    Producer::from_fn(pool, move || {
        let mut rng = StdRng::seed_from_u64(seed);
        let fraction = make_big_fraction(&mut rng, bits, reduced)
            .with_context(|| format!("cannot build a {bits}-bit fraction from seed {seed}"))?;
        Ok(&fraction * &multiplier)
    })
}

/// Build two fractions concurrently, add them, and hand a report of the sum
/// to `sink`. The returned producer signals once the report is displayed.
pub fn fraction_combine(
    pool: &WorkerPool,
    rng: &mut StdRng,
    config: &DemoConfig,
    sink: Arc<dyn Sink>,
) -> Producer<()> {
    let mut report = String::from(">> Calling fraction_combine()\n");

    let first = make_fraction(pool, rng.random(), config);
    let second = make_fraction(pool, rng.random(), config);

    let printer = move |sum: &BigFraction| {
        report.push_str(&format!("     combined result = {}\n", sum.to_mixed_string()));
        sink.display(&report);
    };

    attach_success_continuation(join(first, second, |a, b| a + b), printer)
}
