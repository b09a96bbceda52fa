use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tandem::banner::{BannerInfo, RunSummary, print_banner, print_run_summary};
use tandem::consts::{DEFAULT_FRACTION_BITS, DEFAULT_MULTIPLIER, MAX_FRACTION_BITS};
use tandem::demo::{DemoConfig, fraction_combine};
use tandem::display::{Console, Sink};
use tandem::fraction::BigFraction;
use tandem::{Outcome, WorkerPool};

#[derive(Parser)]
#[command(
    name = "tandem",
    version,
    about = "Two fractions, computed apart, added together."
)]
struct Cli {
    /// Number of combine rounds to run
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Seed for the fraction generator (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Bit width of each generated numerator
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_FRACTION_BITS as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_FRACTION_BITS as u64),
    )]
    bits: u64,

    /// Constant each generated fraction is multiplied by, as `n/d` or `n`
    #[arg(short, long, default_value = DEFAULT_MULTIPLIER)]
    multiplier: BigFraction,

    /// Keep generated fractions unreduced
    #[arg(long, default_value_t = false)]
    unreduced: bool,

    /// Run all rounds at once instead of one after another
    #[arg(short, long, default_value_t = false)]
    concurrent: bool,
}

/// Logs go to stderr so they never interleave with results on stdout.
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=tandem=debug`.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true),
        )
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let pool = WorkerPool::current()?;
    let sink: Arc<dyn Sink> = Arc::new(Console);

    let multiplier = cli.multiplier.to_string();
    let config = DemoConfig {
        multiplier: cli.multiplier,
        bits: usize::try_from(cli.bits)?,
        reduced: !cli.unreduced,
    };

    print_banner(&BannerInfo {
        seed,
        runs: cli.runs,
        bits: config.bits,
        multiplier: &multiplier,
        reduced: config.reduced,
        concurrent: cli.concurrent,
    });

    // Rounds are built up front so every round's seeds come from `rng` in
    // the same order regardless of how they run.
    let rounds: Vec<_> = (0..cli.runs)
        .map(|_| fraction_combine(&pool, &mut rng, &config, Arc::clone(&sink)))
        .collect();

    let outcomes: Vec<Outcome<()>> = if cli.concurrent {
        futures::future::join_all(rounds.into_iter().map(|round| round.start())).await
    } else {
        let mut outcomes = Vec::with_capacity(rounds.len());
        for round in rounds {
            outcomes.push(round.start().await);
        }
        outcomes
    };

    let mut summary = RunSummary::default();
    for (round, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                tracing::warn!(round, error = %e, "round failed");
                eprintln!("\nerror: round {}: {}", round + 1, e);
                summary.failed += 1;
            }
        }
    }
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "all rounds finished"
    );

    print_run_summary(summary, pool.stats());

    if summary.failed > 0 {
        anyhow::bail!("{} of {} rounds failed", summary.failed, cli.runs);
    }
    Ok(())
}
