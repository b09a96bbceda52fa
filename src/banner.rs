//! Startup banner and run summary display.

use crate::consts::{AUTHOR, HOMEPAGE, REPO, format_number};
use crate::pool::PoolStats;

/// Run configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub seed: u64,
    pub runs: usize,
    pub bits: usize,
    pub multiplier: &'a str,
    pub reduced: bool,
    pub concurrent: bool,
}

/// How the rounds went.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Print the startup banner with run info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             T A N D E M               ║
   ║   two fractions, one rendezvous       ║
   ╚═══════════════════════════════════════╝

   version     {}
   by          {}
   home        {}
   repo        {}
   seed        {}
   runs        {} ({})
   bits        {}
   multiplier  {}
   fractions   {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.seed,
        format_number(info.runs as u64),
        if info.concurrent { "concurrent" } else { "sequential" },
        info.bits,
        info.multiplier,
        if info.reduced { "reduced" } else { "unreduced" },
    );
}

/// Print the run summary (round outcomes + pool counters + farewell).
pub fn print_run_summary(summary: RunSummary, stats: PoolStats) {
    println!(
        "\nrounds: {} ok, {} failed",
        format_number(summary.succeeded as u64),
        format_number(summary.failed as u64),
    );
    if stats.dispatched > 0 {
        println!(
            "pool:   {} jobs dispatched, {} completed, peak {} in flight",
            format_number(stats.dispatched as u64),
            format_number(stats.completed as u64),
            stats.peak,
        );
    }
    println!("goodbye.");
}
