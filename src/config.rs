use clap::Parser;

use crate::gate::{DEFAULT_CAPACITY, DEFAULT_REFILL_SECS};

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "tripotter-gate")]
#[command(about = "Per-user admission gate for TripOtter")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Max tokens a bucket can hold
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: u32,

    // Seconds until one token is restored
    #[arg(long, default_value_t = DEFAULT_REFILL_SECS)]
    pub refill_secs: u64,

    // Drop buckets whose last refill is older than this many refill
    // intervals; 0 keeps every bucket forever. Expiries below the capacity
    // change what a returning key is owed, at or above it they do not.
    #[arg(long, default_value_t = 0)]
    pub idle_expiry_intervals: u32,

    // Sweep cadence when idle expiry is enabled
    #[arg(long, default_value_t = 60)]
    pub sweep_secs: u64,
}
