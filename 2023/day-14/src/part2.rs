use miette::*;
use state_cycle::detect;

use crate::platform::{north_load, parse, SpinCycle};

/// Number of spin cycles the platform goes through.
const TARGET_CYCLES: u64 = 1_000_000_000;

/// Safety ceiling for cycle detection; real inputs settle within a few
/// hundred spins.
const MAX_SPINS: usize = 10_000;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = parse(input)?;
    let cycle = detect(&SpinCycle, grid, MAX_SPINS)?;
    let descriptor = cycle.descriptor();
    tracing::info!(
        first_seen = descriptor.first_seen,
        length = descriptor.length,
        "spin cycle repeats"
    );

    let load = north_load(cycle.state_at(TARGET_CYCLES));
    Ok(load.to_string())
}
