use miette::*;
use rayon::prelude::*;

use crate::contraption::Contraption;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let contraption = Contraption::parse(input)?;

    // Each entry floods its own visited set, so they are independent.
    let best = contraption
        .entry_beams()
        .into_par_iter()
        .map(|beam| contraption.energize(beam))
        .max()
        .ok_or(miette!("Contraption has no edges to enter from"))?;

    Ok(best.to_string())
}
