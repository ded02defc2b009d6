use miette::*;
use state_cycle::align;

use crate::network::Network;

const START: &str = "AAA";
const END: &str = "ZZZ";

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let network = Network::parse(input)?;
    let start = network
        .id(START)
        .ok_or(miette!("Node '{}' not found", START))?;

    let walker = network.walk(start)?;
    let steps = align(std::slice::from_ref(&walker), |&(node, _)| {
        network.name(node) == END
    })?;

    Ok(steps.to_string())
}
