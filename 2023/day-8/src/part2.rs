use miette::*;
use state_cycle::align;

use crate::network::Network;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let network = Network::parse(input)?;

    let walkers = network
        .nodes()
        .filter(|(_, name)| name.ends_with('A'))
        .map(|(id, _)| network.walk(id))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(walkers = walkers.len(), "ghosts traced");

    let steps = align(&walkers, |&(node, _)| network.name(node).ends_with('Z'))?;
    Ok(steps.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::tests::GHOSTS;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("6", process(GHOSTS)?);
        Ok(())
    }

    #[test]
    fn walker_order_does_not_matter() -> Result<()> {
        let network = Network::parse(GHOSTS)?;
        let mut walkers = ["11A", "22A"]
            .into_iter()
            .map(|name| {
                let id = network
                    .id(name)
                    .ok_or(miette!("Node '{}' not found", name))?;
                network.walk(id)
            })
            .collect::<Result<Vec<_>>>()?;

        let accepting = |&(node, _): &(usize, usize)| network.name(node).ends_with('Z');
        let forward = align(&walkers, accepting)?;
        walkers.reverse();
        let backward = align(&walkers, accepting)?;
        assert_eq!(forward, 6);
        assert_eq!(backward, 6);
        Ok(())
    }

    #[test]
    fn single_ghost_is_its_own_first_arrival() -> Result<()> {
        let network = Network::parse(GHOSTS)?;
        let id = network.id("22A").ok_or(miette!("Node '22A' not found"))?;
        let walker = network.walk(id)?;
        let accepting = |&(node, _): &(usize, usize)| network.name(node).ends_with('Z');
        assert_eq!(align(std::slice::from_ref(&walker), accepting)?, 3);
        Ok(())
    }
}
