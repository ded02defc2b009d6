use crate::{CycleDescriptor, CycleError};

/// Looks up the state at `target` in a recorded `history`, using the cycle
/// described by `descriptor` for targets past the end of the record.
///
/// `history[i]` must be the state after `i` transitions.
pub fn extrapolate<'a, S>(
    target: u64,
    descriptor: &CycleDescriptor,
    history: &'a [S],
) -> Result<&'a S, CycleError> {
    let index = descriptor.index_for(target);
    history.get(index).ok_or(CycleError::HistoryTooShort {
        index,
        len: history.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::tests::{Rho, SquareMod};
    use crate::{detect, Simulation};

    use rstest::rstest;

    #[rstest]
    #[case(1, 97)]
    #[case(5, 211)]
    fn agrees_with_direct_simulation(#[case] c: u64, #[case] m: u64) -> miette::Result<()> {
        let sim = SquareMod { c, m };
        let cycle = detect(&sim, 0, m as usize)?;
        let descriptor = cycle.descriptor();

        for target in 0..500 {
            let expected = sim.simulate(0, target);
            assert_eq!(
                *extrapolate(target as u64, &descriptor, cycle.history())?,
                expected,
                "step {target}"
            );
        }
        Ok(())
    }

    #[test]
    fn reaches_a_billion_steps() -> miette::Result<()> {
        let rho = Rho {
            tail: 3,
            period: 4,
        };
        let cycle = detect(&rho, 0, 100)?;
        let state = extrapolate(1_000_000_000, &cycle.descriptor(), cycle.history())?;
        assert_eq!(*state, 3 + (1_000_000_000 - 3) % 4);
        Ok(())
    }

    #[test]
    fn truncated_history_is_an_error() {
        let descriptor = CycleDescriptor {
            first_seen: 2,
            length: 3,
        };
        let history = [0, 1, 2];
        assert_eq!(
            extrapolate(4, &descriptor, &history),
            Err(CycleError::HistoryTooShort { index: 4, len: 3 })
        );
        assert_eq!(extrapolate(5, &descriptor, &history), Ok(&2));
    }
}
