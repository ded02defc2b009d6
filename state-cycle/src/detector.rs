use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::{CycleError, Simulation};

/// Where a run first re-entered a previously seen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDescriptor {
    /// Step index at which the repeated state was first observed.
    pub first_seen: usize,
    /// Distance between the two observations, always at least 1.
    pub length: usize,
}

impl CycleDescriptor {
    /// Maps any step, however large, to the recorded step with the same state.
    pub fn index_for(&self, target: u64) -> usize {
        let first_seen = self.first_seen as u64;
        if target < first_seen {
            return target as usize;
        }
        // `length` fits in usize, so the remainder does too.
        self.first_seen + ((target - first_seen) % self.length as u64) as usize
    }
}

/// Encoded state -> step index at which it was first observed.
///
/// Owned by a single run. Once a repeat is seen the record is frozen and
/// keeps answering with the same descriptor.
#[derive(Debug)]
pub struct CycleRecord<K> {
    seen: HashMap<K, usize>,
    repeat: Option<CycleDescriptor>,
}

impl<K: Eq + Hash> CycleRecord<K> {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
            repeat: None,
        }
    }

    /// Records `key` at `step`, or returns the descriptor if `key` was
    /// already observed. Steps must be strictly increasing.
    pub fn observe(&mut self, key: K, step: usize) -> Option<CycleDescriptor> {
        if self.repeat.is_some() {
            return self.repeat;
        }

        match self.seen.entry(key) {
            Entry::Occupied(entry) => {
                let first_seen = *entry.get();
                debug_assert!(step > first_seen, "steps must be strictly increasing");
                let descriptor = CycleDescriptor {
                    first_seen,
                    length: step - first_seen,
                };
                self.repeat = Some(descriptor);
                Some(descriptor)
            }
            Entry::Vacant(entry) => {
                entry.insert(step);
                None
            }
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.repeat.is_some()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<K: Eq + Hash> Default for CycleRecord<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A detected cycle together with every state observed before the repeat.
///
/// `history()[i]` is the state after `i` transitions, for
/// `i < first_seen + length`.
#[derive(Debug, Clone)]
pub struct Cycle<S> {
    descriptor: CycleDescriptor,
    history: Vec<S>,
}

impl<S> Cycle<S> {
    pub fn descriptor(&self) -> CycleDescriptor {
        self.descriptor
    }

    pub fn history(&self) -> &[S] {
        &self.history
    }

    /// The state after `target` transitions, in O(1).
    pub fn state_at(&self, target: u64) -> &S {
        &self.history[self.descriptor.index_for(target)]
    }
}

/// Steps `sim` from `initial` until an encoded state repeats.
///
/// Observes at most `max_steps + 1` states (steps `0..=max_steps`). The first
/// repeat is the one reported; since `step` is deterministic every later
/// state repeats with the same period.
#[tracing::instrument(skip(sim, initial))]
pub fn detect<Sim: Simulation>(
    sim: &Sim,
    initial: Sim::State,
    max_steps: usize,
) -> Result<Cycle<Sim::State>, CycleError> {
    let mut record = CycleRecord::new();
    let mut history = Vec::new();
    let mut state = initial;

    for step in 0..=max_steps {
        if let Some(descriptor) = record.observe(sim.encode(&state), step) {
            tracing::debug!(
                first_seen = descriptor.first_seen,
                length = descriptor.length,
                "cycle detected"
            );
            return Ok(Cycle {
                descriptor,
                history,
            });
        }
        if step == max_steps {
            break;
        }
        let next = sim.step(&state);
        history.push(std::mem::replace(&mut state, next));
    }

    Err(CycleError::NotFound { max_steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::tests::{Counter, Rho, SquareMod};

    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(0, 5)]
    #[case(3, 4)]
    #[case(10, 1)]
    fn finds_tail_and_period(#[case] tail: u64, #[case] period: u64) -> miette::Result<()> {
        let cycle = detect(&Rho { tail, period }, 0, 1_000)?;
        assert_eq!(
            cycle.descriptor(),
            CycleDescriptor {
                first_seen: tail as usize,
                length: period as usize,
            }
        );
        assert_eq!(cycle.history().len(), (tail + period) as usize);
        Ok(())
    }

    #[test]
    fn reports_not_found_at_the_ceiling() {
        assert_eq!(
            detect(&Counter, 0, 100).unwrap_err(),
            CycleError::NotFound { max_steps: 100 }
        );
    }

    #[test]
    fn ceiling_is_inclusive() -> miette::Result<()> {
        let rho = Rho { tail: 0, period: 5 };
        assert!(detect(&rho, 0, 4).is_err());
        let cycle = detect(&rho, 0, 5)?;
        assert_eq!(cycle.descriptor().length, 5);
        Ok(())
    }

    #[rstest]
    #[case(1, 97)]
    #[case(3, 1009)]
    #[case(7, 65_537)]
    fn later_steps_repeat_the_cycle(#[case] c: u64, #[case] m: u64) -> miette::Result<()> {
        let sim = SquareMod { c, m };
        let cycle = detect(&sim, 2, m as usize)?;
        let CycleDescriptor { first_seen, length } = cycle.descriptor();
        let (k, l) = (first_seen as u64, length as u64);

        for n in [0, 1, 7, 1_000_000_007] {
            for r in 0..l {
                assert_eq!(cycle.state_at(k + n * l + r), cycle.state_at(k + r));
            }
        }
        Ok(())
    }

    #[test]
    fn record_freezes_on_first_repeat() {
        let mut record = CycleRecord::new();
        assert_eq!(record.observe('a', 0), None);
        assert_eq!(record.observe('b', 1), None);
        let descriptor = record.observe('a', 2);
        assert_eq!(
            descriptor,
            Some(CycleDescriptor {
                first_seen: 0,
                length: 2
            })
        );
        assert!(record.is_frozen());

        // Nothing is inserted after freezing.
        assert_eq!(record.observe('c', 3), descriptor);
        assert_eq!(record.len(), 2);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(6, 6)]
    #[case(7, 3)]
    #[case(1_000_000_000, 3 + (1_000_000_000 - 3) % 4)]
    fn index_for_wraps_into_the_cycle(#[case] target: u64, #[case] expected: usize) {
        let descriptor = CycleDescriptor {
            first_seen: 3,
            length: 4,
        };
        assert_eq!(descriptor.index_for(target), expected);
    }
}
