use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{Cycle, CycleError};

/// One walker's trajectory: a non-repeating prefix followed by a tail that
/// repeats forever.
#[derive(Debug, Clone)]
pub struct WalkerPattern<S> {
    cycle: Cycle<S>,
}

/// Steps at which a walker is accepting, split by where they fall.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptingOffsets {
    /// Offsets before the tail starts; each happens exactly once.
    pub prefix: Vec<u64>,
    /// Offsets inside the repeating tail, counted from step 0.
    pub periodic: Vec<u64>,
}

impl AcceptingOffsets {
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.periodic.is_empty()
    }
}

impl<S> WalkerPattern<S> {
    pub fn cycle_start(&self) -> usize {
        self.cycle.descriptor().first_seen
    }

    pub fn period(&self) -> usize {
        self.cycle.descriptor().length
    }

    /// Every state up to, but excluding, the first repeat.
    pub fn states(&self) -> &[S] {
        self.cycle.history()
    }

    pub fn prefix(&self) -> &[S] {
        &self.states()[..self.cycle_start()]
    }

    pub fn tail(&self) -> &[S] {
        &self.states()[self.cycle_start()..]
    }

    pub fn state_at(&self, step: u64) -> &S {
        self.cycle.state_at(step)
    }

    pub fn accepting_offsets(&self, accepting: impl Fn(&S) -> bool) -> AcceptingOffsets {
        let cycle_start = self.cycle_start() as u64;
        let (prefix, periodic) = self
            .states()
            .iter()
            .enumerate()
            .filter(|(_, state)| accepting(*state))
            .map(|(i, _)| i as u64)
            .partition(|&i| i < cycle_start);

        AcceptingOffsets { prefix, periodic }
    }
}

impl<S> From<Cycle<S>> for WalkerPattern<S> {
    fn from(cycle: Cycle<S>) -> Self {
        Self { cycle }
    }
}

/// Least common multiple, failing instead of wrapping on overflow.
pub fn lcm(a: u64, b: u64) -> Result<u64, CycleError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / num_integer::gcd(a, b))
        .checked_mul(b)
        .ok_or(CycleError::Overflow { a, b })
}

/// The first step at which every walker is accepting at the same time.
///
/// Periodic offsets are combined by folding `lcm` over one offset per walker.
/// A periodic offset of `0` next recurs at `period`, so that is what gets
/// folded. Offsets in a walker's prefix never repeat, so they are not folded;
/// each is checked directly against every walker instead, as is step `0`.
/// Every candidate is verified before it is returned.
#[tracing::instrument(skip_all, fields(walkers = walkers.len()))]
pub fn align<S>(
    walkers: &[WalkerPattern<S>],
    accepting: impl Fn(&S) -> bool,
) -> Result<u64, CycleError> {
    if walkers.is_empty() {
        return Err(CycleError::NoWalkers);
    }

    let offsets = walkers
        .iter()
        .map(|walker| walker.accepting_offsets(&accepting))
        .collect::<Vec<_>>();
    if let Some(walker) = offsets.iter().position(AcceptingOffsets::is_empty) {
        return Err(CycleError::NeverAccepts { walker });
    }

    let all_accepting =
        |step: u64| walkers.iter().all(|walker| accepting(walker.state_at(step)));

    let one_time = std::iter::once(0)
        .chain(offsets.iter().flat_map(|o| o.prefix.iter().copied()))
        .filter(|&step| all_accepting(step))
        .min();

    let recurring = walkers
        .iter()
        .zip(&offsets)
        .map(|(walker, o)| {
            let period = walker.period() as u64;
            o.periodic
                .iter()
                .map(|&step| if step == 0 { period } else { step })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let periodic = combine_periodic(&recurring)?
        .into_iter()
        .find(|&step| all_accepting(step));
    tracing::debug!(?one_time, ?periodic, "alignment candidates");

    one_time
        .into_iter()
        .chain(periodic)
        .min()
        .ok_or(CycleError::Misaligned)
}

/// Every lcm reachable by picking one periodic offset per walker, ascending.
fn combine_periodic(offsets: &[Vec<u64>]) -> Result<BTreeSet<u64>, CycleError> {
    let mut walkers = offsets.iter();
    let Some(first) = walkers.next() else {
        return Ok(BTreeSet::new());
    };

    walkers.try_fold(first.iter().copied().collect::<BTreeSet<_>>(), |candidates, next| {
        candidates
            .iter()
            .cartesian_product(next.iter())
            .map(|(&a, &b)| lcm(a, b))
            .collect::<Result<BTreeSet<_>, _>>()
    })
}
