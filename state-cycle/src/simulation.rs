use std::hash::Hash;

/// A deterministic, step-by-step simulation.
///
/// `step` must be total and pure: the same state always produces the same
/// successor. `encode` must be injective with respect to future behaviour,
/// otherwise two different futures would be reported as the same cycle.
pub trait Simulation {
    type State: Clone;
    type Key: Eq + Hash;

    fn encode(&self, state: &Self::State) -> Self::Key;

    fn step(&self, state: &Self::State) -> Self::State;

    /// Advances `initial` by `steps` transitions without any cycle tracking.
    fn simulate(&self, initial: Self::State, steps: usize) -> Self::State {
        (0..steps).fold(initial, |state, _| self.step(&state))
    }
}
