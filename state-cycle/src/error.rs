use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum CycleError {
    #[error("no state repeated within {max_steps} steps")]
    #[diagnostic(
        code(state_cycle::not_found),
        help("raise the step ceiling or fall back to direct simulation")
    )]
    NotFound { max_steps: usize },

    #[error("history holds {len} states but step index {index} was requested")]
    #[diagnostic(code(state_cycle::history_too_short))]
    HistoryTooShort { index: usize, len: usize },

    #[error("there are no walkers to align")]
    #[diagnostic(code(state_cycle::no_walkers))]
    NoWalkers,

    #[error("walker {walker} never reaches an accepting state")]
    #[diagnostic(code(state_cycle::never_accepts))]
    NeverAccepts { walker: usize },

    #[error("lcm({a}, {b}) does not fit in 64 bits")]
    #[diagnostic(code(state_cycle::overflow))]
    Overflow { a: u64, b: u64 },

    #[error("no candidate step puts every walker in an accepting state")]
    #[diagnostic(
        code(state_cycle::misaligned),
        help("accepting offsets are not multiples of their walker's period")
    )]
    Misaligned,
}
