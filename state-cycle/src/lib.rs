//! Cycle detection for deterministic simulations.
//!
//! A [`Simulation`] describes how to encode a snapshot and how to advance it
//! one step. [`detect`] runs it until a snapshot repeats, the resulting
//! [`Cycle`] answers questions about arbitrarily distant steps, and [`align`]
//! combines several independent walkers into the first step where all of them
//! are accepting at once.

pub mod combiner;
pub mod detector;
pub mod direction;
pub mod error;
pub mod extrapolate;
pub mod grid;
pub mod simulation;

pub use combiner::{align, lcm, AcceptingOffsets, WalkerPattern};
pub use detector::{detect, Cycle, CycleDescriptor, CycleRecord};
pub use direction::Direction;
pub use error::CycleError;
pub use extrapolate::extrapolate;
pub use grid::Grid;
pub use simulation::Simulation;
