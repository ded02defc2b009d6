pub mod maze;
pub mod part1;
