pub mod contraption;
pub mod part1;
pub mod part2;
