use miette::*;

use crate::maze::Maze;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let maze = Maze::parse(input)?;
    let cycle = maze.main_loop()?;

    // The farthest tile is halfway round the loop.
    let farthest = cycle.descriptor().length / 2;
    Ok(farthest.to_string())
}
