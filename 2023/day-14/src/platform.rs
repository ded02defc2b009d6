use state_cycle::{Grid, Simulation};

pub const ROUND: u8 = b'O';
pub const CUBE: u8 = b'#';
pub const EMPTY: u8 = b'.';

/// Slides every round rock north until it hits a cube rock, another round
/// rock, or the edge.
pub fn tilt_north(grid: &mut Grid) {
    for col in 0..grid.width() {
        // Row the next round rock in this column would come to rest on.
        let mut free = 0;
        for row in 0..grid.height() {
            match grid[(row, col)] {
                CUBE => free = row + 1,
                ROUND => {
                    if free != row {
                        grid[(free, col)] = ROUND;
                        grid[(row, col)] = EMPTY;
                    }
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

/// One spin cycle: tilt north, west, south, then east.
///
/// Each tilt is done northwards after a clockwise quarter turn, so after four
/// of them the platform is back in its original orientation.
pub fn spin(grid: &Grid) -> Grid {
    (0..4).fold(grid.clone(), |mut grid, _| {
        tilt_north(&mut grid);
        grid.rotate_clockwise()
    })
}

/// Sum over round rocks of their distance to the south edge, inclusive.
pub fn north_load(grid: &Grid) -> usize {
    grid.rows()
        .enumerate()
        .map(|(row, cells)| {
            let rocks = cells.iter().filter(|&&c| c == ROUND).count();
            rocks * (grid.height() - row)
        })
        .sum()
}

pub fn parse(input: &str) -> miette::Result<Grid> {
    let grid = Grid::parse(input)?;
    if let Some(&c) = grid
        .cells()
        .iter()
        .find(|&&c| !matches!(c, ROUND | CUBE | EMPTY))
    {
        return Err(miette::miette!("Unexpected platform cell {:?}", c as char));
    }
    Ok(grid)
}

/// The platform under repeated spin cycles.
pub struct SpinCycle;

impl Simulation for SpinCycle {
    type State = Grid;
    type Key = Vec<u8>;

    // The width never changes during a run, so the cells alone identify a state.
    fn encode(&self, state: &Grid) -> Vec<u8> {
        state.cells().to_vec()
    }

    fn step(&self, state: &Grid) -> Grid {
        spin(state)
    }
}
