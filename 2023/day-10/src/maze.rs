use glam::IVec2;
use miette::*;
use state_cycle::{detect, Cycle, Direction, Grid, Simulation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipe {
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `L`
    NorthEast,
    /// `J`
    NorthWest,
    /// `7`
    SouthWest,
    /// `F`
    SouthEast,
    /// `.`
    Ground,
    /// `S`, connects wherever the loop needs it to.
    Start,
}

impl TryFrom<u8> for Pipe {
    type Error = Report;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            b'|' => Ok(Pipe::Vertical),
            b'-' => Ok(Pipe::Horizontal),
            b'L' => Ok(Pipe::NorthEast),
            b'J' => Ok(Pipe::NorthWest),
            b'7' => Ok(Pipe::SouthWest),
            b'F' => Ok(Pipe::SouthEast),
            b'.' => Ok(Pipe::Ground),
            b'S' => Ok(Pipe::Start),
            other => Err(miette!("Unknown pipe {:?}", other as char)),
        }
    }
}

impl Pipe {
    pub fn connections(self) -> &'static [Direction] {
        use Direction::*;

        match self {
            Pipe::Vertical => &[North, South],
            Pipe::Horizontal => &[East, West],
            Pipe::NorthEast => &[North, East],
            Pipe::NorthWest => &[North, West],
            Pipe::SouthWest => &[South, West],
            Pipe::SouthEast => &[South, East],
            Pipe::Ground => &[],
            Pipe::Start => &Direction::ALL,
        }
    }

    /// Heading out of this pipe for something that entered it moving
    /// `heading`, if the pipe accepts it from that side.
    pub fn exit(self, heading: Direction) -> Option<Direction> {
        let from = heading.opposite();
        match *self.connections() {
            [a, b] if a == from => Some(b),
            [a, b] if b == from => Some(a),
            _ => None,
        }
    }
}

/// Position and heading of something crawling through the pipes; `None`
/// once it has run into a dead end.
pub type Crawl = Option<(IVec2, Direction)>;

pub struct Maze {
    grid: Grid<Pipe>,
    start: IVec2,
}

/// Follows the pipes, leaving the start cell through `exit` every time it is
/// entered, which makes a closed loop periodic.
struct Crawler<'a> {
    maze: &'a Maze,
    exit: Direction,
}

impl Simulation for Crawler<'_> {
    type State = Crawl;
    type Key = Crawl;

    fn encode(&self, state: &Crawl) -> Crawl {
        *state
    }

    fn step(&self, state: &Crawl) -> Crawl {
        let (position, heading) = (*state)?;
        let next = position + heading.offset();
        match self.maze.grid.get(next)? {
            Pipe::Start => Some((next, self.exit)),
            pipe => pipe.exit(heading).map(|out| (next, out)),
        }
    }
}

impl Maze {
    pub fn parse(input: &str) -> Result<Self> {
        let grid = Grid::parse(input)?.try_map(Pipe::try_from)?;
        let start = grid
            .find(|&pipe| pipe == Pipe::Start)
            .ok_or(miette!("No start position 'S' found in grid"))?;
        Ok(Self { grid, start })
    }

    pub fn start(&self) -> IVec2 {
        self.start
    }

    /// Directions out of the start whose neighbour connects back to it.
    pub fn start_exits(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| {
                self.grid
                    .get(self.start + direction.offset())
                    .is_some_and(|pipe| pipe.connections().contains(&direction.opposite()))
            })
            .collect()
    }

    /// The closed loop through the start, as a cycle that begins at step 0.
    pub fn main_loop(&self) -> Result<Cycle<Crawl>> {
        // Every cell with every heading, plus the dead end.
        let max_steps = self.grid.cells().len() * Direction::ALL.len() + 1;

        for exit in self.start_exits() {
            let crawler = Crawler { maze: self, exit };
            let cycle = detect(&crawler, Some((self.start, exit)), max_steps)?;
            if cycle.descriptor().first_seen == 0 {
                return Ok(cycle);
            }
            tracing::debug!(?exit, "pipe from start dead-ends");
        }

        Err(miette!("No pipe loop runs through the start at {}", self.start))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SQUARE: &str = ".....
.S-7.
.|.|.
.L-J.
.....";

    pub(crate) const COMPLEX: &str = "..F7.
.FJ|.
SJ.L7
|F--J
LJ...";

    #[test]
    fn finds_start_exits() -> Result<()> {
        let maze = Maze::parse(SQUARE)?;
        assert_eq!(maze.start(), IVec2::new(1, 1));
        assert_eq!(maze.start_exits(), [Direction::East, Direction::South]);
        Ok(())
    }

    #[test]
    fn loop_returns_to_start() -> Result<()> {
        let maze = Maze::parse(SQUARE)?;
        let cycle = maze.main_loop()?;
        assert_eq!(cycle.descriptor().length, 8);
        assert_eq!(cycle.state_at(8), cycle.state_at(0));
        assert_eq!(cycle.state_at(4), &Some((IVec2::new(3, 3), Direction::West)));
        Ok(())
    }

    #[test]
    fn pipes_only_accept_connected_sides() {
        assert_eq!(Pipe::NorthEast.exit(Direction::South), Some(Direction::East));
        assert_eq!(Pipe::NorthEast.exit(Direction::West), Some(Direction::North));
        assert_eq!(Pipe::NorthEast.exit(Direction::North), None);
        assert_eq!(Pipe::Ground.exit(Direction::North), None);
    }

    #[test]
    fn missing_start_is_an_error() {
        assert!(Maze::parse("F7\nLJ").is_err());
    }

    #[test]
    fn broken_loop_is_an_error() -> Result<()> {
        let maze = Maze::parse(".S-.\n....")?;
        assert!(maze.main_loop().is_err());
        Ok(())
    }
}
