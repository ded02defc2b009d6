use std::collections::HashSet;

use glam::IVec2;
use itertools::Itertools;
use miette::*;
use state_cycle::{Direction, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    /// `|`
    VerticalSplitter,
    /// `-`
    HorizontalSplitter,
    /// `/`
    ForwardMirror,
    /// `\`
    BackMirror,
}

impl TryFrom<u8> for Tile {
    type Error = Report;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            b'.' => Ok(Tile::Empty),
            b'|' => Ok(Tile::VerticalSplitter),
            b'-' => Ok(Tile::HorizontalSplitter),
            b'/' => Ok(Tile::ForwardMirror),
            b'\\' => Ok(Tile::BackMirror),
            other => Err(miette!("Unknown tile {:?}", other as char)),
        }
    }
}

impl Tile {
    /// Headings a beam leaves with after entering this tile going `heading`.
    pub fn deflect(self, heading: Direction) -> (Direction, Option<Direction>) {
        use Direction::*;

        match (self, heading) {
            (Tile::Empty, h) => (h, None),
            (Tile::VerticalSplitter, h) if h.is_vertical() => (h, None),
            (Tile::VerticalSplitter, _) => (North, Some(South)),
            (Tile::HorizontalSplitter, h) if !h.is_vertical() => (h, None),
            (Tile::HorizontalSplitter, _) => (West, Some(East)),
            (Tile::ForwardMirror, North) => (East, None),
            (Tile::ForwardMirror, East) => (North, None),
            (Tile::ForwardMirror, South) => (West, None),
            (Tile::ForwardMirror, West) => (South, None),
            (Tile::BackMirror, North) => (West, None),
            (Tile::BackMirror, East) => (South, None),
            (Tile::BackMirror, South) => (East, None),
            (Tile::BackMirror, West) => (North, None),
        }
    }
}

/// A beam of light sitting on a cell, about to be acted on by that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Beam {
    pub position: IVec2,
    pub heading: Direction,
}

impl Beam {
    pub fn new(position: IVec2, heading: Direction) -> Self {
        Self { position, heading }
    }

    /// The one or two beams this one turns into after crossing `tile`.
    pub fn advance(self, tile: Tile) -> impl Iterator<Item = Beam> {
        let (first, second) = tile.deflect(self.heading);
        std::iter::once(first)
            .chain(second)
            .map(move |heading| Beam::new(self.position + heading.offset(), heading))
    }
}

pub struct Contraption {
    grid: Grid<Tile>,
}

impl Contraption {
    pub fn parse(input: &str) -> Result<Self> {
        let grid = Grid::parse(input)?.try_map(Tile::try_from)?;
        Ok(Self { grid })
    }

    /// Cells crossed by at least one beam, starting from `start`.
    ///
    /// Beams are flooded with an explicit stack. A beam already seen at the
    /// same cell with the same heading adds nothing new, which is what stops
    /// loops between mirrors.
    pub fn energized(&self, start: Beam) -> HashSet<IVec2> {
        let mut seen: HashSet<Beam> = HashSet::new();
        let mut pending = vec![start];

        while let Some(beam) = pending.pop() {
            let Some(&tile) = self.grid.get(beam.position) else {
                continue;
            };
            if !seen.insert(beam) {
                continue;
            }
            pending.extend(beam.advance(tile));
        }

        seen.into_iter().map(|beam| beam.position).collect()
    }

    pub fn energize(&self, start: Beam) -> usize {
        self.energized(start).len()
    }

    /// Every beam that can enter from an edge, pointing inwards.
    pub fn entry_beams(&self) -> Vec<Beam> {
        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;

        let rows = (0..height).flat_map(|y| {
            [
                Beam::new(IVec2::new(0, y), Direction::East),
                Beam::new(IVec2::new(width - 1, y), Direction::West),
            ]
        });
        let cols = (0..width).flat_map(|x| {
            [
                Beam::new(IVec2::new(x, 0), Direction::South),
                Beam::new(IVec2::new(x, height - 1), Direction::North),
            ]
        });
        rows.chain(cols).collect()
    }

    /// Renders energized cells as `#`, everything else as `.`.
    pub fn render(&self, energized: &HashSet<IVec2>) -> String {
        (0..self.grid.height() as i32)
            .map(|y| {
                (0..self.grid.width() as i32)
                    .map(|x| {
                        if energized.contains(&IVec2::new(x, y)) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .join("\n")
    }
}
