use std::fmt;
use std::ops::{Index, IndexMut};

use chumsky::prelude::*;
use glam::IVec2;
use miette::*;

/// A rectangular, row-major grid of cells.
///
/// Positions are `IVec2 { x: column, y: row }`, so out-of-bounds lookups with
/// negative coordinates simply return `None`. `Index<(row, col)>` is the
/// unchecked fast path for loops that already stay in bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T = u8> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// One `Vec<u8>` per line; blank lines come through as empty rows.
fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<u8>>, extra::Err<Rich<'a, char>>> {
    let cell = any()
        .filter(|c: &char| c.is_ascii() && *c != '\n' && *c != '\r')
        .map(|c: char| c as u8);

    cell.repeated()
        .collect::<Vec<_>>()
        .separated_by(text::newline())
        .allow_trailing()
        .collect()
}

impl Grid<u8> {
    /// Parses a block of ASCII lines. Blank lines (including the trailing
    /// newline at EOF) are skipped.
    pub fn parse(input: &str) -> Result<Self> {
        let rows = parser()
            .parse(input)
            .into_result()
            .map_err(|e| miette!("Parse failed: {:?}", e))?;

        Self::from_rows(rows.into_iter().filter(|r| !r.is_empty()).collect())
    }
}

impl<T> Grid<T> {
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(miette!("Grid is empty"));
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(miette!(
                "Row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            ));
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, pos: IVec2) -> Option<&T> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get(pos.y as usize * self.width + pos.x as usize)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    /// Every cell with its position, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (IVec2, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let pos = IVec2::new((i % width) as i32, (i / width) as i32);
            (pos, cell)
        })
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<IVec2> {
        self.positions()
            .find(|(_, cell)| predicate(cell))
            .map(|(pos, _)| pos)
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Grid<U>, E> {
        let cells = self.cells.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Grid {
            width: self.width,
            height: self.height,
            cells,
        })
    }
}

impl<T: Clone> Grid<T> {
    /// Mirrors the grid along its main diagonal.
    pub fn transpose(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for x in 0..self.width {
            for y in 0..self.height {
                cells.push(self[(y, x)].clone());
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Reverses every row.
    pub fn flip_horizontal(&self) -> Self {
        let cells = self
            .rows()
            .flat_map(|row| row.iter().rev().cloned())
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Quarter turn clockwise: the west edge becomes the north edge.
    pub fn rotate_clockwise(&self) -> Self {
        self.transpose().flip_horizontal()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[row * self.width + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.cells[row * self.width + col]
    }
}

impl fmt::Display for Grid<u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", cell as char)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() -> Result<()> {
        let input = "#..\n.O.\n..#\n";
        let grid = Grid::parse(input)?;
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid[(1, 1)], b'O');
        assert_eq!(grid.to_string(), input.trim_end());
        Ok(())
    }

    #[test]
    fn handles_crlf() -> Result<()> {
        let grid = Grid::parse("ab\r\ncd\r\n")?;
        assert_eq!(grid.to_string(), "ab\ncd");
        Ok(())
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(Grid::parse("abc\nab").is_err());
        assert!(Grid::parse("").is_err());
    }

    #[test]
    fn rotates_clockwise() -> Result<()> {
        let grid = Grid::parse("123\n223\n323")?;
        assert_eq!(grid.rotate_clockwise().to_string(), "321\n222\n333");
        Ok(())
    }

    #[test]
    fn four_rotations_are_identity() -> Result<()> {
        let grid = Grid::parse("ab\ncd\nef")?;
        let rotated = grid.rotate_clockwise();
        assert_eq!(rotated.width(), 3);
        assert_eq!(rotated.to_string(), "eca\nfdb");
        let back = rotated
            .rotate_clockwise()
            .rotate_clockwise()
            .rotate_clockwise();
        assert_eq!(back, grid);
        Ok(())
    }

    #[test]
    fn bounds_checked_lookup() -> Result<()> {
        let grid = Grid::parse("ab\ncd")?;
        assert_eq!(grid.get(IVec2::new(1, 0)), Some(&b'b'));
        assert_eq!(grid.get(IVec2::new(0, 1)), Some(&b'c'));
        assert_eq!(grid.get(IVec2::new(-1, 0)), None);
        assert_eq!(grid.get(IVec2::new(2, 0)), None);
        assert_eq!(grid.find(|&c| c == b'd'), Some(IVec2::new(1, 1)));
        Ok(())
    }
}
