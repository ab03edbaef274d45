// Square game board, generic over its side length.
//
// `ClassicBoard` (3×3) is the only size the room plays, but nothing here or
// in `evaluate.rs` assumes 3. Cells are addressed as `(x, y)` where `x`
// selects the row and `y` the cell within that row, so the moves
// (0,0), (0,1), (0,2) fill the first row.
//
// Marking never fails. A later move on a taken cell overwrites it.
// Coordinates in -N..-1 count back from the far edge, so (-1, -1) is the
// bottom-right cell. Anything else off the grid is dropped without touching
// the board; play carries on either way.

use std::fmt;

use tictactoe_protocol::{Move, PlayerId};

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Marked(PlayerId),
}

impl Cell {
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Marked(player) => Some(player),
        }
    }
}

/// An N×N grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board<const N: usize> {
    cells: [[Cell; N]; N],
}

/// The 3×3 board used by every room.
pub type ClassicBoard = Board<3>;

impl<const N: usize> Default for Board<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Board<N> {
    pub const SIZE: usize = N;

    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; N]; N],
        }
    }

    /// Place `player`'s mark at the move's coordinates, overwriting whatever
    /// was there. Returns the `(row, col)` written, or `None` if the move
    /// fell off the board and was dropped.
    pub fn mark(&mut self, mv: Move, player: PlayerId) -> Option<(usize, usize)> {
        let (row, col) = Self::index(mv)?;
        self.cells[row][col] = Cell::Marked(player);
        Some((row, col))
    }

    /// The cell at `(x, y)`, or `None` if the coordinates are off the board.
    /// Negative coordinates wrap the same way `mark` does.
    pub fn cell(&self, x: i64, y: i64) -> Option<Cell> {
        Self::index(Move::new(x, y)).map(|(row, col)| self.cells[row][col])
    }

    pub fn rows(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// Number of marked cells.
    pub fn filled(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.filled() == N * N
    }

    fn index(mv: Move) -> Option<(usize, usize)> {
        Some((Self::axis(mv.x)?, Self::axis(mv.y)?))
    }

    /// Map one coordinate onto 0..N. Negative values count from the end.
    fn axis(coord: i64) -> Option<usize> {
        let size = i64::try_from(N).ok()?;
        let wrapped = if coord < 0 { coord.checked_add(size)? } else { coord };
        usize::try_from(wrapped).ok().filter(|i| *i < N)
    }
}

impl<const N: usize> fmt::Display for Board<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let symbol = cell.owner().map_or('.', PlayerId::mark);
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = ClassicBoard::new();
        assert_eq!(board.filled(), 0);
        assert!(!board.is_full());
        assert_eq!(board.cell(1, 1), Some(Cell::Empty));
    }

    #[test]
    fn marks_land_where_supplied() {
        let mut board = ClassicBoard::new();
        let moves = [
            (Move::new(0, 0), PlayerId::One),
            (Move::new(2, 1), PlayerId::Two),
            (Move::new(1, 2), PlayerId::One),
        ];
        for (mv, player) in moves {
            board.mark(mv, player).unwrap();
        }
        assert_eq!(board.filled(), 3);
        assert_eq!(board.cell(0, 0), Some(Cell::Marked(PlayerId::One)));
        assert_eq!(board.cell(2, 1), Some(Cell::Marked(PlayerId::Two)));
        assert_eq!(board.cell(1, 2), Some(Cell::Marked(PlayerId::One)));
        assert_eq!(board.rows()[2][1], Cell::Marked(PlayerId::Two));
    }

    #[test]
    fn occupied_cell_is_overwritten() {
        let mut board = ClassicBoard::new();
        board.mark(Move::new(1, 1), PlayerId::One).unwrap();
        board.mark(Move::new(1, 1), PlayerId::Two).unwrap();
        assert_eq!(board.cell(1, 1), Some(Cell::Marked(PlayerId::Two)));
        assert_eq!(board.filled(), 1);
    }

    #[test]
    fn negative_coordinates_wrap_from_the_far_edge() {
        let mut board = ClassicBoard::new();
        assert_eq!(board.mark(Move::new(-1, -1), PlayerId::One), Some((2, 2)));
        assert_eq!(board.mark(Move::new(-3, 1), PlayerId::Two), Some((0, 1)));
        assert_eq!(board.mark(Move::new(1, -2), PlayerId::One), Some((1, 1)));
        assert_eq!(board.cell(2, 2), Some(Cell::Marked(PlayerId::One)));
        assert_eq!(board.cell(0, 1), Some(Cell::Marked(PlayerId::Two)));
        assert_eq!(board.cell(-2, -2), Some(Cell::Marked(PlayerId::One)));
        assert_eq!(board.filled(), 3);
    }

    #[test]
    fn far_off_board_moves_are_dropped() {
        let mut board = ClassicBoard::new();
        board.mark(Move::new(0, 0), PlayerId::Two).unwrap();
        for (x, y) in [(-4, 0), (0, 3), (3, 3), (i64::MAX, 0), (i64::MIN, 1)] {
            assert_eq!(board.mark(Move::new(x, y), PlayerId::One), None, "({x}, {y})");
        }
        assert_eq!(board.filled(), 1);
        assert_eq!(board.cell(0, 0), Some(Cell::Marked(PlayerId::Two)));
        assert_eq!(board.cell(0, 3), None);
    }

    #[test]
    fn display_renders_rows() {
        let mut board = ClassicBoard::new();
        board.mark(Move::new(0, 0), PlayerId::One).unwrap();
        board.mark(Move::new(2, 2), PlayerId::Two).unwrap();
        assert_eq!(board.to_string(), "X..\n...\n..O");
    }

    #[test]
    fn larger_boards_fill_up() {
        let mut board = Board::<4>::new();
        for x in 0..4 {
            for y in 0..4 {
                board.mark(Move::new(x, y), PlayerId::Two).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.filled(), 16);
    }
}
