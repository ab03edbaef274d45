// Win detection over an N×N board.
//
// Checks rows, then columns, then the two diagonals. Within rows (and within
// columns) every line is examined and the last owning line wins. The first
// of the three structures to produce an owner decides the verdict. For the
// diagonals, player One is checked on both before player Two.
//
// Any row crosses every column and both diagonals, so two structures can
// never produce different owners on the same board: the ordering only
// matters for which of several same-structure lines is reported.

use tictactoe_protocol::{PlayerId, Verdict};
use tracing::trace;

use crate::board::{Board, Cell};

/// Evaluate the board. Returns `Verdict::NoWinner` when no line is complete,
/// including on a full board.
pub fn evaluate<const N: usize>(board: &Board<N>) -> Verdict {
    let winner = check_rows(board)
        .or_else(|| check_columns(board))
        .or_else(|| check_diagonals(board));
    trace!(?winner, "board evaluated");
    winner.map_or(Verdict::NoWinner, Verdict::Win)
}

fn check_rows<const N: usize>(board: &Board<N>) -> Option<PlayerId> {
    let mut winner = None;
    for row in board.rows() {
        if let Some(owner) = line_owner(row.iter().copied()) {
            winner = Some(owner);
        }
    }
    winner
}

fn check_columns<const N: usize>(board: &Board<N>) -> Option<PlayerId> {
    let mut winner = None;
    for col in 0..N {
        if let Some(owner) = line_owner(board.rows().iter().map(|row| row[col])) {
            winner = Some(owner);
        }
    }
    winner
}

fn check_diagonals<const N: usize>(board: &Board<N>) -> Option<PlayerId> {
    let rows = board.rows();
    let principal = || (0..N).map(|i| rows[i][i]);
    let secondary = || (0..N).map(|i| rows[i][N - 1 - i]);

    [PlayerId::One, PlayerId::Two]
        .into_iter()
        .find(|player| owned_by(principal(), *player) || owned_by(secondary(), *player))
}

/// The player whose mark fills every cell of the line, if any.
fn line_owner(line: impl Iterator<Item = Cell> + Clone) -> Option<PlayerId> {
    [PlayerId::One, PlayerId::Two]
        .into_iter()
        .find(|player| owned_by(line.clone(), *player))
}

fn owned_by(mut line: impl Iterator<Item = Cell>, player: PlayerId) -> bool {
    line.all(|cell| cell == Cell::Marked(player))
}

#[cfg(test)]
mod tests {
    use tictactoe_protocol::Move;

    use super::*;
    use crate::board::ClassicBoard;

    fn board_from(marks: &[(i64, i64, PlayerId)]) -> ClassicBoard {
        let mut board = ClassicBoard::new();
        for &(x, y, player) in marks {
            board.mark(Move::new(x, y), player).unwrap();
        }
        board
    }

    use tictactoe_protocol::PlayerId::{One, Two};

    #[test]
    fn empty_board_has_no_winner() {
        assert_eq!(evaluate(&ClassicBoard::new()), Verdict::NoWinner);
    }

    #[test]
    fn every_row_wins() {
        for x in 0..3 {
            let board = board_from(&[(x, 0, Two), (x, 1, Two), (x, 2, Two)]);
            assert_eq!(evaluate(&board), Verdict::Win(Two), "row {x}");
        }
    }

    #[test]
    fn every_column_wins() {
        for y in 0..3 {
            let board = board_from(&[(0, y, One), (1, y, One), (2, y, One)]);
            assert_eq!(evaluate(&board), Verdict::Win(One), "column {y}");
        }
    }

    #[test]
    fn both_diagonals_win() {
        let principal = board_from(&[(0, 0, Two), (1, 1, Two), (2, 2, Two)]);
        assert_eq!(evaluate(&principal), Verdict::Win(Two));

        let secondary = board_from(&[(0, 2, One), (1, 1, One), (2, 0, One)]);
        assert_eq!(evaluate(&secondary), Verdict::Win(One));
    }

    #[test]
    fn mixed_line_does_not_win() {
        let board = board_from(&[(0, 0, One), (0, 1, Two), (0, 2, One)]);
        assert_eq!(evaluate(&board), Verdict::NoWinner);
    }

    #[test]
    fn two_marks_do_not_win() {
        let board = board_from(&[(1, 0, One), (1, 1, One)]);
        assert_eq!(evaluate(&board), Verdict::NoWinner);
    }

    #[test]
    fn first_row_after_five_moves() {
        let board = board_from(&[
            (0, 0, One),
            (1, 0, Two),
            (0, 1, One),
            (1, 1, Two),
            (0, 2, One),
        ]);
        assert_eq!(evaluate(&board), Verdict::Win(One));
    }

    #[test]
    fn later_row_reported_when_two_rows_complete() {
        // Reachable only by overwriting, but the scan order still applies.
        let board = board_from(&[
            (0, 0, One),
            (0, 1, One),
            (0, 2, One),
            (2, 0, Two),
            (2, 1, Two),
            (2, 2, Two),
        ]);
        assert_eq!(evaluate(&board), Verdict::Win(Two));
    }

    #[test]
    fn full_board_without_line_is_not_terminal() {
        // X O X
        // X O O
        // O X X
        let board = board_from(&[
            (0, 0, One),
            (0, 1, Two),
            (0, 2, One),
            (1, 0, One),
            (1, 1, Two),
            (1, 2, Two),
            (2, 0, Two),
            (2, 1, One),
            (2, 2, One),
        ]);
        assert!(board.is_full());
        assert_eq!(evaluate(&board), Verdict::NoWinner);
    }

    #[test]
    fn generic_size_diagonal() {
        let mut board = Board::<5>::new();
        for i in 0..5 {
            board.mark(Move::new(i, 4 - i), Two).unwrap();
        }
        assert_eq!(evaluate(&board), Verdict::Win(Two));

        let mut partial = Board::<5>::new();
        for i in 0..4 {
            partial.mark(Move::new(i, i), One).unwrap();
        }
        assert_eq!(evaluate(&partial), Verdict::NoWinner);
    }
}
