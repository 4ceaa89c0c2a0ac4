use blast_reversi::{Board, Piece, Position, Seat, BOARD_SIZE};

/// Two characters per cell: the owner, and a marker for special pieces.
fn cell(piece: Option<Piece>) -> String {
    let Some(piece) = piece else {
        return String::from("· ");
    };
    let owner = match piece.owner() {
        Seat::First => 'X',
        Seat::Second => 'O',
    };
    let marker = match piece {
        Piece::Standard { .. } => ' ',
        Piece::Bomb { .. } => '*',
        Piece::Unflippable { .. } => '#',
    };
    format!("{}{}", owner, marker)
}

/// Renders the board as a box with row and column numbers.
///
/// `X` is the first seat, `O` the second. Bombs are marked with `*`,
/// unflippable pieces with `#`.
pub fn render_board(board: &Board) -> String {
    // Draw the top of the box
    let mut result = String::from("     ");
    for col in 0..BOARD_SIZE {
        result += &format!("{} ", col);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╮\n";

    for row in 0..BOARD_SIZE {
        result += &format!("{:>2} │ ", row);
        for col in 0..BOARD_SIZE {
            result += &cell(board.get(Position::new(row, col)));
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "   ╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_start_position() {
        let rendered = render_board(&Board::standard());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2 + BOARD_SIZE as usize + 1);
        assert_eq!(lines[0], "     0 1 2 3 4 5 6 7 ");
        assert_eq!(lines[2 + 3], " 3 │ · · · X O · · · │");
        assert_eq!(lines[2 + 4], " 4 │ · · · O X · · · │");
    }

    #[test]
    fn render_special_pieces() {
        let board = Board::from_pieces(&[
            (Position::new(0, 0), Piece::Bomb { owner: Seat::Second }),
            (Position::new(0, 1), Piece::Unflippable { owner: Seat::First }),
        ]);
        let rendered = render_board(&board);
        assert_eq!(rendered.lines().nth(2), Some(" 0 │ O*X#· · · · · · │"));
    }
}
