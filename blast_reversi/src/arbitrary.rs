use quickcheck::Arbitrary;

use crate::{Board, Game, Piece, PieceKind, Position, Seat, BOARD_SIZE};

/// A board with pieces of all kinds scattered across it.
///
/// Not necessarily reachable in a real game.
#[derive(Clone, Debug)]
pub struct ArbitraryBoard(pub Board);

/// A sequence of choices for playing a game: an index into the valid targets,
/// and the kind of piece to place.
#[derive(Clone, Debug)]
pub struct MoveScript(pub Vec<(usize, PieceKind)>);

/// Plays the script until it is exhausted or the game is finished.
///
/// Special kinds the current side has run out of are replaced by standard pieces.
pub fn play_script(game: &mut Game, script: &MoveScript) -> usize {
    let mut num_played = 0;
    for &(idx, kind) in &script.0 {
        let targets = game.valid_targets();
        if targets.is_empty() {
            break;
        }
        let kind = if game.current_side().can_place(kind) {
            kind
        } else {
            PieceKind::Standard
        };
        game.place(targets[idx % targets.len()], kind)
            .expect("Valid target was rejected");
        num_played += 1;
    }
    num_played
}

impl Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let row = (u8::arbitrary(g) % BOARD_SIZE as u8) as i8;
        let col = (u8::arbitrary(g) % BOARD_SIZE as u8) as i8;
        Position::new(row, col)
    }
}

impl Arbitrary for Seat {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Seat::First, Seat::Second]).unwrap()
    }
}

impl Arbitrary for PieceKind {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Standard pieces are the most common by far in real games
        *g.choose(&[
            PieceKind::Standard,
            PieceKind::Standard,
            PieceKind::Standard,
            PieceKind::Bomb,
            PieceKind::Unflippable,
        ])
        .unwrap()
    }
}

impl Arbitrary for ArbitraryBoard {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut pieces = Vec::new();
        for position in Position::all() {
            // Leave roughly a third of the cells empty
            if u8::arbitrary(g) % 3 == 0 {
                continue;
            }
            let piece = Piece::new(PieceKind::arbitrary(g), Seat::arbitrary(g));
            pieces.push((position, piece));
        }
        ArbitraryBoard(Board::from_pieces(&pieces))
    }
}

impl Arbitrary for MoveScript {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = usize::arbitrary(g) % 61;
        MoveScript(
            (0..len)
                .map(|_| (usize::arbitrary(g), PieceKind::arbitrary(g)))
                .collect(),
        )
    }
}
