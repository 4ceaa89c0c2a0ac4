use crate::{Piece, PieceKind, Position};

/// The error type for [`Game::place()`](crate::Game::place), i.e. for placing a single piece.
///
/// A failed placement never changes the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OutOfBounds { position: Position },
    Occupied { position: Position, existing: Piece },
    NothingCaptured { position: Position },
    NoPiecesLeft { kind: PieceKind },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OutOfBounds { position } =>
                write!(f, "Piece was placed at {}, which is outside of the board", position),
            IllegalPlacement::Occupied { position, existing } =>
                write!(f, "Piece was placed at {}, which already holds a {}", position, existing.kind()),
            IllegalPlacement::NothingCaptured { position } =>
                write!(f, "Placing a piece at {} would not capture any opposing piece", position),
            IllegalPlacement::NoPiecesLeft { kind } =>
                write!(f, "Tried to place a {}, but there are none left", kind),
        }
    }
}
