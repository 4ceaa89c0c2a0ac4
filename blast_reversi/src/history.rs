use crate::{Piece, Position, Seat};

/// A successfully applied placement, with everything needed to reverse it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    position: Position,
    piece: Piece,
    flipped: Vec<Position>,
}

impl MoveRecord {
    pub(crate) fn new(position: Position, piece: Piece, flipped: Vec<Position>) -> Self {
        Self {
            position,
            piece,
            flipped,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The piece as it was placed.
    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn seat(&self) -> Seat {
        self.piece.owner()
    }

    /// The captured positions, in the order they were computed.
    pub fn flipped(&self) -> &[Position] {
        &self.flipped
    }
}

/// The placements since the start of the game, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    moves: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    pub(crate) fn push(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub(crate) fn pop(&mut self) -> Option<MoveRecord> {
        self.moves.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
