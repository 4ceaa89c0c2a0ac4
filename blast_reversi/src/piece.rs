use serde::{Deserialize, Serialize};

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// Moves first.
    First,
    Second,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Index into arrays that are laid out as `[first, second]`.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::First => write!(f, "first"),
            Seat::Second => write!(f, "second"),
        }
    }
}

/// The kind of a [piece](Piece), without an owner.
///
/// This is what a player chooses when placing a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Standard,
    /// Detonates when captured, capturing its opposing neighbors as well.
    Bomb,
    /// Can never be captured.
    Unflippable,
}

impl PieceKind {
    pub const ALL: [PieceKind; 3] = [PieceKind::Standard, PieceKind::Bomb, PieceKind::Unflippable];

    /// Whether placing this kind uses up one of the side's limited pieces.
    pub fn is_special(self) -> bool {
        !matches!(self, PieceKind::Standard)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceKind::Standard => write!(f, "standard piece"),
            PieceKind::Bomb => write!(f, "bomb"),
            PieceKind::Unflippable => write!(f, "unflippable piece"),
        }
    }
}

/// A piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Piece {
    Standard { owner: Seat },
    Bomb { owner: Seat },
    /// The owner is fixed when the piece is placed.
    Unflippable { owner: Seat },
}

impl Piece {
    pub fn new(kind: PieceKind, owner: Seat) -> Self {
        match kind {
            PieceKind::Standard => Piece::Standard { owner },
            PieceKind::Bomb => Piece::Bomb { owner },
            PieceKind::Unflippable => Piece::Unflippable { owner },
        }
    }

    pub fn owner(self) -> Seat {
        match self {
            Piece::Standard { owner } | Piece::Bomb { owner } | Piece::Unflippable { owner } => {
                owner
            }
        }
    }

    pub fn kind(self) -> PieceKind {
        match self {
            Piece::Standard { .. } => PieceKind::Standard,
            Piece::Bomb { .. } => PieceKind::Bomb,
            Piece::Unflippable { .. } => PieceKind::Unflippable,
        }
    }

    pub fn is_capturable(self) -> bool {
        !matches!(self, Piece::Unflippable { .. })
    }

    /// The piece after `seat` captured it.
    ///
    /// Capturing an unflippable piece has no effect.
    #[must_use]
    pub fn captured_by(self, seat: Seat) -> Self {
        match self {
            Piece::Standard { .. } => Piece::Standard { owner: seat },
            Piece::Bomb { .. } => Piece::Bomb { owner: seat },
            unflippable @ Piece::Unflippable { .. } => unflippable,
        }
    }
}
