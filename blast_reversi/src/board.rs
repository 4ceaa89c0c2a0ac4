use serde::{Deserialize, Serialize};

use crate::{IllegalPlacement, Piece, PieceKind, PositionSet, Seat};

pub const BOARD_SIZE: i8 = 8;

/// The eight compass directions as `(row, col)` steps.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell coordinate. Row 0 is the top row, column 0 the leftmost column.
///
/// Positions may lie outside the board, e.g. when they come from a player.
/// Use [`Position::is_on_board()`] to check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// The adjacent position in the given direction, if it is on the board.
    pub fn step(self, (d_row, d_col): (i8, i8)) -> Option<Position> {
        let row = self.row.checked_add(d_row)?;
        let col = self.col.checked_add(d_col)?;
        Some(Position { row, col }).filter(|p| p.is_on_board())
    }

    /// The up to eight on-board cells around this one.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        DIRECTIONS.into_iter().filter_map(move |d| self.step(d))
    }

    /// All cells of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

const SIZE: usize = BOARD_SIZE as usize;

/// The playing grid. Every cell is either empty or holds exactly one piece.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; SIZE]; SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [[None; SIZE]; SIZE],
        }
    }

    /// The starting position: two standard pieces per side in the center,
    /// with the first seat on the main diagonal.
    pub fn standard() -> Self {
        Self::from_pieces(&[
            (Position::new(3, 3), Piece::Standard { owner: Seat::First }),
            (Position::new(4, 4), Piece::Standard { owner: Seat::First }),
            (Position::new(3, 4), Piece::Standard { owner: Seat::Second }),
            (Position::new(4, 3), Piece::Standard { owner: Seat::Second }),
        ])
    }

    /// Creates a board from a list of occupied cells.
    ///
    /// Panics if a position is off the board. Later entries overwrite earlier ones.
    pub fn from_pieces(pieces: &[(Position, Piece)]) -> Self {
        let mut board = Self::new();
        for &(position, piece) in pieces {
            assert!(position.is_on_board(), "{} is not on the board", position);
            board.set(position, Some(piece));
        }
        board
    }

    /// The piece at the given position. Off-board positions are empty.
    pub fn get(&self, position: Position) -> Option<Piece> {
        if position.is_on_board() {
            self.cells[position.row as usize][position.col as usize]
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, position: Position, piece: Option<Piece>) {
        self.cells[position.row as usize][position.col as usize] = piece;
    }

    /// All occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|p| self.get(p).map(|piece| (p, piece)))
    }

    /// The cells holding a piece owned by `seat`.
    pub fn owned_by(&self, seat: Seat) -> PositionSet {
        self.pieces()
            .filter(|(_, piece)| piece.owner() == seat)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn occupied(&self) -> PositionSet {
        self.owned_by(Seat::First) | self.owned_by(Seat::Second)
    }

    pub fn is_full(&self) -> bool {
        self.occupied().len() == (SIZE * SIZE) as u32
    }

    /// Checks whether `mover` may place a piece at `position`, and if so,
    /// which opposing pieces that would capture.
    ///
    /// This does not look at how many special pieces the mover has left.
    pub fn calculate(
        &self,
        position: Position,
        mover: Seat,
    ) -> Result<Vec<Position>, IllegalPlacement> {
        if !position.is_on_board() {
            return Err(IllegalPlacement::OutOfBounds { position });
        }
        if let Some(existing) = self.get(position) {
            return Err(IllegalPlacement::Occupied { position, existing });
        }
        let captured = self.captures(position, mover);
        if captured.is_empty() {
            return Err(IllegalPlacement::NothingCaptured { position });
        }
        Ok(captured)
    }

    /// The positions whose pieces would be captured if `mover` placed a piece
    /// at `origin`, ordered by direction and then by distance, followed by
    /// the cells caught in bomb blasts.
    ///
    /// The kind of the placed piece does not matter: a freshly placed bomb
    /// does not detonate, only captured ones do.
    pub fn captures(&self, origin: Position, mover: Seat) -> Vec<Position> {
        let mut captured = Vec::new();
        let mut seen = PositionSet::new();
        if !origin.is_on_board() {
            return captured;
        }

        for direction in DIRECTIONS {
            for position in self.run(origin, direction, mover) {
                // Runs in different directions never overlap
                seen = seen.insert(position);
                captured.push(position);
            }
        }

        let num_directional = captured.len();
        for idx in 0..num_directional {
            let position = captured[idx];
            if let Some(Piece::Bomb { .. }) = self.get(position) {
                self.detonate(position, mover, &mut captured, &mut seen);
            }
        }
        captured
    }

    // The opposing pieces between `origin` and the nearest piece of `mover`
    // in one direction. Empty if the line is interrupted or never closed.
    fn run(&self, origin: Position, direction: (i8, i8), mover: Seat) -> Vec<Position> {
        let mut run = Vec::new();
        let mut cursor = origin;
        while let Some(next) = cursor.step(direction) {
            match self.get(next) {
                None => return Vec::new(),
                Some(piece) if piece.owner() == mover => return run,
                Some(Piece::Unflippable { .. }) => return Vec::new(),
                Some(Piece::Standard { .. } | Piece::Bomb { .. }) => run.push(next),
            }
            cursor = next;
        }
        // Reached the edge of the board without closing the line
        Vec::new()
    }

    // Adds the capturable opposing neighbors of a captured bomb, recursing into
    // neighboring bombs. `seen` doubles as the visited set, so a ring of bombs
    // terminates.
    fn detonate(
        &self,
        bomb: Position,
        mover: Seat,
        captured: &mut Vec<Position>,
        seen: &mut PositionSet,
    ) {
        for neighbor in bomb.neighbors() {
            let Some(piece) = self.get(neighbor) else {
                continue;
            };
            if seen.contains(neighbor) || piece.owner() == mover || !piece.is_capturable() {
                continue;
            }
            *seen = seen.insert(neighbor);
            captured.push(neighbor);
            if piece.kind() == PieceKind::Bomb {
                self.detonate(neighbor, mover, captured, seen);
            }
        }
    }

    /// Places `piece` and hands every captured piece over to its owner.
    pub(crate) fn apply(&mut self, position: Position, piece: Piece, captured: &[Position]) {
        self.set(position, Some(piece));
        self.transfer(captured, piece.owner());
    }

    /// Removes the piece at `position` and gives the captured pieces back.
    pub(crate) fn revert(&mut self, position: Position, piece: Piece, captured: &[Position]) {
        self.set(position, None);
        self.transfer(captured, piece.owner().opponent());
    }

    fn transfer(&mut self, positions: &[Position], new_owner: Seat) {
        for &position in positions {
            if let Some(piece) = self.get(position) {
                self.set(position, Some(piece.captured_by(new_owner)));
            }
        }
    }
}
