use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::{
    Board, Controller, History, IllegalPlacement, MoveRecord, Piece, PieceKind, Position, Seat,
    Side,
};

/// What a successful [`Game::place()`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub seat: Seat,
    pub position: Position,
    pub piece: Piece,
    /// The captured positions, including those caught in bomb blasts.
    pub flipped: Vec<Position>,
}

/// Summarizes the outcome of [`Game::undo()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The last placement was reversed.
    Undone(MoveRecord),
    /// There is no placement to reverse.
    NothingToUndo,
    /// At least one side is automated, so moves cannot be taken back.
    NotAllowed,
}

/// The number of pieces each side owns on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub first: usize,
    pub second: usize,
}

impl Tally {
    pub fn of(self, seat: Seat) -> usize {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Winner { seat: Seat, tally: Tally },
    Tie { tally: Tally },
}

impl GameOutcome {
    pub fn tally(self) -> Tally {
        match self {
            GameOutcome::Winner { tally, .. } | GameOutcome::Tie { tally } => tally,
        }
    }

    pub fn winner(self) -> Option<Seat> {
        match self {
            GameOutcome::Winner { seat, .. } => Some(seat),
            GameOutcome::Tie { .. } => None,
        }
    }
}

/// A single game between two sides.
///
/// The game owns its board, its history and both sides, and shares no state
/// with other instances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    sides: [Side; 2],
    to_move: Seat,
    history: History,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Controller::Human, Controller::Human)
    }
}

impl Game {
    /// Creates a game in the starting position, with the first seat to move.
    pub fn new(first: Controller, second: Controller) -> Self {
        Self::with_board(Board::standard(), first, second)
    }

    /// Creates a game from an arbitrary position, with the first seat to move.
    ///
    /// [`Self::reset()`] still returns to the starting position.
    pub fn with_board(board: Board, first: Controller, second: Controller) -> Self {
        Self {
            board,
            sides: seated(first, second),
            to_move: Seat::First,
            history: History::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece at the given position. Off-board positions are empty.
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }

    pub fn side(&self, seat: Seat) -> &Side {
        &self.sides[seat.index()]
    }

    pub fn side_mut(&mut self, seat: Seat) -> &mut Side {
        &mut self.sides[seat.index()]
    }

    /// The seat whose turn it is.
    pub fn current_seat(&self) -> Seat {
        self.to_move
    }

    pub fn current_side(&self) -> &Side {
        self.side(self.to_move)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The captures the current side would make by placing a piece at `position`.
    ///
    /// Empty if the cell is occupied or off the board.
    pub fn capture_set(&self, position: Position) -> Vec<Position> {
        self.board.calculate(position, self.to_move).unwrap_or_default()
    }

    pub fn count_flips(&self, position: Position) -> usize {
        self.capture_set(position).len()
    }

    /// All cells where the current side may place a piece, in row-major order.
    pub fn valid_targets(&self) -> Vec<Position> {
        Position::all()
            .filter(|&p| {
                self.board.get(p).is_none() && !self.board.captures(p, self.to_move).is_empty()
            })
            .collect()
    }

    /// Places a piece of the given kind for the current side.
    ///
    /// On success, the captures are applied, the move is recorded and the turn
    /// passes to the other side. On failure, nothing changes.
    pub fn place(
        &mut self,
        position: Position,
        kind: PieceKind,
    ) -> Result<Placement, IllegalPlacement> {
        let seat = self.to_move;
        let flipped = self.board.calculate(position, seat)?;
        let side = &mut self.sides[seat.index()];
        if !side.consume(kind) {
            return Err(IllegalPlacement::NoPiecesLeft { kind });
        }

        let piece = Piece::new(kind, seat);
        self.board.apply(position, piece, &flipped);
        trace!(%seat, %position, %kind, num_flipped = flipped.len(), "Placed piece");
        self.history
            .push(MoveRecord::new(position, piece, flipped.clone()));
        self.to_move = seat.opponent();

        Ok(Placement {
            seat,
            position,
            piece,
            flipped,
        })
    }

    /// Moves can only be taken back when both sides are human.
    pub fn undo_allowed(&self) -> bool {
        self.sides.iter().all(Side::is_human)
    }

    /// Reverses the most recent placement, including the turn and the
    /// special piece it used up.
    pub fn undo(&mut self) -> UndoOutcome {
        if !self.undo_allowed() {
            return UndoOutcome::NotAllowed;
        }
        let Some(record) = self.history.pop() else {
            return UndoOutcome::NothingToUndo;
        };

        let seat = record.seat();
        self.board
            .revert(record.position(), record.piece(), record.flipped());
        self.sides[seat.index()].replenish(record.piece().kind());
        self.to_move = seat;
        trace!(
            %seat,
            position = %record.position(),
            num_flipped = record.flipped().len(),
            "Undid placement"
        );
        UndoOutcome::Undone(record)
    }

    /// The game is over once the side to move cannot place a piece anywhere.
    pub fn is_finished(&self) -> bool {
        self.valid_targets().is_empty()
    }

    pub fn tally(&self) -> Tally {
        Tally {
            first: self.board.owned_by(Seat::First).len() as usize,
            second: self.board.owned_by(Seat::Second).len() as usize,
        }
    }

    /// Who is ahead on the board right now.
    pub fn outcome(&self) -> GameOutcome {
        let tally = self.tally();
        match tally.first.cmp(&tally.second) {
            Ordering::Less => GameOutcome::Winner {
                seat: Seat::Second,
                tally,
            },
            Ordering::Equal => GameOutcome::Tie { tally },
            Ordering::Greater => GameOutcome::Winner {
                seat: Seat::First,
                tally,
            },
        }
    }

    /// If the game is finished, credits the winner with a win and reports the outcome.
    ///
    /// Each call on a finished game credits the winner again, so call this
    /// once per game.
    pub fn conclude(&mut self) -> Option<GameOutcome> {
        if !self.is_finished() {
            return None;
        }
        let outcome = self.outcome();
        if let Some(seat) = outcome.winner() {
            self.sides[seat.index()].add_win();
        }
        debug!(?outcome, "Game finished");
        Some(outcome)
    }

    /// Back to the starting position with full special-piece inventories.
    /// Wins are kept.
    pub fn reset(&mut self) {
        self.board = Board::standard();
        self.to_move = Seat::First;
        self.history.clear();
        for side in self.sides.iter_mut() {
            side.reset_inventory();
        }
    }

    /// Replaces both participants and starts over. The new sides have no wins.
    pub fn set_sides(&mut self, first: Controller, second: Controller) {
        self.sides = seated(first, second);
        self.reset();
    }
}

fn seated(first: Controller, second: Controller) -> [Side; 2] {
    [
        Side::new(Seat::First, first),
        Side::new(Seat::Second, second),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{play_script, MoveScript};
    use crate::{INITIAL_BOMBS, INITIAL_UNFLIPPABLES};

    quickcheck! {
        fn place_then_undo_is_identity(script: MoveScript) -> bool {
            let mut game = Game::default();
            play_script(&mut game, &script);
            let snapshot = game.clone();
            for target in game.valid_targets() {
                for kind in PieceKind::ALL {
                    match game.place(target, kind) {
                        Ok(_) => {
                            if !matches!(game.undo(), UndoOutcome::Undone(_)) || game != snapshot {
                                return false;
                            }
                        }
                        Err(IllegalPlacement::NoPiecesLeft { .. }) if game == snapshot => {}
                        Err(_) => return false,
                    }
                }
            }
            true
        }

        fn unwinding_restores_every_earlier_state(script: MoveScript) -> bool {
            let mut game = Game::default();
            let mut snapshots = vec![game.clone()];
            for (idx, kind) in script.0 {
                let targets = game.valid_targets();
                if targets.is_empty() {
                    break;
                }
                let kind = if game.current_side().can_place(kind) { kind } else { PieceKind::Standard };
                game.place(targets[idx % targets.len()], kind).unwrap();
                snapshots.push(game.clone());
            }
            snapshots.pop();
            while let Some(expected) = snapshots.pop() {
                if !matches!(game.undo(), UndoOutcome::Undone(_)) || game != expected {
                    return false;
                }
            }
            game.undo() == UndoOutcome::NothingToUndo
        }

        fn placement_adds_one_piece_and_passes_turn(script: MoveScript) -> bool {
            let mut game = Game::default();
            play_script(&mut game, &script);
            let targets = game.valid_targets();
            let Some(&target) = targets.first() else {
                return true;
            };
            let seat = game.current_seat();
            let before = game.board().occupied().len();
            let placement = game.place(target, PieceKind::Standard).unwrap();
            game.board().occupied().len() == before + 1
                && game.current_seat() == seat.opponent()
                && placement.flipped.iter().all(|&p| game.piece_at(p).unwrap().owner() == seat)
        }

        fn valid_targets_agree_with_placement(script: MoveScript) -> bool {
            let mut game = Game::default();
            play_script(&mut game, &script);
            let targets: BTreeSet<_> = game.valid_targets().into_iter().collect();
            Position::all().all(|p| {
                let mut probe = game.clone();
                probe.place(p, PieceKind::Standard).is_ok() == targets.contains(&p)
            })
        }
    }

    fn game_with_board(board: Board) -> Game {
        Game::with_board(board, Controller::Human, Controller::Human)
    }

    fn full_board(split_row: i8) -> Board {
        let pieces: Vec<_> = Position::all()
            .map(|p| {
                let owner = if p.row < split_row { Seat::First } else { Seat::Second };
                (p, Piece::Standard { owner })
            })
            .collect();
        Board::from_pieces(&pieces)
    }

    #[test]
    fn first_moves_from_standard_start() {
        let game = Game::default();
        assert_eq!(
            game.valid_targets(),
            vec![
                Position::new(2, 4),
                Position::new(3, 5),
                Position::new(4, 2),
                Position::new(5, 3),
            ]
        );
        for target in game.valid_targets() {
            assert_eq!(game.count_flips(target), 1);
        }
    }

    #[test]
    fn second_seat_replies() {
        let mut game = Game::default();
        game.place(Position::new(4, 2), PieceKind::Standard).unwrap();
        assert_eq!(game.current_seat(), Seat::Second);
        assert!(game.valid_targets().contains(&Position::new(5, 2)));
        assert_eq!(game.capture_set(Position::new(5, 2)), vec![Position::new(4, 3)]);
    }

    #[test]
    fn rejected_placements_change_nothing() {
        let mut game = Game::default();
        let before = game.clone();
        for position in [
            Position::new(-1, -1),
            Position::new(8, 8),
            Position::new(0, 8),
            Position::new(8, 0),
            Position::new(i8::MIN, i8::MAX),
        ] {
            for kind in PieceKind::ALL {
                assert_eq!(
                    game.place(position, kind),
                    Err(IllegalPlacement::OutOfBounds { position })
                );
            }
        }
        assert!(matches!(
            game.place(Position::new(3, 3), PieceKind::Standard),
            Err(IllegalPlacement::Occupied { .. })
        ));
        for kind in PieceKind::ALL {
            assert_eq!(
                game.place(Position::new(0, 0), kind),
                Err(IllegalPlacement::NothingCaptured {
                    position: Position::new(0, 0)
                })
            );
        }
        assert_eq!(game, before);
        assert_eq!(game.count_flips(Position::new(-1, 0)), 0);
        assert_eq!(game.piece_at(Position::new(9, 9)), None);
    }

    #[test]
    fn special_pieces_are_limited() {
        let mut game = Game::default();
        while game.current_side().can_place(PieceKind::Unflippable) {
            game.side_mut(Seat::First).consume(PieceKind::Unflippable);
        }
        let before = game.clone();
        assert_eq!(
            game.place(Position::new(2, 4), PieceKind::Unflippable),
            Err(IllegalPlacement::NoPiecesLeft {
                kind: PieceKind::Unflippable
            })
        );
        assert_eq!(game, before);
        // Other kinds are still fine
        game.place(Position::new(2, 4), PieceKind::Bomb).unwrap();
        assert_eq!(game.side(Seat::First).bombs(), INITIAL_BOMBS - 1);
    }

    #[test]
    fn nothing_captured_wins_over_exhausted_counter() {
        let mut game = Game::default();
        while game.current_side().can_place(PieceKind::Bomb) {
            game.side_mut(Seat::First).consume(PieceKind::Bomb);
        }
        let before = game.clone();
        assert_eq!(
            game.place(Position::new(0, 0), PieceKind::Bomb),
            Err(IllegalPlacement::NothingCaptured {
                position: Position::new(0, 0)
            })
        );
        assert_eq!(game, before);
        assert_eq!(
            game.place(Position::new(2, 4), PieceKind::Bomb),
            Err(IllegalPlacement::NoPiecesLeft {
                kind: PieceKind::Bomb
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn unflippable_placement_uses_up_counter() {
        let mut game = Game::default();
        let placement = game.place(Position::new(2, 4), PieceKind::Unflippable).unwrap();
        assert_eq!(placement.flipped, vec![Position::new(3, 4)]);
        assert_eq!(game.side(Seat::First).unflippables(), INITIAL_UNFLIPPABLES - 1);
        assert_eq!(
            game.piece_at(Position::new(2, 4)),
            Some(Piece::Unflippable { owner: Seat::First })
        );
    }

    #[test]
    fn bomb_placement_captures_and_undo_restores_counter() {
        let mut game = Game::default();
        game.place(Position::new(4, 2), PieceKind::Bomb).unwrap();
        assert_eq!(game.piece_at(Position::new(4, 3)).unwrap().owner(), Seat::First);
        assert_eq!(game.side(Seat::First).bombs(), INITIAL_BOMBS - 1);

        assert!(matches!(game.undo(), UndoOutcome::Undone(_)));
        assert_eq!(game.side(Seat::First).bombs(), INITIAL_BOMBS);
        assert_eq!(game, Game::default());
    }

    #[test]
    fn capturing_a_bomb_flips_its_neighbors() {
        let board = Board::from_pieces(&[
            (Position::new(3, 1), Piece::Bomb { owner: Seat::Second }),
            (Position::new(3, 2), Piece::Standard { owner: Seat::First }),
            (Position::new(2, 1), Piece::Standard { owner: Seat::Second }),
            (Position::new(2, 2), Piece::Standard { owner: Seat::Second }),
            (Position::new(4, 1), Piece::Bomb { owner: Seat::Second }),
            (Position::new(5, 1), Piece::Standard { owner: Seat::Second }),
            (Position::new(4, 2), Piece::Unflippable { owner: Seat::Second }),
        ]);
        let mut game = game_with_board(board);
        let before = game.clone();

        let placement = game.place(Position::new(3, 0), PieceKind::Bomb).unwrap();
        let flipped: BTreeSet<_> = placement.flipped.iter().copied().collect();
        assert_eq!(
            flipped,
            BTreeSet::from([
                // The line
                Position::new(3, 1),
                // Blast of the captured bomb, which sets off the second bomb
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(4, 1),
                Position::new(5, 1),
            ])
        );
        assert_eq!(game.tally(), Tally { first: 7, second: 1 });
        assert_eq!(game.piece_at(Position::new(4, 2)).unwrap().owner(), Seat::Second);

        game.undo();
        assert_eq!(game, before);
    }

    #[test]
    fn placed_bomb_does_not_detonate() {
        let board = Board::from_pieces(&[
            (Position::new(3, 1), Piece::Standard { owner: Seat::Second }),
            (Position::new(3, 2), Piece::Standard { owner: Seat::First }),
            // Next to the placed bomb, but on open lines
            (Position::new(2, 0), Piece::Standard { owner: Seat::Second }),
            (Position::new(4, 1), Piece::Standard { owner: Seat::Second }),
        ]);
        let mut game = game_with_board(board);

        let placement = game.place(Position::new(3, 0), PieceKind::Bomb).unwrap();
        assert_eq!(placement.flipped, vec![Position::new(3, 1)]);
        assert_eq!(
            game.piece_at(Position::new(3, 0)),
            Some(Piece::Bomb { owner: Seat::First })
        );
        assert_eq!(game.piece_at(Position::new(2, 0)).unwrap().owner(), Seat::Second);
        assert_eq!(game.piece_at(Position::new(4, 1)).unwrap().owner(), Seat::Second);
        assert_eq!(game.tally(), Tally { first: 3, second: 2 });
    }

    #[test]
    fn undo_multiple_moves() {
        let mut game = Game::default();
        game.place(Position::new(4, 2), PieceKind::Standard).unwrap();
        game.place(Position::new(5, 2), PieceKind::Standard).unwrap();

        let UndoOutcome::Undone(record) = game.undo() else {
            panic!("Expected the second move to be undone");
        };
        assert_eq!(record.seat(), Seat::Second);
        assert_eq!(game.piece_at(Position::new(5, 2)), None);
        assert!(game.piece_at(Position::new(4, 2)).is_some());
        assert_eq!(game.current_seat(), Seat::Second);

        game.undo();
        assert_eq!(game.piece_at(Position::new(4, 2)), None);
        assert_eq!(game.current_seat(), Seat::First);
        assert_eq!(game.undo(), UndoOutcome::NothingToUndo);
        assert_eq!(game.undo(), UndoOutcome::NothingToUndo);
        assert_eq!(game, Game::default());
    }

    #[test]
    fn undo_needs_two_humans() {
        let mut game = Game::new(Controller::Human, Controller::Automated);
        game.place(Position::new(4, 2), PieceKind::Standard).unwrap();
        let before = game.clone();
        assert_eq!(game.undo(), UndoOutcome::NotAllowed);
        assert_eq!(game, before);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn full_board_is_finished() {
        let mut game = game_with_board(full_board(4));
        assert!(game.valid_targets().is_empty());
        assert!(game.is_finished());
        assert!(game.board().is_full());
        assert_eq!(
            game.conclude(),
            Some(GameOutcome::Tie {
                tally: Tally { first: 32, second: 32 }
            })
        );
        assert_eq!(game.side(Seat::First).wins(), 0);
        assert_eq!(game.side(Seat::Second).wins(), 0);
    }

    #[test]
    fn winner_is_credited() {
        let mut game = game_with_board(full_board(5));
        let outcome = game.conclude().unwrap();
        assert_eq!(outcome.winner(), Some(Seat::First));
        assert_eq!(outcome.tally().of(Seat::First), 40);
        assert_eq!(game.side(Seat::First).wins(), 1);
        assert_eq!(game.side(Seat::Second).wins(), 0);
    }

    #[test]
    fn unfinished_game_does_not_conclude() {
        let mut game = Game::default();
        assert!(!game.is_finished());
        assert_eq!(game.conclude(), None);
        assert_eq!(
            game.outcome(),
            GameOutcome::Tie {
                tally: Tally { first: 2, second: 2 }
            }
        );
    }

    #[test]
    fn reset_restores_start() {
        let mut game = Game::default();
        game.place(Position::new(4, 2), PieceKind::Bomb).unwrap();
        game.place(Position::new(5, 2), PieceKind::Unflippable).unwrap();
        game.side_mut(Seat::Second).add_win();
        game.reset();
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.current_seat(), Seat::First);
        assert!(game.history().is_empty());
        assert_eq!(game.side(Seat::First).bombs(), INITIAL_BOMBS);
        assert_eq!(game.side(Seat::Second).unflippables(), INITIAL_UNFLIPPABLES);
        assert_eq!(game.side(Seat::Second).wins(), 1);
    }

    #[test]
    fn set_sides_starts_over() {
        let mut game = Game::default();
        game.place(Position::new(4, 2), PieceKind::Standard).unwrap();
        game.side_mut(Seat::First).add_win();
        game.set_sides(Controller::Automated, Controller::Human);
        assert_eq!(game.board(), &Board::standard());
        assert!(!game.undo_allowed());
        assert_eq!(game.side(Seat::First).wins(), 0);
        assert_eq!(game.side(Seat::First).seat(), Seat::First);
        assert!(game.side(Seat::Second).is_human());
    }
}
