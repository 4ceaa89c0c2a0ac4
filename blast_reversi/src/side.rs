use serde::{Deserialize, Serialize};

use crate::{PieceKind, Seat};

pub const INITIAL_BOMBS: u8 = 3;
pub const INITIAL_UNFLIPPABLES: u8 = 2;

/// Who makes the decisions for a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Human,
    Automated,
}

/// The state of one participant: its seat, its record across games,
/// and the special pieces it has left in the current game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Side {
    seat: Seat,
    pub controller: Controller,
    wins: u32,
    bombs: u8,
    unflippables: u8,
}

impl Side {
    pub fn new(seat: Seat, controller: Controller) -> Self {
        Self {
            seat,
            controller,
            wins: 0,
            bombs: INITIAL_BOMBS,
            unflippables: INITIAL_UNFLIPPABLES,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn is_human(&self) -> bool {
        self.controller == Controller::Human
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn bombs(&self) -> u8 {
        self.bombs
    }

    pub fn unflippables(&self) -> u8 {
        self.unflippables
    }

    /// How many pieces of this kind may still be placed. Standard pieces are unlimited.
    pub fn remaining(&self, kind: PieceKind) -> Option<u8> {
        match kind {
            PieceKind::Standard => None,
            PieceKind::Bomb => Some(self.bombs),
            PieceKind::Unflippable => Some(self.unflippables),
        }
    }

    pub fn can_place(&self, kind: PieceKind) -> bool {
        self.remaining(kind).map_or(true, |n| n > 0)
    }

    /// Uses up one piece of this kind. Returns false if there was none left.
    pub(crate) fn consume(&mut self, kind: PieceKind) -> bool {
        let counter = match kind {
            PieceKind::Standard => return true,
            PieceKind::Bomb => &mut self.bombs,
            PieceKind::Unflippable => &mut self.unflippables,
        };
        match counter.checked_sub(1) {
            Some(n) => {
                *counter = n;
                true
            }
            None => false,
        }
    }

    /// Gives back a piece of this kind, e.g. when its placement is undone.
    pub(crate) fn replenish(&mut self, kind: PieceKind) {
        match kind {
            PieceKind::Standard => {}
            PieceKind::Bomb => self.bombs += 1,
            PieceKind::Unflippable => self.unflippables += 1,
        }
    }

    pub fn reset_inventory(&mut self) {
        self.bombs = INITIAL_BOMBS;
        self.unflippables = INITIAL_UNFLIPPABLES;
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }
}
