use std::cmp::Reverse;

use blast_reversi::{Game, PieceKind, Position};
use tracing::trace;

use crate::{Agent, ProposedMove};

/// Places a standard piece wherever it captures the most.
///
/// Ties go to the rightmost column, then to the topmost row.
pub struct GreedyAgent {
    name: String,
}

impl GreedyAgent {
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
        }
    }
}

// Larger is better
fn preference(game: &Game, position: Position) -> (usize, i8, Reverse<i8>) {
    (game.count_flips(position), position.col, Reverse(position.row))
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose(&mut self, game: &Game) -> Option<ProposedMove> {
        let position = game
            .valid_targets()
            .into_iter()
            .max_by_key(|&p| preference(game, p))?;
        trace!(agent = %self.name, %position, num_flips = game.count_flips(position), "Greedy choice");
        Some(ProposedMove {
            position,
            kind: PieceKind::Standard,
        })
    }
}
