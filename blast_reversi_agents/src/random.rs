use blast_reversi::{Game, PieceKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::trace;

use crate::{Agent, ProposedMove};

/// Kinds the agent draws from, with equal probability.
const DRAW: [PieceKind; 3] = [PieceKind::Standard, PieceKind::Unflippable, PieceKind::Bomb];

/// Picks a valid target uniformly at random, and a random kind of piece.
///
/// If the drawn special kind is used up, a standard piece is placed instead.
/// The special-piece inventory is the one of the [`Side`](blast_reversi::Side)
/// in the game; the agent keeps no count of its own.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(name: &str, rng: StdRng) -> Self {
        Self {
            name: String::from(name),
            rng,
        }
    }

    pub fn from_seed(name: &str, seed: u64) -> Self {
        Self::new(name, StdRng::seed_from_u64(seed))
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose(&mut self, game: &Game) -> Option<ProposedMove> {
        let position = *game.valid_targets().choose(&mut self.rng)?;
        let drawn = *DRAW.choose(&mut self.rng)?;
        let kind = if game.current_side().can_place(drawn) {
            drawn
        } else {
            PieceKind::Standard
        };
        trace!(agent = %self.name, %position, %drawn, %kind, "Random choice");
        Some(ProposedMove { position, kind })
    }
}
