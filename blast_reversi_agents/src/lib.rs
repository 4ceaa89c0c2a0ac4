mod greedy;
mod random;
pub use greedy::*;
pub use random::*;

use anyhow::Context;
use blast_reversi::{Game, PieceKind, Placement, Position};
use serde::{Deserialize, Serialize};

/// A placement an agent would like to make.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProposedMove {
    pub position: Position,
    pub kind: PieceKind,
}

/// A trait to simplify writing automated players.
///
/// Agents only look at the game; the move they propose is applied by
/// [`Agent::play_turn()`] through [`Game::place()`].
pub trait Agent {
    fn name(&self) -> &str;
    /// Returns `None` if there is no valid target.
    fn propose(&mut self, game: &Game) -> Option<ProposedMove>;

    /// Proposes a move for the side to move and applies it.
    ///
    /// Returns `None` if the agent had nothing to propose, and an error if
    /// the proposed move was illegal.
    fn play_turn(&mut self, game: &mut Game) -> anyhow::Result<Option<Placement>> {
        let Some(ProposedMove { position, kind }) = self.propose(game) else {
            return Ok(None);
        };
        let placement = game
            .place(position, kind)
            .with_context(|| format!("{} proposed an illegal move", self.name()))?;
        Ok(Some(placement))
    }
}

/// The available agent implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Greedy,
}

impl AgentKind {
    /// The seed is only used by agents that make random choices.
    pub fn build(self, name: &str, seed: u64) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::from_seed(name, seed)),
            AgentKind::Greedy => Box::new(GreedyAgent::new(name)),
        }
    }
}
