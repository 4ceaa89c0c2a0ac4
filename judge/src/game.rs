use anyhow::Context;
use blast_reversi::{Controller, Game, GameOutcome};
use tracing::{debug, info};

use crate::player::Player;
use crate::render::render_board;

/// Summarizes a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub num_moves: usize,
}

/// A game with two automated players. The first player sits in the first seat.
pub fn new_game() -> Game {
    Game::new(Controller::Automated, Controller::Automated)
}

/// Plays one game from the starting position until the side to move is stuck.
///
/// Returns an error if a player proposes an illegal move.
pub fn play_game(
    game: &mut Game,
    mut players: [&mut Player; 2],
    show_board: bool,
) -> anyhow::Result<GameResult> {
    game.reset();

    while !game.is_finished() {
        let seat = game.current_seat();
        let player = &mut players[seat.index()];
        let placement = player
            .agent
            .play_turn(game)?
            .with_context(|| format!("{} had valid targets, but made no move", player.name))?;

        info!(
            player = %player.name,
            %seat,
            position = %placement.position,
            piece = %placement.piece.kind(),
            num_flipped = placement.flipped.len(),
            "Placed"
        );
        for position in &placement.flipped {
            debug!(player = %player.name, %position, "Flipped");
        }
        if show_board {
            eprintln!("{}", render_board(game.board()));
        }
    }

    let num_moves = game.history().len();
    let outcome = game
        .conclude()
        .context("Game loop ended before the game was finished")?;
    match outcome {
        GameOutcome::Winner { seat, tally } => info!(
            winner = %players[seat.index()].name,
            pieces = tally.of(seat),
            opponent_pieces = tally.of(seat.opponent()),
            num_moves,
            "Game over"
        ),
        GameOutcome::Tie { tally } => info!(pieces = tally.first, num_moves, "Game over, tie"),
    }
    Ok(GameResult { outcome, num_moves })
}
