use blast_reversi::{GameOutcome, Seat};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::game::{new_game, play_game};
use crate::player::{Player, PlayerConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub wins: [usize; 2],
    pub ties: usize,
}

impl MatchScore {
    pub fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.ties
    }
}

/// Plays `num_games` games between two players, the first of which always
/// sits in the first seat.
pub fn play_matchup(
    configs: [&PlayerConfig; 2],
    num_games: usize,
    rng: &mut StdRng,
    show_board: bool,
) -> anyhow::Result<MatchScore> {
    let mut player_1 = Player::from_config(configs[0], rng.gen());
    let mut player_2 = Player::from_config(configs[1], rng.gen());
    let mut game = new_game();
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        let result = play_game(&mut game, [&mut player_1, &mut player_2], show_board)?;
        match result.outcome {
            GameOutcome::Winner { seat, .. } => {
                debug!(winner = %configs[seat.index()].nick, game_idx);
                match_score.wins[seat.index()] += 1;
            }
            GameOutcome::Tie { .. } => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
        }
    }

    // The game instance keeps the win counters across resets
    for seat in [Seat::First, Seat::Second] {
        let side = game.side(seat);
        debug!(player = %configs[seat.index()].nick, seat = %side.seat(), wins = side.wins());
        debug_assert_eq!(side.wins() as usize, match_score.wins[seat.index()]);
    }

    eprintln!(
        "End result:\n- {} wins by {}\n- {} wins by {}\n- {} ties",
        match_score.wins[0], configs[0].nick, match_score.wins[1], configs[1].nick, match_score.ties
    );
    Ok(match_score)
}
