use std::{
    io::{self, Write as _},
    time::Duration,
};

use anyhow::Context as _;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tetris_engine::{Command, GameSession, PieceSeed};

/// Simulated frame length (60 Hz).
const FRAME: Duration = Duration::from_millis(16);

/// Commands a simulated player sends. Pausing and restarting are left out.
const INPUT_COMMANDS: [Command; 6] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::SoftDrop,
    Command::Rotate,
    Command::HardDrop,
    Command::Hold,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for the whole run (32 hex digits); random when omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Stop a game after this many locked pieces
    #[arg(long, default_value_t = 1000)]
    max_pieces: usize,
}

/// Result of one simulated game, printed as a JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct GameSummary {
    game: usize,
    seed: PieceSeed,
    score: usize,
    level: usize,
    lines: usize,
    pieces: usize,
    /// Single, double, triple and four-line clear counts.
    line_clears: [usize; 4],
    game_over: bool,
    play_time_secs: f64,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        games,
        max_pieces,
    } = arg;

    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(%seed, games, max_pieces, "starting simulation");

    let mut rng = Pcg32::from_seed(*seed.as_bytes());
    let mut stdout = io::stdout().lock();
    for game in 0..*games {
        let game_seed = rng.random();
        let input_rng = Pcg32::from_rng(&mut rng);
        let summary = simulate_game(game, game_seed, input_rng, *max_pieces);
        tracing::info!(
            game,
            score = summary.score,
            lines = summary.lines,
            pieces = summary.pieces,
            "game finished"
        );

        serde_json::to_writer(&mut stdout, &summary)
            .context("Failed to write game summary to stdout")?;
        writeln!(stdout).context("Failed to write newline to stdout")?;
    }
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Plays one game with random input, one command per frame.
fn simulate_game<R>(game: usize, seed: PieceSeed, mut rng: R, max_pieces: usize) -> GameSummary
where
    R: Rng,
{
    let mut session = GameSession::with_seed(seed);
    while !session.state().is_game_over()
        && session.state().stats().completed_pieces() < max_pieces
    {
        let command = INPUT_COMMANDS[rng.random_range(0..INPUT_COMMANDS.len())];
        session.enqueue(command);
        session.tick(FRAME);
        session.drain_events().for_each(drop);
    }

    let state = session.state();
    let stats = state.stats();
    let [_, singles, doubles, triples, fours] = *stats.line_cleared_counter();
    GameSummary {
        game,
        seed,
        score: state.score(),
        level: state.level(),
        lines: state.lines(),
        pieces: stats.completed_pieces(),
        line_clears: [singles, doubles, triples, fours],
        game_over: state.is_game_over(),
        play_time_secs: session.play_time().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([3; 16]);

    fn input_rng() -> Pcg32 {
        Pcg32::seed_from_u64(11)
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = simulate_game(0, SEED, input_rng(), 50);
        let b = simulate_game(0, SEED, input_rng(), 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_piece_limit_stops_game() {
        let summary = simulate_game(0, SEED, input_rng(), 5);
        assert!(summary.game_over || summary.pieces == 5);
        assert!(summary.pieces <= 5);
    }

    #[test]
    fn test_unbounded_game_ends_in_game_over() {
        let summary = simulate_game(0, SEED, input_rng(), usize::MAX);
        assert!(summary.game_over);
        assert!(summary.pieces > 0);
        assert_eq!(
            summary.lines,
            summary
                .line_clears
                .iter()
                .enumerate()
                .map(|(i, count)| (i + 1) * count)
                .sum::<usize>()
        );
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = simulate_game(2, SEED, input_rng(), 3);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["game"], 2);
        assert_eq!(value["seed"], SEED.to_string());
        assert!(value["line_clears"].is_array());
    }
}
