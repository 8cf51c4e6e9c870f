use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::logging::{self, LogTarget};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Write logs to this file instead of stderr
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run headless games with random input and print a summary per game
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));

    // The terminal UI owns the screen, so interactive play only logs to a file
    let log_target = match (&args.log_file, &mode) {
        (Some(path), _) => LogTarget::File(path),
        (None, Mode::Play(_)) => LogTarget::Disabled,
        (None, Mode::Simulate(_)) => LogTarget::Stderr,
    };
    logging::init(log_target, args.verbose)?;

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default_mode() {
        let args = CommandArgs::try_parse_from(["tetris"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CommandArgs::try_parse_from(["tetris", "simulate", "-vv", "--log-file", "out.log"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.log_file, Some(PathBuf::from("out.log")));
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_play_seed_parsed_from_hex() {
        let args = CommandArgs::try_parse_from([
            "tetris",
            "play",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
            "--no-ghost",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(
            arg.seed.map(|seed| *seed.as_bytes()),
            Some([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15])
        );
        assert!(arg.no_ghost);
        assert!(!arg.mute);
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let result = CommandArgs::try_parse_from(["tetris", "play", "--seed", "xyz"]);
        assert!(result.is_err());
    }
}
