use std::process::ExitCode;
use std::time::SystemTime;

use clap::{Parser, Subcommand};
use log::{LevelFilter, error};

use crate::move_generator::{Piece, piece_from_name};

mod board;
mod keypad;
mod knights_tour;
mod move_generator;
mod phone_numbers;
mod search;

#[derive(Parser)]
#[command(name = "chesspad", version)]
#[command(about = "Enumerates the phone numbers a chess piece can dial walking a telephone keypad")]
struct Cli {
    /// Increase log output; may be given up to three times
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Output every phone number the piece can dial from the starting key
    Numbers {
        /// Starting piece: king, queen, bishop, knight, rook or pawn
        #[arg(value_parser = parse_piece)]
        piece: Piece,

        /// Key the piece starts from; must be a digit key
        start_key: char,

        /// Number of digits to dial
        #[arg(default_value_t = phone_numbers::DEFAULT_LENGTH)]
        length: usize,

        /// Only report how many numbers were found
        #[arg(short, long)]
        summary: bool,
    },
    /// Output every knight's tour visiting each key exactly once
    Tours {
        /// Key the knight starts from
        start_key: char,
    },
}

fn parse_piece(name: &str) -> Result<Piece, String> {
    piece_from_name(name).ok_or_else(|| format!("unrecognized piece '{name}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = setup_logger(cli.verbose) {
        eprintln!("failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }
    log_panics::init();

    let result = match cli.command {
        Command::Numbers {
            piece,
            start_key,
            length,
            summary,
        } => phone_numbers::run(piece, start_key, length, summary),
        Command::Tours { start_key } => knights_tour::run(start_key),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logger(verbose: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // stdout carries the enumerated sequences; logs stay on stderr.
        .chain(std::io::stderr())
        .apply()
}
