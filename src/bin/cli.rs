use std::io::{self, BufRead};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nattty::{dispatch, parse_command, Command, GameState, Outcome, Response};

/// Play tic-tac-toe by typing square numbers 1-9.
#[derive(Parser, Debug)]
#[command(name = "ttt-cli", version)]
struct Cli {
    /// Don't reprint the board after every move
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    info!(quiet = cli.quiet, "starting ttt-cli");

    let mut game = GameState::new();

    println!("Welcome to Tic Tac Toe!\n");
    println!("Type 1-9 to take a square, r to reset, s for scores, q to quit.\n");
    println!("{}", game.board());
    println!("Turn: {}", game.current_player());

    let stdin = io::stdin().lock();
    for line in stdin.lines() {
        let line = line?;

        let command = match parse_command(&line, &game) {
            Ok(command) => command,
            Err(err) => {
                warn!(input = %line.trim(), %err, "rejected input");
                println!("{}", err);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::ShowScores => println!("{}", game.score_summary()),
            Command::Play(event) => match dispatch(&mut game, event) {
                Response::Moved(outcome) => {
                    if !cli.quiet {
                        println!("\n{}", game.board());
                    }
                    match outcome {
                        Outcome::Continue(turn) => println!("Turn: {}", turn),
                        Outcome::Win { winner, line } => {
                            let squares: Vec<String> =
                                line.iter().map(|i| (i + 1).to_string()).collect();
                            println!("Player {} wins! ({})", winner, squares.join("-"));
                            println!("{}", game.score_summary());
                            println!("Type r to play again.");
                        }
                        Outcome::Draw => {
                            println!("The game is a draw.");
                            println!("{}", game.score_summary());
                            println!("Type r to play again.");
                        }
                    }
                }
                Response::Ignored => println!("That square can't be played."),
                Response::Reset => {
                    println!("\nNew round!\n");
                    println!("{}", game.board());
                    println!("Turn: {}", game.current_player());
                }
            },
        }
    }

    info!(scores = %game.score_summary(), "goodbye");
    println!("{}", game.score_summary());
    Ok(())
}
