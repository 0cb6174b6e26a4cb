use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use chess_rules::board::DrawStyle;
use chess_rules::{GameController, Move, Selection, Square, Transition};
use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess_rules")]
#[command(about = "Two player chess in the terminal")]
struct Args {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Draw pieces as letters instead of chess glyphs
    #[arg(long)]
    ascii: bool,

    /// Draw the board from black's side
    #[arg(long)]
    flip: bool,
}

const HELP: &str = "\
Commands:
  <square>   select a piece or move the selected one, e.g. e2 then e4
  moves      print the moves played so far
  reset      start a new game
  help       show this message
  quit       leave";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let style = DrawStyle {
        ascii: args.ascii,
        flip: args.flip,
    };
    let mut game = GameController::new();
    let mut stdout = io::stdout();

    println!("{HELP}\n");
    render(&game, style);
    prompt(&mut stdout)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "reset" => {
                game.reset();
                render(&game, style);
            }
            "moves" => {
                let record = game.record();
                if record.is_empty() {
                    println!("No moves yet.");
                } else {
                    println!("Game started {}", record.started_at().format("%Y-%m-%d %H:%M"));
                    print!("{}", record.to_human());
                }
            }
            name => match Square::from_name(name) {
                Ok(square) => {
                    let transition = game.select_or_move(square);
                    report(&game, transition, square);
                    render(&game, style);
                }
                Err(err) => println!("{err}. Type `help` for commands."),
            },
        }
        prompt(&mut stdout)?;
    }
    Ok(())
}

fn report(game: &GameController, transition: Transition, square: Square) {
    match transition {
        Transition::Moved(m) => println!("{m}"),
        Transition::Rejected { from, to } => println!("{from} cannot move to {to}"),
        Transition::Ignored if game.status().is_over() => {
            println!("The game is over. Type `reset` to play again.")
        }
        Transition::Ignored => println!("No {} piece on {square}", game.position().side_to_move()),
        Transition::Selected(_) | Transition::Deselected => {}
    }
}

/// Board with the selection bracketed and its destinations marked, then the status line.
fn render(game: &GameController, style: DrawStyle) {
    let mut marks = HashMap::new();
    if let Selection::Selected(from) = game.selection() {
        marks.insert(from, '#');
        for to in game.selected_destinations() {
            let capture = Move::infer(game.position(), from, to)
                .map(|m| m.captured.is_some())
                .unwrap_or(false);
            marks.insert(to, if capture { 'x' } else { '*' });
        }
    }
    println!("{}", game.position().draw_board_with(style, &marks));
    println!("{}", game.status_text());
}

fn prompt(stdout: &mut io::Stdout) -> Result<()> {
    print!("> ");
    stdout.flush()?;
    Ok(())
}
