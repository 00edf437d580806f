use std::io::{BufRead, Write};

use chess_rules::{Board, Color, Game, MoveOutcome};
use clap::Parser;
use itertools::Itertools;

mod command;

use command::Command;

/// Play chess against yourself in the terminal. Moves are entered as two squares, e.g. `E2 E4`.
#[derive(Parser)]
struct Opts {
    /// some starting position, in FEN format
    #[clap(short, long)]
    fen: Option<String>,
    /// draw pieces as chess glyphs instead of letters
    #[clap(short, long)]
    unicode: bool,
}

macro_rules! retry {
    ($e:expr, $game:expr) => {{
        match $e {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                prompt(&$game)?;
                continue;
            }
        }
    }};
}

fn prompt(game: &Game) -> std::io::Result<()> {
    if game.is_active() {
        if !game.board().has_legal_move(game.player_to_move()) {
            eprintln!("no legal moves, `resign` or `undo`");
        }
        print!("{} make a move: ", game.player_to_move());
    } else {
        print!("game over, `undo` or `new`: ");
    }
    std::io::stdout().flush()
}

fn render(board: &Board, unicode: bool) -> String {
    if !unicode {
        return board.to_string();
    }
    let files = "  A B C D E F G H";
    let snapshot = board.snapshot();
    let ranks = snapshot.iter().enumerate().map(|(row, cells)| {
        let cells = cells
            .iter()
            .map(|cell| cell.map_or('·', |piece| piece.glyph()))
            .join(" ");
        format!("{} {cells} {}", 8 - row, 8 - row)
    });
    std::iter::once(files.to_string())
        .chain(ranks)
        .chain(std::iter::once(files.to_string()))
        .join("\n")
}

fn report(outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::None => {}
        MoveOutcome::Check(color) => eprintln!("{color} is in check"),
        MoveOutcome::Checkmate(color) => eprintln!("{color} is checkmated"),
        MoveOutcome::Stalemate(color) => eprintln!("{color} is stalemated"),
        MoveOutcome::KingCaptured { winner } => eprintln!("{winner} took the king"),
    }
    if let Some(result) = outcome.result() {
        eprintln!("{result}");
    }
}

/// `1-0` or `0-1` for the side that did not resign
fn resign_result(loser: Color) -> &'static str {
    loser.other().win_result()
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let mut game = match &opts.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    let stdin = std::io::stdin();
    println!("{}", render(game.board(), opts.unicode));
    prompt(&game)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let command: Command = retry!(line.parse(), game);

        match command {
            Command::Move(from, to) => {
                let info = retry!(game.try_make_move(from, to), game);
                println!("{}", render(game.board(), opts.unicode));
                eprintln!("{info}");
                if let Some(captured) = info.captured {
                    eprintln!("took {captured}");
                }
                report(game.check_outcome());
            }
            Command::Undo => {
                if game.undo_move() {
                    println!("{}", render(game.board(), opts.unicode));
                } else {
                    eprintln!("nothing to undo");
                }
            }
            Command::Moves(from) => {
                let moves = game.board().legal_moves(from);
                if moves.is_empty() {
                    eprintln!("{from} cannot move");
                } else {
                    eprintln!("{from}: {}", moves.iter().join(", "));
                }
            }
            Command::New => {
                game.new_game();
                println!("{}", render(game.board(), opts.unicode));
            }
            Command::Resign => {
                if game.is_active() {
                    let loser = game.player_to_move();
                    game.end_game();
                    eprintln!("{loser} resigns");
                    eprintln!("{}", resign_result(loser));
                }
            }
            Command::Quit => break,
        }

        prompt(&game)?;
    }

    Ok(())
}
