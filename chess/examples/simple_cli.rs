// Simple command-line application to play chess

use rookery::{board::PrettyStyle, movegen, Color, Game, GameStatus, Outcome, WinReason};
use std::io::{self, BufRead, Write};

fn main() {
    let mut stdin = io::stdin().lock();

    let mut game = Game::new_initial();

    loop {
        if let Some(outcome) = game.outcome() {
            println!("Game finished: {}", outcome);
            println!("Notation:");
            println!("{}", game.notation());
            break;
        }

        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        let side = side_name(game.side());
        if game.status() == Ok(GameStatus::Check) {
            println!("{} is in check", side);
        }
        print!("{} move ({}): ", side, game.len() / 2 + 1);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        match s {
            "undo" => {
                game.pop();
                game.pop();
                println!();
                continue;
            }
            "resign" => {
                let winner = game.side().inv();
                game.set_outcome(Outcome::new(winner, WinReason::Resign))
                    .unwrap();
                continue;
            }
            _ => {}
        }

        // A single square lists where the piece on it can go.
        if let Ok(src) = s.parse() {
            let dsts: Vec<String> = movegen::calculate_possible_moves(game.board(), src)
                .into_iter()
                .map(|c| c.to_string())
                .collect();
            println!("Possible moves: {}", dsts.join(" "));
            println!();
            continue;
        }

        match game.push_str(s) {
            Ok(record) => println!("{}", record),
            Err(e) => println!("Bad move: {}", e),
        }
        println!();

        // Stalemate is not reported by the engine, so the game stops with no winner.
        if !game.is_finished() && !movegen::has_legal_moves(game.board(), game.side()) {
            println!("{} has no legal moves", side_name(game.side()));
            println!("{}", game.notation());
            break;
        }
    }
}

fn side_name(c: Color) -> &'static str {
    match c {
        Color::White => "White",
        Color::Black => "Black",
    }
}
