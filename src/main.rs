use std::io::{self, Write};

use clap::Parser;
use minesweeper::tui;
use minesweeper::{Difficulty, Game, RevealOutcome};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "minesweeper", about = "Terminal Minesweeper", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Difficulty preset: beginner, intermediate or expert
    #[arg(long, default_value = "beginner")]
    difficulty: Difficulty,
}

fn print_help() {
    println!("Commands:");
    println!("  r x y   - reveal cell at column x, row y (1-based)");
    println!("  f x y   - toggle flag at x, y (1-based)");
    println!("  q       - quit");
    println!("  h/help  - show this help");
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if args.tui {
        if let Err(e) = tui::run_tui(args.difficulty) {
            eprintln!("TUI error: {}", e);
        }
        return;
    }

    let mut game = Game::new(args.difficulty);
    let board = game.board();
    println!("Minesweeper ({}) {}x{} with {} mines", args.difficulty, board.width(), board.height(), board.mine_count());
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    loop {
        println!("\nMines left: {}", game.remaining_mines());
        println!("{}", game.board());
        if game.is_won() {
            println!("Congratulations! You cleared the board!\n");
            println!("Final board (mines shown):\n{}", game.board().render(true, true));
            break;
        }
        if game.is_over() {
            println!("Boom! You hit a mine. Game over.\n");
            println!("Final board:\n{}", game.board());
            break;
        }

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        if io::stdin().read_line(&mut input).is_err() { break; }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => { print_help(); continue; },
            "r" | "reveal" => {
                let Some((x, y)) = parse_coords(&parts) else { continue; };
                match game.reveal(x, y) {
                    Ok(RevealOutcome::Blocked) => { println!("That cell is flagged; unflag it first."); }
                    Ok(RevealOutcome::Detonated) | Ok(RevealOutcome::Revealed(_)) => { /* handled at loop top */ }
                    Err(e) => {
                        error!(%e, "reveal rejected");
                        println!("{}", e);
                    }
                }
            }
            "f" | "flag" => {
                let Some((x, y)) = parse_coords(&parts) else { continue; };
                match game.toggle_flag(x, y) {
                    Ok(0) => { println!("Cannot flag a revealed cell."); }
                    Ok(_) => {}
                    Err(e) => {
                        error!(%e, "flag rejected");
                        println!("{}", e);
                    }
                }
            }
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
            }
        }
    }
}

/// Parse the two 1-based coordinate arguments of `r`/`f` into 0-based.
fn parse_coords(parts: &[&str]) -> Option<(usize, usize)> {
    if parts.len() < 3 { println!("Usage: {} x y", parts[0]); return None; }
    let x = match parts[1].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid x"); return None; } };
    let y = match parts[2].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid y"); return None; } };
    if x == 0 || y == 0 { println!("Use 1-based coordinates"); return None; }
    Some((x - 1, y - 1))
}
