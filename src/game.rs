use crate::board::{Board, Difficulty, RevealOutcome};
use crate::error::Error;

/// Presentation-facing game state around a [`Board`]: the game-over
/// latch and the remaining-mines counter. The board itself has no idea
/// whether the game has ended; this wrapper does, and swallows input
/// once it has. Starting over means building a fresh `Game`.
pub struct Game {
    board: Board,
    remaining_mines: i32,
    over: bool,
    won: bool,
}

impl Game {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_board(Board::new(difficulty))
    }

    pub fn from_board(board: Board) -> Self {
        let remaining_mines = board.mine_count() as i32;
        Self { board, remaining_mines, over: false, won: false }
    }

    /// Forwarded to [`Board::reveal_at`] while the game is running. A
    /// detonation discloses every non-flagged cell on the board; a safe
    /// reveal re-checks the win condition.
    pub fn reveal(&mut self, x: usize, y: usize) -> Result<RevealOutcome, Error> {
        if self.over {
            return Ok(RevealOutcome::Blocked);
        }
        let outcome = self.board.reveal_at(x, y)?;
        match outcome {
            RevealOutcome::Detonated => {
                self.board.reveal_all_unflagged();
                self.over = true;
            }
            RevealOutcome::Revealed(_) => {
                if self.board.check_win() {
                    self.over = true;
                    self.won = true;
                }
            }
            RevealOutcome::Blocked => {}
        }
        Ok(outcome)
    }

    /// Forwarded to [`Board::toggle_flag_at`] while the game is running.
    /// The delta feeds the remaining-mines counter, which goes negative
    /// when the player places more flags than there are mines.
    pub fn toggle_flag(&mut self, x: usize, y: usize) -> Result<i8, Error> {
        if self.over {
            return Ok(0);
        }
        let delta = self.board.toggle_flag_at(x, y)?;
        self.remaining_mines += i32::from(delta);
        Ok(delta)
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn is_over(&self) -> bool { self.over }
    pub fn is_won(&self) -> bool { self.won }
    pub fn remaining_mines(&self) -> i32 { self.remaining_mines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detonation_ends_the_game_and_discloses_the_board() {
        let mut game = Game::from_board(Board::with_mines(3, 3, &[(1, 1)]));
        game.toggle_flag(0, 0).unwrap();
        assert_eq!(game.reveal(1, 1).unwrap(), RevealOutcome::Detonated);
        assert!(game.is_over());
        assert!(!game.is_won());
        for y in 0..3 {
            for x in 0..3 {
                let c = game.board().get(x, y).unwrap();
                if (x, y) == (0, 0) {
                    assert!(c.is_flagged(), "flags survive the disclosure");
                } else {
                    assert!(c.is_revealed());
                }
            }
        }
    }

    #[test]
    fn input_is_ignored_after_game_over() {
        let mut game = Game::from_board(Board::with_mines(3, 3, &[(1, 1)]));
        game.reveal(1, 1).unwrap();
        assert!(game.is_over());
        assert_eq!(game.reveal(0, 0).unwrap(), RevealOutcome::Blocked);
        assert_eq!(game.toggle_flag(2, 2).unwrap(), 0);
        assert_eq!(game.remaining_mines(), 1);
    }

    #[test]
    fn clearing_all_safe_cells_wins() {
        let mut game = Game::from_board(Board::with_mines(2, 2, &[(0, 0)]));
        game.reveal(1, 0).unwrap();
        game.reveal(0, 1).unwrap();
        assert!(!game.is_over());
        game.reveal(1, 1).unwrap();
        assert!(game.is_over());
        assert!(game.is_won());
        // The untouched mine stays hidden on a win.
        assert!(!game.board().get(0, 0).unwrap().is_revealed());
    }

    #[test]
    fn remaining_mines_follows_flag_deltas() {
        let mut game = Game::from_board(Board::with_mines(2, 2, &[(0, 0)]));
        assert_eq!(game.remaining_mines(), 1);
        game.toggle_flag(0, 0).unwrap();
        assert_eq!(game.remaining_mines(), 0);
        game.toggle_flag(1, 1).unwrap();
        assert_eq!(game.remaining_mines(), -1);
        game.toggle_flag(1, 1).unwrap();
        game.toggle_flag(0, 0).unwrap();
        assert_eq!(game.remaining_mines(), 1);
    }
}
