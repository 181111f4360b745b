use game::{Game, RoundResult};
use player::Player;
use rand::Rng;
use rules::Rules;

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod field;
pub mod game;
pub mod player;
pub mod random_player;
pub mod rules;
pub mod scripted_player;

pub use error::DurakError;

/// Deals a fresh shuffled deck to `players` and plays the round to the end.
pub fn run_game<R: Rng + ?Sized>(
    players: Vec<Box<dyn Player>>,
    rules: Rules,
    rng: &mut R,
) -> Result<RoundResult, DurakError> {
    let mut game = Game::new(players, rules)?;
    game.preparations(rng)?;
    game.play_loop()
}
