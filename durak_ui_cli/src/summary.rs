use std::fmt;

use durak_core::game::RoundResult;
use serde::Serialize;

/// Tally of round results over a simulation run.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    /// Rounds recorded per seat, indexed by player id.
    pub winners: Vec<usize>,
    pub draws: usize,
}

impl Summary {
    pub fn new(players: usize) -> Self {
        Summary {
            games: 0,
            winners: vec![0; players],
            draws: 0,
        }
    }

    pub fn record(&mut self, result: RoundResult) {
        self.games += 1;
        match result {
            RoundResult::Player(id) => {
                if id >= self.winners.len() {
                    self.winners.resize(id + 1, 0);
                }
                self.winners[id] += 1;
            }
            RoundResult::Draw => self.draws += 1,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} games played", self.games)?;
        for (id, count) in self.winners.iter().enumerate() {
            writeln!(f, "  {}: {}", id, count)?;
        }
        writeln!(f, "  draw: {}", self.draws)
    }
}
