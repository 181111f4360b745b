use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    card::Card,
    player::{Player, PlayerData, PlayerId, TableView},
};

/// Picks a random legal card and passes when it has none.
pub struct RandomPlayer {
    pub data: PlayerData,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(id: PlayerId) -> Self {
        RandomPlayer {
            data: PlayerData::new(id, format!("Computer-{}", id + 1)),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(id: PlayerId, seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
            ..RandomPlayer::new(id)
        }
    }

    fn play_one_of(&mut self, positions: &[usize]) -> Option<Card> {
        let &index = positions.choose(&mut self.rng)?;
        self.hand_mut().remove_at(index).ok()
    }
}

impl Player for RandomPlayer {
    fn data(&self) -> &PlayerData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut PlayerData {
        &mut self.data
    }

    fn offer_attack_card(&mut self, view: &TableView) -> Option<Card> {
        let legal = view.legal_attacks(self.hand());
        self.play_one_of(&legal)
    }

    fn offer_defend_card(&mut self, view: &TableView) -> Option<Card> {
        let legal = view.legal_defences(self.hand());
        self.play_one_of(&legal)
    }
}
