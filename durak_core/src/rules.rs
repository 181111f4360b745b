use crate::error::DurakError;

pub const CARDS_PER_HAND: usize = 6;
pub const MAX_REPROMPTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub cards_per_hand: usize,
    /// 52 cards instead of 36
    pub extended_deck: bool,
    pub max_reprompts: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            cards_per_hand: CARDS_PER_HAND,
            extended_deck: false,
            max_reprompts: MAX_REPROMPTS,
        }
    }
}

impl Rules {
    pub fn min_rank(&self) -> u8 {
        if self.extended_deck {
            2
        } else {
            6
        }
    }

    pub fn deck_size(&self) -> usize {
        (14 - self.min_rank() as usize + 1) * 4
    }

    pub fn validate(&self, players: usize) -> Result<(), DurakError> {
        if self.cards_per_hand == 0 {
            return Err(DurakError::InvalidHandSize(0));
        }
        // one card has to stay in the deck for the trump reveal
        if players < 2 || players * self.cards_per_hand >= self.deck_size() {
            return Err(DurakError::InvalidPlayerCount {
                players,
                cards_per_hand: self.cards_per_hand,
                deck: self.deck_size(),
            });
        }
        Ok(())
    }
}
