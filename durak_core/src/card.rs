use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::DurakError;

pub type Rank = u8;

pub const JACK: Rank = 11;
pub const QUEEN: Rank = 12;
pub const KING: Rank = 13;
pub const ACE: Rank = 14;

#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Suit {
    #[strum(to_string = "♠", serialize = "s", serialize = "S")]
    Spades,
    #[strum(to_string = "♥", serialize = "h", serialize = "H")]
    Hearts,
    #[strum(to_string = "♣", serialize = "c", serialize = "C")]
    Clubs,
    #[strum(to_string = "♦", serialize = "d", serialize = "D")]
    Diamonds,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub fn rank_name(&self) -> String {
        match self.rank {
            JACK => "J".to_string(),
            QUEEN => "Q".to_string(),
            KING => "K".to_string(),
            ACE => "A".to_string(),
            r => r.to_string(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_name(), self.suit)
    }
}

impl FromStr for Card {
    type Err = DurakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || DurakError::InvalidCard(s.to_string());
        let (split, _) = s.char_indices().last().ok_or_else(invalid)?;
        let suit = Suit::from_str(&s[split..]).map_err(|_| invalid())?;
        let rank = match &s[..split] {
            "J" | "j" => JACK,
            "Q" | "q" => QUEEN,
            "K" | "k" => KING,
            "A" | "a" => ACE,
            digits => digits.parse::<Rank>().map_err(|_| invalid())?,
        };
        if !(2..=ACE).contains(&rank) {
            return Err(invalid());
        }
        Ok(Card::new(rank, suit))
    }
}

/// Card ordering for one round, bound to the revealed trump suit.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Trump(pub Suit);

impl Trump {
    pub fn suit(&self) -> Suit {
        self.0
    }

    pub fn is_trump(&self, card: &Card) -> bool {
        card.suit == self.0
    }

    /// Cards of two different non-trump suits have no relation and yield `None`.
    pub fn compare(&self, a: &Card, b: &Card) -> Option<Ordering> {
        if a.suit == b.suit {
            Some(a.rank.cmp(&b.rank))
        } else if self.is_trump(a) {
            Some(Ordering::Greater)
        } else if self.is_trump(b) {
            Some(Ordering::Less)
        } else {
            None
        }
    }

    pub fn beats(&self, card: &Card, target: &Card) -> bool {
        self.compare(card, target) == Some(Ordering::Greater)
    }
}
