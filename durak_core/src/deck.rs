use std::{fmt, str::FromStr};

use itertools::{iproduct, Itertools};
use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::{
    card::{Card, Rank, Suit, ACE},
    error::DurakError,
};

/// Draw pile. The top of the deck is the end of the vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(min_rank: Rank) -> Self {
        Deck {
            cards: iproduct!(min_rank..=ACE, Suit::iter())
                .map(|(rank, suit)| Card::new(rank, suit))
                .collect(),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn bottom(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Takes up to `num` cards off the top, fewer when the deck runs out.
    pub fn draw(&mut self, num: usize) -> Vec<Card> {
        let keep = self.cards.len().saturating_sub(num);
        self.cards.split_off(keep).into_iter().rev().collect()
    }

    pub fn deal_round_robin(&mut self, num_players: usize, num_cards: usize) -> Vec<Hand> {
        let mut hands = vec![Hand::new(); num_players];
        for _ in 0..num_cards {
            for hand in hands.iter_mut() {
                if let Some(card) = self.draw_one() {
                    hand.push(card);
                }
            }
        }
        hands
    }

    pub fn insert_at_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFilter {
    Suit(Suit),
    RankGt(Rank),
    RankGte(Rank),
    RankLt(Rank),
    RankLte(Rank),
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match *self {
            CardFilter::Suit(suit) => card.suit == suit,
            CardFilter::RankGt(rank) => card.rank > rank,
            CardFilter::RankGte(rank) => card.rank >= rank,
            CardFilter::RankLt(rank) => card.rank < rank,
            CardFilter::RankLte(rank) => card.rank <= rank,
        }
    }
}

impl FromStr for CardFilter {
    type Err = DurakError;

    /// Parses `key=value`, e.g. `suit=♠` or `rank_gte=10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| DurakError::UnknownFilter(s.to_string()))?;
        let (key, value) = (key.trim(), value.trim());
        let bad_value = || DurakError::InvalidFilterValue(s.to_string());
        if key == "suit" {
            return Suit::from_str(value)
                .map(CardFilter::Suit)
                .map_err(|_| bad_value());
        }
        let rank = || value.parse::<Rank>().map_err(|_| bad_value());
        match key {
            "rank_gt" => Ok(CardFilter::RankGt(rank()?)),
            "rank_gte" => Ok(CardFilter::RankGte(rank()?)),
            "rank_lt" => Ok(CardFilter::RankLt(rank()?)),
            "rank_lte" => Ok(CardFilter::RankLte(rank()?)),
            _ => Err(DurakError::UnknownFilter(key.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: vec![] }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn position(&self, card: &Card) -> Option<usize> {
        self.cards.iter().position(|c| c == card)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Card, DurakError> {
        if index >= self.cards.len() {
            return Err(DurakError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    pub fn take(&mut self, card: &Card) -> Option<Card> {
        self.position(card).map(|index| self.cards.remove(index))
    }

    pub fn filter(&self, filters: &[CardFilter]) -> Hand {
        self.cards
            .iter()
            .filter(|card| filters.iter().all(|f| f.matches(card)))
            .copied()
            .collect()
    }

    pub fn filter_by(&self, filters: &[&str]) -> Result<Hand, DurakError> {
        let filters = filters
            .iter()
            .map(|f| f.parse::<CardFilter>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.filter(&filters))
    }

    pub fn lowest_of_suit(&self, suit: Suit) -> Option<Card> {
        self.filter(&[CardFilter::Suit(suit)])
            .iter()
            .min_by_key(|card| card.rank)
            .copied()
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.cards.extend(iter)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand { cards }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.cards.iter().join(", "))
    }
}
