use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DurakError {
    #[error("No card at position {index}, hand holds {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown card filter: {0}")]
    UnknownFilter(String),

    #[error("Invalid value for card filter: {0}")]
    InvalidFilterValue(String),

    #[error("Invalid card: {0}")]
    InvalidCard(String),

    #[error("{players} players with {cards_per_hand} cards each do not fit a deck of {deck}")]
    InvalidPlayerCount {
        players: usize,
        cards_per_hand: usize,
        deck: usize,
    },

    #[error("Players need at least one card in hand, got {0}")]
    InvalidHandSize(usize),

    #[error("Round has not been prepared, call preparations first")]
    RoundNotPrepared,

    #[error("Round has already been prepared")]
    AlreadyPrepared,
}
