use serde::{Deserialize, Serialize};

use crate::{card::Card, game::RoundResult, player::PlayerId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Dealt { cards_per_hand: usize, deck_left: usize },
    TrumpRevealed(Card),
    FirstAttacker(PlayerId),
    Attack(PlayerId, Card),
    /// Defender, the card played and the attack card it beat.
    Defend(PlayerId, Card, Card),
    IllegalAttack(PlayerId, Card),
    IllegalDefend(PlayerId, Card),
    Declined(PlayerId),
    /// Defender picked up this many cards from the field.
    PickUp(PlayerId, usize),
    Discard(usize),
    /// Player, cards drawn, cards left in the deck.
    Replenish(PlayerId, usize, usize),
    RoundOver(RoundResult),
}
