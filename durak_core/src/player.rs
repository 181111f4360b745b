use crate::{
    card::{Card, Trump},
    deck::Hand,
    event::Event,
    field::Field,
};

pub type PlayerId = usize;

pub struct PlayerData {
    pub(crate) id: PlayerId,
    name: String,
    hand: Hand,
}

impl PlayerData {
    pub fn new(id: PlayerId, name: String) -> Self {
        PlayerData {
            id,
            name,
            hand: Hand::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
}

/// Round-wide information the game hands to a player before a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub deck_len: usize,
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub seats: Vec<Seat>,
}

pub struct TableView<'a> {
    pub trump: Trump,
    pub table: &'a Table,
    pub field: &'a Field,
}

impl TableView<'_> {
    pub fn opponents(&self, me: PlayerId) -> impl Iterator<Item = &Seat> {
        self.table.seats.iter().filter(move |s| s.id != me)
    }

    /// Hand positions that may be played as the next attack card.
    pub fn legal_attacks(&self, hand: &Hand) -> Vec<usize> {
        hand.iter()
            .enumerate()
            .filter(|(_, card)| self.field.can_attack_with(card))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn legal_defences(&self, hand: &Hand) -> Vec<usize> {
        hand.iter()
            .enumerate()
            .filter(|(_, card)| self.field.can_defend_with(card))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Anything that can sit at the table. Offering a card removes it from the
/// player's own hand; `None` declines.
pub trait Player {
    fn data(&self) -> &PlayerData;

    fn data_mut(&mut self) -> &mut PlayerData;

    fn id(&self) -> PlayerId {
        self.data().id
    }

    fn name(&self) -> &str {
        &self.data().name
    }

    fn hand(&self) -> &Hand {
        &self.data().hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.data_mut().hand
    }

    fn hand_size(&self) -> usize {
        self.hand().len()
    }

    fn offer_attack_card(&mut self, view: &TableView) -> Option<Card>;

    fn offer_defend_card(&mut self, view: &TableView) -> Option<Card>;

    /// Draws back up to `target` cards through `draw`, which may hand out fewer.
    fn replenish(&mut self, target: usize, draw: &mut dyn FnMut(usize) -> Vec<Card>) {
        let need = target.saturating_sub(self.hand_size());
        if need > 0 {
            let cards = draw(need);
            self.hand_mut().extend(cards);
        }
    }

    fn notify(&self, _event: &Event, _seats: &[Seat]) {}
}
