use std::collections::VecDeque;

use crate::{
    card::Card,
    player::{Player, PlayerData, PlayerId, TableView},
};

/// Plays a fixed list of choices. `None` entries decline, as does running out
/// of script or naming a card the hand does not hold.
pub struct ScriptedPlayer {
    pub data: PlayerData,
    attacks: VecDeque<Option<Card>>,
    defences: VecDeque<Option<Card>>,
}

impl ScriptedPlayer {
    pub fn new(id: PlayerId, name: &str) -> Self {
        ScriptedPlayer {
            data: PlayerData::new(id, name.to_string()),
            attacks: VecDeque::new(),
            defences: VecDeque::new(),
        }
    }

    pub fn with_hand<I: IntoIterator<Item = Card>>(mut self, cards: I) -> Self {
        self.hand_mut().extend(cards);
        self
    }

    pub fn with_attacks<I: IntoIterator<Item = Option<Card>>>(mut self, attacks: I) -> Self {
        self.attacks.extend(attacks);
        self
    }

    pub fn with_defences<I: IntoIterator<Item = Option<Card>>>(mut self, defences: I) -> Self {
        self.defences.extend(defences);
        self
    }

    fn next(&mut self, attacking: bool) -> Option<Card> {
        let queue = if attacking {
            &mut self.attacks
        } else {
            &mut self.defences
        };
        let card = queue.pop_front().flatten()?;
        self.hand_mut().take(&card)
    }
}

impl Player for ScriptedPlayer {
    fn data(&self) -> &PlayerData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut PlayerData {
        &mut self.data
    }

    fn offer_attack_card(&mut self, _view: &TableView) -> Option<Card> {
        self.next(true)
    }

    fn offer_defend_card(&mut self, _view: &TableView) -> Option<Card> {
        self.next(false)
    }
}
