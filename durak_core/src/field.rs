use std::collections::BTreeSet;

use log::{debug, warn};

use crate::{
    card::{Card, Rank, Trump},
    event::Event,
    player::{Player, Table, TableView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickOutcome {
    DefenderWins,
    /// defender picks up the field
    AttackerWins,
}

#[derive(Debug, Clone)]
pub struct Field {
    trump: Trump,
    attack_card: Option<Card>,
    beaten_cards: Vec<Card>,
    ranks: BTreeSet<Rank>,
    capacity: usize,
    max_reprompts: usize,
    violations: usize,
}

impl Field {
    pub fn new(trump: Trump, capacity: usize, max_reprompts: usize) -> Self {
        Field {
            trump,
            attack_card: None,
            beaten_cards: vec![],
            ranks: BTreeSet::new(),
            capacity,
            max_reprompts,
            violations: 0,
        }
    }

    pub fn trump(&self) -> Trump {
        self.trump
    }

    pub fn attack_card(&self) -> Option<Card> {
        self.attack_card
    }

    pub fn beaten_cards(&self) -> &[Card] {
        &self.beaten_cards
    }

    pub fn ranks(&self) -> &BTreeSet<Rank> {
        &self.ranks
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn violations(&self) -> usize {
        self.violations
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.beaten_cards.iter().chain(self.attack_card.iter())
    }

    pub fn can_attack_with(&self, card: &Card) -> bool {
        self.ranks.is_empty() || self.ranks.contains(&card.rank)
    }

    pub fn can_defend_with(&self, card: &Card) -> bool {
        self.attack_card
            .map_or(false, |attack| self.trump.beats(card, &attack))
    }

    fn view<'a>(&'a self, table: &'a Table) -> TableView<'a> {
        TableView {
            trump: self.trump,
            table,
            field: self,
        }
    }

    /// `None` means the trick goes on.
    pub fn attack(
        &mut self,
        player: &mut dyn Player,
        table: &Table,
        log: &mut Vec<Event>,
    ) -> Option<TrickOutcome> {
        if player.hand().is_empty() || self.capacity == 0 {
            return Some(TrickOutcome::DefenderWins);
        }

        let mut illegal = 0;
        loop {
            let view = self.view(table);
            let card = match checked_offer(player, |p| p.offer_attack_card(&view)) {
                Some(card) => card,
                None => {
                    debug!("{} stops attacking", player.name());
                    log.push(Event::Declined(player.id()));
                    return Some(TrickOutcome::DefenderWins);
                }
            };

            if !self.can_attack_with(&card) {
                warn!(
                    "{} tried to throw in {}, ranks on the field are {:?}",
                    player.name(),
                    card,
                    self.ranks
                );
                player.hand_mut().push(card);
                self.violations += 1;
                log.push(Event::IllegalAttack(player.id(), card));
                illegal += 1;
                if illegal > self.max_reprompts {
                    warn!("{} used up all reprompts, counts as a pass", player.name());
                    log.push(Event::Declined(player.id()));
                    return Some(TrickOutcome::DefenderWins);
                }
                continue;
            }

            debug!("{} attacks with {}", player.name(), card);
            self.capacity -= 1;
            self.attack_card = Some(card);
            self.ranks.insert(card.rank);
            log.push(Event::Attack(player.id(), card));
            return None;
        }
    }

    pub fn defend(
        &mut self,
        player: &mut dyn Player,
        table: &Table,
        log: &mut Vec<Event>,
    ) -> Option<TrickOutcome> {
        let attack_card = match self.attack_card {
            Some(card) if !player.hand().is_empty() => card,
            _ => return Some(TrickOutcome::DefenderWins),
        };

        let mut illegal = 0;
        loop {
            let view = self.view(table);
            let card = match checked_offer(player, |p| p.offer_defend_card(&view)) {
                Some(card) => card,
                None => {
                    debug!("{} gives up against {}", player.name(), attack_card);
                    log.push(Event::Declined(player.id()));
                    return Some(TrickOutcome::AttackerWins);
                }
            };

            if !self.trump.beats(&card, &attack_card) {
                warn!(
                    "{} cannot beat {} with {}",
                    player.name(),
                    attack_card,
                    card
                );
                player.hand_mut().push(card);
                self.violations += 1;
                log.push(Event::IllegalDefend(player.id(), card));
                illegal += 1;
                if illegal > self.max_reprompts {
                    warn!("{} used up all reprompts, counts as giving up", player.name());
                    log.push(Event::Declined(player.id()));
                    return Some(TrickOutcome::AttackerWins);
                }
                continue;
            }

            debug!("{} beats {} with {}", player.name(), attack_card, card);
            self.beaten_cards.extend([attack_card, card]);
            self.ranks.insert(card.rank);
            self.attack_card = None;
            log.push(Event::Defend(player.id(), card, attack_card));
            return None;
        }
    }

    pub fn take_all(&mut self) -> Vec<Card> {
        let mut cards = std::mem::take(&mut self.beaten_cards);
        cards.extend(self.attack_card.take());
        cards
    }
}

/// Accepts the offer only if exactly that card left the hand. Anything else
/// restores the hand and counts as a pass.
fn checked_offer<F>(player: &mut dyn Player, offer: F) -> Option<Card>
where
    F: FnOnce(&mut dyn Player) -> Option<Card>,
{
    let before = player.hand().clone();
    let card = offer(&mut *player)?;
    let hand = player.hand();
    if before.contains(&card) && hand.len() + 1 == before.len() && !hand.contains(&card) {
        return Some(card);
    }
    warn!(
        "{} offered {} without giving it up, counts as a pass",
        player.name(),
        card
    );
    *player.hand_mut() = before;
    None
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::{
        card::{Card, Suit, Trump},
        player::{Player, PlayerData, Table, TableView},
        scripted_player::ScriptedPlayer,
    };

    use super::{Field, TrickOutcome};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn table() -> Table {
        Table {
            deck_len: 0,
            attacker: 0,
            defender: 1,
            seats: vec![],
        }
    }

    fn player(id: usize, hand: &[&str]) -> ScriptedPlayer {
        let mut player = ScriptedPlayer::new(id, "Test");
        player.hand_mut().extend(hand.iter().map(|c| card(c)));
        player
    }

    #[test]
    fn attack_should_accept_any_card_on_an_empty_field() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["6♥", "9♣"]).with_attacks([Some(card("9♣"))]);
        let mut log = vec![];

        assert_eq!(field.attack(&mut attacker, &table(), &mut log), None);
        assert_eq!(field.attack_card(), Some(card("9♣")));
        assert_eq!(field.capacity(), 5);
        assert!(field.ranks().contains(&9));
        assert_eq!(attacker.hand_size(), 1);
    }

    #[test]
    fn attack_should_end_trick_when_attacker_declines() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["6♥"]).with_attacks([None]);

        assert_eq!(
            field.attack(&mut attacker, &table(), &mut vec![]),
            Some(TrickOutcome::DefenderWins)
        );
        assert_eq!(field.attack_card(), None);
        assert_eq!(attacker.hand_size(), 1);
    }

    #[test]
    fn attack_should_end_trick_on_empty_hand_or_exhausted_capacity() {
        let mut field = Field::new(Trump(Suit::Spades), 0, 3);
        let mut attacker = player(0, &["6♥"]).with_attacks([Some(card("6♥"))]);
        assert_eq!(
            field.attack(&mut attacker, &table(), &mut vec![]),
            Some(TrickOutcome::DefenderWins)
        );
        assert_eq!(attacker.hand_size(), 1);

        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut empty = player(0, &[]);
        assert_eq!(
            field.attack(&mut empty, &table(), &mut vec![]),
            Some(TrickOutcome::DefenderWins)
        );
    }

    #[test]
    fn attack_should_reject_throw_in_of_unseen_rank_and_reprompt() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["6♥", "6♣", "8♦"])
            .with_attacks([Some(card("6♥")), Some(card("8♦")), Some(card("6♣"))]);
        let mut defender = player(1, &["7♥"]).with_defences([Some(card("7♥"))]);
        let mut log = vec![];

        assert_eq!(field.attack(&mut attacker, &table(), &mut log), None);
        assert_eq!(field.defend(&mut defender, &table(), &mut log), None);
        assert_eq!(field.attack(&mut attacker, &table(), &mut log), None);

        assert_eq!(field.attack_card(), Some(card("6♣")));
        assert_eq!(field.violations(), 1);
        assert_eq!(field.capacity(), 4);
        assert_eq!(attacker.hand().cards(), &[card("8♦")]);
        assert_eq!(field.ranks(), &BTreeSet::from([6, 7]));
    }

    #[test]
    fn attack_should_count_as_pass_once_reprompts_run_out() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 1);
        field.ranks.insert(10);
        let mut attacker =
            player(0, &["6♥"]).with_attacks([Some(card("6♥")), Some(card("6♥")), Some(card("6♥"))]);

        assert_eq!(
            field.attack(&mut attacker, &table(), &mut vec![]),
            Some(TrickOutcome::DefenderWins)
        );
        assert_eq!(field.violations(), 2);
        assert_eq!(attacker.hand_size(), 1);
        assert_eq!(field.capacity(), 6);
    }

    #[test]
    fn defend_should_move_both_cards_to_beaten_pile() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["6♥"]).with_attacks([Some(card("6♥"))]);
        let mut defender = player(1, &["7♥", "K♣"]).with_defences([Some(card("7♥"))]);
        let mut log = vec![];

        field.attack(&mut attacker, &table(), &mut log);
        assert_eq!(field.defend(&mut defender, &table(), &mut log), None);

        assert_eq!(field.attack_card(), None);
        assert_eq!(field.beaten_cards(), &[card("6♥"), card("7♥")]);
        assert_eq!(field.ranks(), &BTreeSet::from([6, 7]));
        assert_eq!(defender.hand().cards(), &[card("K♣")]);
    }

    #[test]
    fn defend_should_accept_trump_over_other_suit() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["A♥"]).with_attacks([Some(card("A♥"))]);
        let mut defender = player(1, &["6♠"]).with_defences([Some(card("6♠"))]);
        let mut log = vec![];

        field.attack(&mut attacker, &table(), &mut log);
        assert_eq!(field.defend(&mut defender, &table(), &mut log), None);
        assert_eq!(field.beaten_cards().len(), 2);
    }

    #[test]
    fn defend_should_reject_weaker_or_incomparable_card_and_reprompt() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["9♥"]).with_attacks([Some(card("9♥"))]);
        let mut defender = player(1, &["8♥", "A♣", "10♥"]).with_defences([
            Some(card("8♥")),
            Some(card("A♣")),
            Some(card("10♥")),
        ]);
        let mut log = vec![];

        field.attack(&mut attacker, &table(), &mut log);
        assert_eq!(field.defend(&mut defender, &table(), &mut log), None);
        assert_eq!(field.violations(), 2);
        assert_eq!(defender.hand_size(), 2);
        assert!(defender.hand().contains(&card("8♥")));
        assert!(defender.hand().contains(&card("A♣")));
    }

    #[test]
    fn defend_should_hand_the_trick_to_attacker_on_decline() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["6♥", "6♣"])
            .with_attacks([Some(card("6♥")), Some(card("6♣"))]);
        let mut defender = player(1, &["7♥", "8♦", "9♦"]).with_defences([Some(card("7♥")), None]);
        let mut log = vec![];

        field.attack(&mut attacker, &table(), &mut log);
        field.defend(&mut defender, &table(), &mut log);
        field.attack(&mut attacker, &table(), &mut log);
        let before = defender.hand_size();
        let beaten = field.beaten_cards().len();

        assert_eq!(
            field.defend(&mut defender, &table(), &mut log),
            Some(TrickOutcome::AttackerWins)
        );
        defender.hand_mut().extend(field.take_all());
        assert_eq!(defender.hand_size(), before + beaten + 1);
        assert_eq!(field.cards().count(), 0);
    }

    #[test]
    fn defend_should_give_up_once_reprompts_run_out() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 0);
        let mut attacker = player(0, &["9♥"]).with_attacks([Some(card("9♥"))]);
        let mut defender = player(1, &["8♥"]).with_defences([Some(card("8♥")), Some(card("8♥"))]);
        let mut log = vec![];

        field.attack(&mut attacker, &table(), &mut log);
        assert_eq!(
            field.defend(&mut defender, &table(), &mut log),
            Some(TrickOutcome::AttackerWins)
        );
        assert_eq!(field.violations(), 1);
        assert_eq!(defender.hand_size(), 1);
    }

    /// Offers its first card but keeps it, optionally dropping `discarded` more.
    struct Cheat {
        data: PlayerData,
        discarded: usize,
    }

    impl Cheat {
        fn new(id: usize, hand: &[&str], discarded: usize) -> Self {
            let mut cheat = Cheat {
                data: PlayerData::new(id, "Cheat".to_string()),
                discarded,
            };
            cheat.hand_mut().extend(hand.iter().map(|c| card(c)));
            cheat
        }

        fn offer(&mut self) -> Option<Card> {
            let card = self.hand().cards().first().copied();
            for _ in 0..self.discarded {
                self.hand_mut().remove_at(0).ok();
            }
            card
        }
    }

    impl Player for Cheat {
        fn data(&self) -> &PlayerData {
            &self.data
        }

        fn data_mut(&mut self) -> &mut PlayerData {
            &mut self.data
        }

        fn offer_attack_card(&mut self, _view: &TableView) -> Option<Card> {
            self.offer()
        }

        fn offer_defend_card(&mut self, _view: &TableView) -> Option<Card> {
            self.offer()
        }
    }

    #[test]
    fn attack_should_refuse_a_card_that_stays_in_hand() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut cheat = Cheat::new(0, &["6♥", "7♣"], 0);

        assert_eq!(
            field.attack(&mut cheat, &table(), &mut vec![]),
            Some(TrickOutcome::DefenderWins)
        );
        assert_eq!(field.attack_card(), None);
        assert_eq!(field.capacity(), 6);
        assert_eq!(cheat.hand().cards(), &[card("6♥"), card("7♣")]);
    }

    #[test]
    fn attack_should_restore_hand_when_more_than_the_offered_card_left() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut cheat = Cheat::new(0, &["6♥", "7♣", "8♦"], 2);

        assert_eq!(
            field.attack(&mut cheat, &table(), &mut vec![]),
            Some(TrickOutcome::DefenderWins)
        );
        assert_eq!(field.cards().count(), 0);
        assert_eq!(cheat.hand().cards(), &[card("6♥"), card("7♣"), card("8♦")]);
    }

    #[test]
    fn defend_should_count_a_card_that_stays_in_hand_as_giving_up() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut attacker = player(0, &["6♥"]).with_attacks([Some(card("6♥"))]);
        let mut cheat = Cheat::new(1, &["7♥"], 0);
        let mut log = vec![];

        field.attack(&mut attacker, &table(), &mut log);
        assert_eq!(
            field.defend(&mut cheat, &table(), &mut log),
            Some(TrickOutcome::AttackerWins)
        );
        assert!(field.beaten_cards().is_empty());
        assert_eq!(field.attack_card(), Some(card("6♥")));
        assert_eq!(cheat.hand().cards(), &[card("7♥")]);
    }

    #[test]
    fn defend_without_attack_card_should_end_trick_for_defender() {
        let mut field = Field::new(Trump(Suit::Spades), 6, 3);
        let mut defender = player(1, &["7♥"]).with_defences([Some(card("7♥"))]);
        assert_eq!(
            field.defend(&mut defender, &table(), &mut vec![]),
            Some(TrickOutcome::DefenderWins)
        );
        assert_eq!(defender.hand_size(), 1);
    }
}
