use std::fmt;

use itertools::Itertools;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    card::{Card, Rank, Trump, ACE},
    deck::Deck,
    error::DurakError,
    event::Event,
    field::{Field, TrickOutcome},
    player::{Player, PlayerId, Seat, Table},
    rules::Rules,
};

// players without trumps lose the first-attacker tie-break
const NO_TRUMP: Rank = ACE + 1;

/// How a round ended. `Player` holds the first player left without cards;
/// games report it as the round's `winner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Player(PlayerId),
    Draw,
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundResult::Player(id) => write!(f, "{}", id),
            RoundResult::Draw => write!(f, "draw"),
        }
    }
}

pub struct Game {
    rules: Rules,
    players: Vec<Box<dyn Player>>,
    deck: Deck,
    discard: Vec<Card>,
    trump: Option<Trump>,
    turn: PlayerId,
    winner: Option<RoundResult>,
    log: Vec<Event>,
    notified: usize,
}

impl Game {
    pub fn new(players: Vec<Box<dyn Player>>, rules: Rules) -> Result<Self, DurakError> {
        let deck = Deck::new(rules.min_rank());
        Game::with_deck(players, rules, deck)
    }

    pub fn duel<A, B>(first: A, second: B, rules: Rules) -> Result<Self, DurakError>
    where
        A: Player + 'static,
        B: Player + 'static,
    {
        Game::new(vec![Box::new(first), Box::new(second)], rules)
    }

    pub fn with_deck(
        mut players: Vec<Box<dyn Player>>,
        rules: Rules,
        deck: Deck,
    ) -> Result<Self, DurakError> {
        rules.validate(players.len())?;
        for (id, player) in players.iter_mut().enumerate() {
            player.data_mut().id = id;
        }
        Ok(Game {
            rules,
            players,
            deck,
            discard: vec![],
            trump: None,
            turn: 0,
            winner: None,
            log: vec![],
            notified: 0,
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn players(&self) -> &[Box<dyn Player>] {
        &self.players
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    pub fn trump(&self) -> Option<Trump> {
        self.trump
    }

    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    pub fn winner(&self) -> Option<RoundResult> {
        self.winner
    }

    pub fn log(&self) -> &[Event] {
        &self.log
    }

    pub fn attacker(&self) -> PlayerId {
        self.turn
    }

    pub fn defender(&self) -> PlayerId {
        (self.turn + 1) % self.players.len()
    }

    pub fn all_cards(&self) -> Vec<Card> {
        self.deck
            .cards()
            .iter()
            .chain(self.players.iter().flat_map(|p| p.hand().iter()))
            .chain(self.discard.iter())
            .copied()
            .collect()
    }

    pub fn preparations<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DurakError> {
        if self.trump.is_some() {
            return Err(DurakError::AlreadyPrepared);
        }
        self.deck.shuffle(rng);
        self.prepare()
    }

    /// Same as `preparations` on the deck as it is, without shuffling.
    pub fn prepare(&mut self) -> Result<(), DurakError> {
        if self.trump.is_some() {
            return Err(DurakError::AlreadyPrepared);
        }
        self.draw_cards();
        self.reveal_trump()?;
        self.turn = self.choice_first()?;
        info!("{} attacks first", self.players[self.turn].name());
        self.log.push(Event::FirstAttacker(self.turn));
        self.flush_events();
        Ok(())
    }

    fn draw_cards(&mut self) {
        let hands = self
            .deck
            .deal_round_robin(self.players.len(), self.rules.cards_per_hand);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            debug!("{} is dealt {}", player.name(), hand);
            player.hand_mut().extend(hand.cards().iter().copied());
        }
        self.log.push(Event::Dealt {
            cards_per_hand: self.rules.cards_per_hand,
            deck_left: self.deck.len(),
        });
    }

    fn reveal_trump(&mut self) -> Result<(), DurakError> {
        let card = self
            .deck
            .draw_one()
            .ok_or_else(|| DurakError::InvalidPlayerCount {
                players: self.players.len(),
                cards_per_hand: self.rules.cards_per_hand,
                deck: self.all_cards().len(),
            })?;
        self.deck.insert_at_bottom(card);
        self.trump = Some(Trump(card.suit));
        info!("Trump card is {}", card);
        self.log.push(Event::TrumpRevealed(card));
        Ok(())
    }

    fn choice_first(&self) -> Result<PlayerId, DurakError> {
        let trump = self.trump.ok_or(DurakError::RoundNotPrepared)?;
        Ok(self
            .players
            .iter()
            .map(|p| {
                p.hand()
                    .lowest_of_suit(trump.suit())
                    .map_or(NO_TRUMP, |card| card.rank)
            })
            .position_min()
            .unwrap_or(0))
    }

    fn table(&self) -> Table {
        Table {
            deck_len: self.deck.len(),
            attacker: self.attacker(),
            defender: self.defender(),
            seats: self.seats(),
        }
    }

    fn seats(&self) -> Vec<Seat> {
        self.players
            .iter()
            .map(|p| Seat {
                id: p.id(),
                name: p.name().to_string(),
                hand_size: p.hand_size(),
            })
            .collect()
    }

    fn flush_events(&mut self) {
        if self.notified == self.log.len() {
            return;
        }
        let seats = self.seats();
        for event in &self.log[self.notified..] {
            for player in &self.players {
                player.notify(event, &seats);
            }
        }
        self.notified = self.log.len();
    }

    fn play_trick(&mut self, trump: Trump) -> TrickOutcome {
        let attacker = self.attacker();
        let defender = self.defender();
        let capacity = self.players[defender]
            .hand_size()
            .min(self.rules.cards_per_hand);
        let mut field = Field::new(trump, capacity, self.rules.max_reprompts);

        let outcome = loop {
            let table = self.table();
            if let Some(outcome) =
                field.attack(self.players[attacker].as_mut(), &table, &mut self.log)
            {
                break outcome;
            }
            self.flush_events();

            let table = self.table();
            if let Some(outcome) =
                field.defend(self.players[defender].as_mut(), &table, &mut self.log)
            {
                break outcome;
            }
            self.flush_events();
        };

        let cards = field.take_all();
        match outcome {
            TrickOutcome::DefenderWins => {
                debug!(
                    "{} held out, {} cards leave play",
                    self.players[defender].name(),
                    cards.len()
                );
                self.log.push(Event::Discard(cards.len()));
                self.discard.extend(cards);
                self.next_turn();
            }
            TrickOutcome::AttackerWins => {
                debug!(
                    "{} picks up {} cards",
                    self.players[defender].name(),
                    cards.len()
                );
                self.log.push(Event::PickUp(defender, cards.len()));
                self.players[defender].hand_mut().extend(cards);
            }
        }
        outcome
    }

    fn next_turn(&mut self) {
        self.turn = self.defender();
    }

    fn restore_cards(&mut self) {
        let queue = (self.turn..self.players.len()).chain(0..self.turn);
        let target = self.rules.cards_per_hand;
        for id in queue {
            let deck = &mut self.deck;
            let before = deck.len();
            self.players[id].replenish(target, &mut |n| deck.draw(n));
            let drawn = before - self.deck.len();
            if drawn > 0 {
                debug!(
                    "{} draws {}, {} left in deck",
                    self.players[id].name(),
                    drawn,
                    self.deck.len()
                );
                self.log.push(Event::Replenish(id, drawn, self.deck.len()));
            }
        }
    }

    pub fn finish_check(&mut self) -> bool {
        let empty = self
            .players
            .iter()
            .positions(|p| p.hand().is_empty())
            .collect_vec();
        let result = match empty.as_slice() {
            [] => return false,
            [single] => RoundResult::Player(*single),
            _ => RoundResult::Draw,
        };
        if self.winner.is_none() {
            info!("Round over: {}", result);
            self.winner = Some(result);
            self.log.push(Event::RoundOver(result));
        }
        true
    }

    /// One trick followed by the refill and the finish check.
    pub fn step(&mut self) -> Result<Option<RoundResult>, DurakError> {
        if self.winner.is_some() {
            return Ok(self.winner);
        }
        let trump = self.trump.ok_or(DurakError::RoundNotPrepared)?;
        self.play_trick(trump);
        self.restore_cards();
        let finished = self.finish_check();
        self.flush_events();
        Ok(if finished { self.winner } else { None })
    }

    pub fn play_loop(&mut self) -> Result<RoundResult, DurakError> {
        loop {
            if let Some(result) = self.step()? {
                return Ok(result);
            }
        }
    }
}
