use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use itertools::Itertools;

use durak_core::{
    card::Card,
    deck::Hand,
    event::Event,
    player::{Player, PlayerData, PlayerId, Seat, TableView},
};

static RULES: &str = "
*** Durak ***
Get rid of all your cards. The attacker puts a card on the table and the defender has to beat it
with a higher card of the same suit or with any trump. Once something lies on the table the attacker
may only throw in cards whose rank is already there. If the defender cannot or will not beat a card,
they pick up everything on the table and the attacker goes on. If the attacker stops, the cards leave
play and the defender attacks next. Afterwards everybody draws back up to six cards.";

const WIDTH: usize = 100;

#[derive(Debug, PartialEq)]
enum CliAction {
    Pass,
    Rules,
    Card(usize),
}

#[derive(Debug, PartialEq, Eq)]
struct ParseActionError;

impl FromStr for CliAction {
    type Err = ParseActionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "p" => Ok(CliAction::Pass),
            "r" => Ok(CliAction::Rules),
            other => other
                .parse::<usize>()
                .map(CliAction::Card)
                .map_err(|_| ParseActionError),
        }
    }
}

pub struct CliPlayer {
    pub data: PlayerData,
}

impl CliPlayer {
    pub fn new(id: PlayerId, name: String) -> CliPlayer {
        CliPlayer {
            data: PlayerData::new(id, name),
        }
    }

    pub fn ask_name() -> String {
        print!("Please Enter Name: ");
        io::stdout().flush().ok();

        match io::stdin().lock().lines().next() {
            Some(Ok(line)) if !line.trim().is_empty() => line.trim().to_string(),
            _ => "You".to_string(),
        }
    }

    fn query_user(&self, prompt: &str) -> CliAction {
        loop {
            println!("{:^WIDTH$}", prompt);
            println!("- [<number>]: play that card, [p]: pass, [r]: rules");
            print!(">");
            io::stdout().flush().ok();
            match io::stdin().lock().lines().next() {
                Some(Ok(line)) => match CliAction::from_str(&line) {
                    Ok(CliAction::Rules) => println!("{}", RULES),
                    Ok(action) => return action,
                    Err(_) => println!("Print a number"),
                },
                // stdin is closed, nothing more will be played
                _ => return CliAction::Pass,
            }
        }
    }

    fn choose(&mut self, view: &TableView, attacking: bool) -> Option<Card> {
        println!("{}", self.field_view(view, attacking));
        match self.query_user("Choose card") {
            CliAction::Card(index) => self.hand_mut().remove_at(index).ok(),
            _ => None,
        }
    }

    fn field_view(&self, view: &TableView, attacking: bool) -> String {
        let mut lines = vec![
            format!("{:#^WIDTH$}", "Durak GAME"),
            format!("{:-^WIDTH$}", "Enemy"),
        ];
        for seat in view.opponents(self.id()) {
            lines.push(format!("{}: {}", seat.name, "# ".repeat(seat.hand_size)));
        }
        lines.push(format!("{:-^WIDTH$}", "Deck"));
        lines.push(format!(
            "{:^WIDTH$}",
            format!(
                "{} more cards. Trump is {}",
                view.table.deck_len,
                view.trump.suit()
            )
        ));
        lines.push(format!("{:-^WIDTH$}", "Field"));
        lines.push(view.field.beaten_cards().iter().map(|c| format!(" {} ", c)).join(""));
        lines.push(String::new());
        lines.push(format!(
            "{:^WIDTH$}",
            view.field
                .attack_card()
                .map(|c| c.to_string())
                .unwrap_or_default()
        ));
        lines.push(format!("{:-^WIDTH$}", ""));
        lines.push(format!("{:-^WIDTH$}", "My cards"));
        lines.push(format!(
            "{:^WIDTH$}",
            Self::format_hand(self.hand(), view, attacking)
        ));
        lines.push(format!("{:-^WIDTH$}", ""));
        lines.join("\n")
    }

    fn format_hand(hand: &Hand, view: &TableView, attacking: bool) -> String {
        let playable = if attacking {
            view.legal_attacks(hand)
        } else {
            view.legal_defences(hand)
        };
        let tag = if attacking { "THROW:" } else { "DEFEND:" };
        hand.iter()
            .enumerate()
            .map(|(i, card)| {
                let info = if playable.contains(&i) && (!attacking || !view.field.ranks().is_empty()) {
                    tag
                } else {
                    ""
                };
                format!("{}{}:{}", info, i, card)
            })
            .join("       ")
    }

    fn print_event(&self, event: &Event, seats: &[Seat]) {
        let name = |id: &PlayerId| {
            seats
                .iter()
                .find(|s| s.id == *id)
                .map_or_else(|| id.to_string(), |s| s.name.clone())
        };
        match event {
            Event::Dealt {
                cards_per_hand,
                deck_left,
            } => println!(
                "~ Dealt {} cards each, {} remaining in deck",
                cards_per_hand, deck_left
            ),
            Event::TrumpRevealed(card) => println!("~ Trump card is {}", card),
            Event::FirstAttacker(pl) => println!("~ {} attacks first", name(pl)),
            Event::Attack(pl, card) => println!("~ Attack: {} plays {}", name(pl), card),
            Event::Defend(pl, card, beaten) => {
                println!("~ Defend: {} beats {} with {}", name(pl), beaten, card)
            }
            Event::IllegalAttack(pl, card) => {
                println!("~ {} may not throw in {}", name(pl), card)
            }
            Event::IllegalDefend(pl, card) => println!("~ {} cannot beat with {}", name(pl), card),
            Event::Declined(pl) => println!("~ Pass: {}", name(pl)),
            Event::PickUp(pl, count) => println!("~ PickUp: {} takes {} cards", name(pl), count),
            Event::Discard(count) => println!("~ Discard: {} cards leave play", count),
            Event::Replenish(pl, count, left) => println!(
                "~ Draw: {} draws {}, {} cards remaining in deck",
                name(pl),
                count,
                left
            ),
            Event::RoundOver(result) => println!("Round over: {}", result),
        }
    }
}

impl Player for CliPlayer {
    fn data(&self) -> &PlayerData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut PlayerData {
        &mut self.data
    }

    fn offer_attack_card(&mut self, view: &TableView) -> Option<Card> {
        self.choose(view, true)
    }

    fn offer_defend_card(&mut self, view: &TableView) -> Option<Card> {
        self.choose(view, false)
    }

    fn notify(&self, event: &Event, seats: &[Seat]) {
        self.print_event(event, seats);
    }
}
