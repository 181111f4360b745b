use clap::Parser;
use durak_core::rules::{Rules, CARDS_PER_HAND, MAX_REPROMPTS};

#[derive(Parser, Debug)]
#[command(name = "durak")]
#[command(author, version, about = "Play or simulate rounds of Durak in the terminal")]
pub struct Args {
    /// Number of rounds to play
    #[arg(short, long, default_value_t = 1)]
    pub games: usize,

    /// Seat an interactive player against the computer
    #[arg(long)]
    pub human: bool,

    /// Players at the table, including the human one
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=5))]
    pub players: u8,

    /// Play with the 52 card deck
    #[arg(long)]
    pub french: bool,

    /// Cards dealt to every player
    #[arg(long, default_value_t = CARDS_PER_HAND)]
    pub cards: usize,

    /// Illegal offers tolerated before a move counts as a pass
    #[arg(long, default_value_t = MAX_REPROMPTS)]
    pub max_reprompts: usize,

    /// Seed for shuffling and the computer players
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn rules(&self) -> Rules {
        Rules {
            cards_per_hand: self.cards,
            extended_deck: self.french,
            max_reprompts: self.max_reprompts,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
