//! Player view of the episode - what information is visible to one seat.
//!
//! [`Observation`] carries plain domain values only. Turning it into integer
//! or bitmask features is the job of [`crate::encoding`].

use serde::{Deserialize, Serialize};

use crate::domain::hand::CardSet;
use crate::domain::rules::{PLAYERS, TRICKS_PER_EPISODE};
use crate::domain::seats::Seat;
use crate::domain::state::GameState;
use crate::domain::{Card, Suit, Trump};

/// Information visible to a seat at a decision point.
///
/// Own hand is always visible. The dummy's hand becomes visible to everyone
/// once the opening lead is on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The observing seat.
    pub seat: Seat,
    pub dummy: Seat,
    pub active_seat: Seat,
    pub hand: CardSet,
    /// Empty until the opening lead has been played.
    pub dummy_hand: CardSet,
    /// Card per seat in the open trick, indexed by seat.
    pub table: [Option<Card>; PLAYERS],
    /// One slot per trick number; `None` for tricks not yet played.
    pub trick_history: Vec<Option<[Card; PLAYERS]>>,
    pub led_suit: Option<Suit>,
    pub trump: Trump,
    pub contract_value: u8,
    /// Tricks won by the observing seat's pair.
    pub tricks_won: u8,
}

impl Observation {
    /// Legal cards for the observing seat under the follow-suit rule.
    pub fn legal_plays(&self) -> CardSet {
        match self.led_suit {
            Some(led) if self.hand.has_suit(led) => self.hand.suit_cards(led),
            _ => self.hand,
        }
    }

    pub fn is_my_turn(&self) -> bool {
        self.seat == self.active_seat
    }

    pub fn tricks_played(&self) -> usize {
        self.trick_history.iter().take_while(|t| t.is_some()).count()
    }
}

/// Builds the observation for one seat.
pub fn observe(state: &GameState, seat: Seat) -> Observation {
    let dummy = state.roles.dummy;
    let dummy_hidden = state.tricks_played == 0 && state.cards_on_table() == 0;
    let dummy_hand = if dummy_hidden {
        CardSet::empty()
    } else {
        *state.hand(dummy)
    };

    let table = Seat::ALL.map(|s| state.current_trick.get(s));
    let trick_history = (0..TRICKS_PER_EPISODE as usize)
        .map(|i| state.trick_history.get(i).map(|t| t.cards))
        .collect();

    Observation {
        seat,
        dummy,
        active_seat: state.active_seat,
        hand: *state.hand(seat),
        dummy_hand,
        table,
        trick_history,
        led_suit: state.led_suit,
        trump: state.contract.trump,
        contract_value: state.contract.value,
        tricks_won: state.tricks_won[seat.index()],
    }
}

/// Observations for every seat, indexed by seat.
pub fn observe_all(state: &GameState) -> [Observation; PLAYERS] {
    Seat::ALL.map(|s| observe(state, s))
}
