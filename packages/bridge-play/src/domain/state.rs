use serde::{Deserialize, Serialize};

use crate::domain::contract::Contract;
use crate::domain::hand::CardSet;
use crate::domain::rules::{HAND_SIZE, PLAYERS, TRICKS_PER_EPISODE};
use crate::domain::seats::{Roles, Seat};
use crate::domain::tricks::{CompletedTrick, Trick};
use crate::domain::{Card, Suit};
use crate::errors::BridgeError;

/// Play progression. `TrickComplete` is never observable from outside a
/// step: resolution happens inside the same call that plays the fourth card.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    AwaitingPlay(Seat),
    EpisodeDone,
}

/// The 13 completed tricks of an episode, indexed by trick number; append-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickHistory {
    slots: [Option<CompletedTrick>; TRICKS_PER_EPISODE as usize],
}

impl TrickHistory {
    pub fn push(&mut self, trick: CompletedTrick) -> Result<(), BridgeError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.is_none())
            .ok_or(BridgeError::EpisodeFinished)?;
        *slot = Some(trick);
        Ok(())
    }

    pub fn get(&self, trick_no: usize) -> Option<&CompletedTrick> {
        self.slots.get(trick_no).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().take_while(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    /// All 13 slots, `None` for tricks not yet played.
    pub fn slots(&self) -> &[Option<CompletedTrick>] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompletedTrick> + '_ {
        self.slots.iter().map_while(Option::as_ref)
    }

    pub fn last(&self) -> Option<&CompletedTrick> {
        self.iter().last()
    }
}

/// Entire episode container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub contract: Contract,
    pub roles: Roles,
    /// Seat expected to play next (the last trick's winner once the episode is done).
    pub active_seat: Seat,
    /// Indexed by seat.
    pub hands: [CardSet; PLAYERS],
    pub current_trick: Trick,
    pub trick_history: TrickHistory,
    /// Suit of the first card of the open trick.
    pub led_suit: Option<Suit>,
    /// Tricks won per seat; both members of a pair are credited for each trick.
    pub tricks_won: [u8; PLAYERS],
    pub tricks_played: u8,
}

impl GameState {
    /// Fresh episode: defender 1 (left of declarer) makes the opening lead.
    ///
    /// Hands must hold 13 cards each and partition the deck.
    pub fn new(
        contract: Contract,
        declarer: Seat,
        hands: [CardSet; PLAYERS],
    ) -> Result<Self, BridgeError> {
        let mut seen = CardSet::empty();
        for (seat, hand) in Seat::ALL.iter().zip(hands.iter()) {
            if hand.len() != HAND_SIZE {
                return Err(BridgeError::malformed_hands(format!(
                    "{seat} holds {} cards, expected {HAND_SIZE}",
                    hand.len()
                )));
            }
            if !seen.is_disjoint(hand) {
                return Err(BridgeError::malformed_hands(format!(
                    "{seat} shares cards with another seat"
                )));
            }
            seen = seen.union(hand);
        }

        let roles = Roles::from_declarer(declarer);
        Ok(Self {
            contract,
            roles,
            active_seat: roles.defender_1,
            hands,
            current_trick: Trick::new(),
            trick_history: TrickHistory::default(),
            led_suit: None,
            tricks_won: [0; PLAYERS],
            tricks_played: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.is_done() {
            Phase::EpisodeDone
        } else {
            Phase::AwaitingPlay(self.active_seat)
        }
    }

    /// All hands empty, which coincides with the 13th trick being resolved.
    pub fn is_done(&self) -> bool {
        self.hands.iter().all(CardSet::is_empty)
    }

    pub fn cards_on_table(&self) -> usize {
        self.current_trick.len()
    }

    pub fn hand(&self, seat: Seat) -> &CardSet {
        &self.hands[seat.index()]
    }

    /// Tricks taken by the declarer's pair.
    pub fn declarer_tricks(&self) -> u8 {
        self.tricks_won[self.roles.declarer.index()]
    }

    pub fn contract_made(&self) -> bool {
        self.contract.is_made(self.declarer_tricks())
    }

    /// Checks that hands, table, and history together hold each of the 52
    /// cards exactly once.
    pub fn check_partition(&self) -> Result<(), BridgeError> {
        let mut seen = CardSet::empty();
        let mut count = 0usize;
        let history_cards = self
            .trick_history
            .iter()
            .flat_map(|t| t.cards.iter().copied());
        let all: Vec<Card> = self
            .hands
            .iter()
            .flat_map(|h| h.iter())
            .chain(self.current_trick.iter().map(|(_, c)| c))
            .chain(history_cards)
            .collect();
        for card in all {
            if !seen.insert(card) {
                return Err(BridgeError::malformed_hands(format!(
                    "{card} appears more than once"
                )));
            }
            count += 1;
        }
        if seen != CardSet::full() {
            return Err(BridgeError::malformed_hands(format!(
                "only {count} of 52 cards accounted for"
            )));
        }
        Ok(())
    }
}
