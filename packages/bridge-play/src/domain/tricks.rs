use serde::{Deserialize, Serialize};

use crate::domain::cards_logic::card_beats;
use crate::domain::hand::CardSet;
use crate::domain::rules::PLAYERS;
use crate::domain::seats::Seat;
use crate::domain::state::{GameState, Phase};
use crate::domain::{Card, Suit, Trump};
use crate::errors::BridgeError;

/// Cards on the table for the open trick, one slot per seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    cards: [Option<Card>; PLAYERS],
    leader: Option<Seat>,
}

impl Trick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `card` in `seat`'s slot; the first card placed makes `seat` the leader.
    pub fn place(&mut self, seat: Seat, card: Card) -> Result<(), BridgeError> {
        let slot = &mut self.cards[seat.index()];
        if slot.is_some() {
            return Err(BridgeError::SlotOccupied(seat));
        }
        *slot = Some(card);
        if self.leader.is_none() {
            self.leader = Some(seat);
        }
        Ok(())
    }

    pub fn get(&self, seat: Seat) -> Option<Card> {
        self.cards[seat.index()]
    }

    pub fn leader(&self) -> Option<Seat> {
        self.leader
    }

    pub fn len(&self) -> usize {
        self.cards.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.leader.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.len() == PLAYERS
    }

    /// Occupied slots in seat order N, E, S, W.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, Card)> + '_ {
        Seat::ALL
            .into_iter()
            .filter_map(|s| self.cards[s.index()].map(|c| (s, c)))
    }

    /// All four cards indexed by seat, once the trick is complete.
    pub fn full_cards(&self) -> Option<[Card; PLAYERS]> {
        let [n, e, s, w] = self.cards;
        Some([n?, e?, s?, w?])
    }

    pub fn cards(&self) -> CardSet {
        self.iter().map(|(_, c)| c).collect()
    }
}

/// A resolved trick as kept in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    /// Indexed by seat.
    pub cards: [Card; PLAYERS],
    pub leader: Seat,
    pub winner: Seat,
}

impl CompletedTrick {
    pub fn card_of(&self, seat: Seat) -> Card {
        self.cards[seat.index()]
    }

    pub fn led_suit(&self) -> Suit {
        self.card_of(self.leader).suit
    }
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// Completed tricks after this play.
    pub tricks_played_after: u8,
    /// True when this play ended the episode.
    pub episode_done: bool,
}

/// Winning seat of a complete trick: the highest `card_power`, walking the
/// seats in play order from the leader.
pub fn trick_winner(trick: &Trick, led: Suit, trump: Trump) -> Result<Seat, BridgeError> {
    if !trick.is_complete() {
        return Err(BridgeError::IncompleteTrick(trick.len()));
    }
    let leader = trick.leader().ok_or(BridgeError::IncompleteTrick(0))?;
    let mut best: Option<(Seat, Card)> = None;
    for offset in 0..PLAYERS as i8 {
        let seat = leader.offset(offset);
        let card = trick
            .get(seat)
            .ok_or(BridgeError::IncompleteTrick(trick.len()))?;
        match best {
            Some((_, top)) if !card_beats(card, top, led, trump) => {}
            _ => best = Some((seat, card)),
        }
    }
    best.map(|(seat, _)| seat).ok_or(BridgeError::IncompleteTrick(0))
}

/// Compute legal cards the seat may play, independent of turn enforcement.
pub fn legal_moves(state: &GameState, who: Seat) -> CardSet {
    let hand = &state.hands[who.index()];
    if let Some(led) = state.led_suit {
        if hand.has_suit(led) {
            return hand.suit_cards(led);
        }
    }
    *hand
}

/// Play a card into the current trick, enforcing turn, suit-following, and
/// episode end. All checks run before anything is mutated.
pub fn play_card(
    state: &mut GameState,
    who: Seat,
    card: Card,
) -> Result<PlayCardResult, BridgeError> {
    let Phase::AwaitingPlay(active) = state.phase() else {
        return Err(BridgeError::EpisodeFinished);
    };
    if active != who {
        return Err(BridgeError::OutOfTurn {
            requested: who,
            active,
        });
    }
    if !state.hands[who.index()].contains(card) {
        return Err(BridgeError::CardNotFound(card));
    }
    if !legal_moves(state, who).contains(card) {
        return Err(BridgeError::IllegalPlay { seat: who, card });
    }
    if state.current_trick.get(who).is_some() {
        return Err(BridgeError::SlotOccupied(who));
    }

    state.hands[who.index()].remove(card)?;
    state.current_trick.place(who, card)?;
    if state.led_suit.is_none() {
        state.led_suit = Some(card.suit);
    }

    let mut result = PlayCardResult {
        trick_winner: None,
        tricks_played_after: state.tricks_played,
        episode_done: false,
    };

    if !state.current_trick.is_complete() {
        state.active_seat = who.next();
        return Ok(result);
    }

    let winner = resolve_current_trick(state)?;
    result.trick_winner = Some(winner);
    result.tricks_played_after = state.tricks_played;
    result.episode_done = state.is_done();
    Ok(result)
}

/// Resolve the full trick on the table: record it in the history, credit the
/// winning pair, clear the table and hand the lead to the winner.
pub fn resolve_current_trick(state: &mut GameState) -> Result<Seat, BridgeError> {
    let trick = state.current_trick;
    let led = state
        .led_suit
        .ok_or(BridgeError::IncompleteTrick(trick.len()))?;
    let winner = trick_winner(&trick, led, state.contract.trump)?;

    let cards = trick
        .full_cards()
        .ok_or(BridgeError::IncompleteTrick(trick.len()))?;
    let leader = trick
        .leader()
        .ok_or(BridgeError::IncompleteTrick(trick.len()))?;
    state.trick_history.push(CompletedTrick {
        cards,
        leader,
        winner,
    })?;

    state.tricks_played += 1;
    state.tricks_won[winner.index()] += 1;
    state.tricks_won[winner.partner().index()] += 1;
    state.current_trick = Trick::new();
    state.led_suit = None;
    state.active_seat = winner;
    Ok(winner)
}
