//! Deck generation, shuffling, and dealing.
//!
//! Shuffling draws from a caller-supplied RNG so that a seeded generator
//! reproduces the same deal.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards_types::{Card, Rank, Suit, DECK_SIZE};
use super::hand::CardSet;
use super::rules::{HAND_SIZE, PLAYERS};

/// A full 52-card deck in card id order (2♣, 2♦, 2♥, 2♠, 3♣, ...).
pub fn new_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for rank in Rank::ALL {
        for suit in Suit::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

/// Deals consecutive blocks of 13 in seat order: first block to N, then E, S, W.
pub fn deal(deck: &[Card]) -> [CardSet; PLAYERS] {
    let mut hands = [CardSet::empty(); PLAYERS];
    for (hand, block) in hands.iter_mut().zip(deck.chunks(HAND_SIZE)) {
        hand.add(block.iter().copied());
    }
    hands
}

/// New deck, shuffled and dealt.
pub fn deal_hands<R: Rng + ?Sized>(rng: &mut R) -> [CardSet; PLAYERS] {
    let mut deck = new_deck();
    shuffle(&mut deck, rng);
    deal(&deck)
}
