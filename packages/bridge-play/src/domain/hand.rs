//! `CardSet`: the hand container, a 52-flag bitset keyed by card id.
//!
//! A hand is logically a set. Iteration is always in ascending card id
//! order, which keeps every consumer (legal moves, substitution draws,
//! encodings) deterministic for a given state.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Suit, DECK_SIZE};
use crate::errors::BridgeError;

const FULL_MASK: u64 = (1u64 << DECK_SIZE) - 1;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CardSet(u64);

impl CardSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn full() -> Self {
        Self(FULL_MASK)
    }

    #[inline]
    const fn bit(card: Card) -> u64 {
        1u64 << card.id()
    }

    /// Inserts every card; duplicates across calls are absorbed by the set.
    pub fn add<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.insert(card);
        }
    }

    /// Returns false if the card was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let had = self.contains(card);
        self.0 |= Self::bit(card);
        !had
    }

    pub fn remove(&mut self, card: Card) -> Result<(), BridgeError> {
        if !self.contains(card) {
            return Err(BridgeError::CardNotFound(card));
        }
        self.0 &= !Self::bit(card);
        Ok(())
    }

    /// Removes and returns the highest-id card, if any. Once a hand is down
    /// to its last card this takes exactly that card.
    pub fn remove_last(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let id = 63 - self.0.leading_zeros();
        self.0 &= !(1u64 << id);
        Card::from_id(id as i64).ok()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, card: Card) -> bool {
        self.0 & Self::bit(card) != 0
    }

    pub fn is_disjoint(&self, other: &CardSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn union(&self, other: &CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    pub fn iter(&self) -> CardSetIter {
        CardSetIter(self.0)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.iter().any(|c| c.suit == suit)
    }

    pub fn suit_cards(&self, suit: Suit) -> CardSet {
        self.iter().filter(|c| c.suit == suit).collect()
    }

    /// Cards matching a raw suit index; the index must be in 0..=3.
    pub fn legal_suit_cards(&self, suit: i64) -> Result<CardSet, BridgeError> {
        let suit = Suit::from_index(suit)?;
        Ok(self.suit_cards(suit))
    }

    /// 52-length 0/1 projection, 1 at each held card's id.
    pub fn as_bitmask(&self) -> [u8; DECK_SIZE] {
        let mut mask = [0u8; DECK_SIZE];
        for card in self.iter() {
            mask[card.id() as usize] = 1;
        }
        mask
    }

    /// Display order only: grouped by suit (C, D, H, S), ascending rank within a suit.
    pub fn sorted_for_display(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.iter().collect();
        cards.sort_by_key(|c| c.rank);
        cards.sort_by_key(|c| c.suit);
        cards
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().collect()
    }
}

pub struct CardSetIter(u64);

impl Iterator for CardSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        while self.0 != 0 {
            let id = self.0.trailing_zeros();
            self.0 &= self.0 - 1;
            if let Ok(card) = Card::from_id(id as i64) {
                return Some(card);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::empty();
        set.add(iter);
        set
    }
}

impl<'a> IntoIterator for &'a CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;

    fn into_iter(self) -> CardSetIter {
        self.iter()
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = self.sorted_for_display();
        for (i, card) in cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

// Serialized as a plain sequence of card tokens, in id order.
impl Serialize for CardSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for CardSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cards = Vec::<Card>::deserialize(deserializer)?;
        Ok(cards.into_iter().collect())
    }
}
