//! Helper functions for domain property-based tests

use crate::domain::{Card, Rank, Seat, Suit, Trump};

/// Independent oracle for trick winner to cross-check domain logic.
/// Returns the index (0-3) of the winning play.
/// Assumes `plays` are in play order (leader first) and length == 4.
pub fn oracle_trick_winner(plays: &[(Seat, Card)], trump: Trump) -> usize {
    assert_eq!(plays.len(), 4, "Oracle requires exactly 4 plays");

    // Derive lead suit from the first play to avoid parameter mismatch.
    let lead = plays[0].1.suit;

    let trump_suit: Option<Suit> = match trump {
        Trump::Clubs => Some(Suit::Clubs),
        Trump::Diamonds => Some(Suit::Diamonds),
        Trump::Hearts => Some(Suit::Hearts),
        Trump::Spades => Some(Suit::Spades),
        Trump::NoTrump => None,
    };

    // Independent rank ordering (highest first).
    fn rank_score(r: Rank) -> u8 {
        match r {
            Rank::Ace => 13,
            Rank::King => 12,
            Rank::Queen => 11,
            Rank::Jack => 10,
            Rank::Ten => 9,
            Rank::Nine => 8,
            Rank::Eight => 7,
            Rank::Seven => 6,
            Rank::Six => 5,
            Rank::Five => 4,
            Rank::Four => 3,
            Rank::Three => 2,
            Rank::Two => 1,
        }
    }

    // Compute key = (is_trump, is_lead, rank_score) and take the max.
    let key = |c: Card| {
        (
            (trump_suit == Some(c.suit)) as u8,
            (c.suit == lead) as u8,
            rank_score(c.rank),
        )
    };
    let mut best_idx = 0;
    let mut best_key = key(plays[0].1);
    for (i, &(_, c)) in plays.iter().enumerate().skip(1) {
        let k = key(c);
        if k > best_key {
            best_key = k;
            best_idx = i;
        }
    }

    best_idx
}

/// Compute legal moves for a given hand and optional lead suit.
/// Mirrors domain::tricks::legal_moves but works on a plain slice.
pub fn legal_moves_helper(hand: &[Card], lead: Option<Suit>) -> Vec<Card> {
    if let Some(lead_suit) = lead {
        if hand.iter().any(|c| c.suit == lead_suit) {
            let mut v: Vec<Card> = hand
                .iter()
                .copied()
                .filter(|c| c.suit == lead_suit)
                .collect();
            v.sort();
            return v;
        }
    }

    let mut any = hand.to_vec();
    any.sort();
    any
}
