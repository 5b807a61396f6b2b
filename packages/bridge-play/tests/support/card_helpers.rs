//! Test helpers for card parsing and fixed deals

use bridge_play::domain::try_parse_cards;
use bridge_play::Card;

/// Parse hardcoded card tokens known to be valid.
pub fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens.iter().copied()).expect("hardcoded valid card tokens")
}

/// Deal in which declarer N with spades trump takes exactly nine tricks when
/// every seat plays its lowest-id legal card.
pub fn nine_trick_deal() -> [Vec<Card>; 4] {
    [
        cards(&[
            "2D", "2S", "3H", "6C", "6H", "7H", "8D", "TC", "JD", "QC", "QH", "KH", "KS",
        ]),
        cards(&[
            "3D", "3S", "4C", "4D", "5H", "7D", "8C", "9C", "TH", "JH", "KC", "KD", "AC",
        ]),
        cards(&[
            "3C", "4S", "5C", "5S", "6S", "7C", "7S", "8H", "TD", "TS", "JS", "QS", "AD",
        ]),
        cards(&[
            "2C", "2H", "4H", "5D", "6D", "8S", "9D", "9H", "9S", "JC", "QD", "AH", "AS",
        ]),
    ]
}
