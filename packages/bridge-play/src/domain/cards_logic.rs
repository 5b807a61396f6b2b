//! Card game logic: comparing card strength within a trick

use super::cards_types::{Card, Suit, Trump};

const LED_BONUS: u16 = 100;
const TRUMP_BONUS: u16 = 200;

/// Strength of a card in a trick: rank, +100 when it follows the led suit,
/// +200 when it is a trump. Any trump outranks every led-suit card and a
/// discard (neither led nor trump) can never win.
pub fn card_power(card: Card, led: Suit, trump: Trump) -> u16 {
    let mut power = card.rank.index() as u16;
    if card.suit == led {
        power += LED_BONUS;
    }
    if trump.suit() == Some(card.suit) {
        power += TRUMP_BONUS;
    }
    power
}

pub fn card_beats(a: Card, b: Card, led: Suit, trump: Trump) -> bool {
    card_power(a, led, trump) > card_power(b, led, trump)
}
