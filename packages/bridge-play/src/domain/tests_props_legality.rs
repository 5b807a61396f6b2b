/// Property-based tests for follow-suit legality rules
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{EngineSettings, EpisodeConfig};
use crate::domain::domain_prop_helpers::legal_moves_helper;
use crate::domain::test_state_helpers::state_with_hands;
use crate::domain::tricks::legal_moves;
use crate::domain::{test_gens, test_prelude, Card, CardSet, PlayEngine, Proposal, Seat, Trump};

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: `legal_moves` on a live state agrees with the plain-slice helper.
    #[test]
    fn prop_legal_moves_match_helper(
        hand in test_gens::hand(),
        lead in proptest::option::of(test_gens::suit()),
    ) {
        let hands = [hand.iter().copied().collect(), CardSet::empty(), CardSet::empty(), CardSet::empty()];
        let mut state = state_with_hands(hands, Trump::NoTrump, Seat::W, Seat::N);
        state.led_suit = lead;

        let legal = legal_moves(&state, Seat::N);
        prop_assert_eq!(sorted(legal.to_vec()), legal_moves_helper(&hand, lead));
        prop_assert!(!legal.is_empty());
    }

    /// Property: If hand has no cards of the lead suit, all cards in hand are legal.
    #[test]
    fn prop_follow_suit_when_void((lead_suit, hand_without) in test_gens::suit().prop_flat_map(|s| {
        (Just(s), test_gens::hand_without_suit(s))
    })) {
        let set: CardSet = hand_without.iter().copied().collect();
        let hands = [CardSet::empty(), set, CardSet::empty(), CardSet::empty()];
        let mut state = state_with_hands(hands, Trump::NoTrump, Seat::N, Seat::E);
        state.led_suit = Some(lead_suit);

        prop_assert_eq!(legal_moves(&state, Seat::E), set);
    }

    /// Property: `legal_suit_cards` picks exactly the held cards of a raw suit index.
    #[test]
    fn prop_legal_suit_cards_by_index(
        hand in test_gens::hand(),
        suit_index in 0i64..4,
    ) {
        let set: CardSet = hand.iter().copied().collect();
        let picked = set.legal_suit_cards(suit_index).unwrap();
        let expected = hand.iter().filter(|c| c.suit.index() as i64 == suit_index).count();
        prop_assert_eq!(picked.len(), expected);
        for card in &picked {
            prop_assert!(set.contains(card));
            prop_assert_eq!(card.suit.index() as i64, suit_index);
        }
        prop_assert!(set.legal_suit_cards(suit_index + 4).is_err());
    }

    /// Property: whatever the proposals, every card the engine plays follows
    /// suit whenever the seat could.
    #[test]
    fn prop_engine_always_follows_suit(
        seed in test_gens::seed(),
        raw_ids in proptest::collection::vec(test_gens::raw_proposal_id(), 52),
    ) {
        let mut engine = PlayEngine::new(EngineSettings::default(), ChaCha8Rng::seed_from_u64(seed));
        let (mut state, _) = engine.reset(&EpisodeConfig::default()).unwrap();

        for raw in raw_ids {
            let seat = state.active_seat;
            let legal = legal_moves(&state, seat);
            let led = state.led_suit;
            let held_led = led.is_some_and(|s| state.hand(seat).has_suit(s));

            let out = engine.step(&mut state, seat, Proposal::from_id(raw)).unwrap();
            prop_assert!(legal.contains(out.info.played));
            if held_led {
                prop_assert_eq!(Some(out.info.played.suit), led);
            }
            if out.info.action_valid {
                prop_assert_eq!(Proposal::from_id(raw), Proposal::Card(out.info.played));
            }
        }
        prop_assert!(state.is_done());
    }
}
