//! Randomized play-throughs and property tests.
//!
//! Seeded ChaCha runs deal whole games from a simulated deck and check the
//! ledger and status invariants after every command. Property tests cover
//! the scoring rules over arbitrary hands.

use flip7_tracker::cards::{identities, pool_count, Card, Modifier, POOL_SIZE};
use flip7_tracker::core::{GameConfig, PlayerId};
use flip7_tracker::deck::remaining_counts;
use flip7_tracker::game::{GameCoordinator, Phase};
use flip7_tracker::round::{InteractionMode, PlayerStatus, RoundEngine, RoundState};
use flip7_tracker::scoring::{has_duplicate_number, round_score, FLIP7_BONUS};
use im::Vector;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draw a card uniformly from what is left in the deck.
fn draw(engine: &RoundEngine, rng: &mut ChaCha8Rng) -> Option<Card> {
    let remaining = engine.remaining();
    let total = remaining.total();
    if total == 0 {
        return None;
    }
    let mut pick = rng.gen_range(0..total);
    for card in identities() {
        let available = remaining.available(card);
        if pick < available {
            return Some(card);
        }
        pick -= available;
    }
    None
}

fn check_invariants(state: &RoundState) {
    // Remaining counts are the pool minus every card in play.
    let remaining = remaining_counts(state.hands().values(), state.discard());
    let in_play: usize =
        state.hands().values().map(Vector::len).sum::<usize>() + state.discard().len();
    assert_eq!(remaining.total() as usize + in_play, POOL_SIZE as usize);
    for card in identities() {
        assert!(remaining.get(card) >= 0, "{card} over-dealt");
        assert!(remaining.get(card) <= pool_count(card) as i32);
    }

    // Only a busted hand may hold a duplicate number.
    for (player, hand) in state.hands().iter() {
        if state.status(player) != PlayerStatus::Busted {
            assert!(!has_duplicate_number(hand), "{player} holds a duplicate");
        }
    }

    // The turn marker never rests on a finished player.
    if let Some(active) = state.active_player() {
        if state.mode() == InteractionMode::Dealing {
            assert_eq!(state.status(active), PlayerStatus::Active);
        }
    }
}

/// One step of a simulated operator. Returns false once the round is over.
fn step(engine: &mut RoundEngine, rng: &mut ChaCha8Rng) -> bool {
    match engine.mode() {
        InteractionMode::AwaitingTarget(pending) => {
            let targets: Vec<PlayerId> = PlayerId::all(engine.player_count())
                .filter(|&p| engine.status(p) == PlayerStatus::Active)
                .collect();
            // The source has not finished yet, so there is always a target.
            assert!(targets.contains(&pending.source));
            let target = targets[rng.gen_range(0..targets.len())];
            engine.select_action_target(target).unwrap();
            true
        }
        InteractionMode::ForcedDrawing(_) => match draw(engine, rng) {
            Some(card) => {
                engine.deal_card(card).unwrap();
                true
            }
            None => false,
        },
        InteractionMode::Dealing => {
            if engine.is_complete() {
                return false;
            }
            let Some(active) = engine.active_player() else {
                return false;
            };
            if !engine.hand(active).is_empty() && rng.gen_bool(0.25) {
                engine
                    .set_status_and_advance(active, PlayerStatus::Stayed)
                    .unwrap();
                return true;
            }
            match draw(engine, rng) {
                Some(card) => {
                    engine.deal_card(card).unwrap();
                    true
                }
                None => false,
            }
        }
    }
}

#[test]
fn test_random_rounds_hold_invariants() {
    for seed in 0..200u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let players = rng.gen_range(2..=8);
        let dealer = PlayerId::new(rng.gen_range(0..players) as u8);
        let mut engine = RoundEngine::new(1, players, dealer, Vector::new(), &GameConfig::default());

        let mut previous = engine.state().clone();
        let mut steps = 0;
        while step(&mut engine, &mut rng) {
            steps += 1;
            let current = engine.state().clone();
            check_invariants(&current);

            // Finished players stay finished.
            for player in PlayerId::all(players) {
                if previous.status(player).is_terminal() {
                    assert_eq!(current.status(player), previous.status(player));
                }
            }

            // Every step is one accepted command, so one undo reverts it.
            if rng.gen_bool(0.1) && engine.can_undo() {
                let depth = engine.undo_depth();
                assert!(engine.undo());
                assert_eq!(engine.undo_depth(), depth - 1);
                assert_eq!(engine.state(), &previous);
                continue;
            }
            previous = current;
            assert!(steps < 10_000, "seed {seed}: round did not terminate");
        }
        assert!(engine.is_complete() || engine.total_remaining() == 0);
    }
}

#[test]
fn test_random_games_reach_game_over() {
    for seed in 0..25u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = GameCoordinator::new(GameConfig::default());
        for i in 0..rng.gen_range(2..=6) {
            game.add_player(&format!("P{i}")).unwrap();
        }
        game.start_game().unwrap();

        let mut rounds = 0;
        loop {
            let round = game.round_mut().unwrap();
            while step(round, &mut rng) {}
            // Anyone left standing stays so every hand is scored.
            while let (InteractionMode::Dealing, Some(active)) =
                (round.mode(), round.active_player())
            {
                round.set_status_and_advance(active, PlayerStatus::Stayed).unwrap();
            }

            let before: Vec<u32> = game.standings().iter().map(|s| s.total).collect();
            let record = game.end_round().unwrap().clone();
            rounds += 1;

            let gained: u32 = record.scores.values().sum();
            let after: u32 = game.standings().iter().map(|s| s.total).sum();
            assert_eq!(after, before.iter().sum::<u32>() + gained);

            match game.phase() {
                Phase::GameOver => break,
                Phase::RoundEnd => game.next_round().unwrap(),
                other => panic!("unexpected phase {other:?}"),
            }
            assert!(rounds < 500, "seed {seed}: game did not finish");
        }

        let best = game.standings()[0].total;
        assert!(best >= game.target_score());
        let result = game.winner().unwrap();
        for standing in game.standings() {
            assert_eq!(result.is_winner(standing.player), standing.total == best);
        }
        assert_eq!(game.history().len(), rounds);
    }
}

fn hand_of(numbers: &[u8], modifiers: &[Modifier]) -> Vector<Card> {
    numbers
        .iter()
        .map(|&v| Card::number(v).unwrap())
        .chain(modifiers.iter().map(|&m| Card::Modifier(m)))
        .collect()
}

proptest! {
    #[test]
    fn prop_round_score_formula(
        numbers in proptest::sample::subsequence((0u8..=12).collect::<Vec<_>>(), 0..=7),
        modifiers in proptest::sample::subsequence(Modifier::ALL.to_vec(), 0..=6),
        flip7 in any::<bool>(),
    ) {
        let hand = hand_of(&numbers, &modifiers);
        let base: u32 = numbers.iter().map(|&v| u32::from(v)).sum();
        let doubled = if modifiers.contains(&Modifier::Times2) { base * 2 } else { base };
        let flat: u32 = modifiers.iter().filter_map(|m| m.bonus()).sum();
        let bonus = if flip7 { FLIP7_BONUS } else { 0 };

        prop_assert_eq!(round_score(&hand, flip7), doubled + flat + bonus);
    }

    #[test]
    fn prop_card_order_does_not_change_score(
        numbers in proptest::sample::subsequence((0u8..=12).collect::<Vec<_>>(), 0..=7),
        modifiers in proptest::sample::subsequence(Modifier::ALL.to_vec(), 0..=6),
    ) {
        let forward = hand_of(&numbers, &modifiers);
        let reversed: Vector<Card> = forward.iter().rev().copied().collect();
        prop_assert_eq!(round_score(&forward, false), round_score(&reversed, false));
    }

    #[test]
    fn prop_remaining_counts_subtract_dealt(
        dealt in proptest::collection::vec(0usize..22, 0..40),
    ) {
        let cards: Vec<Card> = identities().collect();
        let hand: Vector<Card> = dealt.iter().map(|&i| cards[i]).collect();
        let remaining = remaining_counts(std::iter::once(&hand), &Vector::new());

        for card in identities() {
            let used = hand.iter().filter(|&&c| c == card).count() as i32;
            prop_assert_eq!(remaining.get(card), pool_count(card) as i32 - used);
        }
    }
}
