//! Property tests for generation and state invariants.

use std::time::Duration;

use proptest::prelude::*;

use math_race::{GameRng, Operator, OptionSet, Phase, Problem, RaceBuilder, OPTION_COUNT};

/// Player moves for random game scripts.
#[derive(Clone, Debug)]
enum Move {
    Correct,
    Wrong,
    Bogus(u32),
    Wait(u64),
    Restart,
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop_oneof![
        3 => Just(Move::Correct),
        3 => Just(Move::Wrong),
        1 => (1000u32..5000).prop_map(Move::Bogus),
        2 => (0u64..12_000).prop_map(Move::Wait),
        1 => Just(Move::Restart),
    ]
}

proptest! {
    #[test]
    fn generated_problems_hold_invariants(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        for _ in 0..50 {
            let p = Problem::generate(&mut rng);
            match p.operator {
                Operator::Sub => prop_assert!(p.operand_a > p.operand_b),
                Operator::Div => {
                    prop_assert_eq!(p.operand_a % p.operand_b, 0);
                    prop_assert_eq!(p.operand_a / p.operand_b, p.correct_answer);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn option_sets_hold_invariants(seed in any::<u64>(), cap in 0u32..50) {
        let mut rng = GameRng::new(seed);
        for _ in 0..20 {
            let problem = Problem::generate(&mut rng);
            let options = OptionSet::generate(&problem, &mut rng, cap);
            let values = options.values();

            prop_assert_eq!(values.len(), OPTION_COUNT);
            prop_assert_eq!(values.iter().filter(|&&v| v == problem.correct_answer).count(), 1);
            let mut sorted = values.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), OPTION_COUNT);
        }
    }

    #[test]
    fn checked_constructor_accepts_only_valid(a in 0u32..200, b in 0u32..200) {
        for op in Operator::ALL {
            if let Some(p) = Problem::new(a, b, op) {
                if op == Operator::Sub {
                    prop_assert!(a > b);
                }
                if op == Operator::Div {
                    prop_assert_eq!(p.correct_answer * b, a);
                }
            }
        }
    }

    #[test]
    fn random_scripts_keep_state_in_bounds(
        seed in any::<u64>(),
        moves in prop::collection::vec(move_strategy(), 1..60),
    ) {
        let mut engine = RaceBuilder::new().seed(seed).build().unwrap();
        engine.start_game().unwrap();
        engine.run_until_input();

        for step in moves {
            let before = engine.history().len();
            match step {
                Move::Correct | Move::Wrong if engine.phase() == Phase::RoundActive => {
                    let answer = engine.problem().unwrap().correct_answer;
                    let pick = match step {
                        Move::Correct => answer,
                        _ => engine.options().unwrap().iter().find(|&v| v != answer).unwrap(),
                    };
                    prop_assert!(engine.submit_answer(pick).is_some());
                    prop_assert_eq!(engine.history().len(), before + 1);
                    prop_assert!(!engine.timer_running());
                }
                Move::Correct | Move::Wrong => {
                    prop_assert!(engine.submit_answer(0).is_none());
                }
                Move::Bogus(value) => {
                    let shown = engine.options().map_or(false, |o| o.contains(value));
                    if !shown {
                        prop_assert!(engine.submit_answer(value).is_none());
                        prop_assert_eq!(engine.history().len(), before);
                    }
                }
                Move::Wait(ms) => engine.advance(Duration::from_millis(ms)),
                Move::Restart => engine.restart(),
            }

            let state = engine.state();
            prop_assert!(state.lives() <= 3);
            prop_assert!(state.score() <= state.target_score());
            prop_assert_eq!(state.lives() == 0, engine.phase() == Phase::Lose);
            if engine.phase() == Phase::Win {
                prop_assert_eq!(state.score(), state.target_score());
            }
            let position = engine.car_position(state.score());
            prop_assert!((0.0..=1.0).contains(&position));
            prop_assert!(engine.scheduler().pending() <= 1);
        }
    }
}
