//! Property-based and deterministic invariant tests.
//!
//! Uses proptest to generate (seed, num_commands); replays synthetic commands
//! into the engine and asserts quantity conservation, positive resting
//! quantities, IOC remainders never resting, no crossed book, and snapshot
//! idempotence. Deterministic replay: same config => same outcome.

use crossbook::market_data_gen::{Generator, GeneratorConfig};
use crossbook::{Amendment, Command, EngineEvent, MatchingEngine, Side, TimeInForce};
use proptest::prelude::*;

fn book_total(engine: &MatchingEngine) -> i128 {
    engine.resting_quantity(Side::Buy) + engine.resting_quantity(Side::Sell)
}

/// Applies one command while checking per-step quantity accounting.
fn apply_checked(engine: &mut MatchingEngine, command: Command) -> Vec<EngineEvent> {
    let before = book_total(engine);
    match command {
        Command::Submit(order) => {
            let submitted = i128::from(order.quantity);
            let tif = order.time_in_force;
            let id = order.order_id.clone();
            let was_resting = engine.contains(&id);
            let trades = engine.submit(order).unwrap();
            let traded: i128 = trades.iter().map(|t| i128::from(t.quantity)).sum();
            assert!(traded <= submitted, "traded more than submitted");
            for t in &trades {
                assert!(t.quantity > 0, "trade quantity must be positive");
            }
            let after = book_total(engine);
            match tif {
                TimeInForce::GFD => assert_eq!(after, before + submitted - 2 * traded),
                TimeInForce::IOC => {
                    assert_eq!(after, before - traded);
                    if !was_resting {
                        assert!(!engine.contains(&id), "IOC remainder must never rest");
                    }
                }
            }
            trades.into_iter().map(EngineEvent::Trade).collect()
        }
        Command::Cancel { order_id } => {
            let resting = engine.book().get(&order_id).map(|o| i128::from(o.quantity)).unwrap_or(0);
            engine.cancel(&order_id);
            assert_eq!(book_total(engine), before - resting);
            Vec::new()
        }
        Command::Modify {
            order_id,
            side,
            price,
            quantity,
        } => {
            let resting = engine.book().get(&order_id).map(|o| i128::from(o.quantity));
            let found = engine.modify_or_cancel(
                &order_id,
                Amendment::Replace {
                    side,
                    price,
                    quantity,
                },
            );
            assert_eq!(found, resting.is_some());
            let reinserted = side.is_some() && price > 0 && quantity > 0;
            let expected = match resting {
                Some(old) if reinserted => before - old + i128::from(quantity),
                Some(old) => before - old,
                None => before,
            };
            assert_eq!(book_total(engine), expected, "modify must not trade");
            Vec::new()
        }
        Command::Print => {
            let first = engine.execute(Command::Print);
            let second = engine.execute(Command::Print);
            assert_eq!(first, second, "snapshot must be idempotent");
            assert_eq!(book_total(engine), before);
            first
        }
    }
}

fn assert_resting_quantities_positive(engine: &MatchingEngine) {
    for side in [Side::Buy, Side::Sell] {
        for order in engine.book().resting_orders(side) {
            assert!(order.quantity > 0 && order.price > 0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Submit/cancel only: conservation holds and the book is never crossed.
    #[test]
    fn prop_conservation_without_modify(seed in 0u64..100_000u64, num_commands in 10usize..200usize) {
        let config = GeneratorConfig {
            seed,
            num_commands,
            modify_ratio: 0.0,
            ..Default::default()
        };
        let mut engine = MatchingEngine::new();
        for command in Generator::new(config).all_commands() {
            apply_checked(&mut engine, command);
            if let (Some(bid), Some(ask)) = (engine.best_bid(), engine.best_ask()) {
                prop_assert!(bid < ask, "crossed book: bid {} ask {}", bid, ask);
            }
        }
        assert_resting_quantities_positive(&engine);
    }

    /// Full command mix including modifies (which may leave the book crossed).
    #[test]
    fn prop_accounting_with_modify(seed in 0u64..100_000u64, num_commands in 10usize..200usize) {
        let config = GeneratorConfig {
            seed,
            num_commands,
            ioc_ratio: 0.3,
            ..Default::default()
        };
        let mut engine = MatchingEngine::new();
        for command in Generator::new(config).all_commands() {
            apply_checked(&mut engine, command);
        }
        assert_resting_quantities_positive(&engine);
        let snapshot = engine.snapshot();
        let level_total: i128 = snapshot.asks.iter().chain(&snapshot.bids).map(|l| l.quantity).sum();
        prop_assert_eq!(level_total, book_total(&engine));
        prop_assert!(snapshot.asks.windows(2).all(|w| w[0].price > w[1].price));
        prop_assert!(snapshot.bids.windows(2).all(|w| w[0].price > w[1].price));
    }
}

/// Deterministic replay: same config => same events and same final book.
#[test]
fn deterministic_replay_same_seed_same_outcome() {
    let config = GeneratorConfig {
        seed: 999,
        num_commands: 300,
        ..Default::default()
    };

    let mut engine1 = MatchingEngine::new();
    let events1: Vec<EngineEvent> = Generator::new(config.clone())
        .all_commands()
        .into_iter()
        .flat_map(|c| engine1.execute(c))
        .collect();

    let mut engine2 = MatchingEngine::new();
    let events2: Vec<EngineEvent> = Generator::new(config)
        .all_commands()
        .into_iter()
        .flat_map(|c| engine2.execute(c))
        .collect();

    assert_eq!(events1, events2);
    assert_eq!(engine1.snapshot(), engine2.snapshot());
}

/// Text and typed paths agree on the same stream.
#[test]
fn text_replay_matches_typed_replay() {
    let config = GeneratorConfig {
        seed: 31,
        num_commands: 200,
        ..Default::default()
    };
    let text = Generator::new(config.clone()).all_lines();
    let mut out = Vec::new();
    let summary = crossbook::run(text.as_bytes(), &mut out, crossbook::OutputFormat::Text).unwrap();
    assert_eq!(summary.ignored, 0);

    let mut engine = MatchingEngine::new();
    let mut expected = Vec::new();
    for command in Generator::new(config).all_commands() {
        for event in engine.execute(command) {
            crossbook::render_event(&mut expected, &event, crossbook::OutputFormat::Text).unwrap();
        }
    }
    assert_eq!(out, expected);
}
