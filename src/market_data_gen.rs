//! Synthetic command stream generator.
//!
//! Deterministic, configurable stream of BUY/SELL/CANCEL/MODIFY/PRINT commands
//! for replay tests, property tests, and benchmarks. Same seed => same stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::command::Command;
use crate::engine::MatchingEngine;
use crate::execution::EngineEvent;
use crate::types::{Order, OrderId, Side, TimeInForce};

/// Configuration for the synthetic command generator.
/// All ranges are inclusive. Same config + seed produces the same stream.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed => same command stream.
    pub seed: u64,
    /// Number of commands produced by [`Generator::all_commands`].
    pub num_commands: usize,
    /// Probability that a new order is a BUY (SELL otherwise).
    pub buy_ratio: f64,
    /// Probability that a new order is IOC (GFD otherwise).
    pub ioc_ratio: f64,
    /// Probability of a CANCEL instead of a new order (needs a known id).
    pub cancel_ratio: f64,
    /// Probability of a MODIFY instead of a new order (needs a known id).
    pub modify_ratio: f64,
    /// Probability of a PRINT.
    pub print_ratio: f64,
    pub price_min: i64,
    pub price_max: i64,
    pub quantity_min: i64,
    pub quantity_max: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_commands: 1000,
            buy_ratio: 0.5,
            ioc_ratio: 0.1,
            cancel_ratio: 0.1,
            modify_ratio: 0.1,
            print_ratio: 0.02,
            price_min: 95,
            price_max: 105,
            quantity_min: 1,
            quantity_max: 100,
        }
    }
}

/// Deterministic command stream. Create with [`Generator::new`].
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    next_order_id: u64,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            rng,
            config,
            next_order_id: 1,
        }
    }

    /// Generates the next command. CANCEL and MODIFY target ids issued
    /// earlier, which may or may not still rest.
    pub fn next_command(&mut self) -> Command {
        let issued = self.next_order_id - 1;
        let r = self.rng.gen::<f64>();
        let print_cut = self.config.print_ratio;
        let cancel_cut = print_cut + self.config.cancel_ratio;
        let modify_cut = cancel_cut + self.config.modify_ratio;
        if r < print_cut {
            return Command::Print;
        }
        if issued > 0 && r < cancel_cut {
            let order_id = self.known_id(issued);
            return Command::Cancel { order_id };
        }
        if issued > 0 && r < modify_cut {
            let order_id = self.known_id(issued);
            let side = self.side();
            let price = self.rng.gen_range(self.config.price_min..=self.config.price_max);
            let quantity = self
                .rng
                .gen_range(self.config.quantity_min..=self.config.quantity_max);
            return Command::Modify {
                order_id,
                side: Some(side),
                price,
                quantity,
            };
        }
        Command::Submit(self.next_order())
    }

    /// Generates a new order with a fresh id.
    pub fn next_order(&mut self) -> Order {
        let order_id = OrderId(format!("gen-{}", self.next_order_id));
        self.next_order_id += 1;
        let side = self.side();
        let time_in_force = if self.rng.gen::<f64>() < self.config.ioc_ratio {
            TimeInForce::IOC
        } else {
            TimeInForce::GFD
        };
        let price = self.rng.gen_range(self.config.price_min..=self.config.price_max);
        let quantity = self
            .rng
            .gen_range(self.config.quantity_min..=self.config.quantity_max);
        Order {
            order_id,
            side,
            time_in_force,
            price,
            quantity,
        }
    }

    /// Returns exactly `n` commands. Advances the generator state.
    pub fn take_commands(&mut self, n: usize) -> Vec<Command> {
        (0..n).map(|_| self.next_command()).collect()
    }

    /// Returns the full stream as defined by `config.num_commands`.
    pub fn all_commands(&mut self) -> Vec<Command> {
        self.take_commands(self.config.num_commands)
    }

    /// The stream rendered as input text, one command per line.
    pub fn all_lines(&mut self) -> String {
        let mut text = String::new();
        for command in self.all_commands() {
            text.push_str(&command.to_string());
            text.push('\n');
        }
        text
    }

    fn side(&mut self) -> Side {
        if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    fn known_id(&mut self, issued: u64) -> OrderId {
        OrderId(format!("gen-{}", self.rng.gen_range(1..=issued)))
    }
}

/// Replays commands into the engine. Returns (trade events, snapshot events).
pub fn replay_into_engine(
    engine: &mut MatchingEngine,
    commands: impl IntoIterator<Item = Command>,
) -> (usize, usize) {
    let mut trades = 0usize;
    let mut snapshots = 0usize;
    for command in commands {
        for event in engine.execute(command) {
            match event {
                EngineEvent::Trade(_) => trades += 1,
                EngineEvent::Book(_) => snapshots += 1,
            }
        }
    }
    (trades, snapshots)
}
