//! Adversarial tile placement.
//!
//! After every player move the environment spawns one tile. Instead of picking a
//! random cell it searches one ply ahead:
//!
//! 1. Shuffle the 16 cell indices
//! 2. Draw the spawn rank: 1 with probability 3/4, otherwise 3
//! 3. For every empty cell, place the rank on a copy of the board and compute the
//!    player's best response: the maximum afterstate value over the four directions
//! 4. Keep the cell with the smallest best response
//!
//! Ties keep the first cell met in the shuffled order, so equal values are broken
//! by the shuffle rather than by a fixed rule. With untrained tables every value
//! is 0.0 and the environment simply takes the first empty cell of the shuffle.

use std::array;

use fibtile_engine::{Action, Board, CELL_COUNT, Direction, EMPTY};
use fibtile_evaluator::{BoardEvaluator, LineTupleEvaluator, load_weights};
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::{Agent, AgentSetupError, args::AgentArgs, config::EnvironmentConfig};

/// Properties every environment agent starts with.
pub const ENVIRONMENT_DEFAULTS: &str = "name=evil role=environment";

/// Rank of the common spawn (tile 1).
pub const COMMON_SPAWN: u8 = 1;

/// Rank of the rare spawn (tile 3), drawn with probability 1/4.
pub const RARE_SPAWN: u8 = 3;

/// Environment agent placing tiles to minimize the player's best response.
#[derive(Debug)]
pub struct EnvironmentAgent {
    args: AgentArgs,
    rng: Pcg32,
    evaluator: Box<dyn BoardEvaluator>,
}

impl EnvironmentAgent {
    /// Builds the agent from a `key=value` argument string.
    ///
    /// Loads the weight file named by `load`, if any.
    pub fn new(args: &str) -> Result<Self, AgentSetupError> {
        let args = AgentArgs::parse(ENVIRONMENT_DEFAULTS, args);
        let config = EnvironmentConfig::from_args(&args)?;
        let evaluator = match &config.load {
            Some(path) => LineTupleEvaluator::from_tables(load_weights(path)?)?,
            None => LineTupleEvaluator::new(),
        };
        Ok(Self::with_evaluator(args, &config, Box::new(evaluator)))
    }

    /// Builds the agent around an arbitrary evaluator.
    #[must_use]
    pub fn with_evaluator(
        args: AgentArgs,
        config: &EnvironmentConfig,
        evaluator: Box<dyn BoardEvaluator>,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("{}: placement seed {seed}", args.name());
        Self {
            args,
            rng: Pcg32::seed_from_u64(seed),
            evaluator,
        }
    }

    /// Returns the best value the player can reach from `board` with one move.
    ///
    /// Directions whose move is illegal are scored on the unchanged board.
    #[must_use]
    pub fn best_response(&self, board: &Board) -> f32 {
        Direction::ALL
            .into_iter()
            .map(|direction| self.evaluator.evaluate(&board.simulate_move(direction).board))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    fn draw_spawn_rank(&mut self) -> u8 {
        if self.rng.random_range(0..=3) == 0 {
            RARE_SPAWN
        } else {
            COMMON_SPAWN
        }
    }
}

impl Agent for EnvironmentAgent {
    fn name(&self) -> &str {
        self.args.name()
    }

    fn role(&self) -> &str {
        self.args.role()
    }

    fn take_action(&mut self, after: &Board) -> Option<Action> {
        let mut cells: [usize; CELL_COUNT] = array::from_fn(|i| i);
        cells.shuffle(&mut self.rng);
        let rank = self.draw_spawn_rank();

        let mut chosen: Option<(usize, f32)> = None;
        for cell in cells {
            if after.cell_at(cell) != EMPTY {
                continue;
            }
            let mut placed = *after;
            placed.set_at(cell, rank);
            let response = self.best_response(&placed);
            if chosen.is_none_or(|(_, min)| response < min) {
                chosen = Some((cell, response));
            }
        }

        let (cell, response) = chosen?;
        log::trace!("place rank {rank} at {cell} (best response {response})");
        Some(Action::place(rank, cell))
    }

    fn notify(&mut self, message: &str) {
        self.args.notify(message);
    }
}
