//! Agents playing the Fibonacci tile game.
//!
//! Two roles take turns on the same board:
//!
//! - the **environment** ([`EnvironmentAgent`]) spawns a tile after every move,
//!   choosing the cell that leaves the player the worst best response;
//! - the **player** ([`GreedyPlayer`]) slides the board, picking the move with the
//!   highest reward plus afterstate value, and can learn its value tables by TD(0).
//!
//! [`IdleAgent`] always gives up; it stands in for a player that is driven from
//! elsewhere.
//!
//! Agents are built from whitespace-separated `key=value` strings (see
//! [`AgentArgs`]), which are turned into typed configurations
//! ([`EnvironmentConfig`], [`PlayerConfig`]) before anything else happens.

use std::fmt;

use fibtile_engine::{Action, Board};
use fibtile_evaluator::{TableShapeError, WeightFileError};

pub use self::{args::*, config::*, environment::*, player::*};

mod args;
mod config;
mod environment;
mod player;

/// Common interface of every agent.
pub trait Agent: fmt::Debug {
    /// Returns the agent name (`name` property).
    fn name(&self) -> &str;

    /// Returns the agent role (`role` property).
    fn role(&self) -> &str;

    /// Called before the first action of an episode.
    fn open_episode(&mut self) {}

    /// Called after the last action of an episode.
    fn close_episode(&mut self) {}

    /// Chooses the next action for `board`, or `None` to give up.
    fn take_action(&mut self, board: &Board) -> Option<Action>;

    /// Stores a `key=value` message as a property.
    fn notify(&mut self, message: &str);
}

/// Failure while building an agent.
///
/// The display text only names the stage; the cause is available as the error source.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AgentSetupError {
    #[display("invalid agent configuration")]
    Config(AgentConfigError),
    #[display("weight file unavailable")]
    WeightFile(WeightFileError),
    #[display("invalid weight tables")]
    TableShape(TableShapeError),
}
