use std::{path::PathBuf, str::FromStr};

use crate::args::AgentArgs;

/// Learning rate used when `alpha` is not given.
pub const DEFAULT_ALPHA: f32 = 0.0025;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AgentConfigError {
    #[display("invalid value for `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },
    #[display("learning rate must be finite and non-negative, got {_0}")]
    InvalidAlpha(#[error(not(source))] String),
}

fn parse_opt<T>(args: &AgentArgs, key: &str) -> Result<Option<T>, AgentConfigError>
where
    T: FromStr,
{
    args.get(key)
        .map(|value| {
            value.parse().map_err(|_| AgentConfigError::InvalidValue {
                key: key.to_owned(),
                value: value.to_owned(),
            })
        })
        .transpose()
}

/// Configuration of the environment agent.
///
/// Recognised keys: `seed`, `load`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Seed of the placement generator; drawn at random when absent.
    pub seed: Option<u64>,
    /// Weight file for the evaluator; untrained tables when absent.
    pub load: Option<PathBuf>,
}

impl EnvironmentConfig {
    pub fn from_args(args: &AgentArgs) -> Result<Self, AgentConfigError> {
        Ok(Self {
            seed: parse_opt(args, "seed")?,
            load: args.get("load").map(PathBuf::from),
        })
    }
}

/// Configuration of the player agent.
///
/// Recognised keys: `seed`, `load`, `save`, `alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Seed of the tie-breaking generator; drawn at random when absent.
    pub seed: Option<u64>,
    /// Weight file to start from; untrained tables when absent.
    pub load: Option<PathBuf>,
    /// Weight file written by [`GreedyPlayer::save_weights`](crate::GreedyPlayer::save_weights).
    pub save: Option<PathBuf>,
    /// TD(0) learning rate; 0 disables learning.
    pub alpha: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            load: None,
            save: None,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl PlayerConfig {
    pub fn from_args(args: &AgentArgs) -> Result<Self, AgentConfigError> {
        let alpha = parse_opt::<f32>(args, "alpha")?.unwrap_or(DEFAULT_ALPHA);
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(AgentConfigError::InvalidAlpha(alpha.to_string()));
        }
        Ok(Self {
            seed: parse_opt(args, "seed")?,
            load: args.get("load").map(PathBuf::from),
            save: args.get("save").map(PathBuf::from),
            alpha,
        })
    }
}
