use serde::{Deserialize, Serialize};

use crate::{
    IllegalActionError,
    core::{action::Action, board::Board, rank::tile_value},
};

/// One step of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    pub reward: u32,
}

/// A single game, alternating environment placements and player moves.
///
/// The episode only tracks what happened; deciding who acts next is up to the
/// driver. Illegal actions are rejected and leave the episode untouched.
///
/// # Example
///
/// ```
/// use fibtile_engine::{Action, Direction, Episode};
///
/// let mut episode = Episode::new();
/// episode.apply(Action::place(1, 0)).unwrap();
/// episode.apply(Action::place(1, 2)).unwrap();
/// episode.apply(Action::Move(Direction::Left)).unwrap();
///
/// assert_eq!(episode.score(), 2);
/// assert_eq!(episode.player_moves(), 1);
/// assert_eq!(episode.max_tile(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Episode {
    board: Board,
    score: u64,
    steps: Vec<Step>,
}

impl Episode {
    /// Creates an episode starting from the empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the total reward gained by player moves.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn player_moves(&self) -> usize {
        self.steps.iter().filter(|s| s.action.is_move()).count()
    }

    #[must_use]
    pub fn placements(&self) -> usize {
        self.steps.iter().filter(|s| s.action.is_place()).count()
    }

    /// Returns the displayed value of the largest tile on the board.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        tile_value(self.board.max_rank())
    }

    /// Applies `action` to the board and records it.
    pub fn apply(&mut self, action: Action) -> Result<u32, IllegalActionError> {
        let reward = action.apply(&mut self.board)?;
        self.score += u64::from(reward);
        self.steps.push(Step { action, reward });
        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Direction;

    #[test]
    fn test_new_episode() {
        let episode = Episode::new();
        assert_eq!(*episode.board(), Board::EMPTY);
        assert_eq!(episode.score(), 0);
        assert!(episode.steps().is_empty());
        assert_eq!(episode.max_tile(), 0);
    }

    #[test]
    fn test_records_steps_and_score() {
        let mut episode = Episode::new();
        episode.apply(Action::place(2, 0)).unwrap();
        episode.apply(Action::place(3, 1)).unwrap();
        assert_eq!(episode.apply(Action::Move(Direction::Right)), Ok(5));
        episode.apply(Action::place(1, 0)).unwrap();

        assert_eq!(episode.score(), 5);
        assert_eq!(episode.player_moves(), 1);
        assert_eq!(episode.placements(), 3);
        assert_eq!(episode.max_tile(), 5);
        assert_eq!(episode.steps()[2].reward, 5);
        assert_eq!(episode.board().row(0), [1, 0, 0, 4]);
    }

    #[test]
    fn test_illegal_action_is_not_recorded() {
        let mut episode = Episode::new();
        episode.apply(Action::place(1, 0)).unwrap();

        assert!(episode.apply(Action::Move(Direction::Left)).is_err());
        assert!(episode.apply(Action::place(1, 0)).is_err());
        assert_eq!(episode.steps().len(), 1);
        assert_eq!(episode.score(), 0);
    }

    #[test]
    fn test_episode_serialization() {
        let mut episode = Episode::new();
        episode.apply(Action::place(1, 5)).unwrap();
        episode.apply(Action::Move(Direction::Up)).unwrap();

        let serialized = serde_json::to_string(&episode).unwrap();
        let deserialized: Episode = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.board(), episode.board());
        assert_eq!(deserialized.steps(), episode.steps());
    }
}
