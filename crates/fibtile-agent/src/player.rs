use fibtile_engine::{Action, Board, Direction};
use fibtile_evaluator::{BoardEvaluator as _, LineTupleEvaluator, load_weights, save_weights};
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::{Agent, AgentSetupError, args::AgentArgs, config::PlayerConfig};

/// Properties every player agent starts with.
pub const PLAYER_DEFAULTS: &str = "name=player role=player";

const EPISODE_CAPACITY: usize = 32_768;

/// One player move kept for learning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub before: Board,
    pub after: Board,
    pub direction: Direction,
    pub reward: u32,
}

/// Player picking the move with the best reward plus afterstate value.
///
/// With `alpha > 0` the value tables are trained by backward TD(0) at the end of
/// every episode.
#[derive(Debug)]
pub struct GreedyPlayer {
    args: AgentArgs,
    config: PlayerConfig,
    rng: Pcg32,
    evaluator: LineTupleEvaluator,
    records: Vec<MoveRecord>,
}

impl GreedyPlayer {
    /// Builds the player from a `key=value` argument string.
    ///
    /// Loads the weight file named by `load`, if any.
    pub fn new(args: &str) -> Result<Self, AgentSetupError> {
        let args = AgentArgs::parse(PLAYER_DEFAULTS, args);
        let config = PlayerConfig::from_args(&args)?;
        let evaluator = match &config.load {
            Some(path) => LineTupleEvaluator::from_tables(load_weights(path)?)?,
            None => LineTupleEvaluator::new(),
        };
        Ok(Self::with_evaluator(args, config, evaluator))
    }

    #[must_use]
    pub fn with_evaluator(
        args: AgentArgs,
        config: PlayerConfig,
        evaluator: LineTupleEvaluator,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!(
            "{}: move order seed {seed}, alpha {}",
            args.name(),
            config.alpha
        );
        Self {
            args,
            config,
            rng: Pcg32::seed_from_u64(seed),
            evaluator,
            records: Vec::with_capacity(EPISODE_CAPACITY),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[must_use]
    pub fn evaluator(&self) -> &LineTupleEvaluator {
        &self.evaluator
    }

    /// Moves recorded since the episode opened.
    #[must_use]
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Writes the value tables to the `save` path; does nothing without one.
    pub fn save_weights(&self) -> Result<(), AgentSetupError> {
        if let Some(path) = &self.config.save {
            save_weights(path, self.evaluator.tables())?;
        }
        Ok(())
    }

    /// Picks the best legal move from `before` without recording it.
    fn select_move(&mut self, before: &Board) -> Option<MoveRecord> {
        let mut order = Direction::ALL;
        order.shuffle(&mut self.rng);

        let mut best: Option<(MoveRecord, f32)> = None;
        for direction in order {
            let afterstate = before.simulate_move(direction);
            let Ok(reward) = afterstate.reward else {
                continue;
            };
            #[expect(clippy::cast_precision_loss)]
            let value = reward as f32 + self.evaluator.evaluate(&afterstate.board);
            if best.is_none_or(|(_, max)| value > max) {
                let record = MoveRecord {
                    before: *before,
                    after: afterstate.board,
                    direction,
                    reward,
                };
                best = Some((record, value));
            }
        }
        best.map(|(record, _)| record)
    }

    /// Backward TD(0) over the recorded afterstates.
    ///
    /// The final afterstate is pulled toward 0; every earlier one toward the
    /// reward of the next move plus the (already updated) value of the next
    /// afterstate.
    fn learn_episode(&mut self) {
        let alpha = self.config.alpha;
        let mut target = 0.0;
        for record in self.records.iter().rev() {
            let error = target - self.evaluator.evaluate(&record.after);
            self.evaluator.update(&record.after, alpha * error);
            #[expect(clippy::cast_precision_loss)]
            let reward = record.reward as f32;
            target = reward + self.evaluator.evaluate(&record.after);
        }
        log::trace!(
            "{}: learned from {} moves",
            self.args.name(),
            self.records.len()
        );
    }
}

impl Agent for GreedyPlayer {
    fn name(&self) -> &str {
        self.args.name()
    }

    fn role(&self) -> &str {
        self.args.role()
    }

    fn open_episode(&mut self) {
        self.records.clear();
    }

    fn close_episode(&mut self) {
        if self.config.alpha > 0.0 {
            self.learn_episode();
        }
    }

    fn take_action(&mut self, before: &Board) -> Option<Action> {
        let record = self.select_move(before)?;
        self.records.push(record);
        Some(Action::Move(record.direction))
    }

    fn notify(&mut self, message: &str) {
        self.args.notify(message);
    }
}

/// Player that always resigns.
#[derive(Debug)]
pub struct IdleAgent {
    args: AgentArgs,
}

impl IdleAgent {
    #[must_use]
    pub fn new(args: &str) -> Self {
        Self {
            args: AgentArgs::parse(PLAYER_DEFAULTS, args),
        }
    }
}

impl Agent for IdleAgent {
    fn name(&self) -> &str {
        self.args.name()
    }

    fn role(&self) -> &str {
        self.args.role()
    }

    fn take_action(&mut self, _board: &Board) -> Option<Action> {
        None
    }

    fn notify(&mut self, message: &str) {
        self.args.notify(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(args: &str) -> GreedyPlayer {
        GreedyPlayer::new(args).unwrap()
    }

    fn stuck_board() -> Board {
        Board::from_ranks([[1, 3, 1, 3], [3, 1, 3, 1], [1, 3, 1, 3], [3, 1, 3, 1]])
    }

    mod selection {
        use super::*;

        #[test]
        fn test_defaults() {
            let agent = player("seed=0");
            assert_eq!(agent.name(), "player");
            assert_eq!(agent.role(), "player");
            assert!((agent.config().alpha - 0.0025).abs() < f32::EPSILON);
        }

        #[test]
        fn test_picks_highest_reward_with_untrained_tables() {
            let board = Board::from_ranks([[1, 1, 0, 0], [2, 3, 0, 0], [0; 4], [0; 4]]);
            for seed in 0..10 {
                let mut agent = player(&format!("seed={seed}"));
                let action = agent.take_action(&board);
                assert!(
                    matches!(
                        action,
                        Some(Action::Move(Direction::Left | Direction::Right))
                    ),
                    "seed {seed}: {action:?}"
                );
                assert_eq!(agent.records()[0].reward, 7);
            }
        }

        #[test]
        fn test_skips_illegal_moves() {
            let board = Board::from_ranks([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
            for seed in 0..10 {
                let mut agent = player(&format!("seed={seed}"));
                let Some(Action::Move(direction)) = agent.take_action(&board) else {
                    panic!("expected a move");
                };
                assert!(matches!(direction, Direction::Right | Direction::Down));
            }
        }

        #[test]
        fn test_resigns_without_legal_move() {
            let mut agent = player("seed=1");
            assert_eq!(agent.take_action(&stuck_board()), None);
            assert!(agent.records().is_empty());
        }

        #[test]
        fn test_prefers_valuable_afterstate() {
            let board = Board::from_ranks([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
            let mut evaluator = LineTupleEvaluator::new();
            let mut down = board;
            down.try_move(Direction::Down).unwrap();
            evaluator.update(&down, 1.0);

            for seed in 0..10 {
                let args = AgentArgs::parse(PLAYER_DEFAULTS, "");
                let config = PlayerConfig {
                    seed: Some(seed),
                    ..PlayerConfig::default()
                };
                let mut agent = GreedyPlayer::with_evaluator(args, config, evaluator.clone());
                assert_eq!(
                    agent.take_action(&board),
                    Some(Action::Move(Direction::Down))
                );
            }
        }

        #[test]
        fn test_records_move() {
            let board = Board::from_ranks([[0, 0, 0, 0], [0; 4], [0; 4], [0, 0, 2, 3]]);
            let mut agent = player("seed=4");
            let Some(Action::Move(direction)) = agent.take_action(&board) else {
                panic!("expected a move");
            };
            let record = agent.records()[0];
            assert_eq!(record.before, board);
            assert_eq!(record.direction, direction);
            assert_eq!(record.after, board.simulate_move(direction).board);

            agent.open_episode();
            assert!(agent.records().is_empty());
        }

        #[test]
        fn test_idle_agent_resigns() {
            let mut agent = IdleAgent::new("name=idle");
            assert_eq!(agent.name(), "idle");
            assert_eq!(agent.role(), "player");
            assert_eq!(agent.take_action(&Board::EMPTY), None);
        }
    }

    mod learning {
        use super::*;

        fn two_move_records() -> Vec<MoveRecord> {
            let first = Board::from_ranks([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
            let second = Board::from_ranks([
                [4, 0, 0, 0],
                [1, 3, 1, 3],
                [3, 1, 3, 1],
                [1, 3, 1, 3],
            ]);
            vec![
                MoveRecord {
                    before: Board::EMPTY,
                    after: first,
                    direction: Direction::Left,
                    reward: 2,
                },
                MoveRecord {
                    before: first,
                    after: second,
                    direction: Direction::Left,
                    reward: 5,
                },
            ]
        }

        #[test]
        fn test_backward_td_targets() {
            let mut agent = player("seed=0 alpha=0.5");
            agent.records = two_move_records();
            agent.close_episode();

            let [first, second] = [agent.records[0].after, agent.records[1].after];
            // last target is 0, so the final afterstate stays at 0; the first is
            // pulled toward 5 + 0 on each of its 8 entries
            assert_eq!(agent.evaluator().evaluate(&second), 0.0);
            assert_eq!(agent.evaluator().evaluate(&first), 8.0 * 0.5 * 5.0);
        }

        #[test]
        fn test_zero_alpha_does_not_learn() {
            let mut agent = player("seed=0 alpha=0");
            agent.records = two_move_records();
            agent.close_episode();
            assert_eq!(agent.evaluator().evaluate(&agent.records[0].after), 0.0);
        }

        #[test]
        fn test_save_and_reload() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("player.bin");

            let mut agent = player(&format!("seed=0 alpha=0.5 save={}", path.display()));
            agent.records = two_move_records();
            agent.close_episode();
            agent.save_weights().unwrap();

            let reloaded = player(&format!("seed=0 load={}", path.display()));
            let first = agent.records[0].after;
            assert_eq!(reloaded.evaluator().evaluate(&first), 20.0);
        }

        #[test]
        fn test_save_without_path_is_noop() {
            let agent = player("seed=0");
            agent.save_weights().unwrap();
        }
    }
}
