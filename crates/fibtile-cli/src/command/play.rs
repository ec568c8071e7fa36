use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use clap::builder::RangedU64ValueParser;
use fibtile_agent::{Agent, EnvironmentAgent, GreedyPlayer, IdleAgent};
use fibtile_engine::Episode;

use crate::{
    schema::summary::{AgentInfo, BestEpisode, RunSummary},
    statistics::BlockStatistics,
    util::Output,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum PlayerKind {
    /// Greedy n-tuple player, trained by TD(0) unless `alpha=0`
    #[default]
    Greedy,
    /// Player that resigns immediately
    Idle,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of episodes to play
    #[arg(long, default_value_t = 1000, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    total: usize,
    /// Number of episodes per statistics block
    #[arg(long, default_value_t = 1000, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    block: usize,
    /// Player arguments (`key=value` pairs: seed, load, save, alpha)
    #[arg(long, default_value = "")]
    play: String,
    /// Environment arguments (`key=value` pairs: seed, load)
    #[arg(long, default_value = "")]
    evil: String,
    /// Player implementation
    #[arg(long, value_enum, default_value_t = PlayerKind::Greedy)]
    player: PlayerKind,
    /// Write a JSON run summary to this path (`-` for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Print the final board of every episode
    #[arg(long, default_value_t = false)]
    show: bool,
}

#[derive(Debug)]
enum Player {
    Greedy(GreedyPlayer),
    Idle(IdleAgent),
}

impl Player {
    fn new(kind: PlayerKind, args: &str) -> anyhow::Result<Self> {
        Ok(match kind {
            PlayerKind::Greedy => {
                Self::Greedy(GreedyPlayer::new(args).context("Failed to set up the player")?)
            }
            PlayerKind::Idle => Self::Idle(IdleAgent::new(args)),
        })
    }

    fn agent_mut(&mut self) -> &mut dyn Agent {
        match self {
            Self::Greedy(player) => player,
            Self::Idle(player) => player,
        }
    }

    fn agent(&self) -> &dyn Agent {
        match self {
            Self::Greedy(player) => player,
            Self::Idle(player) => player,
        }
    }

    fn save_weights(&self) -> anyhow::Result<()> {
        if let Self::Greedy(player) = self {
            player
                .save_weights()
                .context("Failed to save the player weights")?;
        }
        Ok(())
    }
}

fn agent_info(agent: &dyn Agent) -> AgentInfo {
    AgentInfo {
        name: agent.name().to_owned(),
        role: agent.role().to_owned(),
    }
}

/// Plays one episode from the empty board.
///
/// The environment places the first two tiles, then the player and the
/// environment alternate until one of them gives up or proposes an illegal action.
pub(crate) fn play_episode(player: &mut dyn Agent, environment: &mut dyn Agent) -> Episode {
    let mut episode = Episode::new();
    player.open_episode();
    environment.open_episode();

    for turn in 0.. {
        let who: &mut dyn Agent = if turn >= 2 && turn % 2 == 0 {
            &mut *player
        } else {
            &mut *environment
        };
        let Some(action) = who.take_action(episode.board()) else {
            log::debug!("{} gives up after {turn} actions", who.name());
            break;
        };
        if let Err(err) = episode.apply(action) {
            log::warn!("{} proposed an illegal action {action:?}: {err}", who.name());
            break;
        }
    }

    player.close_episode();
    environment.close_episode();
    episode
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        total,
        block,
        play,
        evil,
        player,
        summary: summary_path,
        show,
    } = arg;

    let mut player = Player::new(*player, play)?;
    let mut environment =
        EnvironmentAgent::new(evil).context("Failed to set up the environment")?;
    log::info!(
        "Playing {total} episodes: {} vs {}",
        player.agent().name(),
        environment.name()
    );

    let mut statistics = BlockStatistics::new(*block);
    let mut blocks = Vec::new();
    let mut best: Option<BestEpisode> = None;

    for number in 1..=*total {
        let episode = play_episode(player.agent_mut(), &mut environment);
        if *show {
            println!("episode {number}: score {}", episode.score());
            print!("{}", episode.board());
        }
        if best.as_ref().is_none_or(|b| episode.score() > b.score) {
            best = Some(BestEpisode {
                episode: number,
                score: episode.score(),
                max_tile: episode.max_tile(),
                player_moves: episode.player_moves(),
                final_board: *episode.board(),
            });
        }
        if let Some(summary) = statistics.record(&episode) {
            summary.log();
            blocks.push(summary);
        }
    }
    if let Some(summary) = statistics.finish() {
        summary.log();
        blocks.push(summary);
    }

    player.save_weights()?;

    if let Some(path) = summary_path {
        let run_summary = RunSummary {
            recorded_at: Utc::now(),
            player: agent_info(player.agent()),
            environment: agent_info(&environment),
            episodes: *total,
            best,
            blocks,
        };
        Output::save_json(&run_summary, path)?;
    }

    Ok(())
}
