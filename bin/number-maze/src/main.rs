/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

mod config;

use config::{PolicyKind, RunConfig};
use game_search::{
    evaluate_policy, GreedyPolicy, Policy, RandomPolicy, SearchError, Simulation,
};
use number_maze_logic::{MazeConfig, MazeError, MazeState, Score};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("number_maze=info,warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

// Play one game, printing the board before the first turn and after every turn.
fn play_game<_Policy>(
    state: MazeState,
    policy: _Policy,
) -> Result<MazeState, SearchError<MazeError>>
where
    _Policy: Policy<MazeState>,
{
    let mut simulation = Simulation::new(state, policy);
    println!("{}", simulation.state());
    while !simulation.state().is_done() {
        let action = simulation.step()?;
        tracing::debug!(%action, turn = simulation.state().turn(), "played");
        println!("{}", simulation.state());
    }
    Ok(simulation.into_state())
}

/// Mean final score of the random and the greedy policy over boards seeded 0 to `games` - 1.
fn compare_policies(
    maze: MazeConfig,
    games: usize,
    action_seed: u32,
) -> Result<(f64, f64), SearchError<MazeError>> {
    let make_state = |game: usize| MazeState::new(game as u32, maze);

    let mut random_policy = RandomPolicy::new(rand_mt::Mt::new(action_seed));
    let random = evaluate_policy(games, make_state, &mut random_policy)?;
    let greedy = evaluate_policy(games, make_state, &mut GreedyPolicy)?;
    Ok((random, greedy))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = RunConfig::from_env()?;
    let maze = config.maze_config()?;
    tracing::info!(
        height = maze.height(),
        width = maze.width(),
        end_turn = maze.end_turn(),
        seed = config.seed,
        policy = %config.policy,
        "starting"
    );

    let state = MazeState::new(config.seed, maze);
    let final_state = match config.policy {
        PolicyKind::Random => {
            play_game(state, RandomPolicy::new(rand_mt::Mt::new(config.action_seed)))?
        }
        PolicyKind::Greedy => play_game(state, GreedyPolicy)?,
    };
    let score: Score = final_state.game_score();
    tracing::info!(score, "game over");

    if config.eval_games > 0 {
        let (random, greedy) = compare_policies(maze, config.eval_games, config.action_seed)?;
        tracing::info!(games = config.eval_games, random, greedy, "mean score");
    }

    Ok(())
}
