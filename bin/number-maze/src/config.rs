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

use std::str::FromStr;

use number_maze_logic::{MazeConfig, MazeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy: {0:?}, expected \"random\" or \"greedy\"")]
pub struct ParsePolicyKindError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Greedy,
}

impl FromStr for PolicyKind {
    type Err = ParsePolicyKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(PolicyKind::Random),
            "greedy" => Ok(PolicyKind::Greedy),
            _ => Err(ParsePolicyKindError(s.to_string())),
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Random => write!(f, "random"),
            PolicyKind::Greedy => write!(f, "greedy"),
        }
    }
}

pub struct RunConfig {
    pub height: usize,
    pub width: usize,
    pub end_turn: usize,
    pub seed: u32,
    pub action_seed: u32,
    pub policy: PolicyKind,
    pub eval_games: usize,
}

impl RunConfig {
    fn new(
        height: usize,
        width: usize,
        end_turn: usize,
        seed: u32,
        action_seed: u32,
        policy: PolicyKind,
        eval_games: usize,
    ) -> Self {
        Self {
            height,
            width,
            end_turn,
            seed,
            action_seed,
            policy,
            eval_games,
        }
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ParsePolicyKindError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Numbers that don't parse fall back to the default. A policy name that doesn't parse is an
    // error, since silently playing the other policy would be confusing.
    fn from_lookup<F>(lookup: F) -> Result<Self, ParsePolicyKindError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|v| v.trim().parse::<T>().ok())
        }

        let defaults = Self::default();
        let policy = match lookup("MAZE_POLICY") {
            Some(name) => name.parse()?,
            None => defaults.policy,
        };
        Ok(Self::new(
            parsed(lookup("MAZE_HEIGHT")).unwrap_or(defaults.height),
            parsed(lookup("MAZE_WIDTH")).unwrap_or(defaults.width),
            parsed(lookup("MAZE_END_TURN")).unwrap_or(defaults.end_turn),
            parsed(lookup("MAZE_SEED")).unwrap_or(defaults.seed),
            parsed(lookup("MAZE_ACTION_SEED")).unwrap_or(defaults.action_seed),
            policy,
            parsed(lookup("MAZE_EVAL_GAMES")).unwrap_or(defaults.eval_games),
        ))
    }

    pub fn maze_config(&self) -> Result<MazeConfig, MazeError> {
        MazeConfig::new(self.height, self.width, self.end_turn)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(3, 4, 4, 121321, 0, PolicyKind::Greedy, 100)
    }
}
