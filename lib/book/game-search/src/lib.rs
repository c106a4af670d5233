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

#![warn(missing_docs)]

//! Single-agent game search.
//!
//! A [State] is a fully observable, single-agent, fixed-horizon game. A [Policy] looks at a
//! State and picks one of its legal actions. A [Simulation] runs one Policy on one State until
//! the game is done.
//!
//! See:
//! -  Chapter 3: Solving Problems by Searching
//! -  Chapter 4: Search in Complex Environments, local search / hill climbing

use std::fmt::Debug;

use num_traits::{PrimInt, ToPrimitive};

mod greedy;
mod random;

pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;

/// Errors a [Policy] or a [Simulation] can return.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError<E>
where
    E: std::error::Error + 'static,
{
    /// A policy was asked to choose from a state that has no legal actions.
    #[error("no legal actions from the current state")]
    NoLegalActions,

    /// The state rejected a transition.
    #[error(transparent)]
    State(#[from] E),
}

/// A game state that an agent can search over.
///
/// The state owns everything needed to know what applying an action does, so that a search can
/// clone it and try actions on the copy without touching the original.
pub trait State: Clone + Debug {
    /// A move the agent can make.
    type Action: Copy + PartialEq + Eq + Debug;

    /// Game score. Must have a minimum value that is lower than any attainable score.
    type Score: PrimInt + Debug;

    /// Error returned by [State::advance] for an action that is not legal.
    type Error: std::error::Error + 'static;

    /// All legal actions, in a fixed order. Policies that break ties or draw by index rely on
    /// this order.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply an action and advance one turn.
    fn advance(&mut self, action: Self::Action) -> Result<(), Self::Error>;

    /// Whether the game is over.
    fn is_done(&self) -> bool;

    /// Recompute the evaluated score used to compare states during search.
    fn evaluate_score(&mut self);

    /// The score last computed by [State::evaluate_score].
    fn evaluated_score(&self) -> Self::Score;

    /// The score actually collected in the game so far.
    fn score(&self) -> Self::Score;
}

/// A Policy chooses an action for a State.
///
/// Notice that the Policy does not own the State. It is handed the current State each turn and
/// may only read it (or clone it).
pub trait Policy<_State>
where
    _State: State,
{
    /// Choose one of `state.legal_actions()`.
    fn select_action(
        &mut self,
        state: &_State,
    ) -> Result<_State::Action, SearchError<_State::Error>>;
}

impl<_State, _Policy> Policy<_State> for &mut _Policy
where
    _State: State,
    _Policy: Policy<_State> + ?Sized,
{
    fn select_action(
        &mut self,
        state: &_State,
    ) -> Result<_State::Action, SearchError<_State::Error>> {
        (**self).select_action(state)
    }
}

/// A Simulation runs a single Policy on a single State until the State is done.
pub struct Simulation<_State, _Policy>
where
    _State: State,
    _Policy: Policy<_State>,
{
    state: _State,
    policy: _Policy,
}

impl<_State, _Policy> Simulation<_State, _Policy>
where
    _State: State,
    _Policy: Policy<_State>,
{
    /// Create a Simulation that will run `policy` on `state`.
    pub fn new(state: _State, policy: _Policy) -> Self {
        Self { state, policy }
    }

    /// Ask the policy for an action, apply it, and return it.
    pub fn step(&mut self) -> Result<_State::Action, SearchError<_State::Error>> {
        let action = self.policy.select_action(&self.state)?;
        self.state.advance(action)?;
        tracing::debug!(?action, score = ?self.state.score(), "advanced");
        Ok(action)
    }

    /// Step until the state is done. Returns the final score.
    pub fn run(&mut self) -> Result<_State::Score, SearchError<_State::Error>> {
        while !self.state.is_done() {
            self.step()?;
        }
        Ok(self.state.score())
    }

    /// The current state, e.g. for rendering between steps.
    pub fn state(&self) -> &_State {
        &self.state
    }

    /// Consume the Simulation and return the final state.
    pub fn into_state(self) -> _State {
        self.state
    }
}

/// Play `games` games with the same policy and return the mean final score.
///
/// Game `i` starts from `make_state(i)`. The policy is shared across all games, so a random
/// policy keeps drawing from one stream instead of restarting it every game. Returns 0 when
/// `games` is 0.
pub fn evaluate_policy<_State, _Policy, F>(
    games: usize,
    mut make_state: F,
    policy: &mut _Policy,
) -> Result<f64, SearchError<_State::Error>>
where
    _State: State,
    _Policy: Policy<_State>,
    F: FnMut(usize) -> _State,
{
    if games == 0 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for game in 0..games {
        let mut simulation = Simulation::new(make_state(game), &mut *policy);
        let score = simulation.run()?;
        tracing::trace!(game, ?score, "game finished");
        total += score.to_f64().unwrap_or(f64::NAN);
    }
    Ok(total / games as f64)
}

#[cfg(test)]
pub(crate) mod test_state {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Step {
        Right,
        Left,
    }

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("cannot step {0:?} from the end of the line")]
    pub struct OffTheLine(pub Step);

    // A one-dimensional maze: the agent walks along a line of point values and picks up the
    // points it lands on.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LineState {
        pub values: Vec<i64>,
        pub position: usize,
        pub turn: usize,
        pub end_turn: usize,
        pub score: i64,
        pub evaluated_score: i64,
    }

    impl LineState {
        pub fn new(values: Vec<i64>, position: usize, end_turn: usize) -> Self {
            Self {
                values,
                position,
                turn: 0,
                end_turn,
                score: 0,
                evaluated_score: 0,
            }
        }
    }

    impl State for LineState {
        type Action = Step;
        type Score = i64;
        type Error = OffTheLine;

        fn legal_actions(&self) -> Vec<Step> {
            let mut actions = Vec::new();
            if self.position + 1 < self.values.len() {
                actions.push(Step::Right);
            }
            if self.position > 0 {
                actions.push(Step::Left);
            }
            actions
        }

        fn advance(&mut self, action: Step) -> Result<(), OffTheLine> {
            if !self.legal_actions().contains(&action) {
                return Err(OffTheLine(action));
            }
            match action {
                Step::Right => self.position += 1,
                Step::Left => self.position -= 1,
            }
            self.score += self.values[self.position];
            self.values[self.position] = 0;
            self.turn += 1;
            Ok(())
        }

        fn is_done(&self) -> bool {
            self.turn == self.end_turn
        }

        fn evaluate_score(&mut self) {
            self.evaluated_score = self.score;
        }

        fn evaluated_score(&self) -> i64 {
            self.evaluated_score
        }

        fn score(&self) -> i64 {
            self.score
        }
    }
}
