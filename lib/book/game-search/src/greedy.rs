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

use num_traits::Bounded;

use crate::{Policy, SearchError, State};

/// GreedyPolicy looks one move ahead. For every legal action it advances a copy of the state,
/// evaluates the copy, and keeps the action whose copy scored highest.
///
/// Ties go to the action that comes first in `legal_actions()`: a later candidate must be
/// strictly better to replace the incumbent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GreedyPolicy;

impl<_State> Policy<_State> for GreedyPolicy
where
    _State: State,
{
    fn select_action(
        &mut self,
        state: &_State,
    ) -> Result<_State::Action, SearchError<_State::Error>> {
        let mut best_score = <_State::Score as Bounded>::min_value();
        let mut best_action = None;

        for action in state.legal_actions() {
            let mut next_state = state.clone();
            next_state.advance(action)?;
            next_state.evaluate_score();
            let score = next_state.evaluated_score();
            tracing::trace!(?action, ?score, "greedy candidate");
            if best_action.is_none() || score > best_score {
                best_score = score;
                best_action = Some(action);
            }
        }

        best_action.ok_or(SearchError::NoLegalActions)
    }
}
