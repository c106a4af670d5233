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

use rand::RngCore;

use crate::{Policy, SearchError, State};

/// RandomPolicy picks a legal action uniformly at random.
///
/// The generator is supplied by the caller and kept for the lifetime of the policy, so a whole
/// run draws from one stream. An action is drawn as `legal[next_u32() % legal.len()]`, which
/// makes runs reproducible against any other implementation of the same generator.
#[derive(Debug, Clone)]
pub struct RandomPolicy<R>
where
    R: RngCore,
{
    rng: R,
}

impl<R> RandomPolicy<R>
where
    R: RngCore,
{
    /// Create a RandomPolicy that draws from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Consume the policy and return its generator.
    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<_State, R> Policy<_State> for RandomPolicy<R>
where
    _State: State,
    R: RngCore,
{
    fn select_action(
        &mut self,
        state: &_State,
    ) -> Result<_State::Action, SearchError<_State::Error>> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }
        let index = self.rng.next_u32() as usize % actions.len();
        Ok(actions[index])
    }
}
