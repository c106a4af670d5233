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

//! Number-collecting maze game logic.
//!
//! A single character walks around a small grid for a fixed number of turns. Every cell holds
//! between 0 and 9 points, and stepping onto a cell collects its points. The goal is to finish
//! with as many points as possible.
//!
//! Boards are generated from a seed with MT19937, so the same seed gives the same board here and
//! in any other implementation that draws from the same generator in the same order.

use std::fmt;

/// Score type. Signed so that search code has a sentinel below every reachable score.
pub type Score = i64;

/// Number-collecting maze error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// The move would take the character off the board.
    #[error("moving {action} from {from} leaves the maze")]
    OutOfBounds {
        /// Where the character was.
        from: Coord,
        /// The rejected move.
        action: Direction,
    },

    /// The game has already reached its last turn.
    #[error("game is over after {end_turn} turns")]
    GameOver {
        /// The configured number of turns.
        end_turn: usize,
    },

    /// Action index is not one of the four directions.
    #[error("action index out of range: {0}")]
    ActionOutOfRange(usize),

    /// The board must have at least one row and one column.
    #[error("maze must be at least 1x1, got {height}x{width}")]
    InvalidDimensions {
        /// Requested height.
        height: usize,
        /// Requested width.
        width: usize,
    },
}

/// Board coordinate. `y` is the row, `x` is the column, both start at 0 in the top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Row.
    pub y: usize,

    /// Column.
    pub x: usize,
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// A move to a neighbouring cell.
///
/// The discriminant is the action index. Legal actions are always listed in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// x + 1
    Right = 0,

    /// x - 1
    Left = 1,

    /// y + 1
    Down = 2,

    /// y - 1
    Up = 3,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Action index, 0 to 3.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column offset.
    pub fn dx(self) -> isize {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
            Direction::Down | Direction::Up => 0,
        }
    }

    /// Row offset.
    pub fn dy(self) -> isize {
        match self {
            Direction::Down => 1,
            Direction::Up => -1,
            Direction::Right | Direction::Left => 0,
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = MazeError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(index)
            .copied()
            .ok_or(MazeError::ActionOutOfRange(index))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => write!(f, "Right"),
            Direction::Left => write!(f, "Left"),
            Direction::Down => write!(f, "Down"),
            Direction::Up => write!(f, "Up"),
        }
    }
}

/// Board dimensions and the number of turns in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MazeConfig {
    height: usize,
    width: usize,
    end_turn: usize,
}

impl MazeConfig {
    /// Create a config. Height and width must both be at least 1.
    pub fn new(height: usize, width: usize, end_turn: usize) -> Result<Self, MazeError> {
        if height == 0 || width == 0 {
            return Err(MazeError::InvalidDimensions { height, width });
        }
        Ok(Self {
            height,
            width,
            end_turn,
        })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The game is over once this many turns have been played.
    pub fn end_turn(&self) -> usize {
        self.end_turn
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            height: 3,
            width: 4,
            end_turn: 4,
        }
    }
}

/// Number-collecting maze state: the board, the character, the turn and the score.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MazeState {
    config: MazeConfig,

    /// Row-major point values, 0 to 9. Collected cells are 0.
    points: Vec<u32>,

    turn: usize,
    character: Coord,
    game_score: Score,
    evaluated_score: Score,
}

impl MazeState {
    /// Generate a board from a seed.
    ///
    /// Draws from MT19937 seeded with `seed`, in this order: the character's row, the
    /// character's column, then one point value per cell in row-major order. The character's
    /// starting cell is skipped without a draw and holds no points.
    pub fn new(seed: u32, config: MazeConfig) -> Self {
        let mut mt = rand_mt::Mt::new(seed);

        let character = Coord {
            y: mt.next_u32() as usize % config.height,
            x: mt.next_u32() as usize % config.width,
        };

        let mut points = vec![0; config.height * config.width];
        for y in 0..config.height {
            for x in 0..config.width {
                if (Coord { y, x }) == character {
                    continue;
                }
                points[y * config.width + x] = mt.next_u32() % 10;
            }
        }

        Self {
            config,
            points,
            turn: 0,
            character,
            game_score: 0,
            evaluated_score: 0,
        }
    }

    /// The game is over once `end_turn` turns have been played. Collecting every point does not
    /// end it early.
    pub fn is_done(&self) -> bool {
        self.turn == self.config.end_turn
    }

    /// Where `action` would take the character, or None if that is off the board.
    pub fn destination(&self, action: Direction) -> Option<Coord> {
        let y = self.character.y.checked_add_signed(action.dy())?;
        let x = self.character.x.checked_add_signed(action.dx())?;
        (y < self.config.height && x < self.config.width).then_some(Coord { y, x })
    }

    /// Directions that keep the character on the board, in index order.
    pub fn legal_actions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|action| self.destination(*action).is_some())
            .collect()
    }

    /// Move the character one cell, collect any points there, and advance one turn.
    ///
    /// The state is left untouched if the move leaves the board or the game is already over.
    pub fn advance(&mut self, action: Direction) -> Result<(), MazeError> {
        if self.is_done() {
            return Err(MazeError::GameOver {
                end_turn: self.config.end_turn,
            });
        }
        let destination = self.destination(action).ok_or(MazeError::OutOfBounds {
            from: self.character,
            action,
        })?;

        self.character = destination;
        let point = &mut self.points[destination.y * self.config.width + destination.x];
        if *point > 0 {
            self.game_score += Score::from(*point);
            *point = 0;
        }
        self.turn += 1;
        Ok(())
    }

    /// Evaluate the board for search. For now this is just the game score.
    pub fn evaluate_score(&mut self) {
        self.evaluated_score = self.game_score;
    }

    /// Points on a cell, or None outside the board.
    pub fn point(&self, coord: Coord) -> Option<u32> {
        if coord.y >= self.config.height || coord.x >= self.config.width {
            return None;
        }
        Some(self.points[coord.y * self.config.width + coord.x])
    }

    /// All point values, row-major.
    pub fn points(&self) -> &[u32] {
        &self.points
    }

    /// Board dimensions and turn limit.
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Current turn, starting at 0.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Character position.
    pub fn character(&self) -> Coord {
        self.character
    }

    /// Points collected so far.
    pub fn game_score(&self) -> Score {
        self.game_score
    }

    /// Score from the last call to [MazeState::evaluate_score].
    pub fn evaluated_score(&self) -> Score {
        self.evaluated_score
    }
}

// turn and score on their own lines, then the board: '@' for the character, a digit for points,
// '.' for nothing.
impl fmt::Display for MazeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "turn:\t{}", self.turn)?;
        writeln!(f, "score:\t{}", self.game_score)?;
        for y in 0..self.config.height {
            for x in 0..self.config.width {
                let point = self.points[y * self.config.width + x];
                if (Coord { y, x }) == self.character {
                    write!(f, "@")?;
                } else if point > 0 {
                    write!(f, "{}", point)?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl game_search::State for MazeState {
    type Action = Direction;
    type Score = Score;
    type Error = MazeError;

    fn legal_actions(&self) -> Vec<Direction> {
        MazeState::legal_actions(self)
    }

    fn advance(&mut self, action: Direction) -> Result<(), MazeError> {
        MazeState::advance(self, action)
    }

    fn is_done(&self) -> bool {
        MazeState::is_done(self)
    }

    fn evaluate_score(&mut self) {
        MazeState::evaluate_score(self)
    }

    fn evaluated_score(&self) -> Score {
        MazeState::evaluated_score(self)
    }

    fn score(&self) -> Score {
        self.game_score
    }
}
