use std::collections::{HashSet, VecDeque};

use crate::backend::{Color, Drawable, SNAKE_COLOR};
use crate::grid::{Cell, Direction::{*, self}, Grid};
use MoveResult::*;

const INITIAL_LENGTH: usize = 1;
const INITIAL_DIRECTION: Direction = Right;

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, old_tail: Option<Cell> },
    Crashed { at: Cell },
}

/// Head is the front of `body`. The body never holds more than
/// `target_len` cells once a move has completed.
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
    target_len: usize,
    origin: Cell,
}

impl Snake {
    pub fn new(origin: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_front(origin);
        Snake { body, direction: INITIAL_DIRECTION, pending: None, target_len: INITIAL_LENGTH, origin }
    }

    #[cfg(test)]
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        // The body is created with one cell and only grows or swaps cells
        self.body.front().copied().unwrap_or(self.origin)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn score(&self) -> u32 {
        (self.target_len - INITIAL_LENGTH) as u32
    }

    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Queues a turn for the next move. Reversals onto the neck are dropped.
    pub fn set_pending_direction(&mut self, new_direction: Direction) {
        if !new_direction.is_opposite(self.direction) {
            self.pending = Some(new_direction);
        }
    }

    pub fn advance(&mut self, grid: &Grid) -> MoveResult {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }

        let new_head = grid.wrap(self.head(), self.direction);

        // The tail has not moved out of the way yet, so it counts as well
        if self.body.contains(&new_head) {
            return Crashed { at: new_head };
        }

        self.body.push_front(new_head);

        let old_tail = if self.body.len() > self.target_len {
            self.body.pop_back()
        } else {
            None
        };

        Moved { new_head, old_tail }
    }

    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_front(self.origin);
        self.direction = INITIAL_DIRECTION;
        self.pending = None;
        self.target_len = INITIAL_LENGTH;
    }

    #[cfg(test)]
    pub fn with_body(body: &[Cell], direction: Direction) -> Self {
        let origin = body[0];
        Snake {
            body: body.iter().copied().collect(),
            direction,
            pending: None,
            target_len: body.len(),
            origin,
        }
    }
}

impl Drawable for Snake {
    fn cells(&self) -> Vec<(Cell, Color)> {
        self.body.iter().map(|cell| (*cell, SNAKE_COLOR)).collect()
    }
}
