use std::io;

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::backend::{Canvas, Clock, InputEvent, InputSource};
use crate::config::GameConfig;
use crate::food::{self, EmptyBoardError, Food, IndexPicker};
use crate::grid::Grid;
use crate::score::{ScoreLog, ScoreRecord};
use crate::snake::{MoveResult, Snake};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    EmptyBoard(#[from] EmptyBoardError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("terminal is {actual:?} but the board needs {needed:?} (columns, rows)")]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the loop talks to outside of the game state itself.
pub struct GameContext<B, C, R> {
    pub backend: B,
    pub clock: C,
    pub rng: R,
    pub scores: ScoreLog,
}

pub struct SnakeGame<B, C, R> {
    ctx: GameContext<B, C, R>,
    grid: Grid,
    speed: u32,
    snake: Snake,
    food: Food,
}

impl<B, C, R> SnakeGame<B, C, R>
where
    B: Canvas + InputSource,
    C: Clock,
    R: IndexPicker,
{
    pub fn new(config: &GameConfig, mut ctx: GameContext<B, C, R>) -> Result<Self, GameError> {
        let grid = config.grid;
        let snake = Snake::new(grid.center());
        let food = food::place(&grid, &snake.occupied_cells(), &mut ctx.rng)?;

        Ok(SnakeGame { ctx, grid, speed: config.speed, snake, food })
    }

    /// Ticks until the player quits.
    pub fn run(&mut self) -> Result<(), GameError> {
        info!("playing on a {}x{} board at {} ticks/s", self.grid.width(), self.grid.height(), self.speed);

        while self.step()? == Flow::Continue {}

        info!("quit with score {}", self.snake.score());
        Ok(())
    }

    pub fn step(&mut self) -> Result<Flow, GameError> {
        self.ctx.clock.tick(self.speed);

        for ev in self.ctx.backend.drain_events()? {
            match ev {
                InputEvent::Quit => return Ok(Flow::Quit),
                InputEvent::Turn(dir) => self.snake.set_pending_direction(dir),
            }
        }

        self.update()?;
        self.render()?;
        Ok(Flow::Continue)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn update(&mut self) -> Result<(), GameError> {
        if let MoveResult::Crashed { at } = self.snake.advance(&self.grid) {
            info!("crashed into own body at {:?} heading {:?}, score {}", at, self.snake.direction(), self.snake.score());
            self.finish_run();
        }

        if self.snake.head() == self.food.cell() {
            self.snake.grow();

            match food::place(&self.grid, &self.snake.occupied_cells(), &mut self.ctx.rng) {
                Ok(food) => {
                    debug!("ate food at {:?}, length now {}, next food at {:?}", self.food.cell(), self.snake.target_len(), food.cell());
                    self.food = food;
                }
                Err(err) => {
                    warn!("{}, starting over", err);
                    self.finish_run();
                    self.food = food::place(&self.grid, &self.snake.occupied_cells(), &mut self.ctx.rng)?;
                }
            }
        }

        Ok(())
    }

    fn finish_run(&mut self) {
        let record = ScoreRecord::now(self.snake.score());

        // A failed append is logged only, play goes on
        if let Err(err) = self.ctx.scores.append(&record) {
            error!("could not append score to {}: {}", self.ctx.scores.path().display(), err);
        }

        self.snake.reset();
        self.ctx.backend.clear();
    }

    fn render(&mut self) -> io::Result<()> {
        let backend = &mut self.ctx.backend;

        backend.clear();
        backend.draw(&self.snake);
        backend.draw(&self.food);
        backend.set_title(&format!("Snake. Score: {}", self.snake.score()))?;
        backend.present()
    }
}
