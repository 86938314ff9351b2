//! Seams between the game loop and the outside world: drawing, input and
//! frame timing.

use std::io;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::grid::{Cell, Direction};

pub type Color = (u8, u8, u8);

pub const BOARD_BACKGROUND_COLOR: Color = (0, 0, 0);
pub const BORDER_COLOR: Color = (93, 216, 228);
pub const FOOD_COLOR: Color = (255, 0, 150);
pub const SNAKE_COLOR: Color = (0, 255, 255);

/// Anything that occupies board cells.
pub trait Drawable {
    fn cells(&self) -> Vec<(Cell, Color)>;
}

/// A double-buffered surface. Nothing becomes visible before `present`.
pub trait Canvas {
    fn clear(&mut self);
    fn fill_cell(&mut self, cell: Cell, color: Color);
    fn set_title(&mut self, title: &str) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;

    fn draw(&mut self, item: &dyn Drawable) {
        for (cell, color) in item.cells() {
            self.fill_cell(cell, color);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Turn(Direction),
}

pub trait InputSource {
    /// Everything that arrived since the previous call, without blocking.
    fn drain_events(&mut self) -> io::Result<Vec<InputEvent>>;
}

pub trait Clock {
    /// Blocks until one tick at `rate` ticks per second has passed since the
    /// previous call.
    fn tick(&mut self, rate: u32);
}

#[derive(Default)]
pub struct FixedRateClock {
    last_tick: Option<Instant>,
}

impl FixedRateClock {
    pub fn new() -> Self {
        FixedRateClock { last_tick: None }
    }
}

impl Clock for FixedRateClock {
    fn tick(&mut self, rate: u32) {
        let interval = Duration::from_secs(1) / rate.max(1);

        if let Some(last) = self.last_tick {
            let deadline = last + interval;
            let now = Instant::now();
            if deadline > now {
                sleep(deadline - now);
            }
        }

        self.last_tick = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Vec<(Cell, Color)>);

    impl Canvas for Recorder {
        fn clear(&mut self) {
            self.0.clear();
        }

        fn fill_cell(&mut self, cell: Cell, color: Color) {
            self.0.push((cell, color));
        }

        fn set_title(&mut self, _title: &str) -> io::Result<()> {
            Ok(())
        }

        fn present(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Dots;

    impl Drawable for Dots {
        fn cells(&self) -> Vec<(Cell, Color)> {
            vec![((0, 0), FOOD_COLOR), ((1, 0), SNAKE_COLOR)]
        }
    }

    #[test]
    fn test_draw_fills_every_cell_of_a_drawable() {
        let mut canvas = Recorder(vec![]);
        canvas.draw(&Dots);
        assert_eq!(canvas.0, vec![((0, 0), FOOD_COLOR), ((1, 0), SNAKE_COLOR)]);
    }

    #[test]
    fn test_clock_keeps_the_rate() {
        let mut clock = FixedRateClock::new();
        let start = Instant::now();
        for _ in 0..3 {
            clock.tick(50);
        }
        // First tick returns at once, the next two wait 20ms each
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
