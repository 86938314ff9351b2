use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::backend::{Color, Drawable, FOOD_COLOR};
use crate::grid::{Cell, Grid};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no free cell left on a {width}x{height} board")]
pub struct EmptyBoardError {
    pub width: u16,
    pub height: u16,
}

/// Source of uniformly distributed indices, so placement can be scripted.
pub trait IndexPicker {
    /// Returns a value in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> IndexPicker for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    cell: Cell,
}

impl Food {
    pub fn cell(&self) -> Cell {
        self.cell
    }

    #[cfg(test)]
    pub fn at(cell: Cell) -> Self {
        Food { cell }
    }
}

impl Drawable for Food {
    fn cells(&self) -> Vec<(Cell, Color)> {
        vec![(self.cell, FOOD_COLOR)]
    }
}

pub fn place<P: IndexPicker + ?Sized>(
    grid: &Grid,
    occupied: &HashSet<Cell>,
    picker: &mut P,
) -> Result<Food, EmptyBoardError> {
    let free: Vec<Cell> = grid.all_cells().filter(|cell| !occupied.contains(cell)).collect();

    if free.is_empty() {
        return Err(EmptyBoardError { width: grid.width(), height: grid.height() });
    }

    let idx = picker.pick(free.len()).min(free.len() - 1);
    Ok(Food { cell: free[idx] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Always(usize);

    impl IndexPicker for Always {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn test_full_board_is_an_error() {
        let grid = Grid::new(3, 2);
        let occupied: HashSet<Cell> = grid.all_cells().collect();
        let res = place(&grid, &occupied, &mut StdRng::seed_from_u64(1));
        assert_eq!(res, Err(EmptyBoardError { width: 3, height: 2 }));
    }

    #[test]
    fn test_never_lands_on_occupied_cell() {
        let grid = Grid::new(6, 4);
        let occupied: HashSet<Cell> = grid.all_cells().filter(|(x, _)| x % 2 == 0).collect();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let food = place(&grid, &occupied, &mut rng).unwrap();
            assert!(!occupied.contains(&food.cell()));
            assert!(grid.contains(food.cell()));
        }
    }

    #[test]
    fn test_single_free_cell_is_chosen() {
        let grid = Grid::new(3, 3);
        let occupied: HashSet<Cell> = grid.all_cells().filter(|c| *c != (2, 1)).collect();
        let food = place(&grid, &occupied, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(food.cell(), (2, 1));
    }

    #[test]
    fn test_picker_indexes_free_cells_in_row_order() {
        let grid = Grid::new(3, 2);
        let mut occupied = HashSet::new();
        occupied.insert((0, 0));
        occupied.insert((2, 0));

        // Free cells: (1,0) (0,1) (1,1) (2,1)
        assert_eq!(place(&grid, &occupied, &mut Always(0)).unwrap().cell(), (1, 0));
        assert_eq!(place(&grid, &occupied, &mut Always(2)).unwrap().cell(), (1, 1));
    }

    #[test]
    fn test_every_free_cell_is_reachable() {
        let grid = Grid::new(4, 2);
        let occupied = HashSet::new();
        let mut rng = StdRng::seed_from_u64(3);

        let seen: HashSet<Cell> = (0..500).map(|_| place(&grid, &occupied, &mut rng).unwrap().cell()).collect();
        assert_eq!(seen.len(), 8);
    }
}
