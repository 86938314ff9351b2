use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use crossterm::style::Stylize;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, warn};

use crate::backend::{BOARD_BACKGROUND_COLOR, BORDER_COLOR, Canvas, Color, InputEvent, InputSource};
use crate::game::GameError;
use crate::grid::{Cell, Direction, Grid};

const CELL_STR: &str = "██";
const EMPTY_CELL_STR: &str = "  ";
// Terminal characters are about twice as high as they are wide
const COLUMNS_PER_CELL: u16 = 2;

/// Owns the terminal while the game runs. Raw mode and the alternate screen
/// are left again when this is dropped.
pub struct TermManager {
    stdout: Stdout,
    grid: Grid,
    top_left: (u16, u16),
    back: Vec<Option<Color>>,
    front: Vec<Option<Color>>,
    full_redraw: bool,
    status: String,
}

impl TermManager {
    pub fn open(grid: Grid) -> Result<Self, GameError> {
        let (term_w, term_h) = terminal::size()?;
        let (board_w, board_h) = board_size(&grid);

        if term_w < board_w || term_h < board_h {
            return Err(GameError::TerminalTooSmall { needed: (board_w, board_h), actual: (term_w, term_h) });
        }

        let cells = grid.cell_count();
        let mut term = TermManager {
            stdout: stdout(),
            grid,
            top_left: centered(&grid, (term_w, term_h)),
            back: vec![None; cells],
            front: vec![None; cells],
            full_redraw: true,
            status: String::new(),
        };

        term.setup()?;
        Ok(term)
    }

    fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    fn draw_borders(&mut self) -> io::Result<()> {
        let (width, height) = board_size(&self.grid);
        let (left, top) = self.top_left;
        let end_x = left + width - 1;
        let end_y = top + height - 2;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: (u16, u16), ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::PrintStyledContent(ch.with(rgb(BORDER_COLOR))))
    }

    fn print_status(&mut self) -> io::Result<()> {
        let (width, height) = board_size(&self.grid);
        let (left, top) = self.top_left;
        let line = format!("{:<width$}", self.status, width = width as usize);
        queue!(self.stdout, cursor::MoveTo(left, top + height - 1), style::ResetColor, style::Print(line))
    }

    fn repaint_frame(&mut self) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.top_left = centered(&self.grid, (term_w, term_h));
        queue!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    fn screen_pos(&self, idx: usize) -> (u16, u16) {
        let width = self.grid.width() as usize;
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);
        (self.top_left.0 + 1 + x * COLUMNS_PER_CELL, self.top_left.1 + 1 + y)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if self.grid.contains(cell) {
            Some(self.grid.width() as usize * cell.1 as usize + cell.0 as usize)
        } else {
            None
        }
    }
}

impl Canvas for TermManager {
    fn clear(&mut self) {
        for slot in self.back.iter_mut() {
            *slot = None;
        }
    }

    fn fill_cell(&mut self, cell: Cell, color: Color) {
        if let Some(idx) = self.index(cell) {
            self.back[idx] = Some(color);
        }
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        if self.status != title {
            self.status = title.to_string();
            queue!(self.stdout, terminal::SetTitle(title))?;
            self.print_status()?;
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        if self.full_redraw {
            self.repaint_frame()?;
            self.print_status()?;
        }

        let background = rgb(BOARD_BACKGROUND_COLOR);
        for idx in 0..self.back.len() {
            if !self.full_redraw && self.back[idx] == self.front[idx] {
                continue;
            }

            let pos = self.screen_pos(idx);
            let content = match self.back[idx] {
                Some(color) => CELL_STR.with(rgb(color)).on(background),
                None => EMPTY_CELL_STR.on(background),
            };
            queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::PrintStyledContent(content))?;
        }

        self.front.copy_from_slice(&self.back);
        self.full_redraw = false;
        self.stdout.flush()
    }
}

impl InputSource for TermManager {
    fn drain_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(ev) => events.extend(map_key(&ev)),
                Event::Resize(w, h) => {
                    debug!("terminal resized to {}x{}", w, h);
                    self.full_redraw = true;
                }
                _ => {}
            }
        }

        Ok(events)
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("could not restore the terminal: {}", err);
        }
    }
}

/// Turns a key press into a game intent. Unknown keys and key releases
/// yield nothing.
pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
        _ => None,
    }
}

/// Border on every side plus one status line under the board.
fn board_size(grid: &Grid) -> (u16, u16) {
    (grid.width() * COLUMNS_PER_CELL + 2, grid.height() + 3)
}

fn centered(grid: &Grid, term: (u16, u16)) -> (u16, u16) {
    let (board_w, board_h) = board_size(grid);
    (term.0.saturating_sub(board_w) / 2, term.1.saturating_sub(board_h) / 2)
}

fn rgb((r, g, b): Color) -> style::Color {
    style::Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_wasd_and_arrows_turn() {
        assert_eq!(map_key(&press(KeyCode::Char('w'))), Some(InputEvent::Turn(Direction::Up)));
        assert_eq!(map_key(&press(KeyCode::Left)), Some(InputEvent::Turn(Direction::Left)));
        assert_eq!(map_key(&press(KeyCode::Char('s'))), Some(InputEvent::Turn(Direction::Down)));
        assert_eq!(map_key(&press(KeyCode::Right)), Some(InputEvent::Turn(Direction::Right)));
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(InputEvent::Quit));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(InputEvent::Quit));
    }

    #[test]
    fn test_other_keys_and_releases_are_dropped() {
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(&press(KeyCode::Enter)), None);

        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release), None);
    }

    #[test]
    fn test_board_layout() {
        let grid = Grid::new(32, 24);
        assert_eq!(board_size(&grid), (66, 27));
        assert_eq!(centered(&grid, (80, 30)), (7, 1));
        assert_eq!(centered(&grid, (66, 27)), (0, 0));
    }
}
