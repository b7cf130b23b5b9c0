use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{Contents, MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    grid: &'a Vec2d<MapCell>,
    state: Option<&'a State>,
    format: Format,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(grid: &'a Vec2d<MapCell>, state: Option<&'a State>, format: Format) -> Self {
        Self {
            grid,
            state,
            format,
        }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid: Vec2d<Contents> = self.grid.scratchpad();
        if let Some(state) = self.state {
            for &b in state.boxes() {
                if self.grid.contains(b) {
                    state_grid[b] = Contents::Box;
                }
            }
            if self.grid.contains(state.player_pos) {
                state_grid[state.player_pos] = Contents::Player;
            }
        }

        for r in 0..self.grid.rows() as i32 {
            // XSB doesn't print trailing empty cells to match the input level strings,
            // classic floor is visible so every cell is printed
            let mut end = self.grid.cols() as i32;
            if self.format == Format::Xsb {
                end = 0;
                for c in 0..self.grid.cols() as i32 {
                    let pos = Pos::new(r, c);
                    if self.grid[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty {
                        end = c + 1;
                    }
                }
            }

            for c in 0..end {
                let pos = Pos::new(r, c);
                let cell = self.grid[pos];
                let symbol = match self.format {
                    Format::Classic => Self::cell_classic(cell, state_grid[pos]),
                    Format::Xsb => Self::cell_xsb(cell, state_grid[pos]),
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn cell_classic(cell: MapCell, contents: Contents) -> char {
        match (cell, contents) {
            (MapCell::Empty, Contents::Empty) => '.',
            (MapCell::Goal, Contents::Empty) => 'G',
            (_, _) => Self::cell_xsb(cell, contents),
        }
    }

    fn cell_xsb(cell: MapCell, contents: Contents) -> char {
        match (cell, contents) {
            (MapCell::Empty, Contents::Empty) => ' ',
            (MapCell::Empty, Contents::Box) => '$',
            (MapCell::Empty, Contents::Player) => '@',
            // a wall with contents is an invalid state, show the wall
            (MapCell::Wall, _) => '#',
            (MapCell::Goal, Contents::Empty) => '.',
            (MapCell::Goal, Contents::Box) => '*',
            (MapCell::Goal, Contents::Player) => '+',
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
