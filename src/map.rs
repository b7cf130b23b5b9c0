use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{MapCell, Pos};
use crate::level::LevelErr;
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The static part of a level - walls and goals. Never changes during solving.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec2d<MapCell>,
    goals: Vec<Pos>,
}

impl Grid {
    /// Goals are collected from the goal cells, at least one is required.
    pub fn new(cells: Vec2d<MapCell>) -> Result<Self, LevelErr> {
        let goals: Vec<_> = cells
            .positions()
            .filter(|&pos| cells[pos] == MapCell::Goal)
            .collect();
        if goals.is_empty() {
            return Err(LevelErr::NoGoals);
        }
        Ok(Grid { cells, goals })
    }

    /// Builds an open `rows` x `cols` grid with the given walls and goals.
    pub fn with_walls(
        rows: usize,
        cols: usize,
        walls: &[Pos],
        goals: &[Pos],
    ) -> Result<Self, LevelErr> {
        let mut cells = Vec2d::new(&vec![vec![MapCell::Empty; cols]; rows]);
        for &wall in walls {
            if !cells.contains(wall) {
                return Err(LevelErr::Outside(wall));
            }
            cells[wall] = MapCell::Wall;
        }
        for &goal in goals {
            if !cells.contains(goal) {
                return Err(LevelErr::Outside(goal));
            }
            if cells[goal] == MapCell::Wall {
                return Err(LevelErr::GoalOnWall(goal));
            }
            cells[goal] = MapCell::Goal;
        }
        Self::new(cells)
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    pub fn cells(&self) -> &Vec2d<MapCell> {
        &self.cells
    }

    /// Sorted
    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    /// Everything outside the grid is a wall.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cells.get(pos).map_or(true, |&cell| cell == MapCell::Wall)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.cells.get(pos) == Some(&MapCell::Goal)
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.cells, None, Format::Xsb)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        MapFormatter::new(&self.cells, None, format)
    }

    pub fn format_with_state<'a>(&'a self, format: Format, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(&self.cells, Some(state), format)
    }

    pub fn xsb_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        self.format_with_state(Format::Xsb, state)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
