use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::Pos;
use crate::map::Grid;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;

/// Why a level can't be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelErr {
    Pos(usize, usize),
    MultiplePlayers,
    NoPlayer,
    NoBoxes,
    NoGoals,
    BoxesGoals { boxes: usize, goals: usize },
    Outside(Pos),
    GoalOnWall(Pos),
    BoxOnWall(Pos),
    PlayerOnWall,
    PlayerOnBox,
}

impl Display for LevelErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            LevelErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            LevelErr::MultiplePlayers => write!(f, "More than one player"),
            LevelErr::NoPlayer => write!(f, "No player"),
            LevelErr::NoBoxes => write!(f, "No boxes"),
            LevelErr::NoGoals => write!(f, "No goals"),
            LevelErr::BoxesGoals { boxes, goals } => write!(
                f,
                "Different number of boxes and goals: {} boxes, {} goals",
                boxes, goals
            ),
            LevelErr::Outside(pos) => write!(f, "Position {} is outside the grid", pos),
            LevelErr::GoalOnWall(pos) => write!(f, "Goal on wall at {}", pos),
            LevelErr::BoxOnWall(pos) => write!(f, "Box on wall at {}", pos),
            LevelErr::PlayerOnWall => write!(f, "Player on wall"),
            LevelErr::PlayerOnBox => write!(f, "Player on box"),
        }
    }
}

impl Error for LevelErr {}

#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub state: State,
}

impl Level {
    /// Checks the initial state fits the grid.
    pub fn new(grid: Grid, state: State) -> Result<Self, LevelErr> {
        if grid.is_wall(state.player_pos) {
            return Err(LevelErr::PlayerOnWall);
        }
        if state.boxes().is_empty() {
            return Err(LevelErr::NoBoxes);
        }
        if let Some(&b) = state.boxes().iter().find(|&&b| grid.is_wall(b)) {
            return Err(LevelErr::BoxOnWall(b));
        }
        if state.has_box(state.player_pos) {
            return Err(LevelErr::PlayerOnBox);
        }
        if state.boxes().len() != grid.goals().len() {
            return Err(LevelErr::BoxesGoals {
                boxes: state.boxes().len(),
                goals: grid.goals().len(),
            });
        }
        Ok(Level { grid, state })
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.grid.format_with_state(Format::Xsb, &self.state)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        self.grid.format_with_state(format, &self.state)
    }

    pub fn format_solution<'a>(
        &'a self,
        format: Format,
        moves: &'a Moves,
        include_steps: bool,
    ) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.grid, &self.state, moves, include_steps, format)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::with_walls(1, 4, &[Pos::new(0, 0)], &[Pos::new(0, 3)]).unwrap()
    }

    #[test]
    fn valid_level() {
        let state = State::new(Pos::new(0, 1), vec![Pos::new(0, 2)]);
        let level = Level::new(corridor(), state).unwrap();
        assert_eq!(level.to_string(), "#@$.\n");
    }

    #[test]
    fn invalid_states() {
        let cases = vec![
            (
                State::new(Pos::new(0, 0), vec![Pos::new(0, 2)]),
                LevelErr::PlayerOnWall,
            ),
            (State::new(Pos::new(0, 1), vec![]), LevelErr::NoBoxes),
            (
                State::new(Pos::new(0, 1), vec![Pos::new(0, 4)]),
                LevelErr::BoxOnWall(Pos::new(0, 4)),
            ),
            (
                State::new(Pos::new(0, 2), vec![Pos::new(0, 2)]),
                LevelErr::PlayerOnBox,
            ),
            (
                State::new(Pos::new(0, 1), vec![Pos::new(0, 2), Pos::new(0, 3)]),
                LevelErr::BoxesGoals { boxes: 2, goals: 1 },
            ),
        ];
        for (state, expected) in cases {
            assert_eq!(Level::new(corridor(), state).unwrap_err(), expected);
        }
    }
}
