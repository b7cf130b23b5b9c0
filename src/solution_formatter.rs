use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::map::Grid;
use crate::moves::Moves;
use crate::state::State;
use crate::transition;

/// Renders the initial state followed by the state after each push
/// (or after every move when steps are included).
pub struct SolutionFormatter<'a> {
    grid: &'a Grid,
    initial_state: &'a State,
    moves: &'a Moves,
    include_steps: bool,
    format: Format,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        grid: &'a Grid,
        initial_state: &'a State,
        moves: &'a Moves,
        include_steps: bool,
        format: Format,
    ) -> Self {
        Self {
            grid,
            initial_state,
            moves,
            include_steps,
            format,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            self.grid.format_with_state(self.format, self.initial_state)
        )?;
        let mut last_state = self.initial_state.clone();
        for (i, &mov) in self.moves.iter().enumerate() {
            // moves from a different level stop the replay instead of drawing nonsense
            let succ = match transition::apply(self.grid, &last_state, mov.dir) {
                Ok(succ) => succ,
                Err(err) => return writeln!(f, "Move {} ({}) is illegal: {}", i + 1, mov, err),
            };
            if mov.is_push || self.include_steps {
                writeln!(
                    f,
                    "{}",
                    self.grid.format_with_state(self.format, &succ.state)
                )?;
            }
            last_state = succ.state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
