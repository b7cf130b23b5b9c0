use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::Grid;
use crate::moves::Move;
use crate::state::State;

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position
// step = a move that doesn't change a box position

/// A move that can't be made. Not a failure - callers just skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    Wall,
    /// The box would hit a wall or another box
    BlockedPush,
}

impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            IllegalMove::Wall => write!(f, "Walking into a wall"),
            IllegalMove::BlockedPush => write!(f, "Pushing a box into a wall or another box"),
        }
    }
}

impl Error for IllegalMove {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    pub state: State,
    pub dir: Dir,
    /// Where the pushed box ended up
    pub pushed: Option<Pos>,
}

impl Successor {
    pub fn is_push(&self) -> bool {
        self.pushed.is_some()
    }

    pub fn to_move(&self) -> Move {
        Move::new(self.dir, self.is_push())
    }
}

pub fn apply(grid: &Grid, state: &State, dir: Dir) -> Result<Successor, IllegalMove> {
    let new_player_pos = state.player_pos + dir;
    if grid.is_wall(new_player_pos) {
        return Err(IllegalMove::Wall);
    }

    if !state.has_box(new_player_pos) {
        return Ok(Successor {
            state: state.with_player(new_player_pos),
            dir,
            pushed: None,
        });
    }

    let push_dest = new_player_pos + dir;
    if grid.is_wall(push_dest) || state.has_box(push_dest) {
        return Err(IllegalMove::BlockedPush);
    }
    Ok(Successor {
        state: state.with_push(new_player_pos, new_player_pos, push_dest),
        dir,
        pushed: Some(push_dest),
    })
}

/// Legal successors in the order of `DIRECTIONS`.
pub fn successors<'a>(grid: &'a Grid, state: &'a State) -> impl Iterator<Item = Successor> + 'a {
    DIRECTIONS
        .iter()
        .filter_map(move |&dir| apply(grid, state, dir).ok())
}
