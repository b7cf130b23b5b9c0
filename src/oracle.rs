use crate::data::{Dir, Pos};
use crate::map::Grid;
use crate::state::State;

/// The boxes are exactly on the goals - not a subset, not a superset. Order doesn't matter.
pub fn is_goal(grid: &Grid, boxes: &[Pos]) -> bool {
    // goals are sorted, boxes are unique
    let goals = grid.goals();
    boxes.len() == goals.len() && boxes.iter().all(|b| goals.binary_search(b).is_ok())
}

pub fn is_solved(grid: &Grid, state: &State) -> bool {
    is_goal(grid, state.boxes())
}

pub fn boxes_on_goals(grid: &Grid, boxes: &[Pos]) -> usize {
    boxes.iter().filter(|&&b| grid.is_goal(b)).count()
}

/// A box not on a goal stuck between two perpendicular walls can never move again.
///
/// Only catches corners - frozen boxes along walls or next to other boxes are not detected.
pub fn is_corner_deadlock(grid: &Grid, box_pos: Pos) -> bool {
    if grid.is_goal(box_pos) {
        return false;
    }

    let wall = |dir| grid.is_wall(box_pos + dir);
    let vertical = wall(Dir::Up) || wall(Dir::Down);
    let horizontal = wall(Dir::Left) || wall(Dir::Right);
    vertical && horizontal
}
