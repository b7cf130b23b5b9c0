use crate::data::Pos;
use crate::map::Grid;

/// Sum of distances from each box to its nearest goal.
///
/// Ignores the player and other boxes so it can overestimate when boxes block each other.
/// Good enough for ordering, not for claiming optimality.
pub fn goal_dist_sum(grid: &Grid, boxes: &[Pos]) -> u32 {
    // less is better
    let mut goal_dist_sum = 0;
    for box_pos in boxes {
        let mut min = u32::max_value();
        for goal in grid.goals() {
            let dist = box_pos.dist(*goal);
            if dist < min {
                min = dist;
            }
        }
        goal_dist_sum += min;
    }
    goal_dist_sum
}
