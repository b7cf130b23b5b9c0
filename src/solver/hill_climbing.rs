use log::{debug, trace};

use crate::config::CancelFlag;
use crate::heuristic;
use crate::map::Grid;
use crate::moves::Moves;
use crate::oracle;
use crate::solver::stats::Stats;
use crate::solver::SolverErr;
use crate::state::State;
use crate::transition::{self, Successor};

/// Steepest descent on the heuristic without any memory or backtracking.
///
/// Each step takes the successor with the lowest heuristic (the first one in canonical order on ties)
/// but only if it's strictly better than the current state.
pub fn hill_climb(
    grid: &Grid,
    initial: &State,
    max_steps: u32,
    cancel: Option<&CancelFlag>,
) -> Result<(Moves, Stats), SolverErr> {
    let mut stats = Stats::new();
    let mut moves = Moves::default();
    let mut state = initial.clone();
    let mut h = heuristic::goal_dist_sum(grid, state.boxes());
    stats.add_created(0);

    if oracle::is_solved(grid, &state) {
        return Ok((moves, stats));
    }

    for step in 0..max_steps {
        if cancel.map_or(false, CancelFlag::is_cancelled) {
            return Err(SolverErr::Cancelled(stats));
        }
        stats.add_iteration();
        stats.add_visited(step);

        let mut best: Option<(u32, Successor)> = None;
        for succ in transition::successors(grid, &state) {
            stats.add_created(step + 1);
            let succ_h = heuristic::goal_dist_sum(grid, succ.state.boxes());
            if best.as_ref().map_or(true, |&(best_h, _)| succ_h < best_h) {
                best = Some((succ_h, succ));
            }
        }

        let (best_h, succ) = match best {
            Some((best_h, succ)) if best_h < h => (best_h, succ),
            _ => {
                debug!("Stuck after {} moves with h = {}", moves.move_cnt(), h);
                return Err(SolverErr::Stuck {
                    partial: moves,
                    stats,
                });
            }
        };

        trace!("Step {}: {} improves h from {} to {}", step, succ.to_move(), h, best_h);
        moves.add(succ.to_move());
        state = succ.state;
        h = best_h;

        if oracle::is_solved(grid, &state) {
            debug!("Solved in {} steps", moves.move_cnt());
            return Ok((moves, stats));
        }
    }

    Err(SolverErr::BudgetExceeded {
        best: Some(moves),
        stats,
    })
}
