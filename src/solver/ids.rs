use log::{debug, info};

use crate::config::CancelFlag;
use crate::map::Grid;
use crate::moves::Moves;
use crate::solver::frontier::Lifo;
use crate::solver::graph_search::{self, Limits};
use crate::solver::stats::Stats;
use crate::solver::SolverErr;
use crate::state::State;

/// Depth bounded DFS with cutoffs 0, 1, ... up to `max_depth`.
///
/// Each iteration starts with a fresh map of known states.
/// Finds a solution with the fewest moves, same as BFS.
pub fn iterative_deepening(
    grid: &Grid,
    initial: &State,
    max_depth: u32,
    max_expansions: Option<u64>,
    cancel: Option<&CancelFlag>,
) -> Result<(Moves, Stats), SolverErr> {
    let mut total = Stats::new();

    for cutoff in 0..=max_depth {
        info!("Searching with depth limit = {}", cutoff);
        total.add_iteration();

        // the expansion budget is shared by all iterations
        let limits = Limits {
            max_depth: Some(cutoff),
            max_expansions: max_expansions.map(|max| max.saturating_sub(total.total_visited())),
        };
        match graph_search::search(grid, initial, Lifo::reopening(), &limits, cancel) {
            Ok((moves, stats)) => {
                total.merge(&stats);
                debug!("Found solution at depth {}", cutoff);
                return Ok((moves, total));
            }
            Err(SolverErr::NotFound(stats)) => total.merge(&stats),
            Err(SolverErr::BudgetExceeded { best, stats }) => {
                total.merge(&stats);
                return Err(SolverErr::BudgetExceeded { best, stats: total });
            }
            Err(SolverErr::Cancelled(stats)) => {
                total.merge(&stats);
                return Err(SolverErr::Cancelled(total));
            }
            Err(err) => return Err(err),
        }
    }

    debug!("No solution up to depth {}", max_depth);
    Err(SolverErr::NotFound(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;
    use crate::solver::frontier::Fifo;

    fn ids(level: &Level, max_depth: u32) -> Result<(Moves, Stats), SolverErr> {
        iterative_deepening(&level.grid, &level.state, max_depth, None, None)
    }

    #[test]
    fn same_length_as_bfs() {
        for level in &[
            r"
#######
#@.$.G#
#.#.#.#
#.$.G.#
#######
",
            r"
######
#..G.#
#.$..#
#.@..#
#....#
######
",
            r"
#######
#@.$.G#
#.#...#
#.#...#
#######
",
        ] {
            let level: Level = level.parse().unwrap();
            let (bfs, _) = graph_search::search(
                &level.grid,
                &level.state,
                Fifo::new(),
                &Limits::default(),
                None,
            )
            .unwrap();
            let (moves, stats) = ids(&level, 50).unwrap();
            assert_eq!(moves.move_cnt(), bfs.move_cnt());
            // cutoffs 0 to the solution length
            assert_eq!(stats.iterations(), moves.move_cnt() as u64 + 1);
        }
    }

    #[test]
    fn ten_move_level() {
        let level: Level = r"
#######
#@.$.G#
#.#.#.#
#.$.G.#
#######
"
        .parse()
        .unwrap();
        let (moves, stats) = ids(&level, 50).unwrap();
        assert_eq!(moves.to_string(), "rRRlllddRR");
        assert_eq!(stats.iterations(), 11);
    }

    #[test]
    fn cutoff_too_low() {
        let level: Level = "#@ $ .#\n".parse().unwrap();
        match ids(&level, 2) {
            Err(SolverErr::NotFound(stats)) => assert_eq!(stats.iterations(), 3),
            res => panic!("unexpected result: {:?}", res),
        }
        assert_eq!(ids(&level, 3).unwrap().0.to_string(), "rRR");
    }

    #[test]
    fn solved_at_cutoff_zero() {
        let level: Level = "#@*#\n".parse().unwrap();
        let (moves, stats) = ids(&level, 0).unwrap();
        assert!(moves.is_empty());
        assert_eq!(stats.iterations(), 1);
    }

    #[test]
    fn budget_shared_by_iterations() {
        let level: Level = r"
#######
#@.$.G#
#.#.#.#
#.$.G.#
#######
"
        .parse()
        .unwrap();
        match iterative_deepening(&level.grid, &level.state, 50, Some(20), None) {
            Err(SolverErr::BudgetExceeded { best: None, stats }) => {
                assert_eq!(stats.total_visited(), 20);
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }
}
