pub mod frontier;
pub mod genetic;
pub mod graph_search;
pub mod hill_climbing;
pub mod ids;
pub mod stats;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use log::debug;

use crate::config::{Method, SolverParams, DEFAULT_IDS_MAX_DEPTH};
use crate::level::Level;
use crate::moves::Moves;
use crate::Solve;

use self::frontier::{CostQueue, Fifo, HeuristicLifo, HeuristicQueue, Lifo};
use self::graph_search::Limits;
use self::stats::Stats;

/// Why a method didn't produce a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverErr {
    /// The frontier ran out or no cutoff up to the maximum depth worked
    NotFound(Stats),
    /// Expansions, steps or generations ran out
    BudgetExceeded { best: Option<Moves>, stats: Stats },
    /// Hill climbing reached a state none of whose successors is better
    Stuck { partial: Moves, stats: Stats },
    Cancelled(Stats),
    BadParams(&'static str),
}

impl SolverErr {
    pub fn stats(&self) -> Option<&Stats> {
        match *self {
            SolverErr::NotFound(ref stats)
            | SolverErr::BudgetExceeded { ref stats, .. }
            | SolverErr::Stuck { ref stats, .. }
            | SolverErr::Cancelled(ref stats) => Some(stats),
            SolverErr::BadParams(_) => None,
        }
    }

    /// Moves made before giving up, if the method has any.
    pub fn best_effort(&self) -> Option<&Moves> {
        match *self {
            SolverErr::BudgetExceeded {
                best: Some(ref best),
                ..
            } => Some(best),
            SolverErr::Stuck { ref partial, .. } => Some(partial),
            _ => None,
        }
    }
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::NotFound(_) => write!(f, "No solution exists within the search limits"),
            SolverErr::BudgetExceeded { .. } => {
                write!(f, "Budget exhausted before reaching the goal")
            }
            SolverErr::Stuck { .. } => write!(
                f,
                "Stuck in a local optimum - no successor improves the heuristic"
            ),
            SolverErr::Cancelled(_) => write!(f, "Cancelled"),
            SolverErr::BadParams(reason) => write!(f, "Invalid parameters: {}", reason),
        }
    }
}

impl Error for SolverErr {}

#[derive(Clone, PartialEq, Eq)]
pub struct SolverOk {
    pub moves: Moves,
    pub stats: Stats,
    pub method: Method,
}

impl SolverOk {
    fn new(moves: Moves, stats: Stats, method: Method) -> Self {
        Self {
            moves,
            stats,
            method,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.method, self.moves.move_cnt())?;
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, method: Method, params: &SolverParams) -> Result<SolverOk, SolverErr> {
        solve(self, method, params)
    }
}

fn solve(level: &Level, method: Method, params: &SolverParams) -> Result<SolverOk, SolverErr> {
    debug!("Solving using {}", method);

    let grid = &level.grid;
    let initial = &level.state;
    let cancel = params.cancel.as_ref();
    let bounded = Limits {
        max_depth: params.max_depth,
        max_expansions: params.max_expansions,
    };
    // the breadth first and best first methods don't take a depth bound
    let unbounded = Limits {
        max_depth: None,
        ..bounded
    };

    let (moves, stats) = match method {
        Method::Bfs => graph_search::search(grid, initial, Fifo::new(), &unbounded, cancel)?,
        Method::Ucs => graph_search::search(grid, initial, CostQueue::new(), &unbounded, cancel)?,
        Method::Dfs => graph_search::search(grid, initial, Lifo::new(), &bounded, cancel)?,
        Method::HeuristicDfs => {
            graph_search::search(grid, initial, HeuristicLifo::new(), &bounded, cancel)?
        }
        Method::Greedy => {
            graph_search::search(grid, initial, HeuristicQueue::new(), &unbounded, cancel)?
        }
        Method::Ids => ids::iterative_deepening(
            grid,
            initial,
            params.max_depth.unwrap_or(DEFAULT_IDS_MAX_DEPTH),
            params.max_expansions,
            cancel,
        )?,
        Method::HillClimbing => {
            hill_climbing::hill_climb(grid, initial, params.max_steps, cancel)?
        }
        Method::Genetic => {
            let evolution = genetic::evolve(grid, initial, &params.genetic, cancel)
                .map_err(SolverErr::BadParams)?;
            if !evolution.solved {
                if evolution.cancelled {
                    return Err(SolverErr::Cancelled(evolution.stats));
                }
                return Err(SolverErr::BudgetExceeded {
                    best: Some(evolution.moves),
                    stats: evolution.stats,
                });
            }
            (evolution.moves, evolution.stats)
        }
    };

    debug!("{} found {} moves", method, moves.move_cnt());
    Ok(SolverOk::new(moves, stats, method))
}
