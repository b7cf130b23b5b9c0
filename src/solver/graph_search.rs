use fnv::FnvHashMap;
use log::{debug, info, trace};

use crate::config::CancelFlag;
use crate::heuristic;
use crate::map::Grid;
use crate::moves::{Move, Moves};
use crate::oracle;
use crate::solver::frontier::{Frontier, SearchNode};
use crate::solver::stats::Stats;
use crate::solver::SolverErr;
use crate::state::State;
use crate::transition;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Nodes at this depth are goal tested but not expanded
    pub max_depth: Option<u32>,
    pub max_expansions: Option<u64>,
}

/// How a known state was first (or most cheaply) reached.
#[derive(Debug)]
struct Discovery {
    prev: Option<(State, Move)>,
    dist: u32,
}

/// Graph search shared by all frontier based methods.
///
/// States are recorded when discovered so each is queued at most once,
/// unless the frontier reopens states reached by a shorter route.
pub fn search<F: Frontier>(
    grid: &Grid,
    initial: &State,
    mut frontier: F,
    limits: &Limits,
    cancel: Option<&CancelFlag>,
) -> Result<(Moves, Stats), SolverErr> {
    debug!("Search called with {:?}, {:?}", frontier, limits);

    let mut stats = Stats::new();
    let mut prevs: FnvHashMap<State, Discovery> = FnvHashMap::default();
    let mut seq = 0;

    prevs.insert(
        initial.clone(),
        Discovery {
            prev: None,
            dist: 0,
        },
    );
    stats.add_created(0);
    frontier.push(SearchNode::new(
        initial.clone(),
        0,
        heuristic::goal_dist_sum(grid, initial.boxes()),
        seq,
    ));

    while let Some(cur_node) = frontier.pop() {
        if cancel.map_or(false, CancelFlag::is_cancelled) {
            debug!("Cancelled");
            return Err(SolverErr::Cancelled(stats));
        }

        // a shorter route was found after this node was queued
        if prevs
            .get(&cur_node.state)
            .map_or(false, |d| d.dist < cur_node.dist)
        {
            stats.add_duplicate(cur_node.dist);
            continue;
        }

        if oracle::is_solved(grid, &cur_node.state) {
            debug!("Solved, backtracking path");
            return Ok((backtrack_moves(&prevs, &cur_node.state), stats));
        }

        if let Some(max) = limits.max_expansions {
            if stats.total_visited() >= max {
                debug!("Expansion budget of {} exhausted", max);
                return Err(SolverErr::BudgetExceeded { best: None, stats });
            }
        }

        if stats.add_visited(cur_node.dist) {
            info!("Visited new depth: {}", cur_node.dist);
            trace!("{:?}", stats);
        }

        if limits.max_depth.map_or(false, |max| cur_node.dist >= max) {
            continue;
        }

        let dist = cur_node.dist + 1;
        let mut children = Vec::new();
        for succ in transition::successors(grid, &cur_node.state) {
            if !frontier.keeps(grid, &succ) {
                continue;
            }

            let known = prevs
                .get(&succ.state)
                .map_or(false, |d| !frontier.reopens() || d.dist <= dist);
            if known {
                stats.add_duplicate(dist);
                continue;
            }

            let mov = succ.to_move();
            prevs.insert(
                succ.state.clone(),
                Discovery {
                    prev: Some((cur_node.state.clone(), mov)),
                    dist,
                },
            );
            seq += 1;
            let h = heuristic::goal_dist_sum(grid, succ.state.boxes());
            children.push(SearchNode::new(succ.state, dist, h, seq));
        }

        frontier.order(&mut children);
        for child in children {
            stats.add_created(child.dist);
            frontier.push(child);
        }
    }

    debug!("Frontier exhausted");
    Err(SolverErr::NotFound(stats))
}

fn backtrack_moves(prevs: &FnvHashMap<State, Discovery>, final_state: &State) -> Moves {
    let mut moves = Moves::default();
    let mut state = final_state;
    // recorded distances strictly decrease along the chain so this ends at the initial state
    while let Some((prev, mov)) = prevs.get(state).and_then(|d| d.prev.as_ref()) {
        moves.add(*mov);
        state = prev;
    }
    moves.reverse();
    moves
}
