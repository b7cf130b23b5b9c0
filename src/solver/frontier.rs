use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::Debug;

use crate::map::Grid;
use crate::oracle;
use crate::state::State;
use crate::transition::Successor;

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: State,
    /// Number of moves from the initial state
    pub dist: u32,
    pub h: u32,
    /// Insertion counter, breaks ties in priority queues
    pub seq: u64,
}

impl SearchNode {
    pub fn new(state: State, dist: u32, h: u32, seq: u64) -> Self {
        SearchNode { state, dist, h, seq }
    }
}

/// The only thing that differs between the uninformed and informed graph searches.
pub trait Frontier: Debug {
    fn push(&mut self, node: SearchNode);

    fn pop(&mut self) -> Option<SearchNode>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successors rejected here are never recorded or queued.
    fn keeps(&self, _grid: &Grid, _succ: &Successor) -> bool {
        true
    }

    /// Reorders the new children of one node before they're pushed.
    fn order(&self, _children: &mut [SearchNode]) {}

    /// Whether a known state is queued again when reached with fewer moves.
    fn reopens(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct Fifo(VecDeque<SearchNode>);

impl Fifo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Fifo {
    fn push(&mut self, node: SearchNode) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Default)]
pub struct Lifo {
    stack: Vec<SearchNode>,
    reopen: bool,
}

impl Lifo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Used by IDS - a depth bounded DFS has to revisit states it reaches by a shorter route
    /// or it can miss solutions within the bound.
    pub fn reopening() -> Self {
        Lifo {
            stack: Vec::new(),
            reopen: true,
        }
    }
}

impl Frontier for Lifo {
    fn push(&mut self, node: SearchNode) {
        self.stack.push(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn reopens(&self) -> bool {
        self.reopen
    }
}

/// Depth first, the most promising child is expanded first
/// and pushes into corner deadlocks are dropped.
#[derive(Debug, Default)]
pub struct HeuristicLifo(Vec<SearchNode>);

impl HeuristicLifo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for HeuristicLifo {
    fn push(&mut self, node: SearchNode) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn keeps(&self, grid: &Grid, succ: &Successor) -> bool {
        // only the box that just moved can become a new deadlock
        succ.pushed
            .map_or(true, |box_pos| !oracle::is_corner_deadlock(grid, box_pos))
    }

    fn order(&self, children: &mut [SearchNode]) {
        // worst first so the best ends up on top of the stack,
        // stable so equal ones keep their canonical order
        children.sort_by_key(|child| Reverse(child.h));
    }
}

/// A node in a priority queue - only the key and insertion order matter.
#[derive(Debug)]
struct Keyed {
    key: u32,
    node: SearchNode,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        (other.key, other.node.seq).cmp(&(self.key, self.node.seq))
    }
}

/// Lowest number of moves first (uniform cost - every move costs 1).
#[derive(Debug, Default)]
pub struct CostQueue(BinaryHeap<Keyed>);

impl CostQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for CostQueue {
    fn push(&mut self, node: SearchNode) {
        self.0.push(Keyed {
            key: node.dist,
            node,
        });
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop().map(|keyed| keyed.node)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn reopens(&self) -> bool {
        true
    }
}

/// Lowest heuristic first, ignores the number of moves made.
#[derive(Debug, Default)]
pub struct HeuristicQueue(BinaryHeap<Keyed>);

impl HeuristicQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for HeuristicQueue {
    fn push(&mut self, node: SearchNode) {
        self.0.push(Keyed { key: node.h, node });
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.0.pop().map(|keyed| keyed.node)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
