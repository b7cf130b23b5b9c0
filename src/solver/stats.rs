use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

/// Node counts per depth plus the number of outer iterations
/// (IDS cutoffs, hill climbing steps or GA generations).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    iterations: u64,
    /// Only set by the genetic algorithm
    best_fitness: Option<i64>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    /// Expanded nodes
    pub fn total_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    /// Successors rejected because their state was already known
    pub fn total_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn best_fitness(&self) -> Option<i64> {
        self.best_fitness
    }

    pub(crate) fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_visited(&mut self, depth: u32) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    pub(crate) fn add_iteration(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn set_best_fitness(&mut self, fitness: i64) {
        self.best_fitness = Some(fitness);
    }

    /// Adds the counts of another run (used by IDS to sum its iterations).
    pub(crate) fn merge(&mut self, other: &Stats) {
        Self::merge_counts(&mut self.created_states, &other.created_states);
        Self::merge_counts(&mut self.visited_states, &other.visited_states);
        Self::merge_counts(&mut self.duplicate_states, &other.duplicate_states);
        self.iterations += other.iterations;
    }

    fn merge_counts(counts: &mut Vec<u64>, other: &[u64]) {
        if counts.len() < other.len() {
            counts.resize(other.len(), 0);
        }
        for (count, &o) in counts.iter_mut().zip(other) {
            *count += o;
        }
    }

    /// Returns true when a new depth was reached.
    fn add(counts: &mut Vec<u64>, depth: u32) -> bool {
        let mut ret = false;

        // while because some depths might be skipped
        while depth as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth as usize] += 1;
        ret
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total reached duplicates: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "total visited: {}", self.total_visited().separated_string())?;
        writeln!(f, "iterations: {}", self.iterations.separated_string())?;
        writeln!(f, "best fitness: {:?}", self.best_fitness)
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(f, "Nodes expanded total: {}", self.total_visited().separated_string())?;
        writeln!(f, "Reached duplicates total: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "Iterations: {}", self.iterations.separated_string())?;
        if let Some(fitness) = self.best_fitness {
            writeln!(f, "Best fitness: {}", fitness)?;
        }

        // duplicates are counted one level below the deepest expanded node
        let depths = self
            .created_states
            .len()
            .max(self.visited_states.len())
            .max(self.duplicate_states.len());
        if depths > 0 {
            writeln!(f)?;
            writeln!(f, "{:<15}{:<15}{:<15}{:<15}", "Depth", "Created", "Expanded", "Duplicates")?;
            for depth in 0..depths {
                let created = self.created_states.get(depth).cloned().unwrap_or(0);
                let visited = self.visited_states.get(depth).cloned().unwrap_or(0);
                let duplicates = self.duplicate_states.get(depth).cloned().unwrap_or(0);
                writeln!(
                    f,
                    "{:<15}{:<15}{:<15}{:<15}",
                    format!("{}:", depth),
                    created.separated_string(),
                    visited.separated_string(),
                    duplicates.separated_string()
                )?;
            }
        }
        Ok(())
    }
}
