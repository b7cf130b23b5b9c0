use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `#` wall, `@` player, `$` box, `G` goal, `.` or space floor
    Classic,
    Xsb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Bfs,
    Ucs,
    Dfs,
    HeuristicDfs,
    Greedy,
    Ids,
    HillClimbing,
    Genetic,
}

pub const METHODS: [Method; 8] = [
    Method::Bfs,
    Method::Ucs,
    Method::Dfs,
    Method::HeuristicDfs,
    Method::Greedy,
    Method::Ids,
    Method::HillClimbing,
    Method::Genetic,
];

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::Bfs => write!(f, "bfs"),
            Method::Ucs => write!(f, "ucs"),
            Method::Dfs => write!(f, "dfs"),
            Method::HeuristicDfs => write!(f, "heuristic-dfs"),
            Method::Greedy => write!(f, "greedy"),
            Method::Ids => write!(f, "ids"),
            Method::HillClimbing => write!(f, "hill-climbing"),
            Method::Genetic => write!(f, "genetic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl Display for UnknownMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown method: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        METHODS
            .iter()
            .cloned()
            .find(|m| m.to_string() == s)
            .ok_or_else(|| UnknownMethod(s.to_owned()))
    }
}

/// Parameters of the genetic algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticParams {
    pub population: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub generations: usize,
    /// Individuals copied unchanged into the next generation
    pub elite: usize,
    /// Parents are drawn from this many of the fittest individuals
    pub parent_pool: usize,
    /// Probability of replacing one random move of a child
    pub mutation_rate: f64,
    /// Probability of growing or shrinking a child by one move
    pub resize_rate: f64,
    pub seed: u64,
}

impl Default for GeneticParams {
    fn default() -> Self {
        GeneticParams {
            population: 80,
            min_len: 10,
            max_len: 50,
            generations: 300,
            elite: 10,
            parent_pool: 20,
            mutation_rate: 0.15,
            resize_rate: 0.2,
            seed: 0,
        }
    }
}

impl GeneticParams {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.population == 0 {
            return Err("population must not be empty");
        }
        if self.min_len == 0 || self.min_len > self.max_len {
            return Err("chromosome lengths must satisfy 0 < min_len <= max_len");
        }
        if self.elite == 0 || self.elite > self.population {
            return Err("elite must be between 1 and population");
        }
        if self.parent_pool == 0 || self.parent_pool > self.population {
            return Err("parent pool must be between 1 and population");
        }
        let probability = 0.0..=1.0;
        if !probability.contains(&self.mutation_rate) || !probability.contains(&self.resize_rate) {
            return Err("rates must be probabilities");
        }
        Ok(())
    }
}

/// Cooperative cancellation - every search loop polls the flag once per iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Parameters shared by all methods, each method reads the ones it needs.
#[derive(Debug, Clone)]
pub struct SolverParams {
    /// Depth bound for DFS / heuristic DFS, maximum cutoff for IDS
    pub max_depth: Option<u32>,
    /// Maximum number of expanded nodes for frontier based methods
    pub max_expansions: Option<u64>,
    /// Step budget of hill climbing
    pub max_steps: u32,
    pub genetic: GeneticParams,
    pub cancel: Option<CancelFlag>,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            max_depth: None,
            max_expansions: None,
            max_steps: 1000,
            genetic: GeneticParams::default(),
            cancel: None,
        }
    }
}

/// IDS needs a finite maximum cutoff.
pub const DEFAULT_IDS_MAX_DEPTH: u32 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_round_trip() {
        for &method in &METHODS {
            assert_eq!(method.to_string().parse::<Method>(), Ok(method));
        }
        assert_eq!(
            "astar".parse::<Method>(),
            Err(UnknownMethod("astar".to_owned()))
        );
    }

    #[test]
    fn genetic_validation() {
        assert_eq!(GeneticParams::default().validate(), Ok(()));

        let mut params = GeneticParams::default();
        params.min_len = 60;
        assert!(params.validate().is_err());

        let mut params = GeneticParams::default();
        params.elite = 100;
        assert!(params.validate().is_err());

        let mut params = GeneticParams::default();
        params.mutation_rate = 1.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let params = SolverParams {
            cancel: Some(flag.clone()),
            ..SolverParams::default()
        };
        let polled = params.cancel.as_ref().map(CancelFlag::is_cancelled);
        assert_eq!(polled, Some(false));
        flag.cancel();
        assert_eq!(params.cancel.map(|cancel| cancel.is_cancelled()), Some(true));
    }
}
