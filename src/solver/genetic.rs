use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{CancelFlag, GeneticParams};
use crate::data::{Dir, DIRECTIONS};
use crate::heuristic;
use crate::map::Grid;
use crate::moves::Moves;
use crate::oracle;
use crate::solver::stats::Stats;
use crate::state::State;
use crate::transition;

/// A raw move sequence, illegal moves included.
pub type Chromosome = Vec<Dir>;

#[derive(Debug, Clone, PartialEq)]
pub struct Evolution {
    pub best: Chromosome,
    pub fitness: i64,
    /// The legal moves of `best` up to the goal
    pub moves: Moves,
    pub generations: usize,
    pub solved: bool,
    pub cancelled: bool,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub state: State,
    pub moves: Moves,
    pub solved: bool,
}

/// Plays the chromosome from the initial state.
///
/// Illegal moves are skipped, the replay stops once the level is solved.
pub fn replay(grid: &Grid, initial: &State, chromosome: &[Dir]) -> Replay {
    let mut state = initial.clone();
    let mut moves = Moves::default();
    let mut solved = oracle::is_solved(grid, &state);

    for &dir in chromosome {
        if solved {
            break;
        }
        if let Ok(succ) = transition::apply(grid, &state, dir) {
            moves.add(succ.to_move());
            state = succ.state;
            solved = oracle::is_solved(grid, &state);
        }
    }

    Replay {
        state,
        moves,
        solved,
    }
}

/// More is better: rewards boxes on goals, penalizes distance to goals and wasted moves.
pub fn fitness(grid: &Grid, initial: &State, chromosome: &[Dir]) -> i64 {
    let played = replay(grid, initial, chromosome);
    let boxes = played.state.boxes();
    let on_goals = oracle::boxes_on_goals(grid, boxes) as i64;
    let dist = i64::from(heuristic::goal_dist_sum(grid, boxes));
    100 * on_goals - 5 * dist - played.moves.move_cnt() as i64
}

/// Evolves random move sequences until one solves the level or the generations run out.
///
/// Only invalid parameters are an error - the result says whether the best individual solves the level.
pub fn evolve(
    grid: &Grid,
    initial: &State,
    params: &GeneticParams,
    cancel: Option<&CancelFlag>,
) -> Result<Evolution, &'static str> {
    params.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let mut stats = Stats::new();

    let mut population: Vec<Chromosome> = (0..params.population)
        .map(|_| random_chromosome(&mut rng, params))
        .collect();
    let mut best: Option<(i64, Chromosome)> = None;
    let mut generations = 0;
    let mut solved = false;
    let mut cancelled = false;

    for generation in 0..params.generations {
        if cancel.map_or(false, CancelFlag::is_cancelled) {
            cancelled = true;
            break;
        }

        let ranked = rank(grid, initial, &population);
        generations += 1;
        stats.add_iteration();
        keep_best(&mut best, &ranked[0]);

        if generation % 50 == 0 {
            info!("Generation {}: best fitness {}", generation, ranked[0].0);
        }

        if replay(grid, initial, &ranked[0].1).solved {
            debug!("Solved in generation {}", generation);
            solved = true;
            break;
        }

        population = breed(&mut rng, &ranked, params);
    }

    if !solved && !cancelled {
        // the last bred population hasn't been scored yet
        let ranked = rank(grid, initial, &population);
        keep_best(&mut best, &ranked[0]);
    }

    // only empty after cancelling before the first generation
    let (best_fitness, best) = best.unwrap_or_else(|| (fitness(grid, initial, &[]), Vec::new()));
    let best_replay = replay(grid, initial, &best);
    stats.set_best_fitness(best_fitness);
    debug!(
        "Evolution ended after {} generations, best fitness {}",
        generations, best_fitness
    );
    Ok(Evolution {
        best,
        fitness: best_fitness,
        moves: best_replay.moves,
        generations,
        solved: best_replay.solved,
        cancelled,
        stats,
    })
}

/// Sorted by descending fitness, equal ones keep their order.
fn rank(grid: &Grid, initial: &State, population: &[Chromosome]) -> Vec<(i64, Chromosome)> {
    let mut ranked: Vec<_> = population
        .iter()
        .map(|chromosome| (fitness(grid, initial, chromosome), chromosome.clone()))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
}

fn keep_best(best: &mut Option<(i64, Chromosome)>, candidate: &(i64, Chromosome)) {
    if best.as_ref().map_or(true, |&(fitness, _)| candidate.0 > fitness) {
        *best = Some(candidate.clone());
    }
}

fn breed<R: Rng>(
    rng: &mut R,
    ranked: &[(i64, Chromosome)],
    params: &GeneticParams,
) -> Vec<Chromosome> {
    let mut next: Vec<Chromosome> = ranked
        .iter()
        .take(params.elite)
        .map(|(_, chromosome)| chromosome.clone())
        .collect();
    let pool = &ranked[..params.parent_pool.min(ranked.len())];

    while next.len() < params.population {
        let p1 = &pool[rng.gen_range(0..pool.len())].1;
        let p2 = &pool[rng.gen_range(0..pool.len())].1;
        let mut child = crossover(rng, p1, p2);
        mutate(rng, &mut child, params);
        next.push(child);
    }
    next
}

/// Prefix of the first parent and suffix of the second, cut at the same index.
fn crossover<R: Rng>(rng: &mut R, p1: &[Dir], p2: &[Dir]) -> Chromosome {
    let shorter = p1.len().min(p2.len());
    let cut = if shorter > 1 {
        rng.gen_range(1..shorter)
    } else {
        shorter
    };
    let mut child = p1[..cut].to_vec();
    child.extend_from_slice(&p2[cut..]);
    child
}

fn mutate<R: Rng>(rng: &mut R, child: &mut Chromosome, params: &GeneticParams) {
    if !child.is_empty() && rng.gen_bool(params.mutation_rate) {
        let i = rng.gen_range(0..child.len());
        child[i] = random_dir(rng);
    }

    if rng.gen_bool(params.resize_rate) {
        if rng.gen_bool(0.5) && child.len() > params.min_len {
            child.pop();
        } else if child.len() < params.max_len {
            child.push(random_dir(rng));
        }
    }
}

fn random_chromosome<R: Rng>(rng: &mut R, params: &GeneticParams) -> Chromosome {
    let len = rng.gen_range(params.min_len..=params.max_len);
    (0..len).map(|_| random_dir(rng)).collect()
}

fn random_dir<R: Rng>(rng: &mut R) -> Dir {
    DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Dir::*;
    use crate::level::Level;

    const OPEN: &str = "@$G\n...\n...\n";

    fn level(s: &str) -> Level {
        s.parse().unwrap()
    }

    #[test]
    fn replay_skips_illegal_and_stops_at_goal() {
        let level = level(OPEN);
        let played = replay(&level.grid, &level.state, &[Up, Left, Right, Down, Down]);
        assert!(played.solved);
        assert_eq!(played.moves.to_string(), "R");
    }

    #[test]
    fn scoring() {
        let level = level("#@$  .#\n");
        let (grid, initial) = (&level.grid, &level.state);
        // box 3 cells from the goal, nothing moved
        assert_eq!(fitness(grid, initial, &[]), -15);
        assert_eq!(fitness(grid, initial, &[Left, Up]), -15);
        // one push costs a move and gains distance
        assert_eq!(fitness(grid, initial, &[Right]), -11);
        assert_eq!(fitness(grid, initial, &[Right, Right, Right]), 97);
        // moves after the goal are not replayed
        assert_eq!(fitness(grid, initial, &[Right, Right, Right, Left, Left]), 97);
    }

    #[test]
    fn crossover_keeps_second_parent_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let p1 = vec![Up; 5];
        let p2 = vec![Down; 8];
        for _ in 0..20 {
            let child = crossover(&mut rng, &p1, &p2);
            assert_eq!(child.len(), 8);
            assert_eq!(child[0], Up);
            assert_eq!(child[7], Down);
        }

        let child = crossover(&mut rng, &[Left], &[Right, Right]);
        assert_eq!(child, vec![Left, Right]);
    }

    #[test]
    fn mutation_respects_lengths() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let params = GeneticParams {
            min_len: 3,
            max_len: 4,
            mutation_rate: 1.0,
            resize_rate: 1.0,
            ..GeneticParams::default()
        };
        let mut child = vec![Up; 3];
        for _ in 0..50 {
            mutate(&mut rng, &mut child, &params);
            assert!(child.len() >= 3 && child.len() <= 4);
        }
    }

    #[test]
    fn solves_open_level() {
        let level = level(OPEN);
        let evolution = evolve(&level.grid, &level.state, &GeneticParams::default(), None).unwrap();
        assert!(evolution.solved);
        assert!(!evolution.cancelled);
        assert!(evolution.generations >= 1);
        assert!(evolution.fitness >= 50);
        assert!(replay(&level.grid, &level.state, &evolution.best).solved);
        assert_eq!(evolution.moves.push_cnt(), 1);
    }

    #[test]
    fn ends_solved_or_out_of_generations() {
        let level = level(OPEN);
        let solved = evolve(&level.grid, &level.state, &GeneticParams::default(), None).unwrap();
        assert!(solved.solved);
        assert!(solved.generations < GeneticParams::default().generations);
        assert_eq!(solved.stats.best_fitness(), Some(solved.fitness));

        // box stuck in a corner
        let level = self::level(
            r"
####
#$@#
#. #
####
",
        );
        let params = GeneticParams {
            generations: 3,
            ..GeneticParams::default()
        };
        let exhausted = evolve(&level.grid, &level.state, &params, None).unwrap();
        assert!(!exhausted.solved);
        assert!(!exhausted.cancelled);
        assert_eq!(exhausted.generations, 3);
        assert_eq!(exhausted.stats.iterations(), 3);
        assert_eq!(exhausted.fitness, fitness(&level.grid, &level.state, &exhausted.best));
        assert_eq!(exhausted.stats.best_fitness(), Some(exhausted.fitness));
    }

    #[test]
    fn zero_generations() {
        let level = level(OPEN);
        let params = GeneticParams {
            generations: 0,
            ..GeneticParams::default()
        };
        let evolution = evolve(&level.grid, &level.state, &params, None).unwrap();
        assert_eq!(evolution.generations, 0);
        assert!(evolution.best.len() >= params.min_len && evolution.best.len() <= params.max_len);
        assert_eq!(evolution.fitness, fitness(&level.grid, &level.state, &evolution.best));
    }

    #[test]
    fn same_seed_same_result() {
        let level = level(
            r"
#######
#@.$ G#
#.#.#.#
#.$ G #
#######
",
        );
        let params = GeneticParams {
            generations: 20,
            seed: 42,
            ..GeneticParams::default()
        };
        let first = evolve(&level.grid, &level.state, &params, None).unwrap();
        let second = evolve(&level.grid, &level.state, &params, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cancelled_before_first_generation() {
        let level = level(OPEN);
        let cancel = CancelFlag::new();
        cancel.cancel();
        let evolution =
            evolve(&level.grid, &level.state, &GeneticParams::default(), Some(&cancel)).unwrap();
        assert!(evolution.cancelled);
        assert_eq!(evolution.generations, 0);
    }

    #[test]
    fn invalid_params() {
        let level = level(OPEN);
        let params = GeneticParams {
            population: 0,
            ..GeneticParams::default()
        };
        assert!(evolve(&level.grid, &level.state, &params, None).is_err());
    }
}
