// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

use std::env;
use std::fs;
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgGroup, ArgMatches};
use log::debug;

use sokoban_search::config::{Format, GeneticParams, Method, SolverParams, METHODS};
use sokoban_search::parser;
use sokoban_search::solver::SolverErr;
use sokoban_search::Solve;

fn main() {
    env_logger::init();

    let method_names: Vec<String> = METHODS.iter().map(Method::to_string).collect();
    let method_names: Vec<&str> = method_names.iter().map(String::as_str).collect();

    let matches = App::new("sokoban-search")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves sokoban levels using classic search methods")
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .possible_values(&method_names)
                .default_value("bfs")
                .help("search method"),
        )
        .arg(
            Arg::with_name("max-depth")
                .short("d")
                .long("max-depth")
                .takes_value(true)
                .help("depth bound for dfs and heuristic-dfs, maximum cutoff for ids (default 50)"),
        )
        .arg(
            Arg::with_name("max-expansions")
                .short("e")
                .long("max-expansions")
                .takes_value(true)
                .help("stop after expanding this many nodes"),
        )
        .arg(
            Arg::with_name("max-steps")
                .long("max-steps")
                .takes_value(true)
                .help("step budget of hill-climbing (default 1000)"),
        )
        .arg(
            Arg::with_name("population")
                .long("population")
                .takes_value(true)
                .help("population size of genetic (default 80)"),
        )
        .arg(
            Arg::with_name("generations")
                .long("generations")
                .takes_value(true)
                .help("maximum generations of genetic (default 300)"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("random seed of genetic (default 0)"),
        )
        .arg(
            Arg::with_name("classic")
                .short("c")
                .long("classic")
                .help("parse as classic format - `G` goals, `.` floor"),
        )
        .arg(
            Arg::with_name("xsb")
                .short("x")
                .long("xsb")
                .help("parse as XSB format"),
        )
        .group(ArgGroup::with_name("format").arg("classic").arg("xsb"))
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .help("print the state after every move, not just after pushes"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let path = matches.value_of("file").unwrap();
    let text = fs::read_to_string(path).unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => println!("Can't read file {} in {}: {}", path, dir.display(), err),
            Err(_) => println!("Can't read file {}: {}", path, err),
        }
        process::exit(1);
    });

    let format = if matches.is_present("classic") {
        Format::Classic
    } else if matches.is_present("xsb") {
        Format::Xsb
    } else {
        parser::detect_format(&text)
    };
    debug!("Parsing {} as {:?}", path, format);

    let level = parser::parse_format(&text, format).unwrap_or_else(|err| {
        println!("Failed to parse: {}", err);
        process::exit(1);
    });

    let method: Method = matches
        .value_of("method")
        .unwrap()
        .parse()
        .unwrap_or_else(|err| {
            println!("{}", err);
            process::exit(1);
        });
    let params = params(&matches);

    println!("Solving {} using {}...", path, method);
    match level.solve(method, &params) {
        Ok(solution) => {
            println!("{}", solution.stats);
            println!("Found solution:");
            print!(
                "{}",
                level.format_solution(format, &solution.moves, matches.is_present("steps"))
            );
            println!("{}", solution.moves);
            println!("{}", solution.moves.names());
            println!("Moves: {}", solution.moves.move_cnt());
            println!("Pushes: {}", solution.moves.push_cnt());
        }
        Err(err @ SolverErr::BadParams(_)) => {
            println!("{}", err);
            process::exit(1);
        }
        Err(err) => {
            if let Some(stats) = err.stats() {
                println!("{}", stats);
            }
            println!("No solution: {}", err);
            if let Some(best) = err.best_effort() {
                println!("Best effort: {} ({} moves)", best, best.move_cnt());
            }
        }
    }
}

fn params(matches: &ArgMatches<'_>) -> SolverParams {
    let defaults = SolverParams::default();
    let genetic = GeneticParams::default();
    SolverParams {
        max_depth: optional(matches, "max-depth"),
        max_expansions: optional(matches, "max-expansions"),
        max_steps: optional(matches, "max-steps").unwrap_or(defaults.max_steps),
        genetic: GeneticParams {
            population: optional(matches, "population").unwrap_or(genetic.population),
            generations: optional(matches, "generations").unwrap_or(genetic.generations),
            seed: optional(matches, "seed").unwrap_or(genetic.seed),
            ..genetic
        },
        cancel: None,
    }
}

fn optional<T: FromStr>(matches: &ArgMatches<'_>, name: &str) -> Option<T> {
    matches.value_of(name).map(|value| {
        value.parse().unwrap_or_else(|_| {
            println!("Invalid value for --{}: {}", name, value);
            process::exit(1);
        })
    })
}
