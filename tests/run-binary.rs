use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

fn solver() -> Command {
    let mut cmd = Command::main_binary().unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn has(text: &str) -> impl Predicate<[u8]> {
    contains(text).from_utf8()
}

#[test]
fn run_classic_pushes() {
    let solution = r"Found solution:
#######
#@.$.G#
#.#...#
#.#...#
#######

#######
#..@$G#
#.#...#
#.#...#
#######

#######
#...@*#
#.#...#
#.#...#
#######

rRR
Right -> Right -> Right
Moves: 3
Pushes: 2
";

    solver()
        .arg("levels/custom/corridor.txt")
        .assert()
        .success()
        .stdout(has("Solving levels/custom/corridor.txt using bfs..."))
        .stdout(has("Nodes expanded total:"))
        .stdout(has(solution))
        .stderr("");
}

#[test]
fn run_xsb_steps() {
    let solution = r"Found solution:
#######
#@ $ .#
# #   #
# #   #
#######

#######
# @$ .#
# #   #
# #   #
#######

#######
#  @$.#
# #   #
# #   #
#######

#######
#   @*#
# #   #
# #   #
#######

rRR
";

    solver()
        .arg("--method")
        .arg("ids")
        .arg("--steps")
        .arg("levels/custom/corridor-xsb.txt")
        .assert()
        .success()
        .stdout(has("Iterations: 4"))
        .stdout(has(solution))
        .stderr("");
}

#[test]
fn run_original_levels() {
    for &(method, level) in &[
        ("ids", "levels/original/ids.txt"),
        ("ucs", "levels/original/two-boxes.txt"),
        ("bfs", "levels/original/two-boxes.txt"),
    ] {
        solver()
            .arg("-m")
            .arg(method)
            .arg(level)
            .assert()
            .success()
            .stdout(has("rRRlllddRR\n"))
            .stdout(has("Moves: 10\nPushes: 4\n"));
    }

    solver()
        .arg("-m")
        .arg("heuristic-dfs")
        .arg("levels/original/dfs.txt")
        .assert()
        .success()
        .stdout(has("UluR\nUp -> Left -> Up -> Right\n"));
}

#[test]
fn run_hill_climbing_stuck() {
    solver()
        .arg("--method=hill-climbing")
        .arg("levels/original/two-boxes.txt")
        .assert()
        .success()
        .stdout(has("No solution: Stuck"))
        .stdout(contains("Found solution").not().from_utf8());
}

#[test]
fn run_genetic_seeded() {
    let run = || {
        solver()
            .arg("--method=genetic")
            .arg("--seed=7")
            .arg("--generations=5")
            .arg("levels/original/two-boxes.txt")
            .output()
            .unwrap()
    };
    let first = run();
    assert!(first.status.success());
    assert!(String::from_utf8_lossy(&first.stdout).contains("Best fitness: "));
    assert_eq!(first.stdout, run().stdout);
}

#[test]
fn run_bad_genetic_params() {
    solver()
        .arg("--method=genetic")
        .arg("--population=5")
        .arg("levels/custom/open.txt")
        .assert()
        .failure()
        .stdout(has("Invalid parameters"));
}

#[test]
fn run_depth_limited_dfs() {
    solver()
        .arg("-m")
        .arg("dfs")
        .arg("--max-depth=2")
        .arg("levels/custom/corridor.txt")
        .assert()
        .success()
        .stdout(has("No solution: No solution exists within the search limits"));
}

#[test]
fn run_invalid_level() {
    solver()
        .arg("levels/custom/invalid.txt")
        .assert()
        .failure()
        .stdout("Failed to parse: Different number of boxes and goals: 1 boxes, 2 goals\n");
}

#[test]
fn run_missing_file() {
    solver()
        .arg("levels/custom/missing.txt")
        .assert()
        .failure()
        .stdout(has("Can't read file levels/custom/missing.txt"));
}

#[test]
fn run_unknown_method() {
    solver()
        .arg("--method=astar")
        .arg("levels/custom/open.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_bad_formatting_args() {
    // doesn't check stderr - clap may complain about either flag

    solver()
        .arg("--classic")
        .arg("--xsb")
        .arg("levels/custom/corridor.txt")
        .assert()
        .failure()
        .stdout("");
}
