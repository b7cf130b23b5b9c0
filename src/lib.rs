// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod heuristic;
pub mod level;
pub mod map;
pub mod map_formatter;
pub mod moves;
pub mod oracle;
pub mod parser;
pub mod solution_formatter;
pub mod solver;
pub mod state;
pub mod transition;
pub mod vec2d;

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::{Method, SolverParams};
use crate::level::Level;
use crate::solver::{SolverErr, SolverOk};

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

/// Reads a level file, detecting its format.
impl<P: AsRef<Path>> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let text = fs::read_to_string(self)?;
        let level = parser::parse(&text)?;
        Ok(level)
    }
}

pub trait Solve {
    fn solve(&self, method: Method, params: &SolverParams) -> Result<SolverOk, SolverErr>;
}
