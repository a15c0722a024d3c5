pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod heuristics;
pub mod output;
pub mod path_utils;
pub mod scanner;

pub use error::{Result, StyleGuardError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FATAL: i32 = 1;
pub const EXIT_PROBLEMS: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
