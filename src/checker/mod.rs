//! External checker invocation.

mod command;
mod links;
mod result;
mod runner;

pub use command::{
    CheckerCommand, CheckerKind, CheckerOptions, FailureMode, HARD_ERROR_PATTERN,
    PYLINT_MSG_TEMPLATE, plan_checkers,
};
pub use links::{LinkRegistry, LinkSet, Linked};
pub use result::CheckerResult;
pub use runner::CheckerRunner;
