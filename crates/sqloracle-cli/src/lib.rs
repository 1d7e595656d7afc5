//! Command-line front end for sqloracle.

pub mod args;
pub mod commands;
pub mod plan;
pub mod report;

pub use args::{Cli, Command, PredictArgs};
pub use plan::{PlannedRun, RunPlan};
