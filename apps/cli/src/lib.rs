//! fxfolio CLI - terminal front end for the valuation engine.

pub mod cli;
pub mod config;
pub mod main_lib;
pub mod prompt;
pub mod report;

pub use main_lib::{build_report, diagnostic_sink_for, init_tracing, render, run};
