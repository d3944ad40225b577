#![warn(missing_docs)]
//! mockperf Core - Registry and Runner
//!
//! This crate provides the stand-in benchmarking harness:
//! - `ArgParser` registry of named, defaulted options and its `Args` settings object
//! - `Runner` with timed and plain invocation entry points
//! - `Clock` timing source, fixed at `SENTINEL_TIME` by default
//!
//! Nothing here measures time or parses process arguments.

mod args;
mod clock;
mod error;
mod runner;
mod value;

pub use args::{ArgOptions, ArgParser, Args, normalize_option_name};
pub use clock::{Clock, FixedClock, SENTINEL_TIME, perf_counter};
pub use error::ArgError;
pub use runner::{CmdlineHook, Kwargs, Prepend, Runner};
pub use value::ArgValue;
