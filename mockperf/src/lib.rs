#![warn(missing_docs)]
//! # mockperf
//!
//! Stand-in benchmarking harness. It keeps the call shape of a benchmarking
//! library so benchmark scripts run without one, and measures nothing.
//!
//! - **Option Registry**: `ArgParser` collects named options with defaults; names are
//!   normalized (`--num-points` becomes `num_points`) and the last registration wins
//! - **Live Settings**: `Runner::parse_args` returns the registry's own `Args`, nothing is parsed
//! - **Timed Calls**: `Runner::run_timed` prepends a fixed timing value (42) to the arguments
//! - **Plain Calls**: `Runner::run_plain` forwards the arguments unchanged
//! - **Pluggable Clock**: swap the sentinel for any `Clock`
//!
//! ## Quick Start
//!
//! ```ignore
//! use mockperf::prelude::*;
//!
//! let mut runner = Runner::new();
//! runner.argparser_mut().register("--num-points", 100);
//! let points = runner.parse_args().get_int("num_points")?;
//!
//! runner.run_timed("add_points", |(t0, n)| add_points(t0, n), (points,))?;
//! ```

// Re-export core types
pub use mockperf_core::{
    ArgError, ArgOptions, ArgParser, ArgValue, Args, Clock, CmdlineHook, FixedClock, Kwargs,
    Prepend, Runner, SENTINEL_TIME, normalize_option_name, perf_counter,
};

// Re-export config for embedding
pub use mockperf_cli::{MockperfConfig, OutputFormat};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ArgOptions, ArgValue, Args, Runner, perf_counter};
}

/// Run the mockperf inspection CLI.
///
/// ```ignore
/// fn main() {
///     mockperf::run().unwrap();
/// }
/// ```
pub use mockperf_cli::run;
