//! Runner - The Benchmark Entry Points
//!
//! `Runner` has the shape of a benchmarking harness but measures nothing.
//! `run_timed` calls the benchmark once with the clock reading prepended to
//! its positional arguments; `run_plain` calls it once with the arguments
//! unchanged. Errors from the benchmark come back to the caller untouched.

use crate::args::{ArgParser, Args};
use crate::clock::{Clock, FixedClock};
use crate::value::ArgValue;
use std::collections::BTreeMap;
use std::fmt;

/// Keyword arguments accepted by `Runner::run_timed_with_kwargs`
pub type Kwargs = BTreeMap<String, ArgValue>;

/// Hook for extending a worker command line from the resolved settings
pub type CmdlineHook = Box<dyn Fn(&mut Vec<String>, &Args)>;

/// Positional argument tuple that can take an extra leading element
pub trait Prepend<H> {
    /// Tuple with `H` in front
    type Output;

    /// Put `head` in front of the tuple
    fn prepend(self, head: H) -> Self::Output;
}

macro_rules! impl_prepend {
    ($($T:ident),*) => {
        impl<H, $($T),*> Prepend<H> for ($($T,)*) {
            type Output = (H, $($T,)*);

            #[allow(non_snake_case)]
            fn prepend(self, head: H) -> Self::Output {
                let ($($T,)*) = self;
                (head, $($T,)*)
            }
        }
    };
}

impl_prepend!();
impl_prepend!(A);
impl_prepend!(A, B);
impl_prepend!(A, B, C);
impl_prepend!(A, B, C, D);
impl_prepend!(A, B, C, D, E);
impl_prepend!(A, B, C, D, E, F);
impl_prepend!(A, B, C, D, E, F, G);
impl_prepend!(A, B, C, D, E, F, G, I);

/// Mock benchmark runner
pub struct Runner {
    metadata: BTreeMap<String, String>,
    argparser: ArgParser,
    cmdline_hook: Option<CmdlineHook>,
    clock: Box<dyn Clock>,
}

impl Runner {
    /// Create a runner with an empty registry and the sentinel clock
    pub fn new() -> Self {
        Self {
            metadata: BTreeMap::new(),
            argparser: ArgParser::new(),
            cmdline_hook: None,
            clock: Box::new(FixedClock::default()),
        }
    }

    /// Create a runner with a command-line hook.
    ///
    /// The hook is kept but never called: there are no worker processes
    /// whose command line it could extend.
    pub fn with_cmdline_args<H>(hook: H) -> Self
    where
        H: Fn(&mut Vec<String>, &Args) + 'static,
    {
        Self {
            cmdline_hook: Some(Box::new(hook)),
            ..Self::new()
        }
    }

    /// Replace the timing source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Whether a command-line hook was supplied
    pub fn has_cmdline_hook(&self) -> bool {
        self.cmdline_hook.is_some()
    }

    /// The option registry
    pub fn argparser(&self) -> &ArgParser {
        &self.argparser
    }

    /// The option registry, for registering options
    pub fn argparser_mut(&mut self) -> &mut ArgParser {
        &mut self.argparser
    }

    /// Resolved settings. Nothing is parsed; these are the registered defaults.
    pub fn parse_args(&self) -> &Args {
        self.argparser.resolved()
    }

    /// Descriptive tags
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Mutable access to the tags
    pub fn metadata_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata
    }

    /// Attach a descriptive tag, replacing any previous value for `key`
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Call `f` once with the clock reading prepended to `args`.
    ///
    /// `run_timed("x", f, (1, 2))` calls `f((42, 1, 2))` with the default
    /// clock. The Ok value of `f` is discarded.
    pub fn run_timed<F, A, T, E>(&self, name: &str, f: F, args: A) -> Result<(), E>
    where
        A: Prepend<u64>,
        F: FnOnce(A::Output) -> Result<T, E>,
    {
        let now = self.clock.now();
        tracing::debug!(benchmark = name, time = now, "run timed");
        f(args.prepend(now))?;
        Ok(())
    }

    /// Same as `run_timed`; `kwargs` are accepted and not passed on.
    pub fn run_timed_with_kwargs<F, A, T, E>(
        &self,
        name: &str,
        f: F,
        args: A,
        kwargs: Kwargs,
    ) -> Result<(), E>
    where
        A: Prepend<u64>,
        F: FnOnce(A::Output) -> Result<T, E>,
    {
        if !kwargs.is_empty() {
            let dropped: Vec<&str> = kwargs.keys().map(String::as_str).collect();
            tracing::trace!(benchmark = name, ?dropped, "keyword arguments not forwarded");
        }
        self.run_timed(name, f, args)
    }

    /// Call `f` once with exactly `args`.
    pub fn run_plain<F, A, T, E>(&self, name: &str, f: F, args: A) -> Result<(), E>
    where
        F: FnOnce(A) -> Result<T, E>,
    {
        tracing::debug!(benchmark = name, "run plain");
        f(args)?;
        Ok(())
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("metadata", &self.metadata)
            .field("argparser", &self.argparser)
            .field("cmdline_hook", &self.cmdline_hook.is_some())
            .finish_non_exhaustive()
    }
}
