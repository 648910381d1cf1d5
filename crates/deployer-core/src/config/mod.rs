//! Run configuration and resolution
//!
//! The command surface produces a [`RunConfig`]; the [`Resolver`] merges it
//! with the manifest's global fields and the selected stack into a
//! [`ResolvedConfiguration`].
//!
//! # Precedence
//!
//! 1. **Command line** - any value set on the [`RunConfig`] wins
//! 2. **Active stack** - back-fills `env` and `polling_interval`
//! 3. **Built-in defaults** - [`DEFAULT_POLLING_INTERVAL`]
//!
//! `assume_role` is the exception: when given on the command line it is
//! broadcast onto every stack in the manifest, not just the active one.

mod resolver;
mod run;

pub use resolver::{ResolvedConfiguration, Resolver};
pub use run::{
    DEFAULT_DEPLOYMENT_TIMEOUT, DEFAULT_LOG_LEVEL, DEFAULT_POLLING_INTERVAL,
    MIN_POLLING_INTERVAL, RunConfig,
};
