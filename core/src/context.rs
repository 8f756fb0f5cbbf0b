use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::env::{Env, OsEnv};
use crate::time::{millis_to_secs, Timestamp};

/// Context provides the environment for credential negotiation and signing.
///
/// The context carries the two ambient dependencies of the subsystem: the
/// process environment (for configuration lookup) and the wall clock (for
/// timestamp injection and replay-window checks). Both default to the real
/// OS implementations and can be swapped out, which is how tests pin the
/// clock and fake the environment.
///
/// ## Example
///
/// ```
/// use callsign_core::{Context, FixedClock, StaticEnv};
///
/// let ctx = Context::new()
///     .with_env(StaticEnv::default())
///     .with_clock(FixedClock::at_secs(1_000_000_000));
/// assert_eq!(ctx.now_secs(), 1_000_000_000);
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
    clock: Arc<dyn Clock>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("env", &self.env)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context backed by the OS environment and system clock.
    pub fn new() -> Self {
        Self {
            env: Arc::new(OsEnv),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the clock implementation.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Returns a hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }

    /// Current time as milliseconds since the Unix epoch.
    #[inline]
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Current time as whole seconds since the Unix epoch.
    #[inline]
    pub fn now_secs(&self) -> Timestamp {
        millis_to_secs(self.clock.now_millis())
    }
}
