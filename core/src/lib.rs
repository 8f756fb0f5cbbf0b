//! Core components for authenticating communications-platform API requests.
//!
//! This crate provides the foundational types for the callsign ecosystem. It
//! carries no protocol knowledge of its own; the `callsign` crate builds the
//! credential model, negotiation, and canonical signing on top of it.
//!
//! ## Overview
//!
//! The crate is built around a few key pieces:
//!
//! - **Context**: a container holding the ambient dependencies of the signing
//!   path (the process environment and the wall clock) so both can be
//!   swapped for deterministic tests
//! - **ParamSet**: the ordered, unique-name parameter map a request body or
//!   query string passes through while being authenticated
//! - **Error**: the structured error type shared by every fallible operation
//!
//! ## Example
//!
//! ```
//! use callsign_core::{Context, FixedClock, ParamSet, StaticEnv};
//!
//! // Pin both ambient dependencies for a reproducible run.
//! let ctx = Context::new()
//!     .with_env(StaticEnv::default())
//!     .with_clock(FixedClock::at_secs(1_000_000_000));
//!
//! let mut params = ParamSet::new();
//! params.insert("to", "447700900000");
//! params.insert("text", "Hello");
//!
//! assert_eq!(ctx.now_millis(), 1_000_000_000_000);
//! assert_eq!(params.to_form_urlencoded(), "to=447700900000&text=Hello");
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: the digest and HMAC primitives signatures are built from
//! - [`time`]: epoch conversions shared by clock and signer
//! - [`utils`]: general utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod clock;
pub use clock::{Clock, FixedClock, SystemClock};
mod context;
pub use context::Context;
mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
mod params;
pub use params::ParamSet;
