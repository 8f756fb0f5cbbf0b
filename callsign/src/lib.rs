//! Credential negotiation and request signing for communications platform APIs.
//!
//! Every endpoint of the platform accepts a different set of authentication
//! methods. This crate picks a workable credential for the endpoint at hand,
//! then applies it: key pairs travel as request parameters, signature secrets
//! produce a canonical-string digest, bearer tokens and application JWTs go
//! into the `Authorization` header.
//!
//! ## Overview
//!
//! - [`Config`] collects credential material from builders and the
//!   environment and turns it into a [`CredentialStore`].
//! - [`Endpoint`] describes which credential kinds an API endpoint accepts,
//!   in preference order, as an [`AcceptableAuth`] set.
//! - [`RequestAuthenticator`] negotiates between the two and mutates the
//!   outgoing request.
//! - [`CanonicalSigner`] and [`SignatureVerifier`] are the signing and
//!   callback-verification halves of the signature scheme, usable on their
//!   own.
//!
//! ## Example
//!
//! ```
//! use callsign::{Config, Endpoint, RequestAuthenticator};
//! use callsign_core::{Context, ParamSet, Result};
//!
//! fn main() -> Result<()> {
//!     let ctx = Context::new();
//!     let store = Config::new()
//!         .with_api_key("abc")
//!         .with_api_secret("passw0rd")
//!         .build_store()?;
//!     let authenticator = RequestAuthenticator::new(ctx, store);
//!
//!     let (mut parts, _) = http::Request::post("https://rest.example.com/sms/json")
//!         .body(())?
//!         .into_parts();
//!     let mut params = ParamSet::new();
//!     params.insert("to", "447700900000");
//!     params.insert("text", "hello");
//!
//!     authenticator.authenticate(Endpoint::sms().acceptable(), &mut parts, &mut params)?;
//!     assert_eq!(params.get("api_key"), Some("abc"));
//!     Ok(())
//! }
//! ```

mod authenticate;
pub use authenticate::RequestAuthenticator;
pub use authenticate::DEFAULT_TOKEN_TTL;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;
pub use credential::CredentialKind;
pub use credential::ProvideToken;
pub use credential::StaticTokenProvider;

mod endpoint;
pub use endpoint::Endpoint;

mod negotiate;
pub use negotiate::AcceptableAuth;

mod sign;
pub use sign::Canonicalization;
pub use sign::CanonicalSigner;
pub use sign::SignatureHash;

mod store;
pub use store::CredentialStore;

mod verify;
pub use verify::SignatureVerifier;
pub use verify::VerificationOutcome;
pub use verify::DEFAULT_MAX_DELTA;

mod constants;
mod jwt;
