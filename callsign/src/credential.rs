use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use callsign_core::utils::Redact;
use callsign_core::Result;

/// Credential enum for the authentication methods the platform accepts.
///
/// A credential is immutable once constructed; rotation happens by adding a
/// replacement to the [`CredentialStore`](crate::CredentialStore), never by
/// mutating a value a request may already hold.
#[derive(Clone)]
pub enum Credential {
    /// API key and secret sent as request parameters.
    KeyPair {
        /// Public API key.
        api_key: String,
        /// Matching API secret.
        api_secret: String,
    },
    /// Preshared signing secret used to produce a canonical request signature.
    ///
    /// The secret never leaves the client; only the api key and the computed
    /// signature travel with the request.
    SignatureSecret {
        /// Public API key sent alongside the signature.
        api_key: String,
        /// Preshared signing secret.
        secret: String,
    },
    /// Bearer token supplied (and possibly refreshed) by a provider.
    Bearer {
        /// Token supplier consulted at authentication time.
        provider: Arc<dyn ProvideToken>,
    },
    /// Application identity backed by an RSA private key, used to mint
    /// short-lived JWTs.
    AppKey {
        /// Application id placed in the token claims.
        application_id: String,
        /// PEM-encoded RSA private key.
        private_key: String,
    },
}

/// The tag of a [`Credential`] variant.
///
/// Kinds are what endpoints declare acceptable and what the store keys by.
/// `Ord` follows declaration order and fixes the sort used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialKind {
    /// API key and secret as request parameters.
    KeyPair,
    /// Preshared signing secret.
    SignatureSecret,
    /// Bearer token.
    Bearer,
    /// Application RSA key.
    AppKey,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::KeyPair => write!(f, "key-pair"),
            CredentialKind::SignatureSecret => write!(f, "signature-secret"),
            CredentialKind::Bearer => write!(f, "bearer"),
            CredentialKind::AppKey => write!(f, "app-key"),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Credential::KeyPair {
                api_key,
                api_secret,
            } => f
                .debug_struct("Credential::KeyPair")
                .field("api_key", &Redact::from(api_key))
                .field("api_secret", &Redact::from(api_secret))
                .finish(),
            Credential::SignatureSecret { api_key, secret } => f
                .debug_struct("Credential::SignatureSecret")
                .field("api_key", &Redact::from(api_key))
                .field("secret", &Redact::from(secret))
                .finish(),
            Credential::Bearer { provider } => f
                .debug_struct("Credential::Bearer")
                .field("provider", provider)
                .finish(),
            Credential::AppKey {
                application_id,
                private_key,
            } => f
                .debug_struct("Credential::AppKey")
                .field("application_id", application_id)
                .field("private_key", &Redact::from(private_key))
                .finish(),
        }
    }
}

impl Credential {
    /// Create a new credential with api key and secret.
    pub fn with_key_pair(api_key: &str, api_secret: &str) -> Self {
        Self::KeyPair {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    /// Create a new credential with a preshared signing secret.
    pub fn with_signature_secret(api_key: &str, secret: &str) -> Self {
        Self::SignatureSecret {
            api_key: api_key.to_string(),
            secret: secret.to_string(),
        }
    }

    /// Create a new credential backed by a bearer token provider.
    pub fn with_token_provider(provider: impl ProvideToken) -> Self {
        Self::Bearer {
            provider: Arc::new(provider),
        }
    }

    /// Create a new credential with a fixed bearer token.
    pub fn with_api_token(token: &str) -> Self {
        Self::with_token_provider(StaticTokenProvider::new(token))
    }

    /// Create a new credential with an application id and RSA private key.
    pub fn with_app_key(application_id: &str, private_key: &str) -> Self {
        Self::AppKey {
            application_id: application_id.to_string(),
            private_key: private_key.to_string(),
        }
    }

    /// The [`CredentialKind`] tag of this credential.
    pub fn kind(&self) -> CredentialKind {
        match self {
            Credential::KeyPair { .. } => CredentialKind::KeyPair,
            Credential::SignatureSecret { .. } => CredentialKind::SignatureSecret,
            Credential::Bearer { .. } => CredentialKind::Bearer,
            Credential::AppKey { .. } => CredentialKind::AppKey,
        }
    }

    /// Check whether the credential is structurally usable.
    ///
    /// This is a shape check, not a liveness check: a bearer provider that
    /// fails at token time still reports valid here and surfaces its error
    /// during authentication.
    pub fn is_valid(&self) -> bool {
        match self {
            Credential::KeyPair {
                api_key,
                api_secret,
            } => !api_key.is_empty() && !api_secret.is_empty(),
            Credential::SignatureSecret { api_key, secret } => {
                !api_key.is_empty() && !secret.is_empty()
            }
            Credential::Bearer { .. } => true,
            Credential::AppKey {
                application_id,
                private_key,
            } => !application_id.is_empty() && !private_key.is_empty(),
        }
    }
}

/// ProvideToken supplies the bearer token attached to a request.
///
/// Implementations may refresh or cache internally; callers only see the
/// token that is current at call time.
pub trait ProvideToken: Debug + Send + Sync + 'static {
    /// Return the token to attach right now.
    fn token(&self) -> Result<String>;
}

/// StaticTokenProvider always returns the same token.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Create a provider around a fixed token.
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

impl ProvideToken for StaticTokenProvider {
    fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
