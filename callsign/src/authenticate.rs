use std::time::Duration;

use callsign_core::Context;
use callsign_core::ParamSet;
use callsign_core::Result;
use http::header::AUTHORIZATION;
use http::HeaderValue;

use crate::constants::PARAM_API_KEY;
use crate::constants::PARAM_API_SECRET;
use crate::credential::Credential;
use crate::jwt;
use crate::negotiate::AcceptableAuth;
use crate::sign::CanonicalSigner;
use crate::store::CredentialStore;

/// How long a minted application token stays valid by default.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(900);

/// RequestAuthenticator is the main struct used to authenticate outgoing
/// requests.
///
/// For each call it negotiates a credential from the store against the
/// endpoint's acceptable set, then attaches the credential material to the
/// request: parameters for key pairs, a canonical signature for signing
/// secrets, an `Authorization` header for bearer tokens and application
/// keys. It never performs I/O; a token provider that refreshes over the
/// network does so behind its own interface.
#[derive(Clone, Debug)]
pub struct RequestAuthenticator {
    ctx: Context,
    store: CredentialStore,
    signer: CanonicalSigner,
    token_ttl: Duration,
}

impl RequestAuthenticator {
    /// Create a new authenticator over the given store.
    pub fn new(ctx: Context, store: CredentialStore) -> Self {
        Self {
            ctx,
            store,
            signer: CanonicalSigner::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Replace the canonical signer used for signature-secret credentials.
    pub fn with_signer(mut self, signer: CanonicalSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Set the lifetime of minted application tokens.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// The credential store backing this authenticator.
    ///
    /// The store is shared, so adding a credential here rotates it for every
    /// clone of the authenticator.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Authenticate a request in place.
    ///
    /// Negotiation failures surface before anything is touched; once a
    /// credential is selected the request parts and parameters are mutated
    /// and the call cannot partially apply.
    pub fn authenticate(
        &self,
        acceptable: &AcceptableAuth,
        parts: &mut http::request::Parts,
        params: &mut ParamSet,
    ) -> Result<()> {
        let credential = acceptable.select(&self.store)?;

        match &credential {
            Credential::KeyPair {
                api_key,
                api_secret,
            } => {
                params.insert(PARAM_API_KEY, api_key.as_str());
                params.insert(PARAM_API_SECRET, api_secret.as_str());
            }
            Credential::SignatureSecret { api_key, secret } => {
                params.insert(PARAM_API_KEY, api_key.as_str());
                // The secret stays out of the set; only its signature travels.
                self.signer.sign(&self.ctx, params, secret);
            }
            Credential::Bearer { provider } => {
                let token = provider.token()?;
                Self::apply_bearer(parts, &token)?;
            }
            Credential::AppKey {
                application_id,
                private_key,
            } => {
                let token = jwt::mint_application_token(
                    application_id,
                    private_key,
                    self.ctx.now_secs(),
                    self.token_ttl,
                )?;
                Self::apply_bearer(parts, &token)?;
            }
        }

        Ok(())
    }

    fn apply_bearer(parts: &mut http::request::Parts, token: &str) -> Result<()> {
        let mut value: HeaderValue = format!("Bearer {token}").parse()?;
        value.set_sensitive(true);
        parts.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
