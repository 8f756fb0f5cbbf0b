use std::fmt::Debug;
use std::fmt::Formatter;

use callsign_core::utils::Redact;
use callsign_core::Context;
use callsign_core::Error;
use callsign_core::Result;
use log::debug;

use crate::constants::*;
use crate::credential::Credential;
use crate::sign::SignatureHash;
use crate::store::CredentialStore;

/// Config carries all the credential configuration for a client.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_API_KEY`]
    pub api_key: Option<String>,
    /// `api_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_API_SECRET`]
    pub api_secret: Option<String>,
    /// `signature_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_SIGNATURE_SECRET`]
    pub signature_secret: Option<String>,
    /// `signature_hash` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_SIGNATURE_HASH`]
    ///
    /// Accepts the names [`SignatureHash`] parses: `md5`, `hmac-md5`,
    /// `hmac-sha1`, `hmac-sha256`, `hmac-sha512`.
    pub signature_hash: Option<String>,
    /// `api_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_API_TOKEN`]
    pub api_token: Option<String>,
    /// `application_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_APPLICATION_ID`]
    pub application_id: Option<String>,
    /// `private_key` (PEM contents) will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_PRIVATE_KEY`]
    ///
    /// Takes precedence over [`private_key_path`](Config::private_key_path).
    pub private_key: Option<String>,
    /// `private_key_path` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CALLSIGN_PRIVATE_KEY_PATH`]
    pub private_key_path: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set api_secret
    pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Set signature_secret
    pub fn with_signature_secret(mut self, signature_secret: impl Into<String>) -> Self {
        self.signature_secret = Some(signature_secret.into());
        self
    }

    /// Set signature_hash
    pub fn with_signature_hash(mut self, signature_hash: impl Into<String>) -> Self {
        self.signature_hash = Some(signature_hash.into());
        self
    }

    /// Set api_token
    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Set application_id
    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    /// Set private_key
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set private_key_path
    pub fn with_private_key_path(mut self, private_key_path: impl Into<String>) -> Self {
        self.private_key_path = Some(private_key_path.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CALLSIGN_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CALLSIGN_API_SECRET) {
            self.api_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CALLSIGN_SIGNATURE_SECRET) {
            self.signature_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CALLSIGN_SIGNATURE_HASH) {
            self.signature_hash.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CALLSIGN_API_TOKEN) {
            self.api_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CALLSIGN_APPLICATION_ID) {
            self.application_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CALLSIGN_PRIVATE_KEY) {
            self.private_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CALLSIGN_PRIVATE_KEY_PATH) {
            self.private_key_path.get_or_insert(v);
        }

        self
    }

    /// The configured digest strategy, if any.
    pub fn signature_hash(&self) -> Result<Option<SignatureHash>> {
        self.signature_hash
            .as_deref()
            .map(str::parse)
            .transpose()
    }

    /// Build the credential store this config describes.
    ///
    /// Every credential the material supports is constructed; a private key
    /// path is read here, the only file access in the crate. A config with
    /// no material at all yields an empty store, but half of a pair (a
    /// secret without its key, an application id without key material) is an
    /// error so misconfiguration surfaces at startup rather than per call.
    pub fn build_store(&self) -> Result<CredentialStore> {
        let store = CredentialStore::new();

        if let Some(api_secret) = &self.api_secret {
            let api_key = self.api_key.as_ref().ok_or_else(|| {
                Error::config_invalid("api secret configured without an api key")
            })?;
            store.add(Credential::with_key_pair(api_key, api_secret));
            debug!("configured key-pair credential");
        }

        if let Some(signature_secret) = &self.signature_secret {
            let api_key = self.api_key.as_ref().ok_or_else(|| {
                Error::config_invalid("signature secret configured without an api key")
            })?;
            store.add(Credential::with_signature_secret(api_key, signature_secret));
            debug!("configured signature-secret credential");
        }

        if let Some(api_token) = &self.api_token {
            store.add(Credential::with_api_token(api_token));
            debug!("configured bearer credential");
        }

        match (&self.application_id, self.private_key_material()?) {
            (Some(application_id), Some(private_key)) => {
                store.add(Credential::with_app_key(application_id, &private_key));
                debug!("configured app-key credential");
            }
            (Some(_), None) => {
                return Err(Error::config_invalid(
                    "application id configured without a private key",
                ));
            }
            (None, Some(_)) => {
                return Err(Error::config_invalid(
                    "private key configured without an application id",
                ));
            }
            (None, None) => {}
        }

        Ok(store)
    }

    fn private_key_material(&self) -> Result<Option<String>> {
        if let Some(pem) = &self.private_key {
            return Ok(Some(pem.clone()));
        }
        let Some(path) = &self.private_key_path else {
            return Ok(None);
        };
        let pem = std::fs::read_to_string(path).map_err(|e| {
            Error::config_invalid(format!("failed to read private key from {path}"))
                .with_source(e)
        })?;
        Ok(Some(pem))
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("api_secret", &self.api_secret.as_ref().map(Redact::from))
            .field(
                "signature_secret",
                &self.signature_secret.as_ref().map(Redact::from),
            )
            .field("signature_hash", &self.signature_hash)
            .field("api_token", &self.api_token.as_ref().map(Redact::from))
            .field("application_id", &self.application_id)
            .field("private_key", &self.private_key.as_ref().map(Redact::from))
            .field("private_key_path", &self.private_key_path)
            .finish()
    }
}
