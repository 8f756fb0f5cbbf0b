use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;
use std::sync::RwLock;

use crate::credential::Credential;
use crate::credential::CredentialKind;

/// CredentialStore holds the credentials a client is configured with, at most
/// one per [`CredentialKind`].
///
/// Adding a credential of a kind that is already present replaces it, which
/// is how rotation works: in-flight requests keep the clone they negotiated,
/// later requests pick up the replacement. The store is cheaply cloneable and
/// shares its state, so one client instance can serve many threads.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<HashMap<CredentialKind, Credential>>>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential, replacing any existing credential of the same kind.
    pub fn add(&self, credential: Credential) {
        self.inner
            .write()
            .expect("lock must be valid")
            .insert(credential.kind(), credential);
    }

    /// Get a clone of the credential of the given kind, if configured.
    pub fn get(&self, kind: CredentialKind) -> Option<Credential> {
        self.inner
            .read()
            .expect("lock must be valid")
            .get(&kind)
            .cloned()
    }

    /// The kinds currently configured, sorted for stable diagnostics.
    pub fn kinds(&self) -> Vec<CredentialKind> {
        let mut kinds: Vec<_> = self
            .inner
            .read()
            .expect("lock must be valid")
            .keys()
            .copied()
            .collect();
        kinds.sort_unstable();
        kinds
    }

    /// Check whether no credential is configured.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock must be valid").is_empty()
    }
}

impl Debug for CredentialStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("kinds", &self.kinds())
            .finish()
    }
}
