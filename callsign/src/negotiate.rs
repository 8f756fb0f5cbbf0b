use callsign_core::Error;
use callsign_core::Result;

use crate::credential::Credential;
use crate::credential::CredentialKind;
use crate::store::CredentialStore;

/// The ordered set of credential kinds an endpoint accepts.
///
/// Insertion order is preference order: [`select`](AcceptableAuth::select)
/// walks the kinds front to back and returns the first one that is both
/// configured in the store and structurally valid. The set is immutable once
/// built, so an endpoint descriptor can hand out a shared reference safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptableAuth {
    kinds: Vec<CredentialKind>,
}

impl AcceptableAuth {
    /// Create an acceptable set from kinds in preference order.
    ///
    /// Duplicate kinds keep their first position.
    pub fn new(kinds: impl IntoIterator<Item = CredentialKind>) -> Self {
        let mut out = Vec::new();
        for kind in kinds {
            if !out.contains(&kind) {
                out.push(kind);
            }
        }
        Self { kinds: out }
    }

    /// The acceptable kinds in preference order.
    pub fn kinds(&self) -> &[CredentialKind] {
        &self.kinds
    }

    /// Check whether a kind is acceptable.
    pub fn contains(&self, kind: CredentialKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Select the credential to use for a call against the given store.
    ///
    /// Kinds are tried in preference order; a configured credential that
    /// fails its shape check is skipped, not fatal. When nothing matches, the
    /// error message carries both the acceptable kinds and the configured
    /// kinds. Selection never performs I/O.
    pub fn select(&self, store: &CredentialStore) -> Result<Credential> {
        for kind in &self.kinds {
            match store.get(*kind) {
                Some(cred) if cred.is_valid() => {
                    log::debug!("negotiation picked {kind} credential");
                    return Ok(cred);
                }
                Some(_) => {
                    log::debug!("skipping {kind} credential: present but not usable");
                }
                None => {
                    log::debug!("no {kind} credential configured");
                }
            }
        }

        Err(Error::no_acceptable_credential(format!(
            "no acceptable credential configured: acceptable [{}], configured [{}]",
            kinds_list(&self.kinds),
            kinds_list(&store.kinds()),
        )))
    }
}

fn kinds_list(kinds: &[CredentialKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
