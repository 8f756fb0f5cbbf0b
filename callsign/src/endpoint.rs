use crate::credential::CredentialKind;
use crate::negotiate::AcceptableAuth;

/// A platform endpoint as this subsystem sees it: a name, a path, and the
/// credential kinds it accepts in preference order.
///
/// Payload shapes and transport belong to the endpoint collaborators; an
/// endpoint here is only the authentication contract of a product family.
#[derive(Debug, Clone)]
pub struct Endpoint {
    name: &'static str,
    path: &'static str,
    acceptable: AcceptableAuth,
}

impl Endpoint {
    fn new(name: &'static str, path: &'static str, kinds: Vec<CredentialKind>) -> Self {
        Self {
            name,
            path,
            acceptable: AcceptableAuth::new(kinds),
        }
    }

    /// Messaging: prefers request signing, falls back to the key pair.
    pub fn sms() -> Self {
        Self::new(
            "sms",
            "/sms/json",
            vec![CredentialKind::SignatureSecret, CredentialKind::KeyPair],
        )
    }

    /// Voice: application-key tokens only.
    pub fn voice() -> Self {
        Self::new("voice", "/v1/calls", vec![CredentialKind::AppKey])
    }

    /// Number verification: key pair only.
    pub fn verify() -> Self {
        Self::new("verify", "/verify/json", vec![CredentialKind::KeyPair])
    }

    /// Number insight: prefers request signing, falls back to the key pair.
    pub fn number_insight() -> Self {
        Self::new(
            "number-insight",
            "/ni/standard/json",
            vec![CredentialKind::SignatureSecret, CredentialKind::KeyPair],
        )
    }

    /// Conversation events and notifications: application key or a
    /// preprovisioned bearer token.
    pub fn conversation() -> Self {
        Self::new(
            "conversation",
            "/v0.3/conversations",
            vec![CredentialKind::AppKey, CredentialKind::Bearer],
        )
    }

    /// The endpoint name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// The URL path requests to this endpoint use.
    pub fn path(&self) -> &str {
        self.path
    }

    /// The credential kinds this endpoint accepts, in preference order.
    pub fn acceptable(&self) -> &AcceptableAuth {
        &self.acceptable
    }
}
