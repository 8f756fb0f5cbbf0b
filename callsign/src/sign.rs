use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use callsign_core::hash::hex_hmac_md5;
use callsign_core::hash::hex_hmac_sha1;
use callsign_core::hash::hex_hmac_sha256;
use callsign_core::hash::hex_hmac_sha512;
use callsign_core::hash::hex_md5;
use callsign_core::time::Timestamp;
use callsign_core::Context;
use callsign_core::Error;
use callsign_core::ParamSet;
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::constants::PARAM_SIGNATURE;
use crate::constants::PARAM_TIMESTAMP;
use crate::constants::SIGNATURE_VALUE_ENCODE_SET;

/// How the sorted parameters are laid out in the canonical string.
///
/// Signer and verifier must agree on the mode bit for bit; it is fixed per
/// deployment, never negotiated per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Canonicalization {
    /// Each name directly followed by its value, no separators, no encoding.
    ///
    /// ```text
    /// api_keyabctextHellotimestamp1000000000to447777111222
    /// ```
    #[default]
    Legacy,
    /// Each pair rendered as `&name=value` with `&` and `=` inside names and
    /// values replaced by `_` first, and the value percent-encoded.
    ///
    /// ```text
    /// &api_key=abc&text=Hello&timestamp=1000000000&to=447777111222
    /// ```
    Delimited,
}

/// The digest strategy applied to the canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureHash {
    /// MD5 over the canonical string with the secret appended.
    #[default]
    Md5,
    /// HMAC-MD5 keyed by the secret.
    HmacMd5,
    /// HMAC-SHA1 keyed by the secret.
    HmacSha1,
    /// HMAC-SHA256 keyed by the secret.
    HmacSha256,
    /// HMAC-SHA512 keyed by the secret.
    HmacSha512,
}

impl SignatureHash {
    /// Digest the canonical string with the given secret, hex encoded
    /// lowercase.
    ///
    /// The plain MD5 flavor appends the secret to the input; the HMAC
    /// flavors key on it instead and never mix it into the input.
    pub fn digest(&self, secret: &str, canonical: &str) -> String {
        match self {
            SignatureHash::Md5 => {
                let mut input = String::with_capacity(canonical.len() + secret.len());
                input.push_str(canonical);
                input.push_str(secret);
                hex_md5(input.as_bytes())
            }
            SignatureHash::HmacMd5 => hex_hmac_md5(secret.as_bytes(), canonical.as_bytes()),
            SignatureHash::HmacSha1 => hex_hmac_sha1(secret.as_bytes(), canonical.as_bytes()),
            SignatureHash::HmacSha256 => hex_hmac_sha256(secret.as_bytes(), canonical.as_bytes()),
            SignatureHash::HmacSha512 => hex_hmac_sha512(secret.as_bytes(), canonical.as_bytes()),
        }
    }
}

impl fmt::Display for SignatureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureHash::Md5 => write!(f, "md5"),
            SignatureHash::HmacMd5 => write!(f, "hmac-md5"),
            SignatureHash::HmacSha1 => write!(f, "hmac-sha1"),
            SignatureHash::HmacSha256 => write!(f, "hmac-sha256"),
            SignatureHash::HmacSha512 => write!(f, "hmac-sha512"),
        }
    }
}

impl FromStr for SignatureHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(SignatureHash::Md5),
            "hmac-md5" => Ok(SignatureHash::HmacMd5),
            "hmac-sha1" => Ok(SignatureHash::HmacSha1),
            "hmac-sha256" => Ok(SignatureHash::HmacSha256),
            "hmac-sha512" => Ok(SignatureHash::HmacSha512),
            _ => Err(Error::config_invalid(format!(
                "unknown signature hash: {s}"
            ))),
        }
    }
}

/// CanonicalSigner produces the deterministic request signature carried in
/// the `signature` parameter.
///
/// ## Canonical form
///
/// ```text
/// 1. inject `timestamp` (whole epoch seconds)
/// 2. drop `signature` and every value that trims to empty
/// 3. sort the remaining pairs by name, byte-wise
/// 4. lay pairs out per the configured Canonicalization
/// 5. digest per the configured SignatureHash, hex lowercase
/// ```
///
/// Values that trim to empty stay in the outgoing parameter set; they are
/// only absent from the canonical string. That asymmetry is a compatibility
/// contract with deployed verifiers and must not change.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalSigner {
    mode: Canonicalization,
    hash: SignatureHash,
}

impl CanonicalSigner {
    /// Create a signer with the default legacy layout and MD5 digest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canonicalization mode.
    pub fn with_canonicalization(mut self, mode: Canonicalization) -> Self {
        self.mode = mode;
        self
    }

    /// Set the digest strategy.
    pub fn with_hash(mut self, hash: SignatureHash) -> Self {
        self.hash = hash;
        self
    }

    /// The configured canonicalization mode.
    pub fn canonicalization(&self) -> Canonicalization {
        self.mode
    }

    /// The configured digest strategy.
    pub fn hash(&self) -> SignatureHash {
        self.hash
    }

    /// Sign the parameter set, taking the timestamp from the context clock.
    ///
    /// Inserts `timestamp` and `signature`; any caller-supplied values under those
    /// names are replaced.
    pub fn sign(&self, ctx: &Context, params: &mut ParamSet, secret: &str) {
        self.sign_at(params, secret, ctx.now_secs())
    }

    /// Sign the parameter set at the given epoch-second instant.
    ///
    /// Prefer [`sign`](CanonicalSigner::sign); this form exists so a known
    /// instant can be replayed deterministically.
    pub fn sign_at(&self, params: &mut ParamSet, secret: &str, timestamp: Timestamp) {
        params.insert(PARAM_TIMESTAMP, timestamp.to_string());
        let signature = self.signature_for(params, secret);
        params.insert(PARAM_SIGNATURE, signature);
    }

    /// Compute the signature the set would carry, without mutating it.
    ///
    /// The set must already contain the `timestamp` entry; an existing `signature`
    /// entry is ignored. This is the primitive verification recomputes.
    pub fn signature_for(&self, params: &ParamSet, secret: &str) -> String {
        self.hash.digest(secret, &self.canonical_string(params))
    }

    /// Build the canonical string for the set as it stands.
    ///
    /// Exposed for diagnosing signature mismatches between peers.
    pub fn canonical_string(&self, params: &ParamSet) -> String {
        // BTreeMap iteration gives the byte-wise name order both peers sort by.
        let mut sorted = BTreeMap::new();
        for (name, value) in params.iter() {
            if name == PARAM_SIGNATURE {
                continue;
            }
            if value.trim().is_empty() {
                continue;
            }
            sorted.insert(name, value);
        }

        let cap = sorted.iter().map(|(n, v)| n.len() + v.len() + 2).sum();
        let mut s = String::with_capacity(cap);
        match self.mode {
            Canonicalization::Legacy => {
                for (name, value) in sorted {
                    s.push_str(name);
                    s.push_str(value);
                }
            }
            Canonicalization::Delimited => {
                for (name, value) in sorted {
                    s.push('&');
                    s.push_str(&clean(name));
                    s.push('=');
                    s.extend(utf8_percent_encode(&clean(value), &SIGNATURE_VALUE_ENCODE_SET));
                }
            }
        }

        debug!("canonical string: {}", &s);
        s
    }
}

/// Strip the delimiter characters out of a name or value before it joins a
/// delimited canonical string.
fn clean(input: &str) -> String {
    input.replace(['&', '='], "_")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    const SECRET: &str = "s3cr3t";

    fn base_params() -> ParamSet {
        [
            ("to", "447777111222"),
            ("api_key", "abc"),
            ("text", "Hello"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_legacy_canonical_string() {
        let mut params = base_params();
        params.insert("timestamp", "1000000000");
        params.insert("signature", "stale-value-must-be-ignored");

        let signer = CanonicalSigner::new();
        assert_eq!(
            signer.canonical_string(&params),
            "api_keyabctextHellotimestamp1000000000to447777111222"
        );
    }

    #[test]
    fn test_delimited_canonical_string_cleans_and_encodes() {
        let mut params = ParamSet::new();
        params.insert("api_key", "abc");
        params.insert("text", "fish & chips = good");
        params.insert("timestamp", "1000000000");

        let signer = CanonicalSigner::new().with_canonicalization(Canonicalization::Delimited);
        assert_eq!(
            signer.canonical_string(&params),
            "&api_key=abc&text=fish%20_%20chips%20_%20good&timestamp=1000000000"
        );
    }

    #[test]
    fn test_legacy_leaves_values_raw() {
        let mut params = ParamSet::new();
        params.insert("api_key", "abc");
        params.insert("text", "fish & chips = good");
        params.insert("timestamp", "1000000000");

        let signer = CanonicalSigner::new();
        assert_eq!(
            signer.canonical_string(&params),
            "api_keyabctextfish & chips = goodtimestamp1000000000"
        );
        // calculated with coreutils md5sum over canonical string + secret
        assert_eq!(
            signer.signature_for(&params, SECRET),
            "17c45cb3cbd872357613852c1c563474"
        );
    }

    #[test]
    fn test_sign_at_legacy_md5() {
        let mut params = base_params();
        let signer = CanonicalSigner::new();
        signer.sign_at(&mut params, SECRET, 1_000_000_000);

        assert_eq!(params.get("timestamp"), Some("1000000000"));
        // calculated with coreutils md5sum over canonical string + secret
        assert_eq!(params.get("signature"), Some("c20345b48533530d6f88c51b1846f14f"));
    }

    #[test]
    fn test_sign_at_delimited_md5() {
        let mut params = base_params();
        let signer = CanonicalSigner::new().with_canonicalization(Canonicalization::Delimited);
        signer.sign_at(&mut params, SECRET, 1_000_000_000);

        // calculated with coreutils md5sum over canonical string + secret
        assert_eq!(params.get("signature"), Some("a6e30c89ea898d6f119aea276598e4a6"));
    }

    // expected values calculated with openssl dgst -hmac over the canonical
    // string, md5sum for the plain flavor
    #[test_case(SignatureHash::Md5, "c20345b48533530d6f88c51b1846f14f")]
    #[test_case(SignatureHash::HmacMd5, "b7d8802c3dc128ababb545c37c9990fa")]
    #[test_case(SignatureHash::HmacSha1, "507c28a2d1e1c436576849592fc554598b953207")]
    #[test_case(
        SignatureHash::HmacSha256,
        "afdde94696aeae29d739d2790a6d0f6c439f319d34ad1eccb474d330ed631f57"
    )]
    #[test_case(
        SignatureHash::HmacSha512,
        "57774d26d38df6de6b8cf8176557551336a2d4b35edb2c94e3815d99ed445ca54e394e4387491344eeaf2f928d47594e2b06afd046e88c5a61d79b9f649ba596"
    )]
    fn test_sign_at_hash_modes(hash: SignatureHash, expected: &str) {
        let mut params = base_params();
        let signer = CanonicalSigner::new().with_hash(hash);
        signer.sign_at(&mut params, SECRET, 1_000_000_000);

        assert_eq!(params.get("signature"), Some(expected));
    }

    #[test]
    fn test_sign_is_order_independent() {
        let signer = CanonicalSigner::new();

        let mut a = base_params();
        let mut b: ParamSet = [
            ("text", "Hello"),
            ("api_key", "abc"),
            ("to", "447777111222"),
        ]
        .into_iter()
        .collect();

        signer.sign_at(&mut a, SECRET, 1_000_000_000);
        signer.sign_at(&mut b, SECRET, 1_000_000_000);

        assert_eq!(a.get("signature"), b.get("signature"));
    }

    #[test]
    fn test_sign_replaces_stale_signature() {
        let signer = CanonicalSigner::new();

        let mut stale = base_params();
        stale.insert("signature", "deadbeef");
        signer.sign_at(&mut stale, SECRET, 1_000_000_000);

        let mut fresh = base_params();
        signer.sign_at(&mut fresh, SECRET, 1_000_000_000);

        // The stale entry neither survives nor contaminates the canonical string.
        assert_eq!(stale.get("signature"), fresh.get("signature"));
        assert_eq!(stale.get("signature"), Some("c20345b48533530d6f88c51b1846f14f"));
    }

    #[test]
    fn test_blank_value_excluded_from_canonical_but_kept_on_wire() {
        let mut params: ParamSet = [
            ("to", "447777111222"),
            ("api_key", "abc"),
            ("text", "  "),
        ]
        .into_iter()
        .collect();

        let signer = CanonicalSigner::new();
        signer.sign_at(&mut params, SECRET, 1_000_000_000);

        // calculated with coreutils md5sum over canonical string + secret
        assert_eq!(params.get("signature"), Some("7f833a8fda784074034818a8fa9f7348"));
        assert_eq!(params.get("text"), Some("  "));
    }

    #[test]
    fn test_sign_uses_context_clock() {
        use callsign_core::FixedClock;

        let ctx = Context::new().with_clock(FixedClock::at_secs(1_000_000_000));
        let mut params = base_params();

        let signer = CanonicalSigner::new();
        signer.sign(&ctx, &mut params, SECRET);

        assert_eq!(params.get("timestamp"), Some("1000000000"));
        assert_eq!(params.get("signature"), Some("c20345b48533530d6f88c51b1846f14f"));
    }

    #[test]
    fn test_signature_hash_from_str() {
        assert_eq!("md5".parse::<SignatureHash>().unwrap(), SignatureHash::Md5);
        assert_eq!(
            "hmac-sha256".parse::<SignatureHash>().unwrap(),
            SignatureHash::HmacSha256
        );
        assert_eq!(
            "hmac-sha512".parse::<SignatureHash>().unwrap(),
            SignatureHash::HmacSha512
        );
        assert!("sha256".parse::<SignatureHash>().is_err());
    }

    #[test]
    fn test_display_round_trips_from_str() {
        for hash in [
            SignatureHash::Md5,
            SignatureHash::HmacMd5,
            SignatureHash::HmacSha1,
            SignatureHash::HmacSha256,
            SignatureHash::HmacSha512,
        ] {
            assert_eq!(hash.to_string().parse::<SignatureHash>().unwrap(), hash);
        }
    }
}
