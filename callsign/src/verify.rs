use std::time::Duration;

use callsign_core::Context;
use callsign_core::ParamSet;
use log::debug;
use subtle::ConstantTimeEq;

use crate::constants::PARAM_SIGNATURE;
use crate::constants::PARAM_TIMESTAMP;
use crate::sign::Canonicalization;
use crate::sign::CanonicalSigner;
use crate::sign::SignatureHash;

/// The replay window tolerated by default, in either direction.
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(300_000);

/// What a verification attempt concluded.
///
/// Outcomes are values, not errors: an invalid callback is an expected event
/// the dispatcher routes on, not a fault in this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Signature matches and the timestamp is inside the replay window.
    Valid,
    /// The digest does not match, or no signature entry was supplied.
    InvalidSignature,
    /// The timestamp is numeric but outside the replay window, in either
    /// direction.
    ExpiredOrFutureTimestamp,
    /// The timestamp entry is missing or not a decimal epoch-second value.
    MalformedTimestamp,
}

impl VerificationOutcome {
    /// Check whether the callback verified.
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }
}

/// SignatureVerifier validates inbound signed callbacks.
///
/// It is the server-side counterpart of [`CanonicalSigner`] and must be
/// configured with the same canonicalization mode and digest strategy as the
/// peer that signed, plus a replay window (default 300 000 ms, boundary
/// inclusive). Checks run in a fixed order: timestamp shape, replay window,
/// then digest, so a request that is both stale and unsigned reports the
/// timestamp problem.
#[derive(Debug, Clone, Copy)]
pub struct SignatureVerifier {
    signer: CanonicalSigner,
    max_delta: Duration,
}

impl Default for SignatureVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureVerifier {
    /// Create a verifier with the default legacy layout, MD5 digest, and
    /// replay window.
    pub fn new() -> Self {
        Self {
            signer: CanonicalSigner::new(),
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Set the canonicalization mode, which must match the signing peer.
    pub fn with_canonicalization(mut self, mode: Canonicalization) -> Self {
        self.signer = self.signer.with_canonicalization(mode);
        self
    }

    /// Set the digest strategy, which must match the signing peer.
    pub fn with_hash(mut self, hash: SignatureHash) -> Self {
        self.signer = self.signer.with_hash(hash);
        self
    }

    /// Set the replay window tolerated in either direction.
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// The configured replay window.
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    /// Verify an inbound parameter set against the context clock.
    pub fn verify(&self, ctx: &Context, params: &ParamSet, secret: &str) -> VerificationOutcome {
        self.verify_at(params, secret, ctx.now_millis())
    }

    /// Verify an inbound parameter set against an explicit millisecond
    /// instant.
    ///
    /// Prefer [`verify`](SignatureVerifier::verify); this form exists so a
    /// recorded exchange can be rechecked deterministically.
    pub fn verify_at(
        &self,
        params: &ParamSet,
        secret: &str,
        now_millis: i64,
    ) -> VerificationOutcome {
        let Some(raw_timestamp) = params.get(PARAM_TIMESTAMP) else {
            debug!("rejecting callback: no timestamp supplied");
            return VerificationOutcome::MalformedTimestamp;
        };
        let Ok(timestamp) = raw_timestamp.parse::<i64>() else {
            debug!("rejecting callback: timestamp is not a decimal epoch value");
            return VerificationOutcome::MalformedTimestamp;
        };

        let Some(timestamp_millis) = timestamp.checked_mul(1000) else {
            return VerificationOutcome::ExpiredOrFutureTimestamp;
        };
        let delta = now_millis.saturating_sub(timestamp_millis);
        if u128::from(delta.unsigned_abs()) > self.max_delta.as_millis() {
            debug!("rejecting callback: timestamp {delta}ms from local clock");
            return VerificationOutcome::ExpiredOrFutureTimestamp;
        }

        let Some(provided) = params.get(PARAM_SIGNATURE) else {
            debug!("rejecting callback: no signature supplied");
            return VerificationOutcome::InvalidSignature;
        };

        let expected = self.signer.signature_for(params, secret);
        if bool::from(expected.as_bytes().ct_eq(provided.as_bytes())) {
            VerificationOutcome::Valid
        } else {
            debug!("rejecting callback: signature mismatch");
            VerificationOutcome::InvalidSignature
        }
    }
}

#[cfg(test)]
mod tests {
    use callsign_core::FixedClock;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    const SECRET: &str = "s3cr3t";
    const TS: i64 = 1_700_000_000;

    fn signed_params() -> ParamSet {
        let mut params = ParamSet::new();
        params.insert("k", "v");
        CanonicalSigner::new().sign_at(&mut params, SECRET, TS);
        params
    }

    #[test]
    fn test_round_trip_verifies() {
        let params = signed_params();
        // calculated with coreutils md5sum over canonical string + secret
        assert_eq!(params.get("signature"), Some("e68865997933b6a388cdbbbc1852de21"));

        let outcome = SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000);
        assert_eq!(outcome, VerificationOutcome::Valid);
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_tampered_value_rejected() {
        let mut params = signed_params();
        params.insert("k", "w");

        let outcome = SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000);
        assert_eq!(outcome, VerificationOutcome::InvalidSignature);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let params = signed_params();

        let outcome = SignatureVerifier::new().verify_at(&params, "other", TS * 1000);
        assert_eq!(outcome, VerificationOutcome::InvalidSignature);
    }

    #[test]
    fn test_missing_signature_rejected() {
        let mut params = signed_params();
        params.remove("signature");

        let outcome = SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000);
        assert_eq!(outcome, VerificationOutcome::InvalidSignature);
    }

    #[test]
    fn test_signature_compare_is_case_sensitive() {
        let mut params = signed_params();
        let upper = params.get("signature").unwrap().to_uppercase();
        params.insert("signature", upper);

        let outcome = SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000);
        assert_eq!(outcome, VerificationOutcome::InvalidSignature);
    }

    #[test]
    fn test_missing_timestamp_malformed() {
        let mut params = signed_params();
        params.remove("timestamp");

        let outcome = SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000);
        assert_eq!(outcome, VerificationOutcome::MalformedTimestamp);
    }

    #[test_case("not-a-number")]
    #[test_case("16999.5")]
    #[test_case("")]
    fn test_non_numeric_timestamp_malformed(raw: &str) {
        let mut params = signed_params();
        params.insert("timestamp", raw);

        let outcome = SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000);
        assert_eq!(outcome, VerificationOutcome::MalformedTimestamp);
    }

    #[test]
    fn test_stale_and_unsigned_reports_timestamp_first() {
        let mut params = signed_params();
        params.remove("signature");

        let outcome =
            SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000 + 400_000);
        assert_eq!(outcome, VerificationOutcome::ExpiredOrFutureTimestamp);
    }

    // boundary is inclusive on both sides of the window
    #[test_case(0, VerificationOutcome::Valid)]
    #[test_case(300_000, VerificationOutcome::Valid)]
    #[test_case(-300_000, VerificationOutcome::Valid ; "minus_300_000_verificationoutcome_valid_expects")]
    #[test_case(300_001, VerificationOutcome::ExpiredOrFutureTimestamp)]
    #[test_case(-300_001, VerificationOutcome::ExpiredOrFutureTimestamp ; "minus_300_001_verificationoutcome_expiredorfuturetimestamp_expects")]
    #[test_case(301_000, VerificationOutcome::ExpiredOrFutureTimestamp)]
    #[test_case(-301_000, VerificationOutcome::ExpiredOrFutureTimestamp ; "minus_301_000_verificationoutcome_expiredorfuturetimestamp_expects")]
    fn test_replay_window(delta_millis: i64, expected: VerificationOutcome) {
        let params = signed_params();

        let outcome =
            SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000 + delta_millis);
        assert_eq!(outcome, expected);
    }

    #[test]
    fn test_custom_max_delta() {
        let params = signed_params();
        let verifier = SignatureVerifier::new().with_max_delta(Duration::from_secs(10));

        assert_eq!(
            verifier.verify_at(&params, SECRET, TS * 1000 + 10_000),
            VerificationOutcome::Valid
        );
        assert_eq!(
            verifier.verify_at(&params, SECRET, TS * 1000 + 10_001),
            VerificationOutcome::ExpiredOrFutureTimestamp
        );
    }

    #[test]
    fn test_overflowing_timestamp_is_future() {
        let mut params = signed_params();
        params.insert("timestamp", i64::MAX.to_string());

        let outcome = SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000);
        assert_eq!(outcome, VerificationOutcome::ExpiredOrFutureTimestamp);
    }

    #[test]
    fn test_hmac_sha256_round_trip() {
        let mut params = ParamSet::new();
        params.insert("k", "v");

        let signer = CanonicalSigner::new().with_hash(SignatureHash::HmacSha256);
        signer.sign_at(&mut params, SECRET, TS);
        // calculated with openssl dgst -sha256 -hmac over the canonical string
        assert_eq!(
            params.get("signature"),
            Some("8daf3ec5762c9aea8eb2a187a2f10d7cf862420457ae84947a8c8dca600dd584")
        );

        let verifier = SignatureVerifier::new().with_hash(SignatureHash::HmacSha256);
        assert_eq!(
            verifier.verify_at(&params, SECRET, TS * 1000),
            VerificationOutcome::Valid
        );
    }

    #[test]
    fn test_delimited_round_trip() {
        let mut params = ParamSet::new();
        params.insert("text", "fish & chips");
        params.insert("to", "447700900000");

        let signer = CanonicalSigner::new().with_canonicalization(Canonicalization::Delimited);
        signer.sign_at(&mut params, SECRET, TS);

        let verifier =
            SignatureVerifier::new().with_canonicalization(Canonicalization::Delimited);
        assert_eq!(
            verifier.verify_at(&params, SECRET, TS * 1000),
            VerificationOutcome::Valid
        );

        // A legacy-mode verifier must not accept a delimited-mode signature.
        assert_eq!(
            SignatureVerifier::new().verify_at(&params, SECRET, TS * 1000),
            VerificationOutcome::InvalidSignature
        );
    }

    #[test]
    fn test_verify_uses_context_clock() {
        let params = signed_params();

        let inside = Context::new().with_clock(FixedClock::at_millis(TS * 1000 + 250_000));
        assert_eq!(
            SignatureVerifier::new().verify(&inside, &params, SECRET),
            VerificationOutcome::Valid
        );

        let outside = Context::new().with_clock(FixedClock::at_millis(TS * 1000 + 350_000));
        assert_eq!(
            SignatureVerifier::new().verify(&outside, &params, SECRET),
            VerificationOutcome::ExpiredOrFutureTimestamp
        );
    }
}
