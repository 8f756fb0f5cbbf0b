use callsign::{CanonicalSigner, SignatureVerifier};
use callsign_core::{Context, ParamSet, Result};

fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new();
    let secret = "demo-secret";

    // Simulate the platform signing an inbound-message callback.
    let mut callback = ParamSet::new();
    callback.insert("msisdn", "447700900000");
    callback.insert("to", "CALLSIGN");
    callback.insert("text", "inbound message");
    CanonicalSigner::new().sign(&ctx, &mut callback, secret);
    println!("callback query: {}", callback.to_form_urlencoded());

    // The receiving side re-parses the query string and checks it.
    let received = ParamSet::from_query(&callback.to_form_urlencoded());
    let verifier = SignatureVerifier::new();
    println!("untouched: {:?}", verifier.verify(&ctx, &received, secret));

    let mut tampered = received;
    tampered.insert("text", "tampered message");
    println!("tampered:  {:?}", verifier.verify(&ctx, &tampered, secret));

    Ok(())
}
