use callsign::{Config, Endpoint, RequestAuthenticator};
use callsign_core::{Context, ParamSet, Result};

fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new();

    // Credential material comes from the environment: set CALLSIGN_API_KEY
    // together with CALLSIGN_SIGNATURE_SECRET or CALLSIGN_API_SECRET.
    let store = Config::new().from_env(&ctx).build_store()?;
    let authenticator = RequestAuthenticator::new(ctx, store);

    // Build the request
    let endpoint = Endpoint::sms();
    let mut parts = http::Request::builder()
        .method(http::Method::POST)
        .uri(format!("https://rest.example.com{}", endpoint.path()))
        .body(())?
        .into_parts()
        .0;

    let mut params = ParamSet::new();
    params.insert("from", "CALLSIGN");
    params.insert("to", "447700900000");
    params.insert("text", "Hello from callsign");

    // Attach credentials the endpoint accepts
    authenticator.authenticate(endpoint.acceptable(), &mut parts, &mut params)?;

    println!("POST {}", parts.uri);
    for (name, value) in parts.headers.iter() {
        println!("{name}: {value:?}");
    }
    println!("body: {}", params.to_form_urlencoded());

    Ok(())
}
