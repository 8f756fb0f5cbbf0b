use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Parameter names on the wire.
pub const PARAM_API_KEY: &str = "api_key";
pub const PARAM_API_SECRET: &str = "api_secret";
pub const PARAM_TIMESTAMP: &str = "timestamp";
pub const PARAM_SIGNATURE: &str = "signature";

// Env values used for configuration.
pub const CALLSIGN_API_KEY: &str = "CALLSIGN_API_KEY";
pub const CALLSIGN_API_SECRET: &str = "CALLSIGN_API_SECRET";
pub const CALLSIGN_SIGNATURE_SECRET: &str = "CALLSIGN_SIGNATURE_SECRET";
pub const CALLSIGN_SIGNATURE_HASH: &str = "CALLSIGN_SIGNATURE_HASH";
pub const CALLSIGN_API_TOKEN: &str = "CALLSIGN_API_TOKEN";
pub const CALLSIGN_APPLICATION_ID: &str = "CALLSIGN_APPLICATION_ID";
pub const CALLSIGN_PRIVATE_KEY: &str = "CALLSIGN_PRIVATE_KEY";
pub const CALLSIGN_PRIVATE_KEY_PATH: &str = "CALLSIGN_PRIVATE_KEY_PATH";

/// AsciiSet for delimited-mode signature values.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static SIGNATURE_VALUE_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
