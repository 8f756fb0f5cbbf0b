//! Utility functions and types.

use std::fmt::Debug;

/// Wraps a secret for debug output, keeping at most the first and last three
/// characters visible.
///
/// - Fewer than 12 characters redacts entirely, so short secrets never leak
///   their length class.
/// - 12 or more characters keeps the first three and last three, enough to
///   tell two keys apart in a log line without disclosing either.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or(""))
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.len() {
            0 => f.write_str("EMPTY"),
            1..=11 => f.write_str("***"),
            n => {
                f.write_str(&self.0[..3])?;
                f.write_str("***")?;
                f.write_str(&self.0[n - 3..])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("", "EMPTY"),
            ("s3cr3t", "***"),
            ("elevenchars", "***"),
            ("twelve-chars", "twe***ars"),
            ("a0b1c2d3e4f5g6h7", "a0b***6h7"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact(input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }

    #[test]
    fn test_redact_from_option() {
        let none: Option<String> = None;
        assert_eq!(format!("{:?}", Redact::from(&none)), "EMPTY");

        let some = Some("signature-secret-value".to_string());
        assert_eq!(format!("{:?}", Redact::from(&some)), "sig***lue");
    }
}
