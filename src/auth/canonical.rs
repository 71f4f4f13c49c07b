//! Canonical form of a signed request.
//!
//! itBit hashes the nonce followed by a compact JSON array of the request
//! fields:
//!
//! ```text
//! nonce || ["METHOD","URL","BODY","NONCE","TIMESTAMP"]
//! ```
//!
//! JSON string escaping keeps every field inside its own quotes, so no body
//! or URL content can move a field boundary. HTML characters are written
//! verbatim; U+2028 and U+2029 are escaped.

use std::borrow::Cow;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::ItbitError;

/// Every field that goes into a request signature.
///
/// A context is built fresh for each outgoing request and must never be
/// reused, since the nonce is what makes the signature unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    method: String,
    url: String,
    body: Vec<u8>,
    nonce: u64,
    timestamp: u64,
}

impl SigningContext {
    /// Create a context. The method is upper-cased.
    ///
    /// `url` must be the exact absolute URL that goes on the wire, query
    /// string included.
    pub fn new(
        method: &str,
        url: impl Into<String>,
        body: impl Into<Vec<u8>>,
        nonce: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            url: url.into(),
            body: body.into(),
            nonce,
            timestamp,
        }
    }

    /// HTTP method (upper-case).
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Absolute request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw request body, empty if none.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Request nonce.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Request timestamp in milliseconds since the UNIX epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Serialize a context into the bytes that get hashed.
///
/// Bodies that are not valid UTF-8 are encoded lossily (invalid sequences
/// become U+FFFD).
pub fn canonical_message(context: &SigningContext) -> Result<Vec<u8>, ItbitError> {
    let nonce = context.nonce.to_string();
    let timestamp = context.timestamp.to_string();
    let body: Cow<'_, str> = String::from_utf8_lossy(&context.body);

    let fields: [&str; 5] = [&context.method, &context.url, &body, &nonce, &timestamp];

    let mut message = Vec::with_capacity(nonce.len() + context.url.len() + body.len() + 64);
    message.extend_from_slice(nonce.as_bytes());

    let mut serializer = serde_json::Serializer::with_formatter(&mut message, CanonicalFormatter);
    fields.serialize(&mut serializer)?;

    Ok(message)
}

/// Compact JSON that additionally escapes the JavaScript line terminators.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escape = match ch {
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_string(context: &SigningContext) -> String {
        String::from_utf8(canonical_message(context).unwrap()).unwrap()
    }

    #[test]
    fn test_canonical_get() {
        let context = SigningContext::new(
            "get",
            "https://api.example.com/v1/wallets?userId=abc",
            "",
            1,
            1_000_000_000_000,
        );
        assert_eq!(context.method(), "GET");
        assert_eq!(
            message_string(&context),
            r#"1["GET","https://api.example.com/v1/wallets?userId=abc","","1","1000000000000"]"#
        );
    }

    #[test]
    fn test_canonical_body_is_escaped() {
        let context = SigningContext::new(
            "POST",
            "https://api.example.com/v1/wallets/w1/orders",
            r#"{"side":"buy","amount":"1.5"}"#,
            7,
            1_700_000_000_000,
        );
        assert_eq!(
            message_string(&context),
            r#"7["POST","https://api.example.com/v1/wallets/w1/orders","{\"side\":\"buy\",\"amount\":\"1.5\"}","7","1700000000000"]"#
        );
    }

    #[test]
    fn test_html_characters_not_escaped() {
        let context = SigningContext::new("GET", "https://x/y?a=1&b=<2>", "", 3, 4);
        assert_eq!(message_string(&context), r#"3["GET","https://x/y?a=1&b=<2>","","3","4"]"#);
    }

    #[test]
    fn test_line_terminators_escaped() {
        let context = SigningContext::new("POST", "https://x", "a\u{2028}b\u{2029}\n", 1, 2);
        assert_eq!(
            message_string(&context),
            "1[\"POST\",\"https://x\",\"a\\u2028b\\u2029\\n\",\"1\",\"2\"]"
        );
    }

    #[test]
    fn test_invalid_utf8_body_is_lossy() {
        let context = SigningContext::new("POST", "https://x", vec![b'a', 0xff, b'b'], 1, 2);
        assert_eq!(
            message_string(&context),
            "1[\"POST\",\"https://x\",\"a\u{fffd}b\",\"1\",\"2\"]"
        );
    }

    #[test]
    fn test_deterministic() {
        let context = SigningContext::new("PUT", "https://x/z", "{}", 9, 10);
        assert_eq!(
            canonical_message(&context).unwrap(),
            canonical_message(&context).unwrap()
        );
    }

    #[test]
    fn test_field_boundaries_cannot_be_forged() {
        // Moving a quote-comma sequence from the URL into the body must not
        // reproduce the same bytes.
        let a = SigningContext::new("POST", r#"https://x","y"#, "z", 1, 2);
        let b = SigningContext::new("POST", "https://x", r#"y","z"#, 1, 2);
        assert_ne!(canonical_message(&a).unwrap(), canonical_message(&b).unwrap());
    }
}
