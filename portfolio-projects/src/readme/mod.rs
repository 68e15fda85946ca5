//! README decoding and header extraction.

mod header;
mod rules;

pub use header::{parse_header, ReadmeHeader};
pub use rules::{HeaderField, HeaderRule, HEADER_RULES};

use crate::github::EncodedReadme;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// The only content encoding GitHub uses for README text.
const BASE64_ENCODING: &str = "base64";

/// Errors that can occur while decoding README content.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid base64.
    #[error("README is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not UTF-8 text.
    #[error("README is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The payload declares an encoding other than base64.
    #[error("README has unsupported encoding '{0}'")]
    UnsupportedEncoding(String),
}

/// Decodes a README payload, or returns `None` when it carries no content.
///
/// A payload without an `encoding` field is treated as base64.
pub fn decode_payload(payload: &EncodedReadme) -> Option<Result<String, DecodeError>> {
    let content = payload.content.as_deref()?;
    match payload.encoding.as_deref() {
        None | Some(BASE64_ENCODING) => Some(decode_readme(content)),
        Some(other) => Some(Err(DecodeError::UnsupportedEncoding(other.to_string()))),
    }
}

/// Decodes the base64 `content` field of a README payload.
///
/// GitHub wraps the payload at 60 columns, so whitespace is dropped first.
///
/// # Errors
///
/// Returns [`DecodeError`] for malformed base64 or non-UTF-8 text.
pub fn decode_readme(encoded: &str) -> Result<String, DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_decode_wrapped_payload() {
        let encoded = STANDARD.encode("# My Site\n> **short_description:** A demo;\n");
        let (head, tail) = encoded.split_at(10);
        let wrapped = format!("{head}\n{tail}\n");

        let text = decode_readme(&wrapped).unwrap();
        assert_eq!(text, "# My Site\n> **short_description:** A demo;\n");
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = decode_readme("not base64 at all!");
        assert!(matches!(result, Err(DecodeError::Base64(_))));
    }

    #[test]
    fn can_decode_base64_payload() {
        let payload = EncodedReadme {
            content: Some(STANDARD.encode("# Title\n")),
            encoding: Some("base64".to_string()),
        };

        assert_eq!(decode_payload(&payload).unwrap().unwrap(), "# Title\n");
    }

    #[test]
    fn rejects_unsupported_encoding() {
        // GitHub answers `"encoding": "none"` for files too large to inline
        let payload = EncodedReadme {
            content: Some(String::new()),
            encoding: Some("none".to_string()),
        };

        let result = decode_payload(&payload).unwrap();
        assert!(matches!(result, Err(DecodeError::UnsupportedEncoding(e)) if e == "none"));
    }

    #[test]
    fn payload_without_content_is_none() {
        assert!(decode_payload(&EncodedReadme::default()).is_none());
    }

    #[test]
    fn rejects_invalid_utf8() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd]);

        let result = decode_readme(&encoded);
        assert!(matches!(result, Err(DecodeError::Utf8(_))));
    }
}
