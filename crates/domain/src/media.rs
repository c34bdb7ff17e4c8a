//! Binary payloads and `data:` URL decoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// An in-memory binary payload with an optional media type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

impl Blob {
    pub fn new(data: Vec<u8>, mime_type: Option<String>) -> Self {
        Self { data, mime_type }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode a `data:[<mediatype>][;base64],<payload>` URL.
    ///
    /// Returns `None` when the value is not a data URL or its payload
    /// cannot be decoded.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.trim().strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;

        let mut params = header.split(';');
        let mime_type = params
            .next()
            .filter(|mime| !mime.is_empty())
            .map(str::to_string);
        let is_base64 = params.any(|param| param.eq_ignore_ascii_case("base64"));

        let data = if is_base64 {
            let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
            match STANDARD.decode(compact) {
                Ok(data) => data,
                Err(err) => {
                    tracing::debug!(error = %err, "Invalid base64 payload in data URL");
                    return None;
                }
            }
        } else {
            if !has_valid_escapes(payload) {
                tracing::debug!("Invalid percent escape in data URL");
                return None;
            }
            urlencoding::decode_binary(payload.as_bytes()).into_owned()
        };

        Some(Self { data, mime_type })
    }
}

pub fn is_data_url(value: &str) -> bool {
    value.trim_start().starts_with("data:")
}

/// Every `%` must start a two-digit hex escape; `decode_binary` passes bad ones through.
fn has_valid_escapes(payload: &str) -> bool {
    payload.split('%').skip(1).all(|escape| {
        escape
            .as_bytes()
            .get(..2)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // MED-U01: base64 data URLs decode with their media type
    #[test]
    fn test_base64_data_url() {
        let blob = Blob::from_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(blob.data, b"hello");
        assert_eq!(blob.mime_type.as_deref(), Some("image/png"));
    }

    // MED-U02: Percent-encoded data URLs decode without a media type
    #[test]
    fn test_plain_data_url() {
        let blob = Blob::from_data_url("data:,a%20b").unwrap();
        assert_eq!(blob.data, b"a b");
        assert!(blob.mime_type.is_none());

        let svg = Blob::from_data_url("data:image/svg+xml,%3Csvg%3E").unwrap();
        assert_eq!(svg.data, b"<svg>");
        assert_eq!(svg.mime_type.as_deref(), Some("image/svg+xml"));

        let binary = Blob::from_data_url("data:application/octet-stream,%FF%00").unwrap();
        assert_eq!(binary.data, vec![0xFF, 0x00]);
    }

    // MED-U03: Malformed inputs are rejected
    #[test]
    fn test_invalid_data_urls() {
        assert!(Blob::from_data_url("https://example.com/a.png").is_none());
        assert!(Blob::from_data_url("data:image/png;base64").is_none());
        assert!(Blob::from_data_url("data:image/png;base64,!!!").is_none());
        assert!(Blob::from_data_url("data:,%zz").is_none());
        assert!(Blob::from_data_url("data:,%4").is_none());
        assert!(Blob::from_data_url("data:,%%41").is_none());
    }

    #[test]
    fn test_is_data_url() {
        assert!(is_data_url("data:image/png;base64,AA=="));
        assert!(!is_data_url("blob:https://example.com/123"));
    }
}
