use std::borrow::Cow;
use tracing::debug;

/// Decode raw probe output as text.
///
/// ffprobe copies container tags verbatim, so files written by old muxers can
/// produce output that is not UTF-8. Such output is read as ISO-8859-1, where
/// every byte maps to the code point of the same value.
pub fn decode_probe_text(raw: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(raw) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            debug!(
                "Probe output is not UTF-8 (invalid byte at {}), reading as ISO-8859-1",
                e.valid_up_to()
            );
            Cow::Owned(raw.iter().map(|&b| char::from(b)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_borrowed() {
        let text = decode_probe_text("{\"title\": \"Caf\u{e9}\"}".as_bytes());
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "{\"title\": \"Caf\u{e9}\"}");
    }

    #[test]
    fn test_latin1_fallback() {
        // "Café" with a single 0xE9 byte
        let raw = [b'C', b'a', b'f', 0xE9];
        let text = decode_probe_text(&raw);
        assert!(matches!(text, Cow::Owned(_)));
        assert_eq!(text, "Caf\u{e9}");
    }
}
