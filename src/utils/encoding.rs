use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

/// Decodes one raw input line, falling back to Windows-1252 when the bytes are
/// not valid UTF-8.
pub fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

/// Strips a trailing `\n` or `\r\n`.
pub fn trim_line_ending(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}
