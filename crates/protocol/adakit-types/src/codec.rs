//! UTF-8 text to lowercase hex and back.
//!
//! Asset names travel through `cardano-cli` as hex; these helpers keep the
//! encoding strict so a typo is reported instead of minting a garbled name.

use crate::error::{ValueError, ValueResult};

/// Encode the UTF-8 bytes of `text` as lowercase hex.
pub fn text_to_hex(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decode lowercase hex into UTF-8 text.
///
/// Fails when the length is odd, when any character is outside `[0-9a-f]`,
/// or when the decoded bytes are not valid UTF-8.
pub fn hex_to_text(input: &str) -> ValueResult<String> {
    if input.len() % 2 != 0 {
        return Err(ValueError::invalid_encoding(format!(
            "odd number of hex digits ({})",
            input.len()
        )));
    }
    if let Some((position, ch)) = input
        .char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(ValueError::invalid_encoding(format!(
            "invalid hex character {:?} at position {}",
            ch, position
        )));
    }

    let bytes = hex::decode(input).map_err(|e| ValueError::invalid_encoding(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| ValueError::invalid_encoding(format!("decoded bytes are not UTF-8: {}", e)))
}

/// Check that `input` is non-empty hex of even length, either case.
pub fn is_hex(input: &str) -> bool {
    !input.is_empty() && input.len() % 2 == 0 && input.bytes().all(|b| b.is_ascii_hexdigit())
}
