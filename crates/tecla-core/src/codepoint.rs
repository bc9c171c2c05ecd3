//! Encoded payload decoding.
//!
//! Layout documents store key output as concatenated hexadecimal code points
//! (`"004100420043"` → `"ABC"`). Anything that is not pure hex is already
//! literal text and passes through untouched, including marker glyphs such
//! as `"∅"`.

/// Decode an encoded payload into text.
///
/// Consumes 4-digit groups greedily; a tail shorter than 4 digits is read in
/// 2-digit groups (the last group may be a single digit). Groups that do not
/// name a valid `char` (surrogates) are skipped.
pub fn decode(payload: &str) -> String {
    if payload.is_empty() {
        return String::new();
    }
    if !is_hex_payload(payload) {
        return payload.to_string();
    }

    // All bytes are ASCII hex digits here, so byte slicing is char-safe.
    let mut out = String::with_capacity(payload.len() / 4 + 1);
    let mut i = 0;
    while i < payload.len() {
        let width = if payload.len() - i >= 4 { 4 } else { 2 };
        let end = (i + width).min(payload.len());
        let group = &payload[i..end];
        i = end;
        match u32::from_str_radix(group, 16).ok().and_then(char::from_u32) {
            Some(c) => out.push(c),
            None => tracing::debug!(group, "skipping undecodable code point group"),
        }
    }
    out
}

/// Encode text as 4-digit hex groups (BMP only; wider chars are emitted as
/// UTF-16 units, which `decode` then skips).
pub fn encode(text: &str) -> String {
    text.encode_utf16().map(|u| format!("{u:04X}")).collect()
}

fn is_hex_payload(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}
