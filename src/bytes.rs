//! Conversion of input text to the bytes carried by a byte-mode segment.

/// Returns the UTF-8 bytes of `text`.
pub fn from_str(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Converts UTF-16 code units to UTF-8 bytes.
///
/// Well-formed input produces the same bytes as [`String::from_utf16`]. Malformed
/// surrogates are not rejected: any unit in `0xD800..=0xDFFF` is combined with the unit
/// after it (or 0 when the input ends) into a 4-byte sequence, exactly like a valid pair.
pub fn from_utf16(units: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len() * 3);
    let mut iter = units.iter().copied();
    while let Some(unit) = iter.next() {
        let code = u32::from(unit);
        if code < 0x80 {
            out.push(code as u8);
        } else if code < 0x800 {
            out.push(0xc0 | (code >> 6) as u8);
            out.push(0x80 | (code & 0x3f) as u8);
        } else if !(0xd800..0xe000).contains(&code) {
            out.push(0xe0 | (code >> 12) as u8);
            out.push(0x80 | ((code >> 6) & 0x3f) as u8);
            out.push(0x80 | (code & 0x3f) as u8);
        } else {
            let low = u32::from(iter.next().unwrap_or(0));
            let code = 0x10000 + (((code & 0x3ff) << 10) | (low & 0x3ff));
            out.push(0xf0 | (code >> 18) as u8);
            out.push(0x80 | ((code >> 12) & 0x3f) as u8);
            out.push(0x80 | ((code >> 6) & 0x3f) as u8);
            out.push(0x80 | (code & 0x3f) as u8);
        }
    }
    out
}
