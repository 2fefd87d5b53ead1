//! Lowercase hex rendering (no external hex crate dependency).

pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// The first four bytes as hex, for redacted `Debug` output.
pub(crate) fn hex_prefix(bytes: &[u8]) -> String {
    to_hex(&bytes[..bytes.len().min(4)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x00, 0x7f, 0x80, 0xff]), "007f80ff");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn test_hex_prefix_short_input() {
        assert_eq!(hex_prefix(&[0xab]), "ab");
        assert_eq!(hex_prefix(&[1, 2, 3, 4, 5]), "01020304");
    }
}
