//! Binary/text classification of a leading byte sample.
//!
//! A sample is binary if it contains a NUL byte, or if more than
//! [`NON_TEXT_PERCENT_LIMIT`] percent of its bytes fall outside the text
//! byte set: `\a`, `\b`, `\t`, `\n`, `\f`, `\r`, ESC and `0x20..=0xFF`.

pub use reposcan_core::BINARY_SAMPLE_SIZE;

/// Percentage of non-text bytes a sample may contain and still be text.
pub const NON_TEXT_PERCENT_LIMIT: usize = 30;

/// Control bytes that still count as text.
const TEXT_CONTROL_BYTES: [u8; 7] = [7, 8, 9, 10, 12, 13, 27];

/// Check if a byte belongs to the text byte set.
pub fn is_text_byte(byte: u8) -> bool {
    byte >= 0x20 || TEXT_CONTROL_BYTES.contains(&byte)
}

/// Classify a byte sample; `true` means binary.
///
/// Only the first [`BINARY_SAMPLE_SIZE`] bytes are considered. An empty
/// sample is text.
pub fn is_binary(sample: &[u8]) -> bool {
    let sample = &sample[..sample.len().min(BINARY_SAMPLE_SIZE)];

    if sample.contains(&0) {
        return true;
    }

    let non_text = sample.iter().filter(|&&b| !is_text_byte(b)).count();
    // Integer form of `non_text > 0.30 * len`.
    non_text * 100 > sample.len() * NON_TEXT_PERCENT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100 byte sample with `non_text` bytes of 0x01 and the rest 'a'.
    fn sample_with_non_text(non_text: usize) -> Vec<u8> {
        let mut sample = vec![0x01; non_text];
        sample.resize(100, b'a');
        sample
    }

    #[test]
    fn test_text_byte_set() {
        for b in [7u8, 8, 9, 10, 12, 13, 27, 0x20, 0x7f, 0x80, 0xff] {
            assert!(is_text_byte(b), "{b:#04x} should be text");
        }
        for b in [0u8, 1, 6, 11, 14, 26, 28, 31] {
            assert!(!is_text_byte(b), "{b:#04x} should not be text");
        }
    }

    #[test]
    fn test_empty_sample_is_text() {
        assert!(!is_binary(&[]));
    }

    #[test]
    fn test_plain_text() {
        assert!(!is_binary(b"fun main() {\n\tprintln(\"hi\")\r\n}\n"));
        assert!(!is_binary("Как дела?".as_bytes()));
    }

    #[test]
    fn test_nul_byte_is_binary() {
        assert!(is_binary(b"\0"));
        assert!(is_binary(b"mostly text but one \0 in the middle of it all"));
    }

    #[test]
    fn test_nul_byte_beyond_sample_is_ignored() {
        let mut data = vec![b'a'; BINARY_SAMPLE_SIZE];
        data.push(0);
        assert!(!is_binary(&data));
    }

    #[test]
    fn test_thirty_percent_boundary() {
        assert!(!is_binary(&sample_with_non_text(29)));
        assert!(!is_binary(&sample_with_non_text(30)));
        assert!(is_binary(&sample_with_non_text(31)));
    }

    #[test]
    fn test_all_control_bytes() {
        assert!(is_binary(&[0x01, 0x02, 0x03, 0x04]));
    }
}
