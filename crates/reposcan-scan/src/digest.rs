//! SHA-256 content hashing.
//!
//! Files are folded into the hasher in fixed [`DIGEST_CHUNK_SIZE`] reads, so
//! the result never depends on filesystem block size. A read error aborts
//! the whole computation; no partial digest is ever returned.

use std::io::{self, Read};

use sha2::{Digest, Sha256};

use reposcan_core::ContentHash;

/// Size of each read folded into the hasher.
pub const DIGEST_CHUNK_SIZE: usize = 8192;

/// Hash everything `reader` yields until end of stream.
pub fn compute_digest<R: Read>(reader: R) -> io::Result<ContentHash> {
    digest_with_sample(reader, 0).map(|(hash, _)| hash)
}

/// Hash everything `reader` yields and keep its first `sample_len` bytes.
///
/// The sample is what the classifier and preview see, so the whole file is
/// read exactly once.
pub fn digest_with_sample<R: Read>(
    mut reader: R,
    sample_len: usize,
) -> io::Result<(ContentHash, Vec<u8>)> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; DIGEST_CHUNK_SIZE];
    let mut sample = Vec::with_capacity(sample_len.min(DIGEST_CHUNK_SIZE));

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let chunk = &buffer[..n];
        hasher.update(chunk);

        if sample.len() < sample_len {
            let take = (sample_len - sample.len()).min(n);
            sample.extend_from_slice(&chunk[..take]);
        }
    }

    Ok((ContentHash::new(hasher.finalize().into()), sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    /// Yields `good` bytes, then fails.
    struct FailingReader {
        good: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.good == 0 {
                return Err(io::Error::other("device went away"));
            }
            let n = self.good.min(buf.len());
            buf[..n].fill(b'x');
            self.good -= n;
            Ok(n)
        }
    }

    /// Yields at most `step` bytes per read.
    struct TrickleReader {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_empty_input() {
        let hash = compute_digest(Cursor::new(Vec::new())).unwrap();
        assert_eq!(hash.to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn test_known_value() {
        let hash = compute_digest(Cursor::new(b"hello".to_vec())).unwrap();
        assert_eq!(hash.to_hex(), HELLO_SHA256);
    }

    #[test]
    fn test_independent_of_read_sizes() {
        let data: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        let whole = compute_digest(Cursor::new(data.clone())).unwrap();
        let trickled = compute_digest(TrickleReader {
            data,
            pos: 0,
            step: 777,
        })
        .unwrap();
        assert_eq!(whole, trickled);
    }

    #[test]
    fn test_sample_spans_short_reads() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 200) as u8).collect();
        let (_, sample) = digest_with_sample(
            TrickleReader {
                data: data.clone(),
                pos: 0,
                step: 3000,
            },
            8000,
        )
        .unwrap();
        assert_eq!(sample, data[..8000]);
    }

    #[test]
    fn test_sample_shorter_than_limit() {
        let (hash, sample) = digest_with_sample(Cursor::new(b"hello".to_vec()), 8000).unwrap();
        assert_eq!(sample, b"hello");
        assert_eq!(hash.to_hex(), HELLO_SHA256);
    }

    #[test]
    fn test_read_error_aborts() {
        let err = compute_digest(FailingReader { good: 20_000 }).unwrap_err();
        assert_eq!(err.to_string(), "device went away");
    }
}
