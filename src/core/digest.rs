//! Content digests for persisted reports.
//!
//! BLAKE3 is always computed. SHA-256 can be enabled for consumers that
//! verify reports with standard tooling.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Digest of a report's serialized bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportDigest {
    /// BLAKE3 hash, hex encoded.
    pub blake3: String,

    /// SHA-256 hash, hex encoded, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl fmt::Display for ReportDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blake3:{}", self.blake3)
    }
}

/// Computes [`ReportDigest`]s.
///
/// # Examples
///
/// ```rust
/// use cloudscan::core::ReportHasher;
///
/// let digest = ReportHasher::new().with_sha256(true).hash_bytes(b"[]");
/// assert!(digest.sha256.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportHasher {
    compute_sha256: bool,
}

impl ReportHasher {
    /// Creates a hasher computing BLAKE3 only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables SHA-256 computation.
    pub fn with_sha256(mut self, enabled: bool) -> Self {
        self.compute_sha256 = enabled;
        self
    }

    /// Hashes an in-memory buffer.
    pub fn hash_bytes(&self, data: &[u8]) -> ReportDigest {
        let blake3 = blake3::hash(data).to_hex().to_string();
        let sha256 = self
            .compute_sha256
            .then(|| format!("{:x}", Sha256::digest(data)));

        ReportDigest { blake3, sha256 }
    }

    /// Hashes a file on disk in a single streaming pass.
    pub fn hash_file(&self, path: &Path) -> std::io::Result<ReportDigest> {
        let mut reader = std::io::BufReader::new(std::fs::File::open(path)?);

        let mut blake3_hasher = blake3::Hasher::new();
        let mut sha256_hasher = self.compute_sha256.then(Sha256::new);

        let mut buffer = [0u8; 64 * 1024];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }

            let chunk = &buffer[..bytes_read];
            blake3_hasher.update(chunk);
            if let Some(ref mut h) = sha256_hasher {
                h.update(chunk);
            }
        }

        Ok(ReportDigest {
            blake3: blake3_hasher.finalize().to_hex().to_string(),
            sha256: sha256_hasher.map(|h| format!("{:x}", h.finalize())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_hash_bytes_blake3_only() {
        let digest = ReportHasher::new().hash_bytes(b"[]");
        assert_eq!(digest.blake3.len(), 64);
        assert_eq!(digest.sha256, None);
    }

    #[test]
    fn test_hash_bytes_with_sha256() {
        let digest = ReportHasher::new().with_sha256(true).hash_bytes(b"hello world");
        assert_eq!(
            digest.sha256.as_deref(),
            Some("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
        );
    }

    #[test]
    fn test_hash_file_matches_hash_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"report body").unwrap();
        file.flush().unwrap();

        let hasher = ReportHasher::new().with_sha256(true);
        assert_eq!(
            hasher.hash_file(file.path()).unwrap(),
            hasher.hash_bytes(b"report body")
        );
    }

    #[test]
    fn test_display() {
        let digest = ReportHasher::new().hash_bytes(b"x");
        assert!(digest.to_string().starts_with("blake3:"));
    }
}
