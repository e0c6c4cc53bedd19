//! Filesystem-based report sink implementation.

use crate::core::{Asset, ReportDigest, ReportError, ReportHasher};
use crate::report::status::ReportStatus;
use crate::report::traits::{encode_report, ReportSink};

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default report file name, relative to the working directory.
pub const DEFAULT_REPORT_FILE: &str = "compliance_report.json";

/// Writes the compliance report as a JSON file.
///
/// Reports are written atomically: the document goes to a temporary file in
/// the destination directory, is flushed to disk, and is then renamed over
/// the target. A failed write leaves any previous report in place and no
/// partial file behind.
#[derive(Debug, Clone)]
pub struct FilesystemReportSink {
    /// Destination file.
    path: PathBuf,
    /// Digest computed over the written bytes.
    hasher: ReportHasher,
}

impl FilesystemReportSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            hasher: ReportHasher::new(),
        }
    }

    /// Creates a sink writing `compliance_report.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_REPORT_FILE))
    }

    /// Also computes a SHA-256 digest of each report.
    pub fn with_sha256(mut self, enabled: bool) -> Self {
        self.hasher = self.hasher.with_sha256(enabled);
        self
    }

    /// Returns the destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn target_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn write_atomic(&self, content: &[u8]) -> Result<(), ReportError> {
        let fail = |e: std::io::Error| ReportError::persistence(&self.path, e);

        let dir = self.target_dir();
        std::fs::create_dir_all(&dir).map_err(fail)?;

        // The temp file is removed on drop if any step below fails.
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(fail)?;
        tmp.write_all(content).map_err(fail)?;
        tmp.as_file().sync_all().map_err(fail)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(fail)?;
        }

        tmp.persist(&self.path).map_err(|e| fail(e.error))?;
        Ok(())
    }

    /// Re-reads the persisted report and checks it against the encoded bytes.
    fn verify_written(&self, content: &[u8]) -> Result<ReportDigest, ReportError> {
        let expected = self.hasher.hash_bytes(content);
        let on_disk = self
            .hasher
            .hash_file(&self.path)
            .map_err(|e| ReportError::persistence(&self.path, e))?;

        if on_disk != expected {
            return Err(ReportError::persistence(
                &self.path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("persisted report digest {} does not match {}", on_disk, expected),
                ),
            ));
        }

        Ok(on_disk)
    }
}

impl Default for FilesystemReportSink {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_FILE)
    }
}

#[async_trait]
impl ReportSink for FilesystemReportSink {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn publish(&self, assets: &[&Asset]) -> Result<ReportStatus, ReportError> {
        if assets.is_empty() {
            tracing::debug!(path = %self.path.display(), "No failing assets, report not written");
            return Ok(ReportStatus::CleanRun);
        }

        let content = encode_report(assets)?;
        self.write_atomic(&content)?;
        let digest = self.verify_written(&content)?;

        tracing::info!(
            path = %self.path.display(),
            count = assets.len(),
            digest = %digest,
            "Compliance report written"
        );

        Ok(ReportStatus::written(
            self.path.display().to_string(),
            assets.len(),
            digest,
        ))
    }
}
