//! Local file download
//!
//! Saving hands a finished [`Download`] to a [`Downloader`] and forgets about
//! it. Failures are the downloader's to report.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// A file ready to be handed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name, including extension
    pub file_name: String,

    /// MIME type derived from the extension (e.g., "text/py")
    pub mime_type: String,

    /// Raw source text
    pub contents: String,
}

/// Facility that stores a [`Download`] on the user's machine
pub trait Downloader {
    fn download(&self, download: Download);
}

/// Writes downloads into a directory on the local file system
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    directory: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the given file name would be written to
    pub fn target_path(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}

impl Downloader for DirectoryDownloader {
    fn download(&self, download: Download) {
        let path = self.target_path(&download.file_name);

        let written =
            fs::create_dir_all(&self.directory).and_then(|()| fs::write(&path, &download.contents));

        match written {
            Ok(()) => info!(
                path = %path.display(),
                mime_type = %download.mime_type,
                bytes = download.contents.len(),
                "saved file"
            ),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to save file"),
        }
    }
}
