//! Value File Publisher
//!
//! Stores the latest intensity as plain text in a single file that other
//! processes (a display, a web page, a shell script) poll. Every write goes
//! to a temporary file in the same directory which is then renamed over the
//! target, so a reader only ever sees a complete value.
//!
//! ## File Format
//!
//! ```text
//! 3.4
//! ```
//!
//! One decimal, no trailing newline. At startup the file holds `0`.
//!
//! On Unix the replacement keeps the permission bits of the file it
//! replaces, and a new file is created `0644`, so a display or web page
//! running as another user can still read it.
//!
//! ## Example
//!
//! ```rust
//! use shindo_connectors::file::FilePublisher;
//! use shindo_core::traits::Publisher;
//! use shindo_core::Intensity;
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("value.txt");
//!
//! let mut publisher = FilePublisher::new(&path);
//! publisher.reset()?;
//! publisher.publish(Intensity::from_tenths(34))?;
//!
//! assert_eq!(std::fs::read_to_string(&path)?, "3.4");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use shindo_core::constants::intensity::RESET_VALUE;
use shindo_core::traits::Publisher;
use shindo_core::Intensity;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors writing the value file
#[derive(Debug, Error)]
pub enum FilePublisherError {
    /// Creating or writing the temporary file failed
    #[error("Writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Renaming the temporary file over the target failed
    #[error("Replacing {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Permission bits for a value file that does not exist yet
#[cfg(unix)]
pub const DEFAULT_MODE: u32 = 0o644;

/// Publisher writing the intensity to a text file
#[derive(Debug, Clone)]
pub struct FilePublisher {
    path: PathBuf,
}

impl FilePublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file content with `text`
    pub fn write_text(&self, text: &str) -> Result<(), FilePublisherError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let write_err = |source| FilePublisherError::Write { path: self.path.clone(), source };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(text.as_bytes()).map_err(write_err)?;
        copy_permissions(&tmp, &self.path).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| FilePublisherError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!("Wrote {:?} to {}", text, self.path.display());
        Ok(())
    }
}

/// Give the temporary file the mode of the file it will replace
#[cfg(unix)]
fn copy_permissions(tmp: &NamedTempFile, target: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = match fs::metadata(target) {
        Ok(meta) => meta.permissions().mode() & 0o7777,
        Err(e) if e.kind() == io::ErrorKind::NotFound => DEFAULT_MODE,
        Err(e) => return Err(e),
    };
    tmp.as_file().set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn copy_permissions(tmp: &NamedTempFile, target: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

impl Publisher for FilePublisher {
    type Error = FilePublisherError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.write_text(RESET_VALUE)
    }

    fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
        self.write_text(intensity.render().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reset_writes_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.txt");
        fs::write(&path, "6.1").unwrap();

        let mut publisher = FilePublisher::new(&path);
        publisher.reset().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn publish_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.txt");

        let mut publisher = FilePublisher::new(&path);
        publisher.publish(Intensity::from_scale(2.94)).unwrap();
        publisher.publish(Intensity::from_scale(3.0)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "3.0");
        // no temporary files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_readable_by_others() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.txt");

        let mut publisher = FilePublisher::new(&path);
        publisher.reset().unwrap();
        assert_eq!(mode(&path), DEFAULT_MODE);

        publisher.publish(Intensity::from_tenths(42)).unwrap();
        assert_eq!(mode(&path), DEFAULT_MODE);
    }

    #[cfg(unix)]
    #[test]
    fn existing_mode_survives_reset_and_publish() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.txt");
        fs::write(&path, "4.2").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o664)).unwrap();

        let mut publisher = FilePublisher::new(&path);
        publisher.reset().unwrap();
        assert_eq!(mode(&path), 0o664);

        publisher.publish(Intensity::from_tenths(51)).unwrap();
        assert_eq!(mode(&path), 0o664);
        assert_eq!(fs::read_to_string(&path).unwrap(), "5.1");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("value.txt");

        let mut publisher = FilePublisher::new(&path);
        let err = publisher.reset().unwrap_err();
        assert!(matches!(err, FilePublisherError::Write { .. }));
    }
}
