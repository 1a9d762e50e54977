//! Typed binary persistence under a data directory.
//!
//! Values are stored with `bincode`, one file per value. Any type that
//! implements serde's `Serialize` / `Deserialize` can be stored; there is no
//! runtime "is serializable" check.
//!
//! # Example
//!
//! ```
//! use lunekit::DataStore;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
//! struct Progress {
//!     level: u32,
//!     coins: u64,
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = DataStore::new(dir.path());
//!
//! store.save("progress.bin", &Progress { level: 3, coins: 120 }).unwrap();
//! let loaded: Option<Progress> = store.load("progress.bin").unwrap();
//! assert_eq!(loaded, Some(Progress { level: 3, coins: 120 }));
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Environment variable overriding the data directory used by [`DataStore::for_app`].
pub const ENV_DATA_DIR: &str = "LUNEKIT_DATA_DIR";

/// A directory of binary-encoded values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store in the per-user data directory for `app_name`.
    ///
    /// # Resolution Order
    ///
    /// 1. `LUNEKIT_DATA_DIR` environment variable (if set and non-empty)
    /// 2. Platform data directory with `app_name` appended:
    ///    - Linux: `~/.local/share/<app_name>/`
    ///    - macOS: `~/Library/Application Support/<app_name>/`
    ///    - Windows: `C:\Users\<User>\AppData\Roaming\<app_name>\`
    pub fn for_app(app_name: &str) -> Result<Self, PersistError> {
        Self::for_app_with_override(app_name, None)
    }

    /// Like [`for_app`](Self::for_app), but `override_path` wins over everything.
    pub fn for_app_with_override(
        app_name: &str,
        override_path: Option<PathBuf>,
    ) -> Result<Self, PersistError> {
        if let Some(path) = override_path {
            return Ok(Self::new(path));
        }

        if let Ok(env_path) = std::env::var(ENV_DATA_DIR)
            && !env_path.is_empty()
        {
            return Ok(Self::new(env_path));
        }

        dirs::data_dir()
            .map(|mut path| {
                path.push(app_name);
                Self::new(path)
            })
            .ok_or(PersistError::NoDataDir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for `filename`, always inside the root.
    ///
    /// A path already under the root is kept. Any other absolute path is
    /// re-rooted (`/a/b` becomes `<root>/a/b`). Names containing `..`, or
    /// naming no file at all, are rejected with `InvalidInput`.
    pub fn path(&self, filename: impl AsRef<Path>) -> Result<PathBuf, PersistError> {
        let filename = filename.as_ref();
        let relative = filename.strip_prefix(&self.root).unwrap_or(filename);
        let mut path = self.root.clone();
        let mut named = false;
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    path.push(part);
                    named = true;
                }
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir => return Err(invalid_name(filename)),
            }
        }
        if !named {
            return Err(invalid_name(filename));
        }
        Ok(path)
    }

    /// Whether a file exists for `filename`. False for names [`path`](Self::path) rejects.
    pub fn exists(&self, filename: impl AsRef<Path>) -> bool {
        self.path(filename).is_ok_and(|path| path.is_file())
    }

    /// Encode `value` and write it to `filename`, replacing any previous contents.
    ///
    /// The value is written to a sibling temp file and renamed into place, so
    /// a failed save leaves the previous contents intact.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        filename: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), PersistError> {
        let path = self.path(filename)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = temp_sibling(&path);
        if let Err(e) = write_encoded(&tmp, value) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                log::warn!("could not remove {}: {cleanup}", tmp.display());
            }
            return Err(e);
        }
        fs::rename(&tmp, &path)?;
        log::debug!("saved {}", path.display());
        Ok(())
    }

    /// Read and decode `filename`. `Ok(None)` if the file does not exist.
    pub fn load<T: DeserializeOwned>(
        &self,
        filename: impl AsRef<Path>,
    ) -> Result<Option<T>, PersistError> {
        let path = self.path(filename)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no saved data at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let value = bincode::deserialize_from(BufReader::new(file))?;
        log::debug!("loaded {}", path.display());
        Ok(Some(value))
    }

    /// [`load`](Self::load), falling back to `T::default()` when nothing is saved.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        filename: impl AsRef<Path>,
    ) -> Result<T, PersistError> {
        Ok(self.load(filename)?.unwrap_or_default())
    }

    /// Delete `filename`. Returns whether a file was removed.
    pub fn remove(&self, filename: impl AsRef<Path>) -> Result<bool, PersistError> {
        let path = self.path(filename)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("removed {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn invalid_name(filename: &Path) -> PersistError {
    let msg = format!("{} does not name a file inside the data directory", filename.display());
    io::Error::new(io::ErrorKind::InvalidInput, msg).into()
}

/// `dir/.name.tmp` next to `path`.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_encoded<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistError> {
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Persistence error.
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem failure.
    Io(io::Error),
    /// Value could not be encoded, or stored bytes could not be decoded.
    Encode(bincode::Error),
    /// No data directory could be determined for this platform.
    NoDataDir,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Encode(e) => write!(f, "encoding error: {e}"),
            Self::NoDataDir => f.write_str("could not determine a data directory"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e.as_ref()),
            Self::NoDataDir => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<bincode::Error> for PersistError {
    fn from(e: bincode::Error) -> Self {
        Self::Encode(e)
    }
}
