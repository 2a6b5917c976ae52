use std::{
    fmt::Debug,
    fs::{self, File},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use atomic_write_file::AtomicWriteFile;
use postcard::{from_bytes, to_allocvec};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored data could not be encoded or decoded: {0}")]
    Encoding(#[from] postcard::Error),
}

pub trait RawStorage {
    fn get_base_path(&self) -> &PathBuf;

    /// Resolves `original_path` under the base path. Creates nothing.
    fn get_path<P: AsRef<Path>>(&self, original_path: P) -> PathBuf {
        let path = self.get_base_path().join(original_path);
        path.canonicalize().unwrap_or(path)
    }

    fn raw_store<P: AsRef<Path>>(
        &self,
        file_path: P,
        data: &impl Serialize,
    ) -> Result<(), StorageError> {
        let path = self.get_path(file_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Storing data to file {:?}", path.as_path());
        let bytes = to_allocvec(data)?;
        let mut file = AtomicWriteFile::options().open(path)?;
        file.write_all(&bytes)?;
        file.commit()?;
        Ok(())
    }

    fn raw_load<P: AsRef<Path>, T: DeserializeOwned>(
        &self,
        file_path: P,
    ) -> Result<T, StorageError> {
        let path = self.get_path(file_path);
        debug!("Loading data from file {:?}", path.as_path());
        let mut bytes: Vec<u8> = vec![];
        File::options()
            .read(true)
            .open(path)?
            .read_to_end(&mut bytes)?;
        let data = from_bytes(&bytes)?;
        Ok(data)
    }

    fn raw_remove<P: AsRef<Path>>(&self, file_path: P) -> Result<(), StorageError> {
        let path = self.get_path(file_path);
        Ok(fs::remove_file(path)?)
    }
}

/// Logging wrappers around [`RawStorage`].
///
/// A missing file is an ordinary state for these callers: `load` returns
/// `None` and `remove` reports success without a warning.
pub trait GeneralStorage: RawStorage {
    fn store<P: AsRef<Path> + Debug>(&self, file_path: &P, data: &impl Serialize) -> bool {
        if let Err(err) = self.raw_store(file_path, data) {
            warn!("Unexpected error while trying to store data to file {file_path:?}: {err}");
            false
        } else {
            true
        }
    }

    fn load<P: AsRef<Path> + Debug, T: DeserializeOwned>(&self, file_path: &P) -> Option<T> {
        match self.raw_load(file_path) {
            Ok(data) => Some(data),
            Err(StorageError::Io(err)) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!("Unexpected error while trying to load data from file {file_path:?}: {err}");
                None
            }
        }
    }

    fn remove<P: AsRef<Path> + Debug>(&self, file_path: &P) -> bool {
        match self.raw_remove(file_path) {
            Ok(()) => true,
            Err(StorageError::Io(err)) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => {
                warn!("Unexpected error while trying to remove file {file_path:?}: {err}");
                false
            }
        }
    }
}
