//! Disk Manager - low-level file I/O for pages.
//!
//! The [`DiskManager`] handles all direct file operations:
//! - Reading a backing file into a [`Page`]
//! - Persisting a [`Page`] to its backing file
//! - Deleting backing files

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::common::{Error, PageKey, Result};
use crate::storage::page::Page;

/// Manages disk I/O for a file-per-page store rooted at one directory.
///
/// # File Layout
/// Every page lives in its own file inside the data directory, named by
/// [`PageKey::file_name`]:
/// ```text
/// <dir>/<table>_Page<index>
/// <dir>/<matrix>_Page<rowBlock>_<colBlock>
/// ```
///
/// There is no shared index or allocation table; the directory listing is
/// the catalog.
///
/// # Thread Safety
/// `DiskManager` is **single-threaded**. The `BufferManager` is responsible
/// for serializing access to the disk manager.
///
/// # Durability
/// All writes are followed by `fsync()` before returning.
pub struct DiskManager {
    /// Root of the store; all page files live directly inside it.
    dir: PathBuf,
}

impl DiskManager {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Root directory of the store.
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the backing file for `key`.
    pub fn page_path(&self, key: &PageKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Whether the backing file for `key` exists.
    pub fn page_file_exists(&self, key: &PageKey) -> bool {
        self.page_path(key).exists()
    }

    /// Read and decode the backing file for `key`.
    ///
    /// # Errors
    /// - `Error::PageNotFound` if the backing file does not exist
    /// - `Error::CorruptPage` if the file cannot be decoded
    /// - `Error::Io` for any other read failure
    pub fn read_page(&self, key: &PageKey) -> Result<Page> {
        let bytes = match fs::read(self.page_path(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::PageNotFound(key.file_name()));
            }
            Err(e) => return Err(e.into()),
        };

        Page::from_bytes(key.clone(), &bytes)
    }

    /// Encode and persist `page`, replacing any previous file contents.
    ///
    /// # Durability
    /// This method calls `fsync()` after writing to ensure the data is
    /// persisted to disk.
    pub fn write_page(&self, page: &Page) -> Result<()> {
        let mut file = File::create(self.page_path(page.key()))?;
        file.write_all(&page.to_bytes())?;
        file.sync_all()?; // fsync for durability

        Ok(())
    }

    /// Delete the backing file for `key`.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be removed.
    pub fn remove_page(&self, key: &PageKey) -> Result<()> {
        self.remove_named_file(&key.file_name())
    }

    /// Delete the file called `name` inside the data directory.
    ///
    /// Takes a raw name so callers can remove files they only know by name,
    /// without reconstructing the logical identity.
    pub fn remove_named_file(&self, name: &str) -> Result<()> {
        fs::remove_file(self.dir.join(name))?;
        Ok(())
    }
}
