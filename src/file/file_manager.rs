use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ahash::AHashMap;
use tracing::{debug, trace, warn};

use super::block_id::BlockId;
use super::error::{FileError, FileResult};
use super::page::Page;
use super::BlockNum;

type SharedFile = Arc<Mutex<File>>;

/// Performs block-addressed I/O on the files of one storage directory.
///
/// Every file is opened at most once and its handle is kept until the manager
/// is dropped. Each handle has its own lock, so operations on the same file are
/// serialized while operations on different files run in parallel.
pub struct FileManager {
    directory: PathBuf,
    block_size: usize,
    /// Whether the directory was created by this manager
    is_new: bool,
    /// Map from file names to open files
    open_files: Mutex<AHashMap<String, SharedFile>>,
}

impl FileManager {
    /// Open the storage directory, creating it if it does not exist
    pub fn new<P: AsRef<Path>>(directory: P, block_size: usize) -> FileResult<Self> {
        if block_size == 0 {
            return Err(FileError::InvalidBlockSize(block_size));
        }

        let directory = directory.as_ref().to_path_buf();
        let config_error = |source: io::Error| FileError::Config {
            path: directory.clone(),
            source,
        };

        let is_new = !directory.exists();
        fs::create_dir_all(&directory).map_err(config_error)?;

        let metadata = fs::metadata(&directory).map_err(config_error)?;
        if !metadata.is_dir() {
            return Err(config_error(io::Error::new(
                ErrorKind::NotADirectory,
                "storage path is not a directory",
            )));
        }

        debug!(
            "Opened storage directory {:?} (block_size={}, new={})",
            directory, block_size, is_new
        );

        Ok(Self {
            directory,
            block_size,
            is_new,
            open_files: Mutex::new(AHashMap::new()),
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// True if the storage directory did not exist before this manager was created
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Number of files opened so far
    pub fn open_file_count(&self) -> usize {
        lock(&self.open_files).len()
    }

    /// Read a block into `page`, which must be exactly one block long.
    /// The page is left untouched if the block lies past the end of the file.
    pub fn read(&self, block: &BlockId, page: &mut Page) -> FileResult<()> {
        self.check_page_size(page)?;
        let offset = self.block_offset(block.number())?;

        let file = self.get_file(block.filename())?;
        let mut file = lock(&file);

        let file_len = file.metadata()?.len();
        let available = file_len.saturating_sub(offset);
        if available < self.block_size as u64 {
            return Err(FileError::ShortRead {
                block: block.clone(),
                expected: self.block_size,
                actual: available as usize,
            });
        }

        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(page.contents_mut())?;

        trace!("Read {}", block);
        Ok(())
    }

    /// Write `page` to a block. No explicit sync is performed.
    pub fn write(&self, block: &BlockId, page: &Page) -> FileResult<()> {
        self.check_page_size(page)?;
        let offset = self.block_offset(block.number())?;

        let file = self.get_file(block.filename())?;
        let mut file = lock(&file);

        file.seek(SeekFrom::Start(offset))?;
        file.write_all(page.contents())?;

        trace!("Wrote {}", block);
        Ok(())
    }

    /// Grow a file by one zero-filled block and return its id
    pub fn append(&self, filename: &str) -> FileResult<BlockId> {
        let file = self.get_file(filename)?;
        // Held across the length check and the write so concurrent appends
        // never compute the same block number
        let mut file = lock(&file);

        let number = self.block_count(filename, &file)?;
        let block = BlockId::new(filename, number);
        let offset = self.block_offset(number)?;

        let zeros = vec![0u8; self.block_size];
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(&zeros)?;

        debug!("Appended {}", block);
        Ok(block)
    }

    /// Number of blocks in a file
    pub fn length(&self, filename: &str) -> FileResult<BlockNum> {
        let file = self.get_file(filename)?;
        let file = lock(&file);
        self.block_count(filename, &file)
    }

    /// Get the handle for a file, opening (and if needed creating) it on first use.
    /// Existing contents are kept.
    fn get_file(&self, filename: &str) -> FileResult<SharedFile> {
        if !is_plain_filename(filename) {
            return Err(FileError::InvalidFilename(filename.to_string()));
        }

        let mut open_files = lock(&self.open_files);

        if let Some(file) = open_files.get(filename) {
            return Ok(Arc::clone(file));
        }

        let path = self.directory.join(filename);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        debug!("Opened file {:?}", path);

        let file = Arc::new(Mutex::new(file));
        open_files.insert(filename.to_string(), Arc::clone(&file));
        Ok(file)
    }

    fn block_count(&self, filename: &str, file: &File) -> FileResult<BlockNum> {
        let file_len = file.metadata()?.len();
        let block_size = self.block_size as u64;

        if file_len % block_size != 0 {
            warn!(
                "File {} has length {} which is not a multiple of the block size {}",
                filename, file_len, block_size
            );
            return Err(FileError::Misaligned {
                filename: filename.to_string(),
                file_len,
                block_size: self.block_size,
            });
        }

        Ok(file_len / block_size)
    }

    fn block_offset(&self, number: BlockNum) -> FileResult<u64> {
        number.checked_mul(self.block_size as u64).ok_or_else(|| {
            FileError::Io(io::Error::new(
                ErrorKind::InvalidInput,
                format!("block {} is beyond the addressable range", number),
            ))
        })
    }

    fn check_page_size(&self, page: &Page) -> FileResult<()> {
        if page.block_size() != self.block_size {
            return Err(FileError::PageSizeMismatch {
                expected: self.block_size,
                actual: page.block_size(),
            });
        }
        Ok(())
    }
}

/// Lock a mutex, ignoring poisoning. A panic while holding a file lock does not
/// leave the handle itself in an unusable state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A file name that stays inside the storage directory: one normal path
/// component, no separators, no `.` or `..`
fn is_plain_filename(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !filename.contains(['/', '\\'])
}
