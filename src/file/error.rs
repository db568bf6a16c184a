use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

use super::BlockId;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Cannot open storage directory {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid block size: {0}")]
    InvalidBlockSize(usize),

    #[error("Access out of bounds: offset={offset}, len={len}, block_size={block_size}")]
    Bounds {
        offset: usize,
        len: usize,
        block_size: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Short read on {block}: expected {expected} bytes, got {actual}")]
    ShortRead {
        block: BlockId,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid file name: {0:?}")]
    InvalidFilename(String),

    #[error("Invalid page size: expected {expected}, got {actual}")]
    PageSizeMismatch { expected: usize, actual: usize },

    #[error(
        "File {filename} is not block aligned: length {file_len} is not a multiple of {block_size}"
    )]
    Misaligned {
        filename: String,
        file_len: u64,
        block_size: usize,
    },

    #[error("Stored string is not valid text: {0}")]
    InvalidString(#[from] FromUtf8Error),
}

pub type FileResult<T> = Result<T, FileError>;
