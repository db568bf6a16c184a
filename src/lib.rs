pub mod file;

pub use file::{
    BlockId, BlockNum, DEFAULT_BLOCK_SIZE, FileError, FileManager, FileManagerConfig,
    FileResult, INT_SIZE, Page,
};
