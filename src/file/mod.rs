mod block_id;
mod config;
mod error;
mod file_manager;
mod page;


pub use block_id::BlockId;
pub use config::FileManagerConfig;
pub use error::{FileError, FileResult};
pub use file_manager::FileManager;
pub use page::Page;

/// Default block size in bytes
pub const DEFAULT_BLOCK_SIZE: usize = 400;

/// Size of an encoded integer (and of every length prefix) in bytes
pub const INT_SIZE: usize = 4;

/// Block number within a file
pub type BlockNum = u64;
