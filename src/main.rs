use blockfile::{BlockId, DEFAULT_BLOCK_SIZE, FileManager, FileResult, Page};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TEST_DIR: &str = "file-manager-test-dir";

fn main() -> FileResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "blockfile=info".into()),
        )
        .init();

    let manager = FileManager::new(TEST_DIR, DEFAULT_BLOCK_SIZE)?;
    let block = BlockId::new("testfile", 2);

    let mut p1 = Page::new(manager.block_size());
    let pos1 = 88;
    p1.set_string(pos1, "abcdefghijklm")?;
    // Skip past the string and its length prefix
    let pos2 = pos1 + Page::max_length("abcdefghijklm");
    p1.set_int(pos2, 4096)?;
    manager.write(&block, &p1)?;

    let mut p2 = Page::new(manager.block_size());
    manager.read(&block, &mut p2)?;

    assert_eq!(p2.get_int(pos2)?, 4096);
    assert_eq!(p2.get_string(pos1)?, "abcdefghijklm");

    info!(
        "Offset {} contains {}, offset {} contains {:?}",
        pos2,
        p2.get_int(pos2)?,
        pos1,
        p2.get_string(pos1)?
    );
    Ok(())
}
