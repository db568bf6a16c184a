use std::fmt;

use serde::{Deserialize, Serialize};

use super::BlockNum;

/// Identifies a block by the file it lives in and its position within that file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId {
    filename: String,
    number: BlockNum,
}

impl BlockId {
    pub fn new(filename: impl Into<String>, number: BlockNum) -> Self {
        Self {
            filename: filename.into(),
            number,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn number(&self) -> BlockNum {
        self.number
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[file {}, block {}]", self.filename, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn test_structural_equality() {
        let a = BlockId::new("data.tbl", 3);
        let b = BlockId::new(String::from("data.tbl"), 3);

        assert_eq!(a, b);
        assert_ne!(a, BlockId::new("data.tbl", 4));
        assert_ne!(a, BlockId::new("other.tbl", 3));
    }

    #[test]
    fn test_usable_as_key() {
        let mut seen = AHashSet::new();
        seen.insert(BlockId::new("log", 0));
        seen.insert(BlockId::new("log", 1));
        seen.insert(BlockId::new("log", 0));

        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&BlockId::new("log", 1)));
    }

    #[test]
    fn test_display() {
        let block = BlockId::new("testfile", 2);
        assert_eq!(block.to_string(), "[file testfile, block 2]");
    }

    #[test]
    fn test_ordering() {
        let mut blocks = vec![
            BlockId::new("b", 0),
            BlockId::new("a", 7),
            BlockId::new("a", 2),
        ];
        blocks.sort();

        assert_eq!(
            blocks,
            vec![
                BlockId::new("a", 2),
                BlockId::new("a", 7),
                BlockId::new("b", 0),
            ]
        );
    }

    #[test]
    fn test_serde_json() {
        let block = BlockId::new("students", 12);
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"filename":"students","number":12}"#);

        let parsed: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, block);
    }
}
