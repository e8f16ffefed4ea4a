pub mod blocks;
pub mod invariants;
pub mod rope;

pub use blocks::{Block, BlockType, all_blocks, detect_block};
