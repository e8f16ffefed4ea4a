pub mod document;
pub mod editing;
pub mod parsing;

// Re-export key types for easier usage
pub use document::{Document, EditError, EditOp};
pub use editing::{
    DeferredRenumber, DragSession, DropValidationResult, ListIntent, MoveOutcome, MoveTarget,
    RejectReason, move_block, validate_drop,
};
pub use parsing::{Block, BlockType, all_blocks, detect_block};
