//! # Block Parsing
//!
//! Line-oriented block structure for markdown-like documents.
//!
//! ## Layers
//!
//! 1. **Line classification** (`classify`): each line in isolation is tagged
//!    with a [`BlockType`] and split into quote prefix, indentation and list
//!    marker ([`ParsedLine`]).
//! 2. **Resolution** (`resolver`): a line plus its neighbours yields the full
//!    range of the block rooted there.
//!
//! ## Modules
//!
//! - **`kinds`**: syntax owned by each block kind (quote prefixes, fences, list markers, ...)
//! - **`fences`**: top-down pairing of code and math fences
//! - **`lists`**: list item subtree and own-text ranges
//! - **`containers`**: blockquote and callout container headers and extents
//! - **`tables`**, **`sections`**: table row runs and heading sections
//!
//! ## Key Invariants
//!
//! - Fenced regions are raw zones: nothing inside them is classified
//! - Blocks produced by [`all_blocks`] never overlap
//! - A block's `content` is the exact source slice of its lines

pub mod classify;
pub mod containers;
pub mod fences;
pub mod kinds;
pub mod lists;
pub mod resolver;
pub mod sections;
pub mod tables;
pub mod types;

pub use classify::{
    DEFAULT_TAB_SIZE, ParsedLine, classify, indent_width, parse_line_with_quote, parse_list_line,
    split_quote_prefix,
};
pub use kinds::MarkerType;
pub use resolver::{
    all_blocks, detect_block, draggable_block_at, heading_section_range, list_item_own_range,
    quote_container_at,
};
pub use types::{Block, BlockType};
