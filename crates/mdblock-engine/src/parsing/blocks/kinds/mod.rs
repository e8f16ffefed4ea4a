pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_marker;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind};
pub use heading::Heading;
pub use list_marker::{ListMarker, MarkerType};
pub use table::Table;
pub use thematic_break::ThematicBreak;
