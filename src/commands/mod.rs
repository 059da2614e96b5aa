//! CLI command handlers.
//!
//! - `list` - Print registered triples
//! - `sync` - Extract sysroots for requested triples

pub mod list;
pub mod sync;

pub use list::cmd_list;
pub use sync::cmd_sync;
