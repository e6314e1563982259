//! Tools domain module.
//!
//! Every capability the server exposes is a tool that reads from SonarQube
//! and answers with a single block of text.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool catalog and name-based dispatch
//! - `report.rs` - Structured report rendered into the text result
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()` and `handle()`
//! 2. Export it in the matching `mod.rs`
//! 3. Add it to the catalog and the dispatch match in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod report;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use report::{Outcome, Report};
