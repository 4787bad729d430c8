//! Load script emission and database assembly
//!
//! - **ir**: statement and value types, rendered to SQL text
//! - **emit**: builds the idempotent load script from a linked dataset
//! - **compose**: orders the script fragments and builds a SQLite file

pub mod compose;
pub mod emit;
pub mod ir;

pub use compose::{Fragment, ScriptParts};
pub use emit::emit;
pub use ir::{Script, SqlValue, Statement, TableSpec};
