//! Heuristic table discovery and column-role inference
//!
//! Wiki pages carry many tables; only some belong to a domain. A
//! `TableClassifier` accepts or rejects each table by its header row and
//! resolves a `ColumnPlan`, then `TableExtractor` reads the data rows through
//! that plan.

pub mod extractor;
pub mod plan;

pub use extractor::{ResolvedRow, TableExtractor};
pub use plan::{
    Classification, ColumnGroup, ColumnPlan, ColumnRule, Fallback, Rejection, Role,
    TableClassifier, TableSignature,
};
