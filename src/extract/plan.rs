//! Table classification and column plans
//!
//! A classifier looks at a table's header row and either rejects the table
//! with a typed reason or resolves a `ColumnPlan`: which column index holds
//! each role the caller asked for.

use std::fmt;

/// What a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Name,
    SecondaryName,
    DaysToGrow,
    SeedPrice,
    Season,
    Weather,
    Time,
    Location,
    Items,
    Reward,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Column index used when no header cell matches a group's keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Fixed position
    Position(usize),
    /// `wide` if the header has more than `min_width` cells, else `narrow`
    ByWidth { min_width: usize, wide: usize, narrow: usize },
    /// Optional column: left out of the plan
    Absent,
}

impl Fallback {
    fn resolve(self, header_width: usize) -> Option<usize> {
        match self {
            Fallback::Position(i) => Some(i),
            Fallback::ByWidth { min_width, wide, narrow } => {
                Some(if header_width > min_width { wide } else { narrow })
            }
            Fallback::Absent => None,
        }
    }
}

/// Header keywords for one column role
#[derive(Debug, Clone, Copy)]
pub struct ColumnGroup {
    pub role: Role,
    pub keywords: &'static [&'static str],
    /// A table is rejected unless some header cell matches this group
    pub required: bool,
    pub fallback: Fallback,
}

impl ColumnGroup {
    /// Index of the first header cell containing any of the keywords
    pub fn find_in(&self, header: &[String]) -> Option<usize> {
        header
            .iter()
            .position(|cell| self.keywords.iter().any(|k| cell.contains(k)))
    }

    pub fn is_optional(&self) -> bool {
        self.fallback == Fallback::Absent
    }
}

/// Resolved column for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    pub role: Role,
    pub index: Option<usize>,
    /// Optional columns never cause a row to be skipped
    pub optional: bool,
}

/// Pre-computed column resolution for one accepted table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnPlan {
    pub columns: Vec<ColumnRule>,
}

impl ColumnPlan {
    pub fn index_of(&self, role: Role) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.role == role)
            .and_then(|c| c.index)
    }

    /// Minimum row length for a data row to be usable
    pub fn min_row_len(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| !c.optional)
            .filter_map(|c| c.index)
            .map(|i| i + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Why a table was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyTable,
    TooNarrow { width: usize, min: usize },
    MissingColumn { role: Role },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyTable => write!(f, "table has no rows"),
            Rejection::TooNarrow { width, min } => {
                write!(f, "header has {} cells, need {}", width, min)
            }
            Rejection::MissingColumn { role } => write!(f, "no header matches {}", role),
        }
    }
}

/// Outcome of classifying one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Accepted(ColumnPlan),
    Rejected(Rejection),
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted(_))
    }

    pub fn plan(&self) -> Option<&ColumnPlan> {
        match self {
            Classification::Accepted(plan) => Some(plan),
            Classification::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Classification::Accepted(_) => None,
            Classification::Rejected(r) => Some(r),
        }
    }
}

/// Decides whether a table belongs to a domain and where its columns are
pub trait TableClassifier {
    /// Short label used in log output
    fn domain(&self) -> &str;

    /// `None` when the header is acceptable
    fn rejection(&self, header: &[String]) -> Option<Rejection>;

    fn resolve_columns(&self, header: &[String]) -> ColumnPlan;

    fn matches(&self, header: &[String]) -> bool {
        self.rejection(header).is_none()
    }

    fn classify(&self, header: Option<&[String]>) -> Classification {
        let Some(header) = header else {
            return Classification::Rejected(Rejection::EmptyTable);
        };
        match self.rejection(header) {
            Some(reason) => Classification::Rejected(reason),
            None => Classification::Accepted(self.resolve_columns(header)),
        }
    }
}

/// Keyword-driven classifier: a minimum header width plus one group per column
#[derive(Debug, Clone, Copy)]
pub struct TableSignature {
    pub domain: &'static str,
    pub min_width: usize,
    pub groups: &'static [ColumnGroup],
}

impl TableClassifier for TableSignature {
    fn domain(&self) -> &str {
        self.domain
    }

    fn rejection(&self, header: &[String]) -> Option<Rejection> {
        if header.len() < self.min_width {
            return Some(Rejection::TooNarrow {
                width: header.len(),
                min: self.min_width,
            });
        }
        self.groups
            .iter()
            .filter(|g| g.required)
            .find(|g| g.find_in(header).is_none())
            .map(|g| Rejection::MissingColumn { role: g.role })
    }

    fn resolve_columns(&self, header: &[String]) -> ColumnPlan {
        let columns = self
            .groups
            .iter()
            .map(|g| ColumnRule {
                role: g.role,
                index: g.find_in(header).or_else(|| g.fallback.resolve(header.len())),
                optional: g.is_optional(),
            })
            .collect();
        ColumnPlan { columns }
    }
}
