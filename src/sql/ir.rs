//! Statement IR for the load script
//!
//! Rows are built as `SqlValue`s against fixed `TableSpec`s and rendered to
//! text in one place, so quoting and NULL handling live here only.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn text(s: impl Into<String>) -> Self {
        SqlValue::Text(s.into())
    }

    /// Optional text; absent and empty both render as NULL
    pub fn opt_text(s: Option<&str>) -> Self {
        match s {
            Some(s) if !s.is_empty() => SqlValue::Text(s.to_string()),
            _ => SqlValue::Null,
        }
    }

    pub fn opt_int<T: Into<i64>>(n: Option<T>) -> Self {
        n.map_or(SqlValue::Null, |n| SqlValue::Integer(n.into()))
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Integer(n)
    }
}

impl From<u32> for SqlValue {
    fn from(n: u32) -> Self {
        SqlValue::Integer(n.into())
    }
}

impl From<u16> for SqlValue {
    fn from(n: u16) -> Self {
        SqlValue::Integer(n.into())
    }
}

impl From<u8> for SqlValue {
    fn from(n: u8) -> Self {
        SqlValue::Integer(n.into())
    }
}

impl From<f64> for SqlValue {
    fn from(n: f64) -> Self {
        SqlValue::Real(n)
    }
}

/// Single-quoted literal with embedded quotes doubled
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Integer(n) => write!(f, "{}", n),
            // Debug keeps the ".0" on integral values
            SqlValue::Real(n) if n.is_finite() => write!(f, "{:?}", n),
            SqlValue::Real(_) => f.write_str("NULL"),
            SqlValue::Text(s) => f.write_str(&quote(s)),
        }
    }
}

/// Table name and column order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const ITEM: TableSpec = TableSpec {
    name: "item",
    columns: &["id", "key", "name_ja", "name_en", "type", "sell_price", "notes"],
};

pub const CROP: TableSpec = TableSpec {
    name: "crop",
    columns: &["id", "item_id", "season_mask", "seed_price", "days_to_grow", "regrow_days", "avg_yield"],
};

pub const NPC: TableSpec = TableSpec {
    name: "npc",
    columns: &["id", "key", "name_ja", "name_en"],
};

pub const FISH: TableSpec = TableSpec {
    name: "fish",
    columns: &["id", "item_id", "season_mask", "weather_mask", "time_start", "time_end", "locations"],
};

pub const BUNDLE: TableSpec = TableSpec {
    name: "bundle",
    columns: &["id", "room", "name_ja", "reward_desc"],
};

pub const BUNDLE_ITEM: TableSpec = TableSpec {
    name: "bundle_item",
    columns: &["bundle_id", "item_id", "qty", "quality_req"],
};

/// Tables cleared before loading, dependents first
pub const DELETE_ORDER: &[&str] = &[
    "gift_preference",
    "name_alias",
    "bundle_item",
    "bundle",
    "fish",
    "npc",
    "crop",
    "item",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Begin,
    Delete { table: &'static str },
    Insert { table: TableSpec, values: Vec<SqlValue> },
    Commit,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Begin => f.write_str("BEGIN TRANSACTION;"),
            Statement::Delete { table } => write!(f, "DELETE FROM {};", table),
            Statement::Insert { table, values } => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "INSERT INTO {}({}) VALUES ({});",
                    table.name,
                    table.columns.join(","),
                    values.join(",")
                )
            }
            Statement::Commit => f.write_str("COMMIT;"),
        }
    }
}

/// An ordered list of statements, rendered one per line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    statements: Vec<Statement>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Append an insert; the row must match the table's column count
    pub fn insert(&mut self, table: TableSpec, values: Vec<SqlValue>) {
        debug_assert_eq!(table.columns.len(), values.len(), "row width for {}", table.name);
        self.statements.push(Statement::Insert { table, values });
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of inserts into `table`
    pub fn insert_count(&self, table: &str) -> usize {
        self.statements
            .iter()
            .filter(|s| matches!(s, Statement::Insert { table: t, .. } if t.name == table))
            .count()
    }

    pub fn render(&self) -> String {
        self.statements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
