//! Script composition and database build
//!
//! A store is initialised from three fragments in a fixed order: the schema,
//! the data (the generated load script when present, else the sample data),
//! then the full-text index. The same fragments are concatenated into one
//! all-in-one script for applications that bootstrap on first run.

use crate::error::{HarvestError, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SCHEMA: &str = "00_schema.sql";
pub const GENERATED_DATA: &str = "50_generated_data.sql";
pub const SAMPLE_DATA: &str = "90_sample_data.sql";
pub const FTS: &str = "99_fts.sql";
pub const ALL_IN_ONE: &str = "zz_all_in_one.sql";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: String,
    pub sql: String,
}

/// Ordered script fragments read from one SQL directory
#[derive(Debug, Clone)]
pub struct ScriptParts {
    dir: PathBuf,
    fragments: Vec<Fragment>,
}

impl ScriptParts {
    /// Fragment names to apply, in order, for the files present in `sql_dir`
    pub fn fragment_names(sql_dir: &Path) -> [&'static str; 3] {
        let data = if sql_dir.join(GENERATED_DATA).exists() {
            GENERATED_DATA
        } else {
            SAMPLE_DATA
        };
        [SCHEMA, data, FTS]
    }

    pub fn load<P: AsRef<Path>>(sql_dir: P) -> Result<Self> {
        let dir = sql_dir.as_ref().to_path_buf();
        let mut fragments = Vec::new();

        for name in Self::fragment_names(&dir) {
            let path = dir.join(name);
            if !path.exists() {
                return Err(HarvestError::MissingFragment { path });
            }
            let sql = std::fs::read_to_string(&path).map_err(|e| HarvestError::io(&path, e))?;
            fragments.push(Fragment {
                name: name.to_string(),
                sql,
            });
        }

        Ok(ScriptParts { dir, fragments })
    }

    /// All fragments in one script, each preceded by a `-- >>> name` marker
    pub fn combined(&self) -> String {
        let mut pieces = Vec::with_capacity(self.fragments.len() * 3);
        for fragment in &self.fragments {
            pieces.push(format!("-- >>> {}\n", fragment.name));
            pieces.push(fragment.sql.clone());
            pieces.push("\n".to_string());
        }
        pieces.join("\n")
    }

    pub fn write_combined(&self) -> Result<PathBuf> {
        let path = self.dir.join(ALL_IN_ONE);
        std::fs::write(&path, self.combined()).map_err(|e| HarvestError::io(&path, e))?;
        info!(path = %path.display(), "wrote combined script");
        Ok(path)
    }

    /// Execute every fragment in order on an open connection
    pub fn apply(&self, conn: &Connection) -> Result<()> {
        for fragment in &self.fragments {
            conn.execute_batch(&fragment.sql)?;
            info!(fragment = %fragment.name, "applied");
        }
        Ok(())
    }

    /// Build a fresh database file at `db_path`, replacing any existing one
    pub fn build_database<P: AsRef<Path>>(&self, db_path: P) -> Result<()> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| HarvestError::io(parent, e))?;
        }
        if db_path.exists() {
            std::fs::remove_file(db_path).map_err(|e| HarvestError::io(db_path, e))?;
        }

        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        self.apply(&conn)?;
        info!(path = %db_path.display(), "built database");
        Ok(())
    }

    /// Build the database, then write the all-in-one script next to the
    /// fragments. Nothing is written if the build fails.
    pub fn assemble<P: AsRef<Path>>(&self, db_path: P) -> Result<PathBuf> {
        self.build_database(db_path)?;
        self.write_combined()
    }
}
