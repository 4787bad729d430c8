use crate::document::{Document, Table};
use crate::extract::plan::{Classification, ColumnPlan, Role, TableClassifier};
use tracing::debug;

/// One data row reduced to the roles a classifier asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRow {
    cells: Vec<(Role, Option<String>)>,
}

impl ResolvedRow {
    fn from_plan(plan: &ColumnPlan, row: &[String]) -> Self {
        let cells = plan
            .columns
            .iter()
            .map(|c| (c.role, c.index.and_then(|i| row.get(i)).cloned()))
            .collect();
        ResolvedRow { cells }
    }

    /// Cell for `role`, `None` if the role is absent from this table
    pub fn get(&self, role: Role) -> Option<&str> {
        self.cells
            .iter()
            .find(|(r, _)| *r == role)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Cell for `role`, empty when absent
    pub fn text(&self, role: Role) -> &str {
        self.get(role).unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.text(Role::Name)
    }
}

/// Finds the tables a classifier accepts and pulls their rows
pub struct TableExtractor<'a> {
    classifier: &'a dyn TableClassifier,
}

impl<'a> TableExtractor<'a> {
    pub fn new(classifier: &'a dyn TableClassifier) -> Self {
        TableExtractor { classifier }
    }

    /// Classify every table in order, without extracting rows
    pub fn classify_all(&self, tables: &[Table]) -> Vec<Classification> {
        tables
            .iter()
            .map(|t| self.classifier.classify(t.header()))
            .collect()
    }

    /// Rows of every accepted table in the document, in scan order
    pub fn extract(&self, doc: &Document) -> Vec<ResolvedRow> {
        self.extract_tables(&doc.tables)
    }

    /// Rows of every accepted table, concatenated in order
    pub fn extract_tables(&self, tables: &[Table]) -> Vec<ResolvedRow> {
        let mut rows = Vec::new();

        for (idx, table) in tables.iter().enumerate() {
            match self.classifier.classify(table.header()) {
                Classification::Accepted(plan) => {
                    let before = rows.len();
                    Self::extract_rows(&plan, table, &mut rows);
                    debug!(
                        domain = self.classifier.domain(),
                        table = idx,
                        rows = rows.len() - before,
                        "table accepted"
                    );
                }
                Classification::Rejected(reason) => {
                    debug!(
                        domain = self.classifier.domain(),
                        table = idx,
                        %reason,
                        "table skipped"
                    );
                }
            }
        }

        rows
    }

    fn extract_rows(plan: &ColumnPlan, table: &Table, out: &mut Vec<ResolvedRow>) {
        let min_len = plan.min_row_len();
        let name_idx = plan.index_of(Role::Name);

        for row in table.data_rows() {
            if row.len() < min_len {
                continue;
            }
            let has_name = name_idx
                .and_then(|i| row.get(i))
                .map_or(false, |name| !name.is_empty());
            if !has_name {
                continue;
            }
            out.push(ResolvedRow::from_plan(plan, row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::plan::{ColumnGroup, Fallback, Rejection, TableSignature};

    const SIG: TableSignature = TableSignature {
        domain: "test",
        min_width: 2,
        groups: &[
            ColumnGroup {
                role: Role::Name,
                keywords: &["魚"],
                required: true,
                fallback: Fallback::Position(0),
            },
            ColumnGroup {
                role: Role::Time,
                keywords: &["時間"],
                required: true,
                fallback: Fallback::Position(1),
            },
            ColumnGroup {
                role: Role::Reward,
                keywords: &["メモ"],
                required: false,
                fallback: Fallback::Absent,
            },
        ],
    };

    #[test]
    fn test_unrecognized_table_is_skipped() {
        let tables = vec![
            Table::from_rows([["作物", "日数"], ["パースニップ", "4日"]]),
            Table::from_rows([["魚", "時間"], ["コイ", "いつでも"]]),
        ];
        let extractor = TableExtractor::new(&SIG);

        let outcomes = extractor.classify_all(&tables);
        assert_eq!(
            outcomes[0].rejection(),
            Some(&Rejection::MissingColumn { role: Role::Name })
        );
        assert!(outcomes[1].is_accepted());

        let rows = extractor.extract_tables(&tables);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), "コイ");
        assert_eq!(rows[0].text(Role::Time), "いつでも");
    }

    #[test]
    fn test_short_and_nameless_rows_are_skipped() {
        let table = Table::from_rows(vec![
            vec!["時間", "魚", "メモ"],
            vec!["6時"],
            vec!["6時", ""],
            vec!["6時", "タイ"],
            vec!["6時", "サケ", "秋"],
        ]);
        let rows = TableExtractor::new(&SIG).extract_tables(&[table]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name(), "タイ");
        assert_eq!(rows[0].get(Role::Reward), None);
        assert_eq!(rows[1].get(Role::Reward), Some("秋"));
    }

    #[test]
    fn test_rows_concatenate_across_tables() {
        let doc = Document::new(
            vec![
                Table::from_rows([["魚", "時間"], ["A", "1時"]]),
                Table::from_rows([["魚", "時間"], ["B", "2時"], ["C", "3時"]]),
            ],
            vec![],
        );
        let names: Vec<_> = TableExtractor::new(&SIG)
            .extract(&doc)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
