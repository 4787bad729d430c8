//! Parsed page model
//!
//! A `Document` keeps only what the extractors read: every table in document
//! order, and every section heading together with the tables that follow it
//! as siblings up to the next heading.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h3").unwrap());

/// Rows of trimmed cell texts. The first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }

    /// Build a table from string literals
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Table {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// A heading and the tables among its following siblings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tables: Vec<Table>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(tables: Vec<Table>, sections: Vec<Section>) -> Self {
        Document { tables, sections }
    }

    /// Parse an HTML page.
    pub fn parse_html(html: &str) -> Self {
        let page = Html::parse_document(html);

        let tables = page.select(&TABLE).map(parse_table).collect();
        let sections = page.select(&HEADING).map(parse_section).collect();

        Document { tables, sections }
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

fn parse_table(table: ElementRef<'_>) -> Table {
    let rows = table
        .select(&ROW)
        .map(|tr| tr.select(&CELL).map(element_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();
    Table { rows }
}

fn is_heading(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "h2" | "h3")
}

fn parse_section(heading: ElementRef<'_>) -> Section {
    let mut tables = Vec::new();

    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if is_heading(&sibling) {
            break;
        }
        if sibling.value().name() == "table" {
            tables.push(parse_table(sibling));
        }
    }

    Section {
        heading: element_text(heading),
        tables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><div class="content">
          <h2>概要</h2>
          <p>intro</p>
          <table><tr><th>名前</th><th>英名</th></tr>
                 <tr><td> アビゲイル </td><td>Abigail</td></tr></table>
          <h2>ボイラー<b>室</b></h2>
          <table><tr><th>名称</th><th>報酬</th></tr>
                 <tr><td>鍛冶屋のバンドル</td><td>かまど</td></tr></table>
          <p>between</p>
          <table><tr><th>名称</th></tr><tr><td>地質学者のバンドル</td></tr></table>
          <h3>次</h3>
        </div></body></html>
    "#;

    #[test]
    fn test_parse_tables_in_order() {
        let doc = Document::parse_html(PAGE);

        assert_eq!(doc.tables.len(), 3);
        assert_eq!(doc.tables[0].header().unwrap(), ["名前", "英名"]);
        assert_eq!(doc.tables[0].data_rows()[0], ["アビゲイル", "Abigail"]);
    }

    #[test]
    fn test_sections_stop_at_next_heading() {
        let doc = Document::parse_html(PAGE);

        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].heading, "概要");
        assert_eq!(doc.sections[0].tables.len(), 1);
        assert_eq!(doc.sections[1].heading, "ボイラー室");
        assert_eq!(doc.sections[1].tables.len(), 2);
        assert!(doc.sections[2].tables.is_empty());
    }

    #[test]
    fn test_repeated_parses_agree() {
        let first = Document::parse_html(PAGE);
        let second = Document::parse_html(PAGE);
        assert_eq!(first, second);
        assert_eq!(Document::parse_html("<p>no tables</p>"), Document::default());
    }

    #[test]
    fn test_empty_table_has_no_header() {
        let table = Table::default();
        assert!(table.header().is_none());
        assert!(table.data_rows().is_empty());
    }
}
