use blockwright_common::{Block, BlockData};
use kuchiki::NodeRef;
use serde_json::{json, Value};

use super::{BlockStrategy, InlineMarkup};
use crate::dom::{children_with_tags, descendants_with_tag, first_descendant, has_tag, inner_html};

/// Tables. Header and body rows share one `rows` array; `hasHeader` marks
/// the first row as a header.
pub struct TableStrategy {
    markup: InlineMarkup,
}

impl TableStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

impl BlockStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "table"
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }

    fn supports_node(&self, node: &NodeRef) -> bool {
        has_tag(node, &["table"])
    }

    fn create_from_node(&self, node: &NodeRef) -> Option<Block> {
        let mut rows = Vec::new();
        let mut has_header = false;

        if let Some(thead) = first_descendant(node, "thead") {
            has_header = true;
            rows.extend(section_rows(&thead));
        }

        if let Some(tbody) = first_descendant(node, "tbody") {
            rows.extend(section_rows(&tbody));
        } else {
            let loose_rows = descendants_with_tag(node, "tr")
                .into_iter()
                .filter(|tr| !(has_header && parent_is_thead(tr)));
            rows.extend(loose_rows.filter_map(|tr| row_value(&tr)));
        }

        let mut data = BlockData::new();
        data.insert("rows".to_string(), Value::Array(rows));
        data.insert("hasHeader".to_string(), Value::Bool(has_header));
        Some(Block::new("table", data))
    }
}

fn section_rows(section: &NodeRef) -> Vec<Value> {
    descendants_with_tag(section, "tr")
        .iter()
        .filter_map(row_value)
        .collect()
}

/// `{cells: [{content}]}` for a row, or `None` when it has no cells
fn row_value(tr: &NodeRef) -> Option<Value> {
    let cells: Vec<Value> = children_with_tags(tr, &["th", "td"])
        .iter()
        .map(|cell| json!({ "content": inner_html(cell) }))
        .collect();

    if cells.is_empty() {
        None
    } else {
        Some(json!({ "cells": cells }))
    }
}

fn parent_is_thead(tr: &NodeRef) -> bool {
    tr.parent().map_or(false, |parent| has_tag(&parent, &["thead"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::*;

    #[test]
    fn test_header_and_body() {
        let strategy = TableStrategy::new(markup(vec![]));
        let table = node(
            "<table><thead><tr><th>Name</th></tr></thead><tbody><tr><td>Alice</td></tr></tbody></table>",
        );
        assert!(strategy.supports_node(&table));

        let block = strategy.create_from_node(&table).unwrap();
        assert_eq!(block.data["hasHeader"], true);
        assert_eq!(
            block.data["rows"],
            json!([
                { "cells": [{ "content": "Name" }] },
                { "cells": [{ "content": "Alice" }] }
            ])
        );
    }

    #[test]
    fn test_rows_without_sections() {
        let strategy = TableStrategy::new(markup(vec![]));
        let table = node("<table><tr><td>a</td><td><b>b</b></td></tr><tr><td>c</td><td>d</td></tr></table>");
        let block = strategy.create_from_node(&table).unwrap();
        assert_eq!(block.data["hasHeader"], false);
        assert_eq!(
            block.data["rows"],
            json!([
                { "cells": [{ "content": "a" }, { "content": "<b>b</b>" }] },
                { "cells": [{ "content": "c" }, { "content": "d" }] }
            ])
        );
    }

    #[test]
    fn test_empty_table() {
        let strategy = TableStrategy::new(markup(vec![]));
        let block = strategy.create_from_node(&node("<table></table>")).unwrap();
        assert_eq!(block.data["rows"], json!([]));
        assert_eq!(block.data["hasHeader"], false);
    }

    #[test]
    fn test_rows_without_cells_are_skipped() {
        let strategy = TableStrategy::new(markup(vec![]));
        let block = strategy
            .create_from_node(&node("<table><tbody><tr></tr><tr><td>x</td></tr></tbody></table>"))
            .unwrap();
        assert_eq!(block.data["rows"], json!([{ "cells": [{ "content": "x" }] }]));
    }
}
