use crate::config::ITEM_ID_KEY;
use crate::extractor::aggregator::Row;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// Everything one query run produced.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub root: PathBuf,
    pub fields: Vec<String>,
    pub items_found: usize,
    pub items_skipped: usize,
    pub rows: Vec<Row>,
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl QueryReport {
    pub fn new(root: PathBuf, fields: Vec<String>, items_found: usize) -> Self {
        Self {
            root,
            fields,
            items_found,
            items_skipped: 0,
            rows: Vec::new(),
            warnings: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Rows as objects keyed by field name, with the item id under `id`.
    ///
    /// Field names are unique and never `id` once the configuration validates.
    pub fn to_json(&self) -> Value {
        let rows: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                object.insert(ITEM_ID_KEY.to_string(), Value::String(row.item.clone()));
                for (field, value) in self.fields.iter().zip(&row.values) {
                    object.insert(field.clone(), Value::String(value.clone()));
                }
                Value::Object(object)
            })
            .collect();

        json!({
            "root": self.root.display().to_string(),
            "fields": self.fields,
            "items": self.items_found,
            "skipped": self.items_skipped,
            "rows": rows,
            "warnings": self.warnings,
            "generated_at": self.generated_at.to_rfc3339(),
        })
    }

    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Workshop items: {}\nRows: {}\n",
            self.items_found,
            self.rows.len()
        );
        if self.items_skipped > 0 {
            summary.push_str(&format!("Skipped: {}\n", self.items_skipped));
        }
        summary
    }
}
