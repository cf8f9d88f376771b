use crate::config::AlignmentPolicy;
use crate::error::{ReaderError, Result};
use crate::extractor::config_file::ConfigExtractor;
use crate::scanner::WorkshopItem;
use serde::Serialize;

/// Values of one field, one entry per item in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldColumn {
    pub field: String,
    pub values: Vec<String>,
}

/// Field name to value list, in query order, plus the items the values came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyData {
    pub items: Vec<String>,
    pub columns: Vec<FieldColumn>,
}

/// One item's values, aligned with the requested fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub item: String,
    pub values: Vec<String>,
}

impl KeyData {
    pub fn new(fields: &[String]) -> Self {
        Self {
            items: Vec::new(),
            columns: fields
                .iter()
                .map(|field| FieldColumn {
                    field: field.clone(),
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.field.as_str()).collect()
    }

    pub fn values(&self, field: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.values.as_slice())
    }

    /// Transposes the columns into one row per item.
    ///
    /// Every column must hold exactly one value per item.
    pub fn to_rows(&self) -> Result<Vec<Row>> {
        let expected = self.items.len();

        if let Some(column) = self.columns.iter().find(|c| c.values.len() != expected) {
            return Err(ReaderError::FieldLengthMismatch {
                field: column.field.clone(),
                expected,
                found: column.values.len(),
            });
        }

        let rows = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| Row {
                item: item.clone(),
                values: self
                    .columns
                    .iter()
                    .map(|c| c.values[index].clone())
                    .collect(),
            })
            .collect();

        Ok(rows)
    }

    fn push_item(&mut self, item: &str, values: Vec<String>) {
        self.items.push(item.to_string());
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.values.push(value);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AggregationOutcome {
    pub key_data: KeyData,
    pub warnings: Vec<String>,
    pub items_skipped: usize,
}

pub struct Aggregator {
    extractor: ConfigExtractor,
    alignment: AlignmentPolicy,
}

impl Aggregator {
    pub fn new(extractor: ConfigExtractor, alignment: AlignmentPolicy) -> Self {
        Self {
            extractor,
            alignment,
        }
    }

    /// Collects every requested field from every item.
    ///
    /// Items whose config file cannot be read are left out with a warning.
    /// A field that no readable item holds becomes an empty column with a
    /// warning. Otherwise items that do not hold exactly one value per field
    /// are handled according to the alignment policy.
    pub fn get_key_data(
        &self,
        items: &[WorkshopItem],
        fields: &[String],
        mut on_item: impl FnMut(&WorkshopItem),
    ) -> Result<AggregationOutcome> {
        let mut outcome = AggregationOutcome {
            key_data: KeyData::new(fields),
            ..AggregationOutcome::default()
        };

        let mut readable = Vec::with_capacity(items.len());
        for item in items {
            on_item(item);

            match self.extractor.read_item(&item.path) {
                Ok(config) => readable.push((item, config)),
                Err(e) => {
                    tracing::debug!(item = %item.id, error = %e, "skipping item");
                    outcome.warnings.push(format!("Skipped {}: {}", item.id, e));
                    outcome.items_skipped += 1;
                }
            }
        }

        let absent: Vec<bool> = fields
            .iter()
            .map(|field| {
                !readable.is_empty()
                    && readable.iter().all(|(_, config)| config.values(field).is_empty())
            })
            .collect();

        for (field, _) in fields.iter().zip(&absent).filter(|(_, absent)| **absent) {
            outcome
                .warnings
                .push(format!("No item has a '{}' entry, the column is empty", field));
        }

        'items: for (item, config) in readable {
            let mut row = Vec::with_capacity(fields.len());
            for (field, absent) in fields.iter().zip(&absent) {
                if *absent {
                    row.push(String::new());
                    continue;
                }

                let mut matches = config.values(field);
                if matches.len() == 1 {
                    row.extend(matches.pop());
                    continue;
                }

                match self.alignment {
                    AlignmentPolicy::Strict => {
                        return Err(ReaderError::MisalignedField {
                            item: item.id.clone(),
                            field: field.clone(),
                            matches: matches.len(),
                        });
                    }
                    AlignmentPolicy::Pad => {
                        outcome.warnings.push(format!(
                            "{}: {} '{}' values, using {}",
                            item.id,
                            matches.len(),
                            field,
                            if matches.is_empty() {
                                "an empty value"
                            } else {
                                "the first"
                            }
                        ));
                        row.push(matches.into_iter().next().unwrap_or_default());
                    }
                    AlignmentPolicy::Skip => {
                        outcome.warnings.push(format!(
                            "Skipped {}: {} '{}' values",
                            item.id,
                            matches.len(),
                            field
                        ));
                        outcome.items_skipped += 1;
                        continue 'items;
                    }
                }
            }

            tracing::trace!(item = %item.id, values = ?row, "collected item");
            outcome.key_data.push_item(&item.id, row);
        }

        Ok(outcome)
    }

    /// Every value of `field` across all readable items, in order.
    ///
    /// Duplicates are kept and items without the field contribute nothing.
    pub fn collect_values(
        &self,
        items: &[WorkshopItem],
        field: &str,
    ) -> (Vec<String>, Vec<String>) {
        let mut values = Vec::new();
        let mut warnings = Vec::new();

        for item in items {
            match self.extractor.extract_field(&item.path, field) {
                Ok(found) => values.extend(found),
                Err(e) => warnings.push(format!("Skipped {}: {}", item.id, e)),
            }
        }

        (values, warnings)
    }
}
