//! Tabular assembly of records

use crate::error::{Error, Result};
use crate::types::{value_to_cell, JsonValue, Record};
use std::collections::HashSet;

/// Records aligned into rows and named columns.
///
/// Columns are the union of all field names in first-seen order. A record
/// lacking a column gets `null` in that cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<JsonValue>>,
}

impl Table {
    /// Assemble records into a table.
    ///
    /// With `strict` set, every record must carry exactly the field set of the
    /// first one.
    pub fn from_records(records: &[Record], strict: bool) -> Result<Self> {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for record in records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }

        if strict {
            if let Some(first) = records.first() {
                for (i, record) in records.iter().enumerate().skip(1) {
                    let same = record.len() == first.len()
                        && record.keys().all(|k| first.contains_key(k));
                    if !same {
                        return Err(Error::assembly(format!(
                            "record {i} has fields [{}], expected [{}]",
                            join_keys(record),
                            join_keys(first)
                        )));
                    }
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(JsonValue::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, each aligned with `columns()`
    pub fn rows(&self) -> &[Vec<JsonValue>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&JsonValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Write the table as CSV: a header row, then one line per row
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        if self.columns.is_empty() {
            csv.flush()?;
            return Ok(());
        }
        csv.write_record(&self.columns)?;
        for row in &self.rows {
            csv.write_record(row.iter().map(value_to_cell))?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Render as a space-padded text table
    pub fn render_pretty(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(value_to_cell).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_line(&mut out, self.columns.iter().map(String::as_str), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, rule.iter().map(String::as_str), &widths);
        for row in &cells {
            push_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn join_keys(record: &Record) -> String {
    record.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
