use crate::error::{OptionsError, OptionsResult};
use crate::record::{Mapping, Value};

/// Row-oriented data handed to the plot builders.
///
/// Every row has one cell per column. Missing observations are
/// [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, V>(&mut self, row: I) -> OptionsResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(OptionsError::InvalidData(format!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builds a table from mappings sharing the first mapping's keys; keys a
    /// later mapping lacks become nulls.
    pub fn from_mappings(mappings: &[Mapping]) -> OptionsResult<Self> {
        let Some(first) = mappings.first() else {
            return Ok(Self::default());
        };
        let mut table = Self::new(first.keys().cloned());
        for mapping in mappings {
            let row: Vec<Value> = table
                .columns
                .iter()
                .map(|column| mapping.get(column).cloned().unwrap_or_default())
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> OptionsResult<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| OptionsError::InvalidData(format!("unknown column `{name}`")))
    }
}

/// Charting-library axis type for a column: `value` when every present cell
/// is numeric, `category` otherwise.
pub(crate) fn axis_type<'a>(cells: impl IntoIterator<Item = &'a Value>) -> &'static str {
    let numeric = cells
        .into_iter()
        .filter(|cell| !cell.is_null())
        .all(|cell| matches!(cell, Value::Int(_) | Value::Float(_)));
    if numeric { "value" } else { "category" }
}

/// Distinct values in first-appearance order.
pub(crate) fn distinct<'a>(cells: impl IntoIterator<Item = &'a Value>) -> Vec<Value> {
    let mut seen: Vec<Value> = Vec::new();
    for cell in cells {
        if !seen.contains(cell) {
            seen.push(cell.clone());
        }
    }
    seen
}

/// Text used for dataset ids and series names.
pub(crate) fn label(value: &Value) -> String {
    match value {
        Value::Str(text) => text.clone(),
        Value::Int(number) => number.to_string(),
        Value::Float(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Table, axis_type, distinct, label};
    use crate::error::OptionsError;
    use crate::record::Value;

    #[test]
    fn rows_must_match_column_count() {
        let mut table = Table::new(["x", "y"]);
        table.push_row([1, 2]).expect("row");
        let err = table.push_row([1]).expect_err("short row");
        assert!(matches!(err, OptionsError::InvalidData(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn numeric_columns_map_to_value_axes() {
        let cells = [Value::Int(1), Value::Null, Value::Float(2.5)];
        assert_eq!(axis_type(&cells), "value");
        let cells = [Value::Int(1), Value::from("chr1")];
        assert_eq!(axis_type(&cells), "category");
    }

    #[test]
    fn distinct_keeps_first_appearance_order() {
        let cells = [Value::from("b"), Value::from("a"), Value::from("b")];
        assert_eq!(distinct(&cells), vec![Value::from("b"), Value::from("a")]);
        assert_eq!(label(&Value::Int(3)), "3");
    }
}
