//! Editable row tables.
//!
//! Every bill section and reference-data list is a growable table of rows
//! edited one cell at a time. Rows are addressed by position; the serial
//! number shown to the user is the 1-based position.

use thiserror::Error;

use optodesk_core::models::{
    BirthAllergyField, BirthAllergyRow, GeneralField, GeneralRow, HealthField, HealthHistoryRow,
    MedicationRow, OcularField, OcularHistoryRow,
};

/// Table errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Row {index} out of range (table has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Table must keep at least {0} row(s)")]
    MinimumRows(usize),

    #[error("No record is open for editing")]
    NotEditing,
}

pub type TableResult<T> = Result<T, TableError>;

/// A row with addressable text cells.
pub trait EditableRow: Default + Clone {
    type Field: Copy;

    fn set_field(&mut self, field: Self::Field, value: String);
}

impl EditableRow for GeneralRow {
    type Field = GeneralField;

    fn set_field(&mut self, field: GeneralField, value: String) {
        self.set(field, value);
    }
}

impl EditableRow for HealthHistoryRow {
    type Field = HealthField;

    fn set_field(&mut self, field: HealthField, value: String) {
        self.set(field, value);
    }
}

impl EditableRow for OcularHistoryRow {
    type Field = OcularField;

    fn set_field(&mut self, field: OcularField, value: String) {
        self.set(field, value);
    }
}

impl EditableRow for BirthAllergyRow {
    type Field = BirthAllergyField;

    fn set_field(&mut self, field: BirthAllergyField, value: String) {
        self.set(field, value);
    }
}

// Single-column rows

impl EditableRow for MedicationRow {
    type Field = ();

    fn set_field(&mut self, _: (), value: String) {
        self.medication = value;
    }
}

impl EditableRow for String {
    type Field = ();

    fn set_field(&mut self, _: (), value: String) {
        *self = value;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowTable<R> {
    rows: Vec<R>,
    min_rows: usize,
}

impl<R: EditableRow> Default for RowTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EditableRow> RowTable<R> {
    /// Empty table with no minimum.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            min_rows: 0,
        }
    }

    /// Table that starts with, and never drops below, `min` blank rows.
    pub fn with_min_rows(min: usize) -> Self {
        Self {
            rows: vec![R::default(); min],
            min_rows: min,
        }
    }

    /// Table holding `rows`, padded with blanks up to `min`.
    pub fn from_rows(rows: Vec<R>, min: usize) -> Self {
        let mut table = Self {
            rows,
            min_rows: min,
        };
        table.pad();
        table
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// 1-based serial number shown in the "S.No" column.
    pub fn serial(index: usize) -> usize {
        index + 1
    }

    /// Append a blank row, returning its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(R::default());
        self.rows.len() - 1
    }

    pub fn update_row(&mut self, index: usize, field: R::Field, value: String) -> TableResult<()> {
        self.update_with(index, |row| row.set_field(field, value))
    }

    pub fn update_with(&mut self, index: usize, f: impl FnOnce(&mut R)) -> TableResult<()> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(TableError::IndexOutOfRange { index, len })?;
        f(row);
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> TableResult<R> {
        let len = self.rows.len();
        if index >= len {
            return Err(TableError::IndexOutOfRange { index, len });
        }
        if len <= self.min_rows {
            return Err(TableError::MinimumRows(self.min_rows));
        }
        Ok(self.rows.remove(index))
    }

    /// Back to the initial blank state.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.pad();
    }

    fn pad(&mut self) {
        while self.rows.len() < self.min_rows {
            self.rows.push(R::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_update_remove() {
        let mut table: RowTable<GeneralRow> = RowTable::new();
        let i = table.add_row();
        table.add_row();
        table
            .update_row(i, GeneralField::ChiefComplaint, "Headache".into())
            .unwrap();

        assert_eq!(table.get(0).unwrap().cc, "Headache");
        assert_eq!(RowTable::<GeneralRow>::serial(1), 2);

        let removed = table.remove_row(0).unwrap();
        assert_eq!(removed.cc, "Headache");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut table: RowTable<HealthHistoryRow> = RowTable::new();
        assert_eq!(
            table.update_row(0, HealthField::Condition, "x".into()),
            Err(TableError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert!(matches!(
            table.remove_row(3),
            Err(TableError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_min_rows_kept() {
        let mut table: RowTable<String> = RowTable::with_min_rows(1);
        assert_eq!(table.rows(), [String::new()]);
        assert_eq!(table.remove_row(0), Err(TableError::MinimumRows(1)));

        table.update_row(0, (), "Diabetes".into()).unwrap();
        table.add_row();
        table.remove_row(0).unwrap();
        assert_eq!(table.len(), 1);

        table.reset();
        assert_eq!(table.rows(), [String::new()]);
    }

    #[test]
    fn test_from_rows_pads() {
        let table = RowTable::from_rows(Vec::<String>::new(), 1);
        assert_eq!(table.len(), 1);

        let table = RowTable::from_rows(vec!["a".to_string(), "b".to_string()], 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_update_with() {
        let mut table: RowTable<MedicationRow> = RowTable::with_min_rows(1);
        table
            .update_with(0, |row| row.medication.push_str("Timolol"))
            .unwrap();
        assert_eq!(table.rows()[0].medication, "Timolol");
    }
}
