//! Record storage behind the data panel and the relation pages.

use crate::dictionary::{is_valid_table_name, value_of, FormElement, Values};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// What [`RecordProvider::save`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

/// Read and write access to the rows of an element's table
pub trait RecordProvider: Send + Sync {
    /// Rows whose values equal every non-empty entry of `filter` (case-insensitive)
    fn find(&self, element: &FormElement, filter: &Values) -> Result<Vec<Values>>;

    fn get_by_pk(&self, element: &FormElement, pk_values: &Values) -> Result<Option<Values>>;

    /// Update the row with the same primary key, or insert a new one
    fn save(&self, element: &FormElement, values: &Values) -> Result<SaveOutcome>;

    fn delete(&self, element: &FormElement, pk_values: &Values) -> Result<bool>;
}

/// Keeps one JSON array of rows per table in a directory
#[derive(Debug)]
pub struct JsonRecordProvider {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonRecordProvider {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Path of the table file; names that could leave the directory are refused
    fn table_path(&self, element: &FormElement) -> Result<PathBuf> {
        let table = if element.table_name.is_empty() {
            &element.name
        } else {
            &element.table_name
        };
        if !is_valid_table_name(table) {
            return Err(Error::Record(format!("invalid table name '{}'", table)));
        }
        Ok(self.dir.join(format!("{}.json", table)))
    }

    fn read_rows(&self, element: &FormElement) -> Result<Vec<Values>> {
        let path = self.table_path(element)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_rows(&self, element: &FormElement, rows: &[Values]) -> Result<()> {
        let path = self.table_path(element)?;
        fs::write(&path, serde_json::to_string_pretty(rows)?)?;
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Record("record store lock poisoned".to_string()))
    }
}

fn pk_names(element: &FormElement) -> Result<Vec<&str>> {
    let names: Vec<&str> = element.pk_fields().map(|f| f.name.as_str()).collect();
    if names.is_empty() {
        return Err(Error::Record(format!("{} has no primary key", element.name)));
    }
    Ok(names)
}

fn same_pk(pks: &[&str], row: &Values, pk_values: &Values) -> Result<bool> {
    for pk in pks {
        let wanted = value_of(pk_values, pk)
            .ok_or_else(|| Error::Record(format!("primary key value {} not supplied", pk)))?;
        if value_of(row, pk) != Some(wanted) {
            return Ok(false);
        }
    }
    Ok(true)
}

impl RecordProvider for JsonRecordProvider {
    fn find(&self, element: &FormElement, filter: &Values) -> Result<Vec<Values>> {
        let _guard = self.guard()?;
        let rows = self.read_rows(element)?;
        Ok(rows
            .into_iter()
            .filter(|row| {
                filter.iter().filter(|(_, v)| !v.is_empty()).all(|(name, value)| {
                    value_of(row, name).is_some_and(|v| v.eq_ignore_ascii_case(value))
                })
            })
            .collect())
    }

    fn get_by_pk(&self, element: &FormElement, pk_values: &Values) -> Result<Option<Values>> {
        let pks = pk_names(element)?;
        let _guard = self.guard()?;
        for row in self.read_rows(element)? {
            if same_pk(&pks, &row, pk_values)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn save(&self, element: &FormElement, values: &Values) -> Result<SaveOutcome> {
        let pks = pk_names(element)?;
        if let Some(pk) = pks.iter().find(|pk| value_of(values, pk).is_none()) {
            return Err(Error::Record(format!("primary key value {} not supplied", pk)));
        }
        let _guard = self.guard()?;
        let mut rows = self.read_rows(element)?;

        let mut position = None;
        for (i, row) in rows.iter().enumerate() {
            if same_pk(&pks, row, values)? {
                position = Some(i);
                break;
            }
        }

        let outcome = match position {
            Some(i) => {
                let row = &mut rows[i];
                for (name, value) in values {
                    let key = row
                        .keys()
                        .find(|k| k.eq_ignore_ascii_case(name))
                        .cloned()
                        .unwrap_or_else(|| name.clone());
                    row.insert(key, value.clone());
                }
                SaveOutcome::Updated
            }
            None => {
                rows.push(values.clone());
                SaveOutcome::Inserted
            }
        };

        self.write_rows(element, &rows)?;
        tracing::info!(element = %element.name, ?outcome, "record saved");
        Ok(outcome)
    }

    fn delete(&self, element: &FormElement, pk_values: &Values) -> Result<bool> {
        let pks = pk_names(element)?;
        let _guard = self.guard()?;
        let rows = self.read_rows(element)?;
        let before = rows.len();

        let mut kept = Vec::with_capacity(before);
        for row in rows {
            if !same_pk(&pks, &row, pk_values)? {
                kept.push(row);
            }
        }

        let removed = kept.len() != before;
        if removed {
            self.write_rows(element, &kept)?;
            tracing::info!(element = %element.name, "record deleted");
        }
        Ok(removed)
    }
}
