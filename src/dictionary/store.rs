//! Persistent storage of dictionaries.

use super::form::FormElement;
use super::loader::{is_dictionary_file, load_dictionary, validate_dictionary};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary row of a stored dictionary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DictionaryInfo {
    pub name: String,
    pub table_name: String,
    pub info: Option<String>,
    pub modified: DateTime<Utc>,
}

/// CRUD over dictionary metadata
pub trait DictionaryStore {
    fn list(&self) -> Result<Vec<DictionaryInfo>>;

    /// Load a dictionary by name (case-insensitive)
    fn get(&self, name: &str) -> Result<FormElement>;

    fn exists(&self, name: &str) -> Result<bool>;

    /// Insert or replace a dictionary
    fn save(&self, dictionary: &FormElement) -> Result<()>;

    fn delete(&self, name: &str) -> Result<()>;
}

/// Stores one YAML file per dictionary in a directory
#[derive(Debug, Clone)]
pub struct FileDictionaryStore {
    dir: PathBuf,
}

impl FileDictionaryStore {
    /// Open a store, creating the directory if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn dictionary_files(&self) -> Result<Vec<PathBuf>> {
        let mut paths: Vec<_> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_dictionary_file(path))
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn find_file(&self, name: &str) -> Result<Option<PathBuf>> {
        Ok(self.dictionary_files()?.into_iter().find(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| stem.eq_ignore_ascii_case(name))
        }))
    }
}

impl DictionaryStore for FileDictionaryStore {
    fn list(&self) -> Result<Vec<DictionaryInfo>> {
        let mut infos = Vec::new();
        for path in self.dictionary_files()? {
            let dictionary = match load_dictionary(&path) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable dictionary");
                    continue;
                }
            };
            let modified = fs::metadata(&path)?.modified()?;
            infos.push(DictionaryInfo {
                name: dictionary.name,
                table_name: dictionary.table_name,
                info: dictionary.info,
                modified: DateTime::<Utc>::from(modified),
            });
        }
        Ok(infos)
    }

    fn get(&self, name: &str) -> Result<FormElement> {
        match self.find_file(name)? {
            Some(path) => load_dictionary(path),
            None => Err(Error::DictionaryNotFound(name.to_string())),
        }
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.find_file(name)?.is_some())
    }

    fn save(&self, dictionary: &FormElement) -> Result<()> {
        validate_dictionary(dictionary)?;

        if let Some(existing) = self.find_file(&dictionary.name)? {
            fs::remove_file(existing)?;
        }

        let path = self.dir.join(format!("{}.yaml", dictionary.name));
        fs::write(&path, serde_yaml::to_string(dictionary)?)?;
        tracing::info!(name = %dictionary.name, path = %path.display(), "dictionary saved");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        match self.find_file(name)? {
            Some(path) => {
                fs::remove_file(&path)?;
                tracing::info!(name, "dictionary deleted");
                Ok(())
            }
            None => Err(Error::DictionaryNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{FieldType, FormElementField};

    fn customer() -> FormElement {
        let mut dictionary = FormElement::new("Customer");
        dictionary.table_name = "tb_customer".to_string();
        dictionary.fields.push(FormElementField::new("Id", FieldType::Int));
        dictionary
    }

    #[test]
    fn test_save_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDictionaryStore::open(dir.path()).unwrap();

        store.save(&customer()).unwrap();
        assert!(store.exists("CUSTOMER").unwrap());

        let loaded = store.get("customer").unwrap();
        assert_eq!(loaded, customer());

        store.delete("Customer").unwrap();
        assert!(!store.exists("Customer").unwrap());
        assert!(matches!(store.get("Customer"), Err(Error::DictionaryNotFound(_))));
    }

    #[test]
    fn test_list_reports_table_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDictionaryStore::open(dir.path()).unwrap();
        store.save(&customer()).unwrap();

        let infos = store.list().unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].table_name, "tb_customer");
    }
}
