//! Dictionary file loader.
//!
//! Dictionaries are YAML (`.yaml`, `.yml`) or JSON (`.json`) files. A YAML file may
//! either hold the form element directly or wrap it under a `dictionary` key:
//!
//! ```yaml
//! dictionary:
//!   name: Customer
//!   table_name: tb_customer
//!   fields:
//!     - name: Id
//!       type: Int
//!       is_pk: true
//! ```

use super::form::{FormComponent, FormElement, FormElementField};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Wrapper for the `dictionary:` YAML layout
#[derive(Debug, Deserialize)]
struct DictionarySpec {
    dictionary: FormElement,
}

/// Load every dictionary file in a directory
///
/// Files with other extensions are skipped. Any dictionary failing to parse or
/// validate aborts the load.
pub fn load_dictionaries<P: AsRef<Path>>(dir: P) -> Result<Vec<FormElement>> {
    let dir_path = dir.as_ref();

    if !dir_path.is_dir() {
        return Err(Error::InvalidDictionary(format!(
            "Path is not a directory: {}",
            dir_path.display()
        )));
    }

    let mut paths: Vec<_> = fs::read_dir(dir_path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_dictionary_file(path))
        .collect();
    paths.sort();

    let mut dictionaries = Vec::with_capacity(paths.len());
    for path in paths {
        let dictionary = load_dictionary(&path).map_err(|e| {
            Error::InvalidDictionary(format!("Failed to load {}: {}", path.display(), e))
        })?;
        dictionaries.push(dictionary);
    }

    tracing::debug!(count = dictionaries.len(), dir = %dir_path.display(), "loaded dictionaries");
    Ok(dictionaries)
}

/// True for files the loader understands
pub fn is_dictionary_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml") | Some("json")
    )
}

/// Load and validate a single dictionary file
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<FormElement> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let dictionary = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str::<FormElement>(&content)?,
        _ => parse_yaml(&content)?,
    };

    validate_dictionary(&dictionary)?;
    Ok(dictionary)
}

/// Parse a dictionary from YAML text, accepting both layouts
pub fn parse_yaml(content: &str) -> Result<FormElement> {
    if let Ok(spec) = serde_yaml::from_str::<DictionarySpec>(content) {
        return Ok(spec.dictionary);
    }

    Ok(serde_yaml::from_str::<FormElement>(content)?)
}

/// Validate dictionary definition
///
/// Checks for:
/// - Non-empty dictionary and field names
/// - Table name usable as a storage file name
/// - Unique field names (case-insensitive)
/// - Data sources required by the chosen component
pub fn validate_dictionary(dictionary: &FormElement) -> Result<()> {
    if dictionary.name.trim().is_empty() {
        return Err(Error::InvalidDictionary(
            "Dictionary name cannot be empty".to_string(),
        ));
    }

    if !dictionary.table_name.is_empty() && !is_valid_table_name(&dictionary.table_name) {
        return Err(Error::InvalidDictionary(format!(
            "Invalid table name '{}' in dictionary '{}'",
            dictionary.table_name, dictionary.name
        )));
    }

    let mut seen = HashSet::new();
    for field in &dictionary.fields {
        validate_field(field, &dictionary.name)?;

        if !seen.insert(field.name.to_lowercase()) {
            return Err(Error::InvalidDictionary(format!(
                "Field '{}' is declared twice in dictionary '{}'",
                field.name, dictionary.name
            )));
        }
    }

    Ok(())
}

/// Letters, digits, `_` and single dots between parts (`dbo.tb_customer`)
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

fn validate_field(field: &FormElementField, dictionary_name: &str) -> Result<()> {
    if field.name.trim().is_empty() {
        return Err(Error::InvalidDictionary(format!(
            "Field name cannot be empty in dictionary '{}'",
            dictionary_name
        )));
    }

    let missing = match field.component {
        FormComponent::ComboBox | FormComponent::Search if field.data_item.is_none() => {
            Some("data_item")
        }
        FormComponent::File if field.data_file.is_none() => Some("data_file"),
        FormComponent::Lookup if field.data_element_map.is_none() => Some("data_element_map"),
        _ => None,
    };

    if let Some(setting) = missing {
        return Err(Error::InvalidDictionary(format!(
            "Field '{}' in dictionary '{}' uses {:?} but has no {}",
            field.name, dictionary_name, field.component, setting
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::FieldType;

    #[test]
    fn test_parse_wrapped_and_bare_yaml() {
        let wrapped = "dictionary:\n  name: Customer\n  table_name: tb_customer\n";
        let bare = "name: Customer\ntable_name: tb_customer\n";

        assert_eq!(parse_yaml(wrapped).unwrap().table_name, "tb_customer");
        assert_eq!(parse_yaml(bare).unwrap().name, "Customer");
    }

    #[test]
    fn test_table_name_must_be_plain() {
        let mut dictionary = FormElement::new("Customer");
        dictionary.table_name = "dbo.tb_customer".to_string();
        assert!(validate_dictionary(&dictionary).is_ok());

        for table in ["../escaped", "a/b", "c:\\tmp", "tb..x", ".hidden", "tb\ncustomer"] {
            dictionary.table_name = table.to_string();
            assert!(validate_dictionary(&dictionary).is_err(), "{} accepted", table);
        }
    }

    #[test]
    fn test_validate_requires_name() {
        let dictionary = FormElement::new("");
        assert!(validate_dictionary(&dictionary).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_fields() {
        let mut dictionary = FormElement::new("Customer");
        dictionary.fields.push(FormElementField::new("Name", FieldType::Varchar));
        dictionary.fields.push(FormElementField::new("NAME", FieldType::Varchar));

        assert!(validate_dictionary(&dictionary).is_err());
    }

    #[test]
    fn test_validate_combo_needs_data_item() {
        let mut dictionary = FormElement::new("Customer");
        let mut field = FormElementField::new("Status", FieldType::Varchar);
        field.component = FormComponent::ComboBox;
        dictionary.fields.push(field);

        let err = validate_dictionary(&dictionary).unwrap_err();
        assert!(err.to_string().contains("data_item"));
    }

    #[test]
    fn test_load_dictionaries_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("customer.yaml"), "name: Customer\n").unwrap();
        fs::write(dir.path().join("order.json"), r#"{"name":"Order"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let dictionaries = load_dictionaries(dir.path()).unwrap();

        let names: Vec<_> = dictionaries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Customer", "Order"]);
    }
}
