//! Management of stored dictionaries: creation, duplication, import/export and
//! generated artifacts.
//!
//! Validation failures are collected per key (`Name`, `DB`...) instead of being
//! returned as errors, so callers can show them all in a
//! [`ValidationSummary`](crate::components::ValidationSummary).

pub mod scripts;
pub mod source;

pub use scripts::{create_table_script, DatabaseType};

use crate::dictionary::{
    default_proc_name_get, default_proc_name_set, validate_dictionary, DataItem, DataItemValue,
    DictionaryStore, Element, FieldType, FilterMode, FormComponent, FormElement, FormElementField,
    Values,
};
use crate::error::Result;
use crate::panel::FieldErrors;
use crate::translate;
use regex::Regex;
use std::io::{Cursor, Read, Write};
use std::sync::OnceLock;

const MAX_NAME_LENGTH: usize = 64;

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid dictionary name regex"))
}

pub struct ElementService<S: DictionaryStore> {
    store: S,
    errors: FieldErrors,
}

impl<S: DictionaryStore> ElementService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            errors: FieldErrors::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Keeps the first message per key
    fn add_error(&mut self, key: &str, message: String) {
        self.errors.entry(key.to_string()).or_insert(message);
    }

    /// Dictionary name derived from a table name: the `tb_` / `tb` prefix is
    /// dropped, the first letter upper-cased and underscores removed, so
    /// `tb_order_item` becomes `Orderitem`.
    pub fn dictionary_name(table_name: &str) -> String {
        let has_prefix = |prefix: &str| {
            table_name
                .get(..prefix.len())
                .is_some_and(|p| p.eq_ignore_ascii_case(prefix))
        };
        let stripped = if has_prefix("tb_") {
            &table_name[3..]
        } else if has_prefix("tb") {
            &table_name[2..]
        } else {
            table_name
        };

        let spaced = stripped.replace('_', " ");
        let mut chars = spaced.chars();
        let capitalised = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        capitalised.replace(' ', "")
    }

    /// Checks a dictionary name is present, short enough and usable as a file name
    pub fn validate_name(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            self.add_error("Name", translate::key("Mandatory dictionary name field"));
            return false;
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            self.add_error(
                "Name",
                translate::key_with("Dictionary name cannot exceed {0} characters", &[&MAX_NAME_LENGTH]),
            );
            return false;
        }
        if !name_regex().is_match(name) {
            self.add_error("Name", translate::key("Dictionary name contains invalid characters"));
            return false;
        }
        true
    }

    /// Validates the name of a dictionary about to be stored
    pub fn validate_entity(&mut self, name: &str) -> Result<bool> {
        if !self.validate_name(name) {
            return Ok(false);
        }
        if self.store.exists(name)? {
            self.add_error(
                "Name",
                format!("{}{}", translate::key("There is already a dictionary with the name "), name),
            );
        }
        Ok(self.is_valid())
    }

    /// Validates a table about to get a dictionary. `structure` holds the table
    /// columns when fields are imported.
    pub fn validate_new_entity(&mut self, table_name: &str, import_fields: bool, structure: Option<&Element>) -> Result<bool> {
        if self.validate_name(table_name) && self.store.exists(&Self::dictionary_name(table_name))? {
            self.add_error(
                "Name",
                format!("{}{}", translate::key("There is already a dictionary with the name "), table_name),
            );
        }

        if import_fields && self.is_valid() && structure.is_none() {
            self.add_error("Name", translate::key("Table not found"));
        }
        Ok(self.is_valid())
    }

    /// Create and store the dictionary of a table, optionally with its columns
    pub fn create_entity(&mut self, table_name: &str, structure: Option<Element>) -> Result<Option<FormElement>> {
        let import_fields = structure.is_some();
        if !self.validate_new_entity(table_name, import_fields, structure.as_ref())? {
            return Ok(None);
        }

        let mut form_element = structure.map(FormElement::from).unwrap_or_default();
        form_element.table_name = table_name.to_string();
        form_element.name = Self::dictionary_name(table_name);
        form_element.custom_proc_name_get = Some(default_proc_name_get(table_name));
        form_element.custom_proc_name_set = Some(default_proc_name_set(table_name));
        form_element.title = Some(form_element.name.clone());

        self.store.save(&form_element)?;
        tracing::info!(name = %form_element.name, table = table_name, "dictionary created");
        Ok(Some(form_element))
    }

    /// Store a copy of `origin_name` under `new_name`
    pub fn duplicate_entity(&mut self, origin_name: &str, new_name: &str) -> Result<bool> {
        if self.validate_entity(new_name)? {
            let mut dictionary = self.store.get(origin_name)?;
            dictionary.name = new_name.to_string();
            self.store.save(&dictionary)?;
            tracing::info!(origin = origin_name, name = new_name, "dictionary duplicated");
        }
        Ok(self.is_valid())
    }

    pub fn class_source_code(&self, name: &str) -> Result<String> {
        source::class_source_code(&self.store.get(name)?)
    }

    pub fn scripts(&self, name: &str, db_type: DatabaseType) -> Result<String> {
        create_table_script(&self.store.get(name)?.to_element(), db_type)
    }

    /// Zip archive holding one `{name}.json` entry per dictionary
    pub fn export(&self, names: &[String]) -> Result<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        for name in names {
            let dictionary = self.store.get(name)?;
            zip.start_file(format!("{}.json", dictionary.name), options)?;
            zip.write_all(serde_json::to_string_pretty(&dictionary)?.as_bytes())?;
        }

        let cursor = zip.finish()?;
        tracing::info!(count = names.len(), "dictionaries exported");
        Ok(cursor.into_inner())
    }

    /// Store a dictionary from its JSON form
    pub fn import(&mut self, json: &str) -> Result<bool> {
        let dictionary: FormElement = match serde_json::from_str(json) {
            Ok(d) => d,
            Err(e) => {
                self.add_error("Import", translate::key_with("Invalid dictionary file: {0}", &[&e]));
                return Ok(false);
            }
        };

        if !self.validate_name(&dictionary.name) {
            return Ok(false);
        }
        if let Err(e) = validate_dictionary(&dictionary) {
            self.add_error("Import", e.to_string());
            return Ok(false);
        }

        self.store.save(&dictionary)?;
        Ok(true)
    }

    /// Import every `.json` entry of a zip archive; returns how many were stored
    pub fn import_zip(&mut self, bytes: &[u8]) -> Result<usize> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut imported = 0;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() || !file.name().to_lowercase().ends_with(".json") {
                continue;
            }
            let mut json = String::new();
            file.read_to_string(&mut json)?;

            if self.import(&json)? {
                imported += 1;
            }
        }

        tracing::info!(imported, "dictionaries imported");
        Ok(imported)
    }

    /// Rows of the dictionary list, one per stored dictionary
    pub fn dictionary_list_values(&self) -> Result<Vec<Values>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .map(|info| {
                let mut row = Values::new();
                row.insert("type".to_string(), "F".to_string());
                row.insert("name".to_string(), info.name.clone());
                row.insert("namefilter".to_string(), info.name);
                row.insert("tablename".to_string(), info.table_name);
                row.insert("info".to_string(), info.info.unwrap_or_default());
                row.insert("sync".to_string(), "1".to_string());
                row.insert("modified".to_string(), info.modified.format("%Y-%m-%d %H:%M:%S").to_string());
                row
            })
            .collect())
    }
}

fn list_field(name: &str, label: &str, data_type: FieldType, size: usize) -> FormElementField {
    let mut field = FormElementField::new(name, data_type);
    field.label = Some(label.to_string());
    field.size = size;
    field
}

fn combo(items: &[(&str, &str)]) -> DataItem {
    DataItem {
        items: items.iter().map(|(id, text)| DataItemValue::new(*id, *text)).collect(),
        ..Default::default()
    }
}

/// Form used to browse the stored dictionaries
pub fn dictionary_list_element() -> FormElement {
    let mut form = FormElement::new("DictionaryList");
    form.title = Some("dictform".to_string());

    let mut kind = list_field("type", "Type", FieldType::Varchar, 1);
    kind.is_pk = true;
    kind.visible_expression = "val:0".to_string();
    kind.default_value = Some("val:F".to_string());
    kind.component = FormComponent::ComboBox;
    kind.data_item = Some(combo(&[("F", "Form"), ("T", "Table")]));
    form.fields.push(kind);

    let mut name = list_field("name", "Dictionary Name", FieldType::Varchar, MAX_NAME_LENGTH);
    name.is_pk = true;
    name.is_required = true;
    name.visible_expression = "exp:{pagestate} <> 'FILTER'".to_string();
    form.fields.push(name);

    let mut name_filter = list_field("namefilter", "Dictionary Name", FieldType::Varchar, 30);
    name_filter.filter.mode = FilterMode::Contain;
    name_filter.visible_expression = "exp:{pagestate} = 'FILTER'".to_string();
    form.fields.push(name_filter);

    let mut table = list_field("tablename", "Table Name", FieldType::Varchar, MAX_NAME_LENGTH);
    table.filter.mode = FilterMode::Contain;
    form.fields.push(table);

    let mut info = list_field("info", "Info", FieldType::Varchar, 150);
    info.filter.mode = FilterMode::Contain;
    form.fields.push(info);

    let mut owner = list_field("owner", "Owner", FieldType::Varchar, 64);
    owner.visible_expression = "exp:{pagestate} = 'VIEW'".to_string();
    form.fields.push(owner);

    let mut sync = list_field("sync", "Sync", FieldType::Varchar, 1);
    sync.visible_expression = "exp:{pagestate} <> 'FILTER'".to_string();
    sync.component = FormComponent::ComboBox;
    sync.data_item = Some(combo(&[("1", "Yes"), ("0", "No")]));
    form.fields.push(sync);

    let mut modified = list_field("modified", "Last Modified", FieldType::DateTime, 0);
    modified.component = FormComponent::DateTime;
    modified.filter.mode = FilterMode::Range;
    form.fields.push(modified);

    let mut json = list_field("json", "Object", FieldType::NText, 0);
    json.visible_expression = "exp:{pagestate} = 'VIEW'".to_string();
    json.component = FormComponent::TextArea;
    json.export = false;
    form.fields.push(json);

    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{ElementField, FileDictionaryStore};
    use crate::expression::{ExpressionManager, ExpressionOptions, PageState};

    fn service() -> (tempfile::TempDir, ElementService<FileDictionaryStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDictionaryStore::open(dir.path()).unwrap();
        (dir, ElementService::new(store))
    }

    fn structure() -> Element {
        let mut element = Element::new("tb_customer", "tb_customer");
        let mut id = ElementField::new("Id", FieldType::Int);
        id.is_pk = true;
        element.fields.push(id);
        element.fields.push(ElementField::new("Name", FieldType::Varchar));
        element
    }

    #[test]
    fn test_dictionary_name() {
        type Service = ElementService<FileDictionaryStore>;
        assert_eq!(Service::dictionary_name("tb_customer"), "Customer");
        assert_eq!(Service::dictionary_name("TB_order_item"), "Orderitem");
        assert_eq!(Service::dictionary_name("tbProduct"), "Product");
        assert_eq!(Service::dictionary_name("sales"), "Sales");
        assert_eq!(Service::dictionary_name(""), "");
    }

    #[test]
    fn test_validate_name() {
        let (_dir, mut service) = service();
        assert!(service.validate_name("Customer_2"));
        assert!(!service.validate_name(" "));
        assert_eq!(
            service.errors().get("Name").map(String::as_str),
            Some("Mandatory dictionary name field")
        );

        service.clear_errors();
        assert!(!service.validate_name("bad name"));
        assert!(!service.validate_name(&"x".repeat(65)));
    }

    #[test]
    fn test_create_entity() {
        let (_dir, mut service) = service();
        let created = service.create_entity("tb_customer", Some(structure())).unwrap().unwrap();

        assert_eq!(created.name, "Customer");
        assert_eq!(created.table_name, "tb_customer");
        assert_eq!(created.custom_proc_name_get.as_deref(), Some("tb_customerGet"));
        assert_eq!(created.fields.len(), 2);
        assert!(service.store().exists("customer").unwrap());

        assert!(service.create_entity("tb_customer", None).unwrap().is_none());
        assert!(service.errors()["Name"].starts_with("There is already a dictionary with the name"));
    }

    #[test]
    fn test_import_fields_need_structure() {
        let (_dir, mut service) = service();
        assert!(!service.validate_new_entity("tb_missing", true, None).unwrap());
        assert_eq!(service.errors()["Name"], "Table not found");
    }

    #[test]
    fn test_duplicate_entity() {
        let (_dir, mut service) = service();
        service.create_entity("tb_customer", Some(structure())).unwrap();

        assert!(service.duplicate_entity("Customer", "Client").unwrap());
        let copy = service.store().get("Client").unwrap();
        assert_eq!(copy.table_name, "tb_customer");

        assert!(!service.duplicate_entity("Customer", "Client").unwrap());
    }

    #[test]
    fn test_export_then_import_zip() {
        let (_dir, mut service) = service();
        service.create_entity("tb_customer", Some(structure())).unwrap();
        let bytes = service.export(&["Customer".to_string()]).unwrap();

        let (_other_dir, mut target) = self::service();
        assert_eq!(target.import_zip(&bytes).unwrap(), 1);
        assert_eq!(target.store().get("Customer").unwrap().fields.len(), 2);
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        let (_dir, mut service) = service();
        assert!(!service.import("{ not json").unwrap());
        assert!(service.errors().contains_key("Import"));
    }

    #[test]
    fn test_list_values() {
        let (_dir, mut service) = service();
        service.create_entity("tb_customer", Some(structure())).unwrap();

        let rows = service.dictionary_list_values().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Customer");
        assert_eq!(rows[0]["tablename"], "tb_customer");
    }

    #[test]
    fn test_list_element_visibility() {
        let form = dictionary_list_element();
        let visible = |state: PageState| -> Vec<String> {
            let options = ExpressionOptions::new(&Values::new(), Values::new(), state);
            let manager = ExpressionManager::new(&options);
            form.fields
                .iter()
                .filter(|f| manager.is_visible(f).unwrap())
                .map(|f| f.name.clone())
                .collect()
        };

        assert_eq!(visible(PageState::Filter), ["namefilter", "tablename", "info", "modified"]);
        assert_eq!(visible(PageState::List), ["name", "tablename", "info", "sync", "modified"]);
        assert!(visible(PageState::View).contains(&"json".to_string()));
        assert!(!form.field("json").unwrap().export);
    }
}
