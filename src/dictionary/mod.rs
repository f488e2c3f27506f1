//! Data dictionary model, loading and storage.

pub mod form;
pub mod loader;
pub mod store;
pub mod types;

pub use form::{
    ActionKind, DataElementMap, DataFile, DataItem, DataItemValue, FieldAction, FieldBehavior,
    FirstOption, FormComponent, FormElement, FormElementField,
};
pub use loader::{
    is_valid_table_name, load_dictionaries, load_dictionary, parse_yaml, validate_dictionary,
};
pub use store::{DictionaryInfo, DictionaryStore, FileDictionaryStore};
pub use types::{
    default_proc_name_get, default_proc_name_set, Element, ElementField, FieldFilter, FieldType,
    FilterMode,
};

use indexmap::IndexMap;

/// Field name to value, in insertion order
pub type Values = IndexMap<String, String>;

/// Case-insensitive lookup of a value by field name
pub fn value_of<'a>(values: &'a Values, name: &str) -> Option<&'a str> {
    values
        .get(name)
        .or_else(|| {
            values
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
}
