//! Table level metadata: the element and its fields.
//!
//! These types mirror the structure of a database table or view and are the
//! base of every [`FormElement`](super::FormElement).

use serde::{Deserialize, Serialize};

/// Column data type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Float,
    #[default]
    Varchar,
    NVarchar,
    Text,
    NText,
    Date,
    DateTime,
}

impl FieldType {
    /// True for types stored as character data
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FieldType::Varchar | FieldType::NVarchar | FieldType::Text | FieldType::NText
        )
    }

    /// True for types whose size limits input length
    pub fn is_sized(&self) -> bool {
        matches!(self, FieldType::Varchar | FieldType::NVarchar)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Int | FieldType::Float)
    }
}

/// How a field participates in list filters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    None,
    Equal,
    Contain,
    Range,
    MultValuesContain,
    MultValuesEqual,
}

/// Filter configuration of a field
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldFilter {
    #[serde(default, rename = "type")]
    pub mode: FilterMode,
    #[serde(default)]
    pub is_required: bool,
}

/// A column of an element
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ElementField {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub data_type: FieldType,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub is_pk: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub filter: FieldFilter,
}

impl ElementField {
    pub fn new(name: impl Into<String>, data_type: FieldType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Default::default()
        }
    }

    /// Label, falling back to the field name
    pub fn label_or_name(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.name,
        }
    }
}

/// Metadata of a table or view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub custom_proc_name_get: Option<String>,
    #[serde(default)]
    pub custom_proc_name_set: Option<String>,
    #[serde(default)]
    pub fields: Vec<ElementField>,
}

impl Element {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    /// Case-insensitive field lookup
    pub fn field(&self, name: &str) -> Option<&ElementField> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn pk_fields(&self) -> impl Iterator<Item = &ElementField> {
        self.fields.iter().filter(|f| f.is_pk)
    }
}

/// Default name of the read procedure for a table
pub fn default_proc_name_get(table_name: &str) -> String {
    format!("{}Get", table_name)
}

/// Default name of the write procedure for a table
pub fn default_proc_name_set(table_name: &str) -> String {
    format!("{}Set", table_name)
}
