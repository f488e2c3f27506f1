//! Rust source for the record type of a dictionary.

use crate::dictionary::{ElementField, FieldType, FormElement};
use crate::error::Result;
use convert_case::{Case, Casing};
use std::fmt::Write;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while",
];

pub fn to_snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Escape a string for use in Rust string literals
pub fn escape_rust_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn field_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let mut ident = to_snake_case(cleaned.trim());
    if ident.is_empty() {
        ident = "field".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

fn rust_type(field: &ElementField) -> String {
    let base = match field.data_type {
        FieldType::Int => "i64",
        FieldType::Float => "f64",
        FieldType::Date => "chrono::NaiveDate",
        FieldType::DateTime => "chrono::NaiveDateTime",
        FieldType::Varchar | FieldType::NVarchar | FieldType::Text | FieldType::NText => "String",
    };
    if field.is_required || field.is_pk {
        base.to_string()
    } else {
        format!("Option<{}>", base)
    }
}

/// Serde struct mirroring the columns of `dictionary`
pub fn class_source_code(dictionary: &FormElement) -> Result<String> {
    let element = dictionary.to_element();
    let mut output = String::new();

    if let Some(info) = element.info.as_deref().filter(|i| !i.is_empty()) {
        writeln!(output, "/// {}", info)?;
    }
    writeln!(output, "#[derive(Debug, Clone, Serialize, Deserialize)]")?;
    writeln!(output, "pub struct {} {{", to_pascal_case(&element.name))?;

    for field in &element.fields {
        if let Some(label) = field.label.as_deref().filter(|l| !l.is_empty()) {
            writeln!(output, "    /// {}", label)?;
        }
        writeln!(output, "    #[serde(rename = \"{}\")]", escape_rust_string(&field.name))?;
        writeln!(output, "    pub {}: {},", field_identifier(&field.name), rust_type(field))?;
    }

    writeln!(output, "}}")?;
    Ok(output)
}
