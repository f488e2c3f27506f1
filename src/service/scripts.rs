//! CREATE TABLE scripts for dictionaries.

use crate::dictionary::{Element, ElementField, FieldType, FilterMode};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Target database of generated scripts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    #[default]
    PostgreSQL,
    MySQL,
    MariaDB,
}

impl DatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::PostgreSQL => "postgresql",
            DatabaseType::MySQL => "mysql",
            DatabaseType::MariaDB => "mariadb",
        }
    }

    /// MySQL and MariaDB share syntax
    pub fn is_mysql_like(&self) -> bool {
        matches!(self, DatabaseType::MySQL | DatabaseType::MariaDB)
    }

    /// Detect the database from a connection url, defaulting to PostgreSQL
    pub fn from_url(url: &str) -> DatabaseType {
        if url.starts_with("mysql://") {
            DatabaseType::MySQL
        } else if url.starts_with("mariadb://") {
            DatabaseType::MariaDB
        } else {
            DatabaseType::PostgreSQL
        }
    }

    pub fn parse(name: &str) -> Option<DatabaseType> {
        match name.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Some(DatabaseType::PostgreSQL),
            "mysql" => Some(DatabaseType::MySQL),
            "mariadb" => Some(DatabaseType::MariaDB),
            _ => None,
        }
    }

    fn quote(&self, identifier: &str) -> String {
        if self.is_mysql_like() {
            format!("`{}`", identifier.replace('`', "``"))
        } else {
            format!("\"{}\"", identifier.replace('"', "\"\""))
        }
    }
}

fn column_type(field: &ElementField, db_type: DatabaseType) -> String {
    let size = if field.size > 0 { field.size } else { 255 };
    match (field.data_type, db_type.is_mysql_like()) {
        (FieldType::Int, _) => "INT".to_string(),
        (FieldType::Float, true) => "DOUBLE".to_string(),
        (FieldType::Float, false) => "DOUBLE PRECISION".to_string(),
        (FieldType::Varchar, _) => format!("VARCHAR({})", size),
        (FieldType::NVarchar, true) => format!("VARCHAR({}) CHARACTER SET utf8mb4", size),
        (FieldType::NVarchar, false) => format!("VARCHAR({})", size),
        (FieldType::Text, true) => "TEXT".to_string(),
        (FieldType::NText, true) => "LONGTEXT CHARACTER SET utf8mb4".to_string(),
        (FieldType::Text | FieldType::NText, false) => "TEXT".to_string(),
        (FieldType::Date, _) => "DATE".to_string(),
        (FieldType::DateTime, true) => "DATETIME".to_string(),
        (FieldType::DateTime, false) => "TIMESTAMP".to_string(),
    }
}

fn table_name(element: &Element) -> &str {
    if element.table_name.is_empty() {
        &element.name
    } else {
        &element.table_name
    }
}

/// Script creating the table of `element` and indexes for its filter fields
pub fn create_table_script(element: &Element, db_type: DatabaseType) -> Result<String> {
    let table = table_name(element);
    let mut output = String::new();

    writeln!(output, "-- Table for dictionary {}", element.name)?;
    writeln!(output, "-- Database type: {}", db_type.as_str())?;
    writeln!(output, "CREATE TABLE IF NOT EXISTS {} (", db_type.quote(table))?;

    let pks: Vec<String> = element.pk_fields().map(|f| db_type.quote(&f.name)).collect();
    let count = element.fields.len();
    for (i, field) in element.fields.iter().enumerate() {
        let not_null = if field.is_required || field.is_pk { " NOT NULL" } else { "" };
        let comma = if i + 1 < count || !pks.is_empty() { "," } else { "" };
        writeln!(
            output,
            "    {} {}{}{}",
            db_type.quote(&field.name),
            column_type(field, db_type),
            not_null,
            comma
        )?;
    }

    if !pks.is_empty() {
        writeln!(output, "    PRIMARY KEY ({})", pks.join(", "))?;
    }
    writeln!(output, ");")?;

    let indexed = element
        .fields
        .iter()
        .filter(|f| !f.is_pk && f.filter.mode != FilterMode::None);
    for field in indexed {
        let index_name = format!("ix_{}_{}", table, field.name).to_lowercase();
        let if_not_exists = if db_type.is_mysql_like() { "" } else { " IF NOT EXISTS" };
        writeln!(
            output,
            "CREATE INDEX{} {} ON {}({});",
            if_not_exists,
            db_type.quote(&index_name),
            db_type.quote(table),
            db_type.quote(&field.name)
        )?;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Element {
        let mut element = Element::new("Customer", "tb_customer");

        let mut id = ElementField::new("Id", FieldType::Int);
        id.is_pk = true;
        element.fields.push(id);

        let mut name = ElementField::new("Name", FieldType::NVarchar);
        name.size = 80;
        name.is_required = true;
        name.filter.mode = FilterMode::Contain;
        element.fields.push(name);

        element.fields.push(ElementField::new("Created", FieldType::DateTime));
        element
    }

    #[test]
    fn test_postgres_script() {
        let script = create_table_script(&customer(), DatabaseType::PostgreSQL).unwrap();
        assert!(script.contains("CREATE TABLE IF NOT EXISTS \"tb_customer\" (\n"));
        assert!(script.contains("    \"Id\" INT NOT NULL,\n"));
        assert!(script.contains("    \"Name\" VARCHAR(80) NOT NULL,\n"));
        assert!(script.contains("    \"Created\" TIMESTAMP,\n"));
        assert!(script.contains("    PRIMARY KEY (\"Id\")\n);"));
        assert!(script.contains("CREATE INDEX IF NOT EXISTS \"ix_tb_customer_name\" ON \"tb_customer\"(\"Name\");"));
    }

    #[test]
    fn test_mysql_script() {
        let script = create_table_script(&customer(), DatabaseType::MySQL).unwrap();
        assert!(script.contains("`Name` VARCHAR(80) CHARACTER SET utf8mb4 NOT NULL,"));
        assert!(script.contains("`Created` DATETIME,"));
        assert!(script.contains("CREATE INDEX `ix_tb_customer_name` ON `tb_customer`(`Name`);"));
    }

    #[test]
    fn test_without_primary_key() {
        let mut element = Element::new("Log", "");
        element.fields.push(ElementField::new("Message", FieldType::Text));
        let script = create_table_script(&element, DatabaseType::PostgreSQL).unwrap();
        assert!(script.contains("    \"Message\" TEXT\n);"));
    }

    #[test]
    fn test_database_from_url() {
        assert_eq!(DatabaseType::from_url("mysql://localhost/db"), DatabaseType::MySQL);
        assert_eq!(DatabaseType::from_url("postgres://localhost/db"), DatabaseType::PostgreSQL);
        assert_eq!(DatabaseType::parse("MariaDB"), Some(DatabaseType::MariaDB));
    }
}
