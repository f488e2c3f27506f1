//! Localized UI strings.
//!
//! Controls pass every user-facing text through [`key`] / [`key_with`]. The
//! process-wide [`Translator`] is installed once at startup; until then texts are
//! returned unchanged.
//!
//! Resource files are flat YAML maps from the English text to its translation:
//!
//! ```yaml
//! "Manage Files": "Gerenciar Arquivos"
//! "{0} Selected Files": "{0} Arquivos Selecionados"
//! ```

use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{OnceLock, RwLock};

/// Culture specific string table, keyed case-insensitively
#[derive(Debug, Clone, Default)]
pub struct Translator {
    culture: String,
    strings: HashMap<String, String>,
}

impl Translator {
    pub fn new(culture: impl Into<String>) -> Self {
        Self {
            culture: culture.into(),
            strings: HashMap::new(),
        }
    }

    /// Load a YAML resource file for a culture
    pub fn from_file<P: AsRef<Path>>(culture: impl Into<String>, path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let strings: HashMap<String, String> = serde_yaml::from_str(&content)?;

        let mut translator = Self::new(culture);
        for (key, value) in strings {
            translator.insert(key, value);
        }
        tracing::debug!(culture = %translator.culture, count = translator.len(), "loaded resource strings");
        Ok(translator)
    }

    pub fn culture(&self) -> &str {
        &self.culture
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.strings.insert(key.as_ref().to_lowercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Translate a text, returning it unchanged when unknown
    pub fn key(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.strings
            .get(&text.to_lowercase())
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }

    /// Translate a text and replace its `{0}`, `{1}`... markers
    pub fn key_with(&self, text: &str, args: &[&dyn std::fmt::Display]) -> String {
        format_args_indexed(&self.key(text), args)
    }
}

fn format_args_indexed(template: &str, args: &[&dyn std::fmt::Display]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{}}}", i), &arg.to_string());
    }
    out
}

fn global() -> &'static RwLock<Translator> {
    static TRANSLATOR: OnceLock<RwLock<Translator>> = OnceLock::new();
    TRANSLATOR.get_or_init(|| RwLock::new(Translator::new("en-us")))
}

/// Replace the process-wide translator
pub fn install(translator: Translator) {
    match global().write() {
        Ok(mut guard) => *guard = translator,
        Err(poisoned) => *poisoned.into_inner() = translator,
    }
}

/// Translate with the process-wide translator
pub fn key(text: &str) -> String {
    match global().read() {
        Ok(guard) => guard.key(text),
        Err(poisoned) => poisoned.into_inner().key(text),
    }
}

/// Translate and format with the process-wide translator
pub fn key_with(text: &str, args: &[&dyn std::fmt::Display]) -> String {
    format_args_indexed(&key(text), args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_pass_through() {
        let translator = Translator::new("en-us");
        assert_eq!(translator.key("Manage Files"), "Manage Files");
        assert_eq!(translator.key(""), "");
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut translator = Translator::new("pt-br");
        translator.insert("Manage Files", "Gerenciar Arquivos");
        assert_eq!(translator.key("manage files"), "Gerenciar Arquivos");
    }

    #[test]
    fn test_key_with_arguments() {
        let mut translator = Translator::new("pt-br");
        translator.insert("{0} Selected Files", "{0} Arquivos Selecionados");
        assert_eq!(translator.key_with("{0} Selected Files", &[&3]), "3 Arquivos Selecionados");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.pt-br.yaml");
        std::fs::write(&path, "\"Files\": \"Arquivos\"\n").unwrap();

        let translator = Translator::from_file("pt-br", &path).unwrap();
        assert_eq!(translator.culture(), "pt-br");
        assert_eq!(translator.key("Files"), "Arquivos");
    }
}
