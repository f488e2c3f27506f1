//! Parameters of the internal redirect used by relation links.
//!
//! A relation link opens another dictionary filtered by the keys of the current
//! record. The target is described by a base64url encoded JSON object:
//!
//! ```json
//! {"formname": "Orders", "viewtype": 1, "CustomerId": "42"}
//! ```
//!
//! `formname` names the dictionary, `viewtype` selects the [`RelationType`] and
//! every other key becomes a relation value. Keys are matched case-insensitively.

use crate::dictionary::Values;
use crate::error::{Error, Result};
use crate::expression::PageState;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the related dictionary is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationType {
    /// Grid filtered by the relation values
    #[default]
    List = 0,
    /// Read-only panel of the related record
    View = 1,
    /// Editable panel of the related record
    Update = 2,
}

impl RelationType {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(RelationType::List),
            1 => Ok(RelationType::View),
            2 => Ok(RelationType::Update),
            other => Err(Error::InvalidParameters(format!("unknown view type {}", other))),
        }
    }

    pub fn page_state(&self) -> PageState {
        match self {
            RelationType::List => PageState::List,
            RelationType::View => PageState::View,
            RelationType::Update => PageState::Update,
        }
    }

    /// Whether the page shows the save toolbar
    pub fn shows_toolbar(&self) -> bool {
        matches!(self, RelationType::Update)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedirectParameters {
    pub dictionary_name: String,
    pub relation_type: RelationType,
    pub relation_values: Values,
}

impl RedirectParameters {
    pub fn new(dictionary_name: impl Into<String>, relation_type: RelationType) -> Self {
        Self {
            dictionary_name: dictionary_name.into(),
            relation_type,
            relation_values: Values::new(),
        }
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(Error::InvalidParameters("parameters are required".to_string()));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(encoded.trim_end_matches('='))
            .map_err(|e| Error::InvalidParameters(format!("parameters are not base64url: {}", e)))?;
        let object: Map<String, Value> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::InvalidParameters(format!("parameters are not a JSON object: {}", e)))?;

        let mut dictionary_name = None;
        let mut relation_type = RelationType::default();
        let mut relation_values = Values::new();

        for (key, value) in object {
            match key.to_lowercase().as_str() {
                "formname" => dictionary_name = Some(scalar_text(&value)),
                "viewtype" => {
                    let code = scalar_text(&value).trim().parse::<i64>().map_err(|_| {
                        Error::InvalidParameters(format!("view type {} is not a number", value))
                    })?;
                    relation_type = RelationType::from_code(code)?;
                }
                _ => {
                    relation_values.insert(key, scalar_text(&value));
                }
            }
        }

        let dictionary_name = dictionary_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| Error::InvalidParameters("formname is required".to_string()))?;

        Ok(Self {
            dictionary_name,
            relation_type,
            relation_values,
        })
    }

    pub fn encode(&self) -> Result<String> {
        let mut object = Map::new();
        object.insert("formname".to_string(), Value::String(self.dictionary_name.clone()));
        object.insert("viewtype".to_string(), Value::from(self.relation_type as i64));
        for (key, value) in &self.relation_values {
            object.insert(key.clone(), Value::String(value.clone()));
        }
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(&object)?))
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_json(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    #[test]
    fn test_decode() {
        let encoded = encode_json(r#"{"FormName":"Orders","ViewType":"1","CustomerId":42}"#);
        let parameters = RedirectParameters::decode(&encoded).unwrap();

        assert_eq!(parameters.dictionary_name, "Orders");
        assert_eq!(parameters.relation_type, RelationType::View);
        assert_eq!(parameters.relation_values.get("CustomerId").map(String::as_str), Some("42"));
        assert_eq!(parameters.relation_type.page_state(), PageState::View);
    }

    #[test]
    fn test_view_type_defaults_to_list() {
        let parameters = RedirectParameters::decode(&encode_json(r#"{"formname":"Orders"}"#)).unwrap();
        assert_eq!(parameters.relation_type, RelationType::List);
        assert!(parameters.relation_values.is_empty());
    }

    #[test]
    fn test_invalid_input() {
        assert!(RedirectParameters::decode("").is_err());
        assert!(RedirectParameters::decode("!!!").is_err());
        assert!(RedirectParameters::decode(&encode_json(r#"{"viewtype":1}"#)).is_err());
        assert!(RedirectParameters::decode(&encode_json(r#"{"formname":"A","viewtype":9}"#)).is_err());
    }

    #[test]
    fn test_encode_is_decodable() {
        let mut parameters = RedirectParameters::new("Orders", RelationType::Update);
        parameters.relation_values.insert("Id".to_string(), "7".to_string());

        let decoded = RedirectParameters::decode(&parameters.encode().unwrap()).unwrap();
        assert_eq!(decoded, parameters);
        assert!(decoded.relation_type.shows_toolbar());
    }
}
