//! Form level metadata: how each column of an element is rendered.

use super::types::{Element, ElementField, FieldFilter, FieldType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_visible_expression() -> String {
    "val:1".to_string()
}

fn default_enable_expression() -> String {
    "val:1".to_string()
}

/// UI control used for a field
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormComponent {
    #[default]
    Text,
    Number,
    Currency,
    Email,
    Password,
    Tel,
    Date,
    DateTime,
    Hour,
    TextArea,
    ComboBox,
    CheckBox,
    Search,
    Lookup,
    Slider,
    File,
}

/// How a field is bound to storage
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldBehavior {
    /// Read from and written to the table
    #[default]
    Real,
    /// Present on the form only
    Virtual,
    /// Read from the table, never edited
    ViewOnly,
}

/// First entry shown by a combo box
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FirstOption {
    None,
    All,
    #[default]
    Choose,
}

/// A selectable value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataItemValue {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image_color: Option<String>,
}

impl DataItemValue {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Static data source of combo, search and legend controls
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataItem {
    #[serde(default)]
    pub items: Vec<DataItemValue>,
    #[serde(default)]
    pub show_image_legend: bool,
    #[serde(default)]
    pub first_option: FirstOption,
}

impl DataItem {
    pub fn description_of(&self, id: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.description.as_str())
    }
}

/// Upload settings of a file field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataFile {
    pub folder_path: String,
    #[serde(default)]
    pub multiple_file: bool,
    #[serde(default)]
    pub max_file_size: u64,
    #[serde(default)]
    pub export_as_link: bool,
    #[serde(default = "default_allowed_types")]
    pub allowed_types: String,
    #[serde(default)]
    pub view_gallery: bool,
}

fn default_allowed_types() -> String {
    "*".to_string()
}

impl Default for DataFile {
    fn default() -> Self {
        Self {
            folder_path: String::new(),
            multiple_file: false,
            max_file_size: 0,
            export_as_link: false,
            allowed_types: default_allowed_types(),
            view_gallery: false,
        }
    }
}

/// Target dictionary of a lookup field
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataElementMap {
    pub element_name: String,
    pub field_id: String,
    #[serde(default)]
    pub field_description: Option<String>,
    #[serde(default)]
    pub popup_title: Option<String>,
}

/// What an action does when clicked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    Script { on_client_click: String },
    Url {
        url_action: String,
        #[serde(default)]
        new_window: bool,
    },
}

/// Button rendered next to a field's input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldAction {
    pub name: String,
    #[serde(flatten)]
    pub kind: ActionKind,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_visible_expression")]
    pub visible_expression: String,
    #[serde(default = "default_enable_expression")]
    pub enable_expression: String,
    #[serde(default)]
    pub show_in_filter: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub confirmation_message: Option<String>,
}

impl FieldAction {
    pub fn script(name: impl Into<String>, on_client_click: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ActionKind::Script {
                on_client_click: on_client_click.into(),
            },
            text: None,
            tooltip: None,
            icon: None,
            visible: true,
            visible_expression: default_visible_expression(),
            enable_expression: default_enable_expression(),
            show_in_filter: false,
            is_group: false,
            confirmation_message: None,
        }
    }

    pub fn url(name: impl Into<String>, url_action: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Url {
                url_action: url_action.into(),
                new_window: false,
            },
            ..Self::script(name, "")
        }
    }
}

/// A field together with its rendering rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormElementField {
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

    #[serde(default)]
    pub component: FormComponent,
    #[serde(default)]
    pub data_behavior: FieldBehavior,
    #[serde(default = "default_visible_expression")]
    pub visible_expression: String,
    #[serde(default = "default_enable_expression")]
    pub enable_expression: String,
    #[serde(default)]
    pub help_description: Option<String>,
    #[serde(default)]
    pub number_of_decimal_places: u32,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub data_item: Option<DataItem>,
    #[serde(default)]
    pub data_file: Option<DataFile>,
    #[serde(default)]
    pub data_element_map: Option<DataElementMap>,
    #[serde(default)]
    pub actions: Vec<FieldAction>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub css_class: Option<String>,
    #[serde(default = "default_true")]
    pub export: bool,
}

impl FormElementField {
    pub fn new(name: impl Into<String>, data_type: FieldType) -> Self {
        ElementField::new(name, data_type).into()
    }

    /// Label, falling back to the field name
    pub fn label_or_name(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.name,
        }
    }

    pub fn to_element_field(&self) -> ElementField {
        ElementField {
            name: self.name.clone(),
            label: self.label.clone(),
            data_type: self.data_type,
            size: self.size,
            is_pk: self.is_pk,
            is_required: self.is_required,
            default_value: self.default_value.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl From<ElementField> for FormElementField {
    fn from(field: ElementField) -> Self {
        Self {
            name: field.name,
            label: field.label,
            data_type: field.data_type,
            size: field.size,
            is_pk: field.is_pk,
            is_required: field.is_required,
            default_value: field.default_value,
            filter: field.filter,
            component: FormComponent::Text,
            data_behavior: FieldBehavior::Real,
            visible_expression: default_visible_expression(),
            enable_expression: default_enable_expression(),
            help_description: None,
            number_of_decimal_places: 0,
            min_value: None,
            max_value: None,
            data_item: None,
            data_file: None,
            data_element_map: None,
            actions: Vec::new(),
            attributes: IndexMap::new(),
            css_class: None,
            export: true,
        }
    }
}

/// In-memory model of a data dictionary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormElement {
    pub name: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub custom_proc_name_get: Option<String>,
    #[serde(default)]
    pub custom_proc_name_set: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormElementField>,
}

impl FormElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Case-insensitive field lookup
    pub fn field(&self, name: &str) -> Option<&FormElementField> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormElementField> {
        self.fields
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn pk_fields(&self) -> impl Iterator<Item = &FormElementField> {
        self.fields.iter().filter(|f| f.is_pk)
    }

    pub fn to_element(&self) -> Element {
        Element {
            name: self.name.clone(),
            table_name: self.table_name.clone(),
            info: self.info.clone(),
            custom_proc_name_get: self.custom_proc_name_get.clone(),
            custom_proc_name_set: self.custom_proc_name_set.clone(),
            fields: self.fields.iter().map(FormElementField::to_element_field).collect(),
        }
    }
}

impl From<Element> for FormElement {
    fn from(element: Element) -> Self {
        Self {
            title: Some(element.name.clone()),
            name: element.name,
            table_name: element.table_name,
            sub_title: None,
            info: element.info,
            custom_proc_name_get: element.custom_proc_name_get,
            custom_proc_name_set: element.custom_proc_name_set,
            fields: element.fields.into_iter().map(FormElementField::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_element_from_element() {
        let mut element = Element::new("Customer", "tb_customer");
        let mut id = ElementField::new("Id", FieldType::Int);
        id.is_pk = true;
        element.fields.push(id);
        element.fields.push(ElementField::new("Name", FieldType::Varchar));

        let form = FormElement::from(element);

        assert_eq!(form.title.as_deref(), Some("Customer"));
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.pk_fields().count(), 1);
        let name = form.field("name").unwrap();
        assert_eq!(name.component, FormComponent::Text);
        assert_eq!(name.visible_expression, "val:1");
    }

    #[test]
    fn test_field_defaults_from_yaml() {
        let yaml = r#"
name: Status
type: Varchar
size: 1
component: ComboBox
data_item:
  items:
    - id: A
      description: Active
      icon: fa-check
actions:
  - name: help
    kind: script
    on_client_click: "alert('{Status}')"
"#;
        let field: FormElementField = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(field.component, FormComponent::ComboBox);
        assert_eq!(field.enable_expression, "val:1");
        assert!(field.export);
        assert_eq!(field.data_item.as_ref().unwrap().description_of("A"), Some("Active"));
        assert!(matches!(field.actions[0].kind, ActionKind::Script { .. }));
        assert!(field.actions[0].visible);
    }
}
