//! UI controls rendered from field metadata.
//!
//! Every input control carries a [`ControlBase`] with the state common to all of
//! them; [`Control`] is the closed set of input controls the factory produces.

pub mod checkbox;
pub mod combobox;
pub mod export_progress;
pub mod grid;
pub mod icon;
pub mod legend_view;
pub mod link_button;
pub mod message_box;
pub mod search_box;
pub mod slider;
pub mod text_file;
pub mod text_group;
pub mod textarea;
pub mod textbox;
pub mod validation_summary;

pub use checkbox::CheckBox;
pub use combobox::ComboBox;
pub use export_progress::ExportProgress;
pub use grid::GridView;
pub use icon::Icon;
pub use legend_view::{modal_dialog, modal_toggle, LegendView};
pub use link_button::{LinkButton, LinkButtonGroup};
pub use message_box::{MessageBox, MessageIcon, MessageSize};
pub use search_box::{Lookup, SearchBox};
pub use slider::Slider;
pub use text_file::{TextFile, UploadFormParameters};
pub use text_group::{InputAddon, TextGroup};
pub use textarea::TextArea;
pub use textbox::{InputType, TextBox};
pub use validation_summary::ValidationSummary;

use crate::dictionary::FormElementField;
use crate::error::Result;
use crate::html::HtmlElement;
use indexmap::IndexMap;

/// State shared by all input controls
#[derive(Debug, Clone)]
pub struct ControlBase {
    pub name: String,
    pub css_class: String,
    pub tooltip: String,
    /// Current value
    pub text: String,
    pub enabled: bool,
    pub read_only: bool,
    pub visible: bool,
    pub placeholder: String,
    /// Zero means unlimited
    pub max_length: usize,
    pub attributes: IndexMap<String, String>,
}

impl Default for ControlBase {
    fn default() -> Self {
        Self {
            name: String::new(),
            css_class: String::new(),
            tooltip: String::new(),
            text: String::new(),
            enabled: true,
            read_only: false,
            visible: true,
            placeholder: String::new(),
            max_length: 0,
            attributes: IndexMap::new(),
        }
    }
}

impl ControlBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Base initialised from a field definition and its current value
    pub fn from_field(field: &FormElementField, value: Option<&str>) -> Self {
        Self {
            name: field.name.clone(),
            css_class: field.css_class.clone().unwrap_or_default(),
            tooltip: field.help_description.clone().unwrap_or_default(),
            text: value.unwrap_or_default().to_string(),
            max_length: if field.data_type.is_sized() { field.size } else { 0 },
            attributes: field.attributes.clone(),
            ..Default::default()
        }
    }
}

/// An input control built for a field
#[derive(Debug, Clone)]
pub enum Control {
    TextBox(TextBox),
    TextGroup(TextGroup),
    ComboBox(ComboBox),
    CheckBox(CheckBox),
    TextArea(TextArea),
    Slider(Slider),
    SearchBox(SearchBox),
    Lookup(Lookup),
    TextFile(Box<TextFile>),
}

impl Control {
    pub fn base(&self) -> &ControlBase {
        match self {
            Control::TextBox(c) => &c.base,
            Control::TextGroup(c) => &c.text_box.base,
            Control::ComboBox(c) => &c.base,
            Control::CheckBox(c) => &c.base,
            Control::TextArea(c) => &c.base,
            Control::Slider(c) => &c.base,
            Control::SearchBox(c) => &c.base,
            Control::Lookup(c) => &c.base,
            Control::TextFile(c) => &c.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ControlBase {
        match self {
            Control::TextBox(c) => &mut c.base,
            Control::TextGroup(c) => &mut c.text_box.base,
            Control::ComboBox(c) => &mut c.base,
            Control::CheckBox(c) => &mut c.base,
            Control::TextArea(c) => &mut c.base,
            Control::Slider(c) => &mut c.base,
            Control::SearchBox(c) => &mut c.base,
            Control::Lookup(c) => &mut c.base,
            Control::TextFile(c) => &mut c.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.base_mut().read_only = read_only;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().enabled = enabled;
    }

    pub fn html_element(&self) -> Result<HtmlElement> {
        let element = match self {
            Control::TextBox(c) => c.html_element(),
            Control::TextGroup(c) => c.html_element(),
            Control::ComboBox(c) => c.html_element(),
            Control::CheckBox(c) => c.html_element(),
            Control::TextArea(c) => c.html_element(),
            Control::Slider(c) => c.html_element(),
            Control::SearchBox(c) => c.html_element()?,
            Control::Lookup(c) => c.html_element(),
            Control::TextFile(c) => c.html_element()?,
        };
        Ok(element)
    }

    pub fn render(&self) -> Result<String> {
        Ok(self.html_element()?.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::FieldType;

    #[test]
    fn test_base_from_field() {
        let mut field = FormElementField::new("Name", FieldType::NVarchar);
        field.size = 60;
        field.help_description = Some("Full name".to_string());
        field.css_class = Some("col-6".to_string());

        let base = ControlBase::from_field(&field, Some("Ann"));
        assert_eq!(base.name, "Name");
        assert_eq!(base.max_length, 60);
        assert_eq!(base.tooltip, "Full name");
        assert_eq!(base.text, "Ann");
        assert!(base.enabled && base.visible && !base.read_only);

        let field = FormElementField::new("Age", FieldType::Int);
        assert_eq!(ControlBase::from_field(&field, None).max_length, 0);
    }

    #[test]
    fn test_read_only_reaches_variant() {
        let mut control = Control::TextBox(TextBox::new("Code"));
        control.set_read_only(true);
        assert_eq!(control.name(), "Code");
        assert_eq!(
            control.render().unwrap(),
            r#"<input id="Code" name="Code" type="text" class="form-control" readonly="readonly"/>"#
        );
    }
}
