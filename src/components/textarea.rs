//! Multi line input.

use super::ControlBase;
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

#[derive(Debug, Clone)]
pub struct TextArea {
    pub base: ControlBase,
    pub rows: u32,
}

impl TextArea {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(name),
            rows: 5,
        }
    }

    pub fn html_element(&self) -> HtmlElement {
        let base = &self.base;
        HtmlElement::new(HtmlTag::Textarea)
            .with_name_and_id(&base.name)
            .with_attributes(&base.attributes)
            .with_attribute("rows", self.rows.to_string())
            .with_css_class("form-control")
            .with_css_class(&base.css_class)
            .with_tooltip(&translate::key(&base.tooltip))
            .with_attribute_if(!base.placeholder.is_empty(), "placeholder", base.placeholder.as_str())
            .with_attribute_if(base.max_length > 0, "maxlength", base.max_length.to_string())
            .with_attribute_if(base.read_only, "readonly", "readonly")
            .with_attribute_if(!base.enabled, "disabled", "disabled")
            .append_text(html_escape::encode_text(&base.text).to_string())
    }
}
