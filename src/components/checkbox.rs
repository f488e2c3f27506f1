//! Boolean check box.

use super::ControlBase;
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

#[derive(Debug, Clone, Default)]
pub struct CheckBox {
    pub base: ControlBase,
    pub checked: bool,
}

impl CheckBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(name),
            checked: false,
        }
    }

    /// True for the stored representations of a set flag
    pub fn is_checked_value(value: &str) -> bool {
        matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "s" | "y")
    }

    pub fn html_element(&self) -> HtmlElement {
        let base = &self.base;

        HtmlElement::new(HtmlTag::Div)
            .with_css_class("form-check")
            .with_css_class(&base.css_class)
            .append_element_with(HtmlTag::Input, |input| {
                input
                    .with_attribute("type", "checkbox")
                    .with_name_and_id(&base.name)
                    .with_attribute("value", "1")
                    .with_attributes(&base.attributes)
                    .with_css_class("form-check-input")
                    .with_tooltip(&translate::key(&base.tooltip))
                    .with_attribute_if(self.checked, "checked", "checked")
                    .with_attribute_if(base.read_only, "onclick", "return false;")
                    .with_attribute_if(!base.enabled, "disabled", "disabled")
            })
            .append_element_if(!base.text.is_empty(), HtmlTag::Label, |label| {
                label
                    .with_css_class("form-check-label")
                    .with_attribute("for", base.name.as_str())
                    .append_text(translate::key(&base.text))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_values() {
        assert!(CheckBox::is_checked_value("1"));
        assert!(CheckBox::is_checked_value("TRUE"));
        assert!(!CheckBox::is_checked_value("0"));
        assert!(!CheckBox::is_checked_value(""));
    }

    #[test]
    fn test_render_with_label() {
        let mut check = CheckBox::new("Active");
        check.checked = true;
        check.base.text = "Active".to_string();

        assert_eq!(
            check.html_element().render(),
            "<div class=\"form-check\"><input type=\"checkbox\" id=\"Active\" name=\"Active\" value=\"1\" \
             class=\"form-check-input\" checked=\"checked\"/><label class=\"form-check-label\" for=\"Active\">Active</label></div>"
        );
    }
}
