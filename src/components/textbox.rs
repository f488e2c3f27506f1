//! Single line input.

use super::ControlBase;
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

/// HTML input type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Tel,
    Date,
    DateTimeLocal,
    Time,
    Range,
    Hidden,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Tel => "tel",
            InputType::Date => "date",
            InputType::DateTimeLocal => "datetime-local",
            InputType::Time => "time",
            InputType::Range => "range",
            InputType::Hidden => "hidden",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextBox {
    pub base: ControlBase,
    pub input_type: InputType,
    pub number_of_decimal_places: u32,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl TextBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(name),
            ..Default::default()
        }
    }

    pub fn html_element(&self) -> HtmlElement {
        let base = &self.base;
        let mut input_type = self.input_type.as_str();
        let mut css_class = base.css_class.clone();
        if self.number_of_decimal_places > 0 {
            input_type = "text";
            css_class.push_str(" jjdecimal");
        }

        HtmlElement::new(HtmlTag::Input)
            .with_name_and_id(&base.name)
            .with_attributes(&base.attributes)
            .with_attribute_if(!base.placeholder.trim().is_empty(), "placeholder", base.placeholder.as_str())
            .with_attribute("type", input_type)
            .with_css_class("form-control")
            .with_css_class(css_class.trim())
            .with_tooltip(&translate::key(&base.tooltip))
            .with_attribute_if(base.max_length > 0, "maxlength", base.max_length.to_string())
            .with_attribute_if(
                self.number_of_decimal_places > 0,
                "jjdecimalplaces",
                self.number_of_decimal_places.to_string(),
            )
            .with_attribute_if(
                self.input_type == InputType::Number,
                "onkeypress",
                "return jjutil.justNumber(event);",
            )
            .with_attribute_if(self.min_value.is_some(), "min", format_number(self.min_value))
            .with_attribute_if(self.max_value.is_some(), "max", format_number(self.max_value))
            .with_attribute_if(!base.text.is_empty(), "value", base.text.as_str())
            .with_attribute_if(base.read_only, "readonly", "readonly")
            .with_attribute_if(!base.enabled, "disabled", "disabled")
    }
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_box() {
        let mut text_box = TextBox::new("Name");
        text_box.base.text = "Ann".to_string();
        text_box.base.max_length = 50;

        assert_eq!(
            text_box.html_element().render(),
            r#"<input id="Name" name="Name" type="text" class="form-control" maxlength="50" value="Ann"/>"#
        );
    }

    #[test]
    fn test_decimal_places_force_text_input() {
        let mut text_box = TextBox::new("Price");
        text_box.input_type = InputType::Number;
        text_box.number_of_decimal_places = 2;
        text_box.min_value = Some(0.0);

        let input = text_box.html_element();
        assert_eq!(input.attribute("type"), Some("text"));
        assert_eq!(input.attribute("class"), Some("form-control jjdecimal"));
        assert_eq!(input.attribute("jjdecimalplaces"), Some("2"));
        assert_eq!(input.attribute("min"), Some("0"));
        assert!(input.attribute("onkeypress").is_some());
    }

    #[test]
    fn test_read_only_and_disabled() {
        let mut text_box = TextBox::new("Code");
        text_box.base.read_only = true;
        text_box.base.enabled = false;
        text_box.base.tooltip = "Internal code".to_string();

        let input = text_box.html_element();
        assert_eq!(input.attribute("readonly"), Some("readonly"));
        assert_eq!(input.attribute("disabled"), Some("disabled"));
        assert_eq!(input.attribute("title"), Some("Internal code"));
    }
}
