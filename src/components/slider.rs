//! Range input with a numeric companion box.

use super::ControlBase;
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

#[derive(Debug, Clone)]
pub struct Slider {
    pub base: ControlBase,
    pub min_value: f64,
    pub max_value: f64,
    pub step: f64,
    pub number_of_decimal_places: u32,
}

impl Slider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(name),
            min_value: 0.0,
            max_value: 100.0,
            step: 1.0,
            number_of_decimal_places: 0,
        }
    }

    pub fn html_element(&self) -> HtmlElement {
        let base = &self.base;
        let locked = base.read_only || !base.enabled;
        let value = if base.text.is_empty() {
            self.min_value.to_string()
        } else {
            base.text.clone()
        };
        let step = if self.number_of_decimal_places > 0 {
            format!("{}", 10f64.powi(-(self.number_of_decimal_places as i32)))
        } else {
            self.step.to_string()
        };

        HtmlElement::new(HtmlTag::Div)
            .with_css_class("row")
            .with_css_class(&base.css_class)
            .append_element_with(HtmlTag::Div, |col| {
                col.with_css_class("col-sm-9").append_element_with(HtmlTag::Input, |input| {
                    input
                        .with_name_and_id(&base.name)
                        .with_attributes(&base.attributes)
                        .with_attribute("type", "range")
                        .with_css_class("form-range jjslider")
                        .with_tooltip(&translate::key(&base.tooltip))
                        .with_attribute("min", self.min_value.to_string())
                        .with_attribute("max", self.max_value.to_string())
                        .with_attribute("step", step.as_str())
                        .with_attribute("value", value.as_str())
                        .with_attribute_if(locked, "disabled", "disabled")
                })
            })
            .append_element_with(HtmlTag::Div, |col| {
                col.with_css_class("col-sm-3").append_element_with(HtmlTag::Input, |input| {
                    input
                        .with_attribute("type", "number")
                        .with_attribute("id", format!("{}_value", base.name))
                        .with_css_class("form-control jjslider-value")
                        .with_attribute("min", self.min_value.to_string())
                        .with_attribute("max", self.max_value.to_string())
                        .with_attribute("step", step.as_str())
                        .with_attribute("value", value.as_str())
                        .with_attribute_if(locked, "readonly", "readonly")
                })
            })
    }
}
