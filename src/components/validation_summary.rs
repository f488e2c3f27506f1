//! Alert listing validation errors.

use crate::html::{HtmlElement, HtmlTag};
use crate::translate;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    pub title: String,
    pub errors: Vec<String>,
    pub show_close_button: bool,
}

impl ValidationSummary {
    pub fn new(errors: &IndexMap<String, String>) -> Self {
        Self {
            title: "Invalid data".to_string(),
            errors: errors.values().cloned().collect(),
            show_close_button: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn html_element(&self) -> HtmlElement {
        if self.errors.is_empty() {
            return HtmlElement::fragment();
        }

        HtmlElement::new(HtmlTag::Div)
            .with_attribute("id", "pnl_validation_summary")
            .with_css_class("alert alert-danger")
            .with_attribute("role", "alert")
            .append_element_if(self.show_close_button, HtmlTag::Button, |b| {
                b.with_attribute("type", "button")
                    .with_css_class("btn-close float-end")
                    .with_attribute("data-bs-dismiss", "alert")
                    .with_attribute("aria-label", "Close")
            })
            .append_element_with(HtmlTag::Span, |s| s.with_css_class("fa fa-warning"))
            .append_element_with(HtmlTag::B, |b| {
                b.append_text(format!("&nbsp;{}", translate::key(&self.title)))
            })
            .append_element_with(HtmlTag::Ul, |ul| {
                ul.append_elements(self.errors.iter().map(|error| {
                    HtmlElement::new(HtmlTag::Li)
                        .append_text(html_escape::encode_text(&translate::key(error)).to_string())
                }))
            })
    }
}
