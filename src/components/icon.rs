//! Font icon.

use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

#[derive(Debug, Clone, Default)]
pub struct Icon {
    pub icon_class: String,
    pub color: Option<String>,
    pub title: Option<String>,
    pub css_class: String,
}

impl Icon {
    pub fn new(icon_class: impl Into<String>) -> Self {
        Self {
            icon_class: icon_class.into(),
            ..Default::default()
        }
    }

    pub fn html_element(&self) -> HtmlElement {
        let color = self.color.as_deref().filter(|c| !c.is_empty());
        HtmlElement::new(HtmlTag::Span)
            .with_css_class("fa")
            .with_css_class(&self.icon_class)
            .with_css_class(&self.css_class)
            .with_attribute_if(color.is_some(), "style", format!("color:{}", color.unwrap_or_default()))
            .with_attribute_if(
                self.title.is_some(),
                "title",
                translate::key(self.title.as_deref().unwrap_or_default()),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_with_color() {
        let icon = Icon {
            icon_class: "fa-check".to_string(),
            color: Some("#00ff00".to_string()),
            title: Some("Active".to_string()),
            css_class: "fa-fw fa-2x".to_string(),
        };

        assert_eq!(
            icon.html_element().render(),
            r##"<span class="fa fa-check fa-fw fa-2x" style="color:#00ff00" title="Active"></span>"##
        );
    }
}
