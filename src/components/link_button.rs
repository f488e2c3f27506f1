//! Anchors rendered as links, buttons or dropdown items.

use crate::html::{HtmlElement, HtmlTag, DATA_TOGGLE};
use crate::translate;

#[derive(Debug, Clone)]
pub struct LinkButton {
    pub name: String,
    pub text: String,
    pub tooltip: String,
    pub icon_class: Option<String>,
    pub url_action: Option<String>,
    pub on_client_click: Option<String>,
    pub confirmation_message: Option<String>,
    pub css_class: String,
    pub show_as_button: bool,
    /// Rendered as an item of a [`LinkButtonGroup`]
    pub is_group: bool,
    pub new_window: bool,
    pub enabled: bool,
    pub visible: bool,
    pub show_in_filter: bool,
}

impl Default for LinkButton {
    fn default() -> Self {
        Self {
            name: String::new(),
            text: String::new(),
            tooltip: String::new(),
            icon_class: None,
            url_action: None,
            on_client_click: None,
            confirmation_message: None,
            css_class: String::new(),
            show_as_button: false,
            is_group: false,
            new_window: false,
            enabled: true,
            visible: true,
            show_in_filter: false,
        }
    }
}

impl LinkButton {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn click_script(&self) -> Option<String> {
        let confirmation = self
            .confirmation_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(|m| translate::key(m).replace('\'', "`"));
        let script = self.on_client_click.as_deref().filter(|s| !s.is_empty());

        match (confirmation, script) {
            (Some(message), Some(script)) => {
                Some(format!("if (confirm('{}')) {{ {} }} return false;", message, script))
            }
            (Some(message), None) => Some(format!("return confirm('{}');", message)),
            (None, Some(script)) => Some(script.to_string()),
            (None, None) => None,
        }
    }

    pub fn html_element(&self) -> HtmlElement {
        let href = self
            .url_action
            .as_deref()
            .filter(|url| !url.is_empty() && self.enabled)
            .unwrap_or("javascript: void(0);");

        let mut link = HtmlElement::new(HtmlTag::A)
            .with_name_and_id(&self.name)
            .with_attribute("href", href)
            .with_attribute_if(self.new_window && self.url_action.is_some(), "target", "_blank")
            .with_css_class_if(self.show_as_button, "btn btn-default")
            .with_css_class_if(self.is_group, "dropdown-item")
            .with_css_class(&self.css_class)
            .with_css_class_if(!self.enabled, "disabled")
            .with_tooltip(&translate::key(&self.tooltip));

        if self.enabled {
            if let Some(script) = self.click_script() {
                link = link.with_attribute("onclick", script);
            }
        }

        let has_icon = self.icon_class.as_deref().is_some_and(|i| !i.is_empty());
        if let Some(icon) = self.icon_class.as_deref().filter(|i| !i.is_empty()) {
            link = link.append_element_with(HtmlTag::Span, |span| span.with_css_class(icon));
        }

        if !self.text.is_empty() {
            let text = translate::key(&self.text);
            link = link.append_text(if has_icon { format!("&nbsp;{}", text) } else { text });
        }

        link
    }
}

/// Dropdown holding several link buttons
#[derive(Debug, Clone, Default)]
pub struct LinkButtonGroup {
    pub caret_text: Option<String>,
    pub actions: Vec<LinkButton>,
    pub css_class: String,
}

impl LinkButtonGroup {
    pub fn html_element(&self) -> HtmlElement {
        let items = self
            .actions
            .iter()
            .filter(|a| a.visible)
            .map(|action| {
                let mut item = action.clone();
                item.is_group = true;
                item.show_as_button = false;
                HtmlElement::new(HtmlTag::Li).append_element(item.html_element())
            });

        HtmlElement::new(HtmlTag::Div)
            .with_css_class("btn-group")
            .with_css_class(&self.css_class)
            .append_element_with(HtmlTag::Button, |button| {
                let button = button
                    .with_attribute("type", "button")
                    .with_css_class("btn btn-default dropdown-toggle")
                    .with_attribute(DATA_TOGGLE, "dropdown")
                    .with_attribute("aria-haspopup", "true")
                    .with_attribute("aria-expanded", "false");
                match self.caret_text.as_deref() {
                    Some(text) => button.append_text(text),
                    None => button.append_element_with(HtmlTag::Span, |s| s.with_css_class("caret")),
                }
            })
            .append_element_with(HtmlTag::Ul, |ul| {
                ul.with_css_class("dropdown-menu dropdown-menu-right")
                    .append_elements(items)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_with_icon_and_script() {
        let mut button = LinkButton::new("btnFiles");
        button.show_as_button = true;
        button.icon_class = Some("fa fa-paperclip".to_string());
        button.on_client_click = Some("open();".to_string());

        assert_eq!(
            button.html_element().render(),
            r#"<a id="btnFiles" name="btnFiles" href="javascript: void(0);" class="btn btn-default" onclick="open();"><span class="fa fa-paperclip"></span></a>"#
        );
    }

    #[test]
    fn test_confirmation_wraps_script() {
        let mut button = LinkButton::new("del");
        button.on_client_click = Some("remove();".to_string());
        button.confirmation_message = Some("Sure it's ok?".to_string());

        let onclick = button.html_element().attribute("onclick").unwrap().to_string();
        assert_eq!(onclick, "if (confirm('Sure it`s ok?')) { remove(); } return false;");
    }

    #[test]
    fn test_disabled_link_has_no_action() {
        let mut button = LinkButton::new("go");
        button.url_action = Some("/customers".to_string());
        button.on_client_click = Some("go();".to_string());
        button.enabled = false;

        let link = button.html_element();
        assert_eq!(link.attribute("href"), Some("javascript: void(0);"));
        assert_eq!(link.attribute("onclick"), None);
        assert_eq!(link.attribute("class"), Some("disabled"));
    }

    #[test]
    fn test_group_renders_dropdown_items() {
        let mut first = LinkButton::new("a");
        first.text = "a.pdf".to_string();
        let mut hidden = LinkButton::new("b");
        hidden.visible = false;

        let group = LinkButtonGroup {
            caret_text: Some("2&nbsp;Files".to_string()),
            actions: vec![first, hidden],
            ..Default::default()
        };
        let html = group.html_element().render();

        assert!(html.contains("2&nbsp;Files"));
        assert!(html.contains(r#"class="dropdown-item""#));
        assert_eq!(html.matches("<li>").count(), 1);
    }
}
