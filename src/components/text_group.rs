//! Text input combined with addons and action buttons.

use super::link_button::{LinkButton, LinkButtonGroup};
use super::textbox::TextBox;
use crate::html::{HtmlElement, HtmlTag};

/// Static content shown before the input
#[derive(Debug, Clone, PartialEq)]
pub enum InputAddon {
    Icon(String),
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct TextGroup {
    pub text_box: TextBox,
    pub addon: Option<InputAddon>,
    pub actions: Vec<LinkButton>,
    pub css_class: String,
}

impl TextGroup {
    pub fn new(text_box: TextBox) -> Self {
        Self {
            text_box,
            ..Default::default()
        }
    }

    pub fn html_element(&self) -> HtmlElement {
        let visible: Vec<&LinkButton> = self.actions.iter().filter(|a| a.visible).collect();

        if self.addon.is_none() && visible.is_empty() {
            let mut input = self.text_box.html_element();
            input.add_css_class(&self.css_class);
            return input;
        }

        let mut group = HtmlElement::new(HtmlTag::Div)
            .with_css_class("input-group")
            .with_css_class(&self.css_class);

        if let Some(addon) = &self.addon {
            group = group.append_element_with(HtmlTag::Span, |span| {
                let span = span.with_css_class("input-group-text");
                match addon {
                    InputAddon::Icon(icon) => {
                        span.append_element_with(HtmlTag::Span, |i| i.with_css_class(icon))
                    }
                    InputAddon::Text(text) => span.append_text(text.as_str()),
                }
            });
        }

        group = group.append_element(self.text_box.html_element());

        let (grouped, single): (Vec<&LinkButton>, Vec<&LinkButton>) =
            visible.into_iter().partition(|a| a.is_group);

        for action in single {
            let mut button = action.clone();
            button.show_as_button = true;
            group = group.append_element(button.html_element());
        }

        if !grouped.is_empty() {
            let dropdown = LinkButtonGroup {
                caret_text: None,
                actions: grouped.into_iter().cloned().collect(),
                css_class: String::new(),
            };
            group = group.append_element(dropdown.html_element());
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_actions_renders_input_only() {
        let group = TextGroup::new(TextBox::new("Name"));
        assert_eq!(group.html_element().tag(), Some(HtmlTag::Input));
    }

    #[test]
    fn test_addon_and_actions() {
        let mut group = TextGroup::new(TextBox::new("Price"));
        group.addon = Some(InputAddon::Text("$".to_string()));
        let mut action = LinkButton::new("calc");
        action.icon_class = Some("fa fa-calculator".to_string());
        group.actions.push(action);
        let mut hidden = LinkButton::new("hidden");
        hidden.visible = false;
        group.actions.push(hidden);

        let html = group.html_element().render();
        assert!(html.starts_with(r#"<div class="input-group"><span class="input-group-text">$</span><input"#));
        assert!(html.contains(r#"id="calc""#));
        assert!(html.contains("btn btn-default"));
        assert!(!html.contains(r#"id="hidden""#));
    }
}
