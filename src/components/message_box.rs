//! Modal message dialog opened from a script block.

use crate::html::{HtmlElement, HtmlTag};
use crate::translate;
use serde::{Deserialize, Serialize};

/// Icon shown by the dialog; the discriminant is passed to the client script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageIcon {
    #[default]
    None = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Success = 4,
}

impl MessageIcon {
    pub fn default_title(&self) -> &'static str {
        match self {
            MessageIcon::Error => "Error",
            MessageIcon::Warning => "Warning",
            MessageIcon::Info => "Info",
            MessageIcon::Success | MessageIcon::None => "Message",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSize {
    Small = 1,
    #[default]
    Default = 2,
    Large = 3,
    ExtraLarge = 4,
}

#[derive(Debug, Clone, Default)]
pub struct MessageBox {
    pub title: String,
    text: String,
    pub icon: MessageIcon,
    pub size: MessageSize,
}

impl MessageBox {
    /// Dialog titled after its icon
    pub fn new(text: &str, icon: MessageIcon) -> Self {
        Self::with_title(text, icon.default_title(), icon, MessageSize::Default)
    }

    pub fn with_title(text: &str, title: &str, icon: MessageIcon, size: MessageSize) -> Self {
        let mut message = Self {
            title: title.to_string(),
            text: String::new(),
            icon,
            size,
        };
        message.set_text(text);
        message
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Single quotes would end the script literal, so they become backticks
    pub fn set_text(&mut self, text: &str) {
        self.text = text.replace('\'', "`");
    }

    pub fn script(&self) -> String {
        let text = translate::key(&self.text)
            .replace("<br>", "\\r\\n")
            .replace("\r\n", "");
        format!(
            "$(document).ready(function() {{\n\t\t\tmessageBox.show('{}','{}', {}, {});\n\t\t}});\n",
            translate::key(&self.title),
            text,
            self.icon as i32,
            self.size as i32
        )
    }

    pub fn html_element(&self) -> HtmlElement {
        HtmlElement::new(HtmlTag::Script)
            .with_attribute("type", "text/javascript")
            .with_attribute("lang", "javascript")
            .append_text(self.script())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title_follows_icon() {
        assert_eq!(MessageBox::new("x", MessageIcon::Error).title, "Error");
        assert_eq!(MessageBox::new("x", MessageIcon::Warning).title, "Warning");
        assert_eq!(MessageBox::new("x", MessageIcon::Info).title, "Info");
        assert_eq!(MessageBox::new("x", MessageIcon::None).title, "Message");
    }

    #[test]
    fn test_script() {
        let message = MessageBox::new("Can't save<br>try again", MessageIcon::Warning);
        assert_eq!(message.text(), "Can`t save<br>try again");
        assert_eq!(
            message.script(),
            "$(document).ready(function() {\n\t\t\tmessageBox.show('Warning','Can`t save\\r\\ntry again', 2, 2);\n\t\t});\n"
        );
    }

    #[test]
    fn test_script_tag() {
        let html = MessageBox::with_title("Saved", "Done", MessageIcon::Success, MessageSize::Small)
            .html_element()
            .render();
        assert!(html.starts_with(r#"<script type="text/javascript" lang="javascript">"#));
        assert!(html.contains("messageBox.show('Done','Saved', 4, 1);"));
    }
}
