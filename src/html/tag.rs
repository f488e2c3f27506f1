//! HTML tag names known to the element builder.

use std::fmt;

/// Tags that can be emitted by [`HtmlElement`](super::HtmlElement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlTag {
    A,
    B,
    Body,
    Br,
    Button,
    Div,
    Em,
    Form,
    H1,
    H2,
    H3,
    H4,
    H5,
    Head,
    Hr,
    Html,
    I,
    Img,
    Input,
    Label,
    Li,
    Link,
    Meta,
    Nav,
    Option,
    P,
    Script,
    Section,
    Select,
    Small,
    Span,
    Strong,
    Table,
    Tbody,
    Td,
    Textarea,
    Th,
    Thead,
    Title,
    Tr,
    Ul,
}

impl HtmlTag {
    /// Lower case tag name as written in markup
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlTag::A => "a",
            HtmlTag::B => "b",
            HtmlTag::Body => "body",
            HtmlTag::Br => "br",
            HtmlTag::Button => "button",
            HtmlTag::Div => "div",
            HtmlTag::Em => "em",
            HtmlTag::Form => "form",
            HtmlTag::H1 => "h1",
            HtmlTag::H2 => "h2",
            HtmlTag::H3 => "h3",
            HtmlTag::H4 => "h4",
            HtmlTag::H5 => "h5",
            HtmlTag::Head => "head",
            HtmlTag::Hr => "hr",
            HtmlTag::Html => "html",
            HtmlTag::I => "i",
            HtmlTag::Img => "img",
            HtmlTag::Input => "input",
            HtmlTag::Label => "label",
            HtmlTag::Li => "li",
            HtmlTag::Link => "link",
            HtmlTag::Meta => "meta",
            HtmlTag::Nav => "nav",
            HtmlTag::Option => "option",
            HtmlTag::P => "p",
            HtmlTag::Script => "script",
            HtmlTag::Section => "section",
            HtmlTag::Select => "select",
            HtmlTag::Small => "small",
            HtmlTag::Span => "span",
            HtmlTag::Strong => "strong",
            HtmlTag::Table => "table",
            HtmlTag::Tbody => "tbody",
            HtmlTag::Td => "td",
            HtmlTag::Textarea => "textarea",
            HtmlTag::Th => "th",
            HtmlTag::Thead => "thead",
            HtmlTag::Title => "title",
            HtmlTag::Tr => "tr",
            HtmlTag::Ul => "ul",
        }
    }

    /// Void elements are rendered self-closed (`<br/>`)
    pub fn has_closing_tag(&self) -> bool {
        !matches!(
            self,
            HtmlTag::Br | HtmlTag::Hr | HtmlTag::Img | HtmlTag::Input | HtmlTag::Link | HtmlTag::Meta
        )
    }
}

impl fmt::Display for HtmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_tags() {
        assert!(!HtmlTag::Br.has_closing_tag());
        assert!(!HtmlTag::Input.has_closing_tag());
        assert!(HtmlTag::Div.has_closing_tag());
        assert!(HtmlTag::Script.has_closing_tag());
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(HtmlTag::Textarea.to_string(), "textarea");
        assert_eq!(HtmlTag::H3.to_string(), "h3");
    }
}
