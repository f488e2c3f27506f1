//! Top-level container for building HTML fragments.

use super::element::HtmlElement;
use super::tag::HtmlTag;

/// Collects root elements and renders them in order.
#[derive(Debug, Clone, Default)]
pub struct HtmlBuilder {
    elements: Vec<HtmlElement>,
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new root element and return it for configuration
    pub fn start_element(&mut self, tag: HtmlTag) -> &mut HtmlElement {
        self.start_element_from(HtmlElement::new(tag))
    }

    /// Add an already built element as a root
    pub fn start_element_from(&mut self, element: HtmlElement) -> &mut HtmlElement {
        self.elements.push(element);
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    pub fn append_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(HtmlElement::raw(text));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn render_html(&self) -> String {
        self.elements.iter().map(HtmlElement::render).collect()
    }

    pub fn render_html_indented(&self) -> String {
        self.elements.iter().map(|e| e.render_indented(1)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_roots_render_in_order() {
        let mut builder = HtmlBuilder::new();
        builder.start_element(HtmlTag::Span).set_attribute("id", "a");
        builder.append_text("&nbsp;");
        builder.start_element(HtmlTag::Hr);

        assert_eq!(builder.render_html(), "<span id=\"a\"></span>&nbsp;<hr/>");
    }
}
