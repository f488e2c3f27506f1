//! A small DOM-like tree that serializes to HTML text.

use super::tag::HtmlTag;
use indexmap::IndexMap;
use std::fmt;

/// Attribute used by Bootstrap to enable tooltips
pub const DATA_TOGGLE: &str = "data-bs-toggle";

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Tag(HtmlTag),
    Raw(String),
    Fragment,
}

/// Attributes keyed case-insensitively, rendered in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlAttributes {
    // lowercase name -> (name as first written, value)
    entries: IndexMap<String, (String, String)>,
}

impl HtmlAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = name.to_lowercase();
        match self.entries.get_mut(&key) {
            Some(entry) => entry.1 = value.into(),
            None => {
                self.entries.insert(key, (name, value.into()));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries
            .shift_remove(&name.to_lowercase())
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// An HTML element or a raw text node.
///
/// Builder methods take `self` by value so calls can be chained; the `set_*`/`push_*`
/// variants mutate in place for code holding a `&mut HtmlElement`.
///
/// ```
/// use dictform::html::{HtmlElement, HtmlTag};
///
/// let html = HtmlElement::new(HtmlTag::Div)
///     .with_css_class("form-group")
///     .append_element_with(HtmlTag::Span, |span| span.with_attribute("id", "lbl"))
///     .render();
///
/// assert_eq!(html, r#"<div class="form-group"><span id="lbl"></span></div>"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlElement {
    node: Node,
    attributes: HtmlAttributes,
    children: Vec<HtmlElement>,
}

impl HtmlElement {
    /// Create a tag element
    pub fn new(tag: HtmlTag) -> Self {
        Self {
            node: Node::Tag(tag),
            attributes: HtmlAttributes::new(),
            children: Vec::new(),
        }
    }

    /// Create a raw text node, rendered verbatim
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            node: Node::Raw(text.into()),
            attributes: HtmlAttributes::new(),
            children: Vec::new(),
        }
    }

    /// Group of sibling elements rendered without a wrapping tag
    pub fn fragment() -> Self {
        Self {
            node: Node::Fragment,
            attributes: HtmlAttributes::new(),
            children: Vec::new(),
        }
    }

    /// Tag of this element, `None` for raw text and fragments
    pub fn tag(&self) -> Option<HtmlTag> {
        match self.node {
            Node::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &HtmlAttributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn children(&self) -> &[HtmlElement] {
        &self.children
    }

    pub fn push_element(&mut self, element: HtmlElement) -> &mut Self {
        self.children.push(element);
        self
    }

    pub fn push_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(HtmlElement::raw(text));
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn add_css_class(&mut self, classes: &str) -> &mut Self {
        if classes.trim().is_empty() {
            return self;
        }

        let merged = match self.attributes.get("class") {
            None => classes.to_string(),
            Some(current) => {
                let mut list: Vec<&str> = current.split(' ').collect();
                for css_class in classes.split(' ') {
                    if !list.contains(&css_class) {
                        list.push(css_class);
                    }
                }
                list.join(" ")
            }
        };

        self.attributes.insert("class", merged);
        self
    }

    /// Insert an element as a child
    pub fn append_element(mut self, element: HtmlElement) -> Self {
        self.children.push(element);
        self
    }

    /// Insert a new child element configured by `build`
    pub fn append_element_with<F>(self, tag: HtmlTag, build: F) -> Self
    where
        F: FnOnce(HtmlElement) -> HtmlElement,
    {
        self.append_element(build(HtmlElement::new(tag)))
    }

    pub fn append_element_if<F>(self, condition: bool, tag: HtmlTag, build: F) -> Self
    where
        F: FnOnce(HtmlElement) -> HtmlElement,
    {
        if condition {
            self.append_element_with(tag, build)
        } else {
            self
        }
    }

    /// Insert an empty child element
    pub fn append_tag(self, tag: HtmlTag) -> Self {
        self.append_element(HtmlElement::new(tag))
    }

    /// Insert all elements yielded by `elements` as children
    pub fn append_elements<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = HtmlElement>,
    {
        self.children.extend(elements);
        self
    }

    /// Insert raw text as a child
    pub fn append_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn append_text_if(self, condition: bool, text: impl Into<String>) -> Self {
        if condition {
            self.append_text(text)
        } else {
            self
        }
    }

    /// Hidden input with matching name and id
    pub fn append_hidden_input(self, name: &str, value: &str) -> Self {
        self.append_element_with(HtmlTag::Input, |input| {
            input
                .with_attribute("type", "hidden")
                .with_name_and_id(name)
                .with_attribute("value", value)
        })
    }

    /// Inline javascript block
    pub fn append_script(self, script: impl Into<String>) -> Self {
        let script = script.into();
        self.append_element_with(HtmlTag::Script, |s| {
            s.with_attribute("type", "text/javascript").append_text(script)
        })
    }

    /// Set `id` and `name`; ignored for blank ids
    pub fn with_name_and_id(self, id: &str) -> Self {
        if id.trim().is_empty() {
            return self;
        }
        self.with_attribute("id", id).with_attribute("name", id)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn with_attribute_if(self, condition: bool, name: impl Into<String>, value: impl Into<String>) -> Self {
        if condition {
            self.with_attribute(name, value)
        } else {
            self
        }
    }

    /// Copy a set of attributes onto the element
    pub fn with_attributes<'a, I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, value) in attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
        self
    }

    /// Set `title` and enable the Bootstrap tooltip; no-op for empty text
    pub fn with_tooltip(mut self, tooltip: &str) -> Self {
        if !tooltip.is_empty() {
            self.attributes.insert("title", tooltip);
            self.attributes.insert(DATA_TOGGLE, "tooltip");
        }
        self
    }

    /// Merge space separated classes, ignoring ones already present
    pub fn with_css_class(mut self, classes: &str) -> Self {
        self.add_css_class(classes);
        self
    }

    pub fn with_css_class_if(self, condition: bool, classes: &str) -> Self {
        if condition {
            self.with_css_class(classes)
        } else {
            self
        }
    }

    /// Set a `data-{name}` attribute
    pub fn with_data_attribute(self, name: &str, value: impl Into<String>) -> Self {
        self.with_attribute(format!("data-{}", name), value)
    }

    /// Compact HTML
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, 0);
        out
    }

    /// HTML with every element on its own line, indented by `tab_count` tabs
    pub fn render_indented(&self, tab_count: usize) -> String {
        let mut out = String::new();
        self.write_html(&mut out, tab_count);
        out
    }

    fn write_html(&self, out: &mut String, tab_count: usize) {
        let indent = |out: &mut String| {
            if tab_count > 0 {
                out.push('\n');
                out.extend(std::iter::repeat('\t').take(tab_count));
            }
        };

        let tag = match &self.node {
            Node::Raw(text) => {
                indent(out);
                out.push_str(text);
                return;
            }
            Node::Fragment => {
                for child in &self.children {
                    child.write_html(out, tab_count);
                }
                return;
            }
            Node::Tag(tag) => *tag,
        };

        indent(out);
        out.push('<');
        out.push_str(tag.as_str());
        for (name, value) in self.attributes.iter() {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }

        if !tag.has_closing_tag() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        let child_tabs = if tab_count > 0 { tab_count + 1 } else { 0 };
        for child in &self.children {
            child.write_html(out, child_tabs);
        }
        indent(out);
        out.push_str("</");
        out.push_str(tag.as_str());
        out.push('>');
    }
}

impl fmt::Display for HtmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_class_merge_skips_duplicates() {
        let div = HtmlElement::new(HtmlTag::Div)
            .with_css_class("form-control")
            .with_css_class("jjdecimal form-control")
            .with_css_class("  ");

        assert_eq!(div.attribute("class"), Some("form-control jjdecimal"));
    }

    #[test]
    fn test_attributes_are_case_insensitive() {
        let input = HtmlElement::new(HtmlTag::Input)
            .with_attribute("Value", "1")
            .with_attribute("value", "2");

        assert_eq!(input.attributes().len(), 1);
        assert_eq!(input.render(), r#"<input Value="2"/>"#);
    }

    #[test]
    fn test_blank_name_and_id_is_ignored() {
        let input = HtmlElement::new(HtmlTag::Input).with_name_and_id(" ");
        assert!(input.attributes().is_empty());
    }

    #[test]
    fn test_tooltip() {
        let span = HtmlElement::new(HtmlTag::Span).with_tooltip("Help");
        assert_eq!(span.attribute("title"), Some("Help"));
        assert_eq!(span.attribute(DATA_TOGGLE), Some("tooltip"));

        let span = HtmlElement::new(HtmlTag::Span).with_tooltip("");
        assert!(span.attributes().is_empty());
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let input = HtmlElement::new(HtmlTag::Input).with_attribute("value", "say \"hi\"");
        assert_eq!(input.render(), r#"<input value="say &quot;hi&quot;"/>"#);
    }

    #[test]
    fn test_raw_text_is_verbatim() {
        let div = HtmlElement::new(HtmlTag::Div).append_text("&nbsp;<b>x</b>");
        assert_eq!(div.render(), "<div>&nbsp;<b>x</b></div>");
    }

    #[test]
    fn test_indented_render() {
        let div = HtmlElement::new(HtmlTag::Div)
            .append_tag(HtmlTag::Br)
            .append_text("text");

        assert_eq!(div.render_indented(1), "\n\t<div>\n\t\t<br/>\n\t\ttext\n\t</div>");
    }

    #[test]
    fn test_fragment_renders_children_only() {
        let fragment = HtmlElement::fragment()
            .append_tag(HtmlTag::Br)
            .append_tag(HtmlTag::Hr);
        assert_eq!(fragment.render(), "<br/><hr/>");
        assert_eq!(fragment.tag(), None);
    }

    #[test]
    fn test_hidden_input_and_script() {
        let div = HtmlElement::new(HtmlTag::Div)
            .append_hidden_input("current_uploadaction", "")
            .append_script("start()");

        assert_eq!(
            div.render(),
            "<div><input type=\"hidden\" id=\"current_uploadaction\" name=\"current_uploadaction\" value=\"\"/>\
             <script type=\"text/javascript\">start()</script></div>"
        );
    }
}
