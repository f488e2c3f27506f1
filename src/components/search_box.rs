//! Type-ahead search over static items, and lookups into another dictionary.

use super::ControlBase;
use crate::dictionary::{DataElementMap, DataItem};
use crate::error::Result;
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

/// Text input that filters the items of a data item; the selected id is posted
/// in a hidden input named after the field.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    pub base: ControlBase,
    pub data_item: DataItem,
    pub selected_value: Option<String>,
    pub trigger_length: usize,
}

impl SearchBox {
    pub fn new(name: impl Into<String>, data_item: DataItem) -> Self {
        Self {
            base: ControlBase::new(name),
            data_item,
            selected_value: None,
            trigger_length: 1,
        }
    }

    pub fn html_element(&self) -> Result<HtmlElement> {
        let base = &self.base;
        let selected = self.selected_value.as_deref().unwrap_or_default();
        let description = self
            .data_item
            .description_of(selected)
            .map(translate::key)
            .unwrap_or_default();
        let items = serde_json::to_string(&self.data_item.items)?;

        let input = HtmlElement::new(HtmlTag::Input)
            .with_name_and_id(&format!("{}_text", base.name))
            .with_attributes(&base.attributes)
            .with_attribute("type", "text")
            .with_attribute("autocomplete", "off")
            .with_css_class("form-control jjsearchbox")
            .with_css_class(&base.css_class)
            .with_tooltip(&translate::key(&base.tooltip))
            .with_attribute_if(!base.placeholder.is_empty(), "placeholder", base.placeholder.as_str())
            .with_data_attribute("hidden-input", base.name.as_str())
            .with_data_attribute("trigger-length", self.trigger_length.to_string())
            .with_data_attribute("items", items)
            .with_attribute_if(!description.is_empty(), "value", description)
            .with_attribute_if(base.read_only, "readonly", "readonly")
            .with_attribute_if(!base.enabled, "disabled", "disabled");

        Ok(HtmlElement::fragment()
            .append_element(input)
            .append_hidden_input(&base.name, selected))
    }
}

/// Input bound to a key of another dictionary, picked from a popup
#[derive(Debug, Clone)]
pub struct Lookup {
    pub base: ControlBase,
    pub map: DataElementMap,
    /// Description of the current key, shown next to it
    pub description: Option<String>,
}

impl Lookup {
    pub fn new(name: impl Into<String>, map: DataElementMap) -> Self {
        Self {
            base: ControlBase::new(name),
            map,
            description: None,
        }
    }

    pub fn open_script(&self) -> String {
        let title = self
            .map
            .popup_title
            .as_deref()
            .map(translate::key)
            .unwrap_or_default()
            .replace('\'', "`");
        format!(
            "jjview.openLookup('{}','{}','{}');",
            self.base.name, self.map.element_name, title
        )
    }

    pub fn html_element(&self) -> HtmlElement {
        let base = &self.base;
        let locked = base.read_only || !base.enabled;

        HtmlElement::new(HtmlTag::Div)
            .with_css_class("input-group")
            .with_css_class(&base.css_class)
            .append_element_with(HtmlTag::Input, |input| {
                input
                    .with_name_and_id(&base.name)
                    .with_attributes(&base.attributes)
                    .with_attribute("type", "text")
                    .with_css_class("form-control jjlookup")
                    .with_tooltip(&translate::key(&base.tooltip))
                    .with_data_attribute("element", self.map.element_name.as_str())
                    .with_attribute_if(base.max_length > 0, "maxlength", base.max_length.to_string())
                    .with_attribute_if(!base.text.is_empty(), "value", base.text.as_str())
                    .with_attribute_if(base.read_only, "readonly", "readonly")
                    .with_attribute_if(!base.enabled, "disabled", "disabled")
            })
            .append_element_if(self.map.field_description.is_some(), HtmlTag::Input, |input| {
                input
                    .with_attribute("type", "text")
                    .with_attribute("id", format!("{}_description", base.name))
                    .with_css_class("form-control")
                    .with_attribute("value", self.description.clone().unwrap_or_default())
                    .with_attribute("readonly", "readonly")
            })
            .append_element_with(HtmlTag::Button, |button| {
                button
                    .with_attribute("type", "button")
                    .with_attribute("id", format!("btn_{}", base.name))
                    .with_css_class("btn btn-default")
                    .with_attribute_if(!locked, "onclick", self.open_script())
                    .with_attribute_if(locked, "disabled", "disabled")
                    .append_element_with(HtmlTag::Span, |span| span.with_css_class("fa fa-search"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DataItemValue;

    #[test]
    fn test_search_box_shows_description() {
        let item = DataItem {
            items: vec![DataItemValue::new("SP", "Sao Paulo"), DataItemValue::new("RJ", "Rio")],
            ..Default::default()
        };
        let mut search = SearchBox::new("State", item);
        search.selected_value = Some("RJ".to_string());

        let html = search.html_element().unwrap().render();
        assert!(html.starts_with(r#"<input id="State_text" name="State_text" type="text""#));
        assert!(html.contains(r#"data-hidden-input="State""#));
        assert!(html.contains(r#"value="Rio""#));
        assert!(html.ends_with(r#"<input type="hidden" id="State" name="State" value="RJ"/>"#));
    }

    #[test]
    fn test_lookup() {
        let map = DataElementMap {
            element_name: "Customer".to_string(),
            field_id: "Id".to_string(),
            field_description: Some("Name".to_string()),
            popup_title: Some("Customer's".to_string()),
        };
        let mut lookup = Lookup::new("CustomerId", map);
        lookup.base.text = "7".to_string();
        lookup.description = Some("Ann".to_string());

        let html = lookup.html_element().render();
        assert!(html.contains(r#"value="7""#));
        assert!(html.contains(r#"id="CustomerId_description""#));
        assert!(html.contains("jjview.openLookup(&#x27;CustomerId&#x27;") || html.contains("jjview.openLookup('CustomerId'"));
        assert_eq!(lookup.open_script(), "jjview.openLookup('CustomerId','Customer','Customer`s');");
    }

    #[test]
    fn test_read_only_lookup_button_is_disabled() {
        let mut lookup = Lookup::new("CustomerId", DataElementMap::default());
        lookup.base.read_only = true;

        let html = lookup.html_element().render();
        assert!(!html.contains("onclick"));
        assert!(html.contains(r#"<button type="button" id="btn_CustomerId" class="btn btn-default" disabled="disabled">"#));
    }
}
