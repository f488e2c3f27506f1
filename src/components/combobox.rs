//! Drop-down list bound to a static data item.

use super::ControlBase;
use crate::dictionary::{DataItem, DataItemValue, FirstOption};
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

#[derive(Debug, Clone, Default)]
pub struct ComboBox {
    pub base: ControlBase,
    pub data_item: DataItem,
    pub selected_value: Option<String>,
}

impl ComboBox {
    pub fn new(name: impl Into<String>, data_item: DataItem) -> Self {
        Self {
            base: ControlBase::new(name),
            data_item,
            selected_value: None,
        }
    }

    /// Selectable values
    pub fn values(&self) -> &[DataItemValue] {
        &self.data_item.items
    }

    /// Description of the selected value
    pub fn selected_description(&self) -> Option<&str> {
        self.selected_value
            .as_deref()
            .and_then(|id| self.data_item.description_of(id))
    }

    pub fn html_element(&self) -> HtmlElement {
        let base = &self.base;
        let locked = base.read_only || !base.enabled;
        let selected = self.selected_value.as_deref().unwrap_or_default();

        let first = match self.data_item.first_option {
            FirstOption::None => None,
            FirstOption::All => Some(translate::key("(All)")),
            FirstOption::Choose => Some(translate::key("(Select)")),
        };

        let options = first
            .map(|text| {
                HtmlElement::new(HtmlTag::Option)
                    .with_attribute("value", "")
                    .append_text(text)
            })
            .into_iter()
            .chain(self.data_item.items.iter().map(|item| {
                HtmlElement::new(HtmlTag::Option)
                    .with_attribute("value", item.id.as_str())
                    .with_attribute_if(item.id == selected, "selected", "selected")
                    .append_text(html_escape::encode_text(&translate::key(&item.description)).to_string())
            }));

        // Disabled selects are not posted, so the value travels in a hidden input.
        let select_name = if locked {
            format!("{}_display", base.name)
        } else {
            base.name.clone()
        };

        let select = HtmlElement::new(HtmlTag::Select)
            .with_name_and_id(&select_name)
            .with_attributes(&base.attributes)
            .with_css_class("form-select")
            .with_css_class(&base.css_class)
            .with_tooltip(&translate::key(&base.tooltip))
            .with_attribute_if(locked, "disabled", "disabled")
            .append_elements(options);

        if locked {
            HtmlElement::fragment()
                .append_element(select)
                .append_hidden_input(&base.name, selected)
        } else {
            select
        }
    }
}
