//! Read-only table of records.

use super::icon::Icon;
use super::text_file::TextFile;
use crate::dictionary::{value_of, FormComponent, FormElement, FormElementField, Values};
use crate::error::Result;
use crate::expression::{ExpressionManager, ExpressionOptions, PageState};
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

#[derive(Debug, Clone)]
pub struct GridView<'a> {
    pub name: String,
    pub form_element: &'a FormElement,
    pub records: Vec<Values>,
    pub user_values: Values,
    /// Replaces `{app.path}` in file folders
    pub app_path: String,
    /// Page url download links are appended to
    pub base_url: String,
}

impl<'a> GridView<'a> {
    pub fn new(form_element: &'a FormElement, records: Vec<Values>) -> Self {
        Self {
            name: format!("grid_{}", form_element.name.to_lowercase()),
            form_element,
            records,
            user_values: Values::new(),
            app_path: String::new(),
            base_url: String::new(),
        }
    }

    /// Fields shown as columns in list state
    pub fn visible_fields(&self) -> Result<Vec<&'a FormElementField>> {
        let options = ExpressionOptions::new(&self.user_values, Values::new(), PageState::List);
        let manager = ExpressionManager::new(&options);

        let form: &'a FormElement = self.form_element;
        let mut fields = Vec::new();
        for field in &form.fields {
            if manager.is_visible(field)? {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    pub fn html_element(&self) -> Result<HtmlElement> {
        let fields = self.visible_fields()?;

        let header = HtmlElement::new(HtmlTag::Tr).append_elements(fields.iter().map(|f| {
            HtmlElement::new(HtmlTag::Th).append_text(translate::key(f.label_or_name()))
        }));

        let mut body = HtmlElement::new(HtmlTag::Tbody);
        if self.records.is_empty() {
            body.push_element(HtmlElement::new(HtmlTag::Tr).append_element_with(HtmlTag::Td, |td| {
                td.with_attribute("colspan", fields.len().max(1).to_string())
                    .with_css_class("text-center")
                    .append_text(translate::key("No records found"))
            }));
        }

        for record in &self.records {
            let mut row = HtmlElement::new(HtmlTag::Tr);
            for field in &fields {
                row.push_element(HtmlElement::new(HtmlTag::Td).append_element(self.cell(field, record)?));
            }
            body.push_element(row);
        }

        tracing::debug!(grid = %self.name, rows = self.records.len(), "rendered grid");

        Ok(HtmlElement::new(HtmlTag::Div)
            .with_css_class("table-responsive")
            .append_element_with(HtmlTag::Table, |table| {
                table
                    .with_attribute("id", self.name.as_str())
                    .with_css_class("table table-striped table-hover")
                    .append_element_with(HtmlTag::Thead, |thead| thead.append_element(header))
                    .append_element(body)
            }))
    }

    fn cell(&self, field: &FormElementField, record: &Values) -> Result<HtmlElement> {
        let value = value_of(record, &field.name).unwrap_or_default();

        let cell = match field.component {
            FormComponent::File if !value.is_empty() => {
                let mut file = TextFile::new(field, self.form_element, PageState::List, record)?;
                file.base.text = value.to_string();
                file.app_path = self.app_path.clone();
                file.base_url = self.base_url.clone();
                file.html_for_grid()?
            }
            FormComponent::ComboBox | FormComponent::Search => {
                let item = field
                    .data_item
                    .as_ref()
                    .and_then(|d| d.items.iter().find(|i| i.id == value));
                match item {
                    Some(item) => {
                        let mut cell = HtmlElement::fragment();
                        if let Some(icon) = item.icon.as_deref().filter(|i| !i.is_empty()) {
                            let mut icon = Icon::new(icon);
                            icon.color = item.image_color.clone();
                            icon.title = Some(item.description.clone());
                            cell = cell.append_element(icon.html_element()).append_text("&nbsp;");
                        }
                        cell.append_text(escape(&translate::key(&item.description)))
                    }
                    None => HtmlElement::raw(escape(value)),
                }
            }
            FormComponent::CheckBox => {
                let icon = if super::CheckBox::is_checked_value(value) {
                    "fa-check"
                } else {
                    "fa-times"
                };
                Icon::new(icon).html_element()
            }
            _ => HtmlElement::raw(escape(value)),
        };
        Ok(cell)
    }
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).to_string()
}
