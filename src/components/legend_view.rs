//! Caption of the icons used by a combo box field.

use super::icon::Icon;
use crate::dictionary::{FormComponent, FormElement, FormElementField};
use crate::html::{HtmlElement, HtmlTag, DATA_TOGGLE};
use crate::translate;

#[derive(Debug, Clone)]
pub struct LegendView<'a> {
    pub name: String,
    pub form_element: &'a FormElement,
    pub show_as_modal: bool,
}

impl<'a> LegendView<'a> {
    pub fn new(form_element: &'a FormElement) -> Self {
        Self {
            name: "iconLegend".to_string(),
            form_element,
            show_as_modal: false,
        }
    }

    /// First combo box field asking for an image legend
    pub fn legend_field(&self) -> Option<&'a FormElementField> {
        self.form_element.fields.iter().find(|f| {
            f.component == FormComponent::ComboBox
                && f.data_item.as_ref().is_some_and(|item| item.show_image_legend)
        })
    }

    pub fn html_element(&self) -> HtmlElement {
        if self.show_as_modal {
            self.html_modal()
        } else {
            self.html_legend()
        }
    }

    fn html_legend(&self) -> HtmlElement {
        let div = HtmlElement::new(HtmlTag::Div);
        let items = self
            .legend_field()
            .and_then(|f| f.data_item.as_ref())
            .map(|item| item.items.as_slice());

        match items {
            Some(items) => div.append_elements(items.iter().map(|item| {
                let icon = Icon {
                    icon_class: item.icon.clone().unwrap_or_default(),
                    color: item.image_color.clone(),
                    title: Some(item.description.clone()),
                    css_class: "fa-fw fa-2x".to_string(),
                };
                HtmlElement::new(HtmlTag::Div)
                    .with_attribute("style", "height:40px")
                    .append_element(icon.html_element())
                    .append_text("&nbsp;&nbsp;")
                    .append_text(html_escape::encode_text(&translate::key(&item.description)).to_string())
                    .append_tag(HtmlTag::Br)
            })),
            None => div
                .append_tag(HtmlTag::Br)
                .append_text(translate::key("There is no caption to be displayed")),
        }
    }

    fn html_modal(&self) -> HtmlElement {
        let form = HtmlElement::new(HtmlTag::Div)
            .with_css_class("form-horizontal")
            .with_attribute("role", "form")
            .append_element(self.html_legend());

        modal_dialog(&self.name, &translate::key("Information"), form)
    }
}

/// Bootstrap modal wrapping `content`
pub fn modal_dialog(name: &str, title: &str, content: HtmlElement) -> HtmlElement {
    HtmlElement::new(HtmlTag::Div)
        .with_attribute("id", name)
        .with_css_class("modal fade")
        .with_attribute("tabindex", "-1")
        .with_attribute("role", "dialog")
        .with_attribute("aria-hidden", "true")
        .append_element_with(HtmlTag::Div, |dialog| {
            dialog
                .with_css_class("modal-dialog")
                .with_attribute("role", "document")
                .append_element_with(HtmlTag::Div, |body| {
                    body.with_css_class("modal-content")
                        .append_element_with(HtmlTag::Div, |header| {
                            header
                                .with_css_class("modal-header")
                                .append_element_with(HtmlTag::H5, |h| {
                                    h.with_css_class("modal-title").append_text(title)
                                })
                                .append_element_with(HtmlTag::Button, |b| {
                                    b.with_attribute("type", "button")
                                        .with_css_class("btn-close")
                                        .with_attribute("data-bs-dismiss", "modal")
                                        .with_attribute("aria-label", "Close")
                                })
                        })
                        .append_element_with(HtmlTag::Div, |b| {
                            b.with_css_class("modal-body").append_element(content)
                        })
                })
        })
}

/// Button opening the modal with id `name`
pub fn modal_toggle(name: &str, text: &str) -> HtmlElement {
    HtmlElement::new(HtmlTag::Button)
        .with_attribute("type", "button")
        .with_css_class("btn btn-link")
        .with_attribute(DATA_TOGGLE, "modal")
        .with_attribute("data-bs-target", format!("#{}", name))
        .append_text(translate::key(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DataItem, DataItemValue, FieldType};

    fn status_form(show_legend: bool) -> FormElement {
        let mut form = FormElement::new("Orders");
        let mut status = FormElementField::new("Status", FieldType::Varchar);
        status.component = FormComponent::ComboBox;
        let mut open = DataItemValue::new("O", "Open");
        open.icon = Some("fa-folder-open".to_string());
        open.image_color = Some("#0000ff".to_string());
        status.data_item = Some(DataItem {
            items: vec![open, DataItemValue::new("C", "Closed")],
            show_image_legend: show_legend,
            ..Default::default()
        });
        form.fields.push(status);
        form
    }

    #[test]
    fn test_legend_rows() {
        let form = status_form(true);
        let html = LegendView::new(&form).html_element().render();

        assert_eq!(html.matches(r#"<div style="height:40px">"#).count(), 2);
        assert!(html.contains(
            r##"<span class="fa fa-folder-open fa-fw fa-2x" style="color:#0000ff" title="Open"></span>&nbsp;&nbsp;Open<br/>"##
        ));
    }

    #[test]
    fn test_descriptions_are_escaped() {
        let mut form = status_form(true);
        if let Some(item) = form.fields[0].data_item.as_mut() {
            item.items[1].description = "R&D <x>".to_string();
        }
        let html = LegendView::new(&form).html_element().render();

        assert!(html.contains("&nbsp;&nbsp;R&amp;D &lt;x&gt;<br/>"));
        assert!(!html.contains("<x>"));
    }

    #[test]
    fn test_no_legend_field() {
        let form = status_form(false);
        let legend = LegendView::new(&form);
        assert!(legend.legend_field().is_none());
        assert_eq!(
            legend.html_element().render(),
            "<div><br/>There is no caption to be displayed</div>"
        );
    }

    #[test]
    fn test_modal() {
        let form = status_form(true);
        let mut legend = LegendView::new(&form);
        legend.show_as_modal = true;

        let html = legend.html_element().render();
        assert!(html.starts_with(r#"<div id="iconLegend" class="modal fade""#));
        assert!(html.contains(r#"<h5 class="modal-title">Information</h5>"#));
        assert!(html.contains(r#"<div class="form-horizontal" role="form">"#));
    }
}
