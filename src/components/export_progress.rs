//! Progress panel shown while a dictionary export runs in the background.

use crate::html::{HtmlElement, HtmlTag};
use crate::translate;

#[derive(Debug, Clone)]
pub struct ExportProgress {
    name: String,
}

impl ExportProgress {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn html_element(&self) -> HtmlElement {
        let stop_href = format!(
            "javascript:JJDataExp.stopProcess('{}','{}')",
            self.name,
            translate::key("Stopping Processing...")
        );

        HtmlElement::new(HtmlTag::Div)
            .with_css_class("text-center")
            .append_element(loading())
            .append_element_with(HtmlTag::Div, |div| {
                div.with_attribute("id", "divMsgProcess")
                    .with_css_class("text-center")
                    .with_attribute("style", "display:none;")
                    .append_element(progress_data())
                    .append_tag(HtmlTag::Br)
                    .append_text(translate::key("Exportation started on"))
                    .append_element_with(HtmlTag::Span, |s| s.with_attribute("id", "lblStartDate"))
                    .append_tag(HtmlTag::Br)
                    .append_tag(HtmlTag::Br)
                    .append_tag(HtmlTag::Br)
                    .append_element_with(HtmlTag::A, |a| {
                        a.with_attribute("href", stop_href)
                            .append_element_with(HtmlTag::Span, |s| s.with_css_class("fa fa-stop"))
                            .append_text(format!("&nbsp;{}", translate::key("Stop the exportation.")))
                    })
            })
            .append_script(format!("JJDataExp.startProcess('{}')", self.name))
    }
}

fn loading() -> HtmlElement {
    HtmlElement::new(HtmlTag::Div)
        .with_attribute("id", "divProcess")
        .with_attribute("style", "text-align:center;")
        .append_hidden_input("current_uploadaction", "")
        .append_element_with(HtmlTag::Div, |div| {
            div.with_attribute("id", "impSpin")
                .with_attribute("style", "position: relative; height: 80px")
        })
}

fn progress_data() -> HtmlElement {
    HtmlElement::new(HtmlTag::Div)
        .append_element_with(HtmlTag::Div, |div| {
            div.with_attribute("id", "divStatus")
                .with_css_class("text-center")
                .append_element_with(HtmlTag::Span, |s| s.with_attribute("id", "lblResumeLog"))
        })
        .append_element_with(HtmlTag::Div, |div| {
            div.with_attribute("style", "display:none;width:50%")
                .with_css_class("mx-auto")
                .append_element_with(HtmlTag::Div, |progress| {
                    progress
                        .with_css_class("progress")
                        .append_element_with(HtmlTag::Div, |bar| {
                            bar.with_css_class("progress-bar")
                                .with_attribute("role", "progressbar")
                                .with_attribute("style", "width: 0;")
                                .with_attribute("aria-valuemin", "0")
                                .with_attribute("aria-valuemax", "100")
                                .append_text("0%")
                        })
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_structure() {
        let html = ExportProgress::new("Customers").html_element().render();

        for id in ["divProcess", "impSpin", "divMsgProcess", "divStatus", "lblResumeLog", "lblStartDate"] {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing {}", id);
        }
        assert!(html.contains("Exportation started on"));
        assert!(html.contains(r#"<div class="progress-bar" role="progressbar" style="width: 0;" aria-valuemin="0" aria-valuemax="100">0%</div>"#));
        assert!(html.contains("&nbsp;Stop the exportation."));
        assert!(html.ends_with(r#"<script type="text/javascript">JJDataExp.startProcess('Customers')</script></div>"#));
    }
}
