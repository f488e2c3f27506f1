use dictform::html::{HtmlBuilder, HtmlElement, HtmlTag};

#[test]
fn test_empty_elements() {
    assert_eq!(HtmlElement::new(HtmlTag::Div).render(), "<div></div>");
    assert_eq!(HtmlElement::new(HtmlTag::Span).render(), "<span></span>");
    assert_eq!(HtmlElement::new(HtmlTag::Br).render(), "<br/>");
}

#[test]
fn test_nested_elements_with_classes() {
    let html = HtmlElement::new(HtmlTag::Div)
        .with_css_class("row")
        .with_css_class("g-2")
        .append_element_with(HtmlTag::Span, |s| s.with_attribute("id", "total").append_text("10"))
        .render();

    assert_eq!(html, r#"<div class="row g-2"><span id="total">10</span></div>"#);
}

#[test]
fn test_conditional_builders() {
    let html = HtmlElement::new(HtmlTag::Div)
        .with_css_class_if(false, "hidden")
        .with_attribute_if(true, "data-id", "7")
        .append_element_if(false, HtmlTag::Hr, |hr| hr)
        .render();

    assert_eq!(html, r#"<div data-id="7"></div>"#);
}

#[test]
fn test_builder_renders_roots_in_order() {
    let mut builder = HtmlBuilder::new();
    builder.append_text("<!DOCTYPE html>");
    builder.start_element(HtmlTag::P).set_attribute("id", "intro");

    assert_eq!(builder.render_html(), r#"<!DOCTYPE html><p id="intro"></p>"#);
}
