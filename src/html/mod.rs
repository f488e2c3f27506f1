//! Fluent HTML tree builder used by every control.

pub mod builder;
pub mod element;
pub mod tag;

pub use builder::HtmlBuilder;
pub use element::{HtmlAttributes, HtmlElement, DATA_TOGGLE};
pub use tag::HtmlTag;
