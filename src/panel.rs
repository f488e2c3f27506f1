//! Form panel: lays out one control per field and collects submitted values.

use crate::components::ValidationSummary;
use crate::dictionary::{value_of, FieldBehavior, FormComponent, FormElement, FormElementField, Values};
use crate::error::Result;
use crate::expression::{ExpressionManager, ExpressionOptions, PageState};
use crate::factory::WebControlFactory;
use crate::html::{HtmlElement, HtmlTag};
use crate::records::RecordProvider;
use crate::translate;
use crate::validation::FieldValidator;
use indexmap::IndexMap;

/// Field name -> message
pub type FieldErrors = IndexMap<String, String>;

pub struct DataPanel<'a> {
    pub name: String,
    pub form_element: &'a FormElement,
    pub page_state: PageState,
    pub values: Values,
    pub user_values: Values,
    pub errors: FieldErrors,
    /// Fields per row, 1 to 12
    pub form_cols: usize,
    /// Replaces `{app.path}` in file folders
    pub app_path: String,
}

impl<'a> DataPanel<'a> {
    pub fn new(form_element: &'a FormElement, page_state: PageState) -> Self {
        Self {
            name: format!("pnl_{}", form_element.name.to_lowercase()),
            form_element,
            page_state,
            values: Values::new(),
            user_values: Values::new(),
            errors: FieldErrors::new(),
            form_cols: 1,
            app_path: String::new(),
        }
    }

    fn expression_options(&self, values: &Values, page_state: PageState) -> ExpressionOptions {
        ExpressionOptions::new(&self.user_values, values.clone(), page_state)
    }

    /// Current values, with defaults filled in when inserting
    pub fn values_with_defaults(&self) -> Result<Values> {
        let mut values = self.values.clone();
        if self.page_state != PageState::Insert {
            return Ok(values);
        }

        let options = self.expression_options(&self.values, self.page_state);
        let expressions = ExpressionManager::new(&options);
        for field in &self.form_element.fields {
            if value_of(&values, &field.name).is_some_and(|v| !v.is_empty()) {
                continue;
            }
            if let Some(default) = expressions.get_default_value(field)? {
                values.insert(field.name.clone(), default);
            }
        }
        Ok(values)
    }

    pub fn html_element(&self) -> Result<HtmlElement> {
        let values = self.values_with_defaults()?;
        let options = self.expression_options(&values, self.page_state);
        let expressions = ExpressionManager::new(&options);
        let mut factory = WebControlFactory::new(self.form_element, options.clone(), self.name.as_str());
        factory.app_path = self.app_path.clone();

        let cols = self.form_cols.clamp(1, 12);
        let col_class = format!("col-sm-{}", 12 / cols);

        let mut panel = HtmlElement::new(HtmlTag::Div)
            .with_attribute("id", self.name.as_str())
            .with_css_class("jjform-panel");

        if !self.errors.is_empty() {
            panel = panel.append_element(ValidationSummary::new(&self.errors).html_element());
        }

        let mut row = HtmlElement::new(HtmlTag::Div).with_css_class("row");
        let mut hidden = Vec::new();

        for field in &self.form_element.fields {
            let value = value_of(&values, &field.name);

            if !expressions.is_visible(field)? {
                if self.page_state != PageState::Filter {
                    hidden.push(
                        HtmlElement::new(HtmlTag::Input)
                            .with_attribute("type", "hidden")
                            .with_name_and_id(&field.name)
                            .with_attribute("value", value.unwrap_or_default()),
                    );
                }
                continue;
            }

            let mut control = factory.create_control(field, value)?;
            let enabled = self.page_state != PageState::View && expressions.is_enabled(field)?;
            control.set_enabled(enabled);

            let error = self.errors.get(&field.name);
            let has_label = field.component != FormComponent::CheckBox || self.page_state == PageState::List;
            let mut control_html = control.html_element()?;
            if error.is_some() {
                control_html.add_css_class("is-invalid");
            }

            row = row.append_element_with(HtmlTag::Div, |group| {
                group
                    .with_css_class("mb-3")
                    .with_css_class(&col_class)
                    .with_css_class_if(error.is_some(), "has-error")
                    .append_element_if(has_label, HtmlTag::Label, |label| {
                        label
                            .with_css_class("form-label")
                            .with_attribute("for", field.name.as_str())
                            .append_text(translate::key(field.label_or_name()))
                            .append_element_if(self.shows_required_marker(field), HtmlTag::Span, |s| {
                                s.with_css_class("required-symbol").append_text("*")
                            })
                    })
                    .append_element(control_html)
                    .append_element_if(error.is_some(), HtmlTag::Div, |d| {
                        d.with_css_class("invalid-feedback d-block")
                            .append_text(html_escape::encode_text(error.map(String::as_str).unwrap_or_default()).to_string())
                    })
            });
        }

        tracing::debug!(panel = %self.name, state = %self.page_state, "rendered data panel");
        Ok(panel.append_element(row).append_elements(hidden))
    }

    pub fn render(&self) -> Result<String> {
        Ok(self.html_element()?.render())
    }

    fn shows_required_marker(&self, field: &FormElementField) -> bool {
        match self.page_state {
            PageState::Filter => field.filter.is_required,
            PageState::View | PageState::List => false,
            _ => field.is_required,
        }
    }

    /// Values of a submitted form: editable fields take the posted value, the others
    /// keep the current one. Unchecked check boxes are not posted and become `0`.
    pub fn form_values(&self, posted: &Values) -> Result<Values> {
        let mut merged = self.values.clone();
        for (name, value) in posted {
            merged.insert(name.clone(), value.clone());
        }

        let options = self.expression_options(&merged, self.page_state);
        let expressions = ExpressionManager::new(&options);

        let mut values = Values::new();
        for field in &self.form_element.fields {
            let editable = field.data_behavior != FieldBehavior::ViewOnly
                && expressions.is_visible(field)?
                && expressions.is_enabled(field)?;

            let value = if editable {
                match (field.component, value_of(posted, &field.name)) {
                    (FormComponent::CheckBox, Some(v)) if crate::components::CheckBox::is_checked_value(v) => {
                        Some("1".to_string())
                    }
                    (FormComponent::CheckBox, _) => Some("0".to_string()),
                    (_, posted) => posted.map(str::to_string),
                }
            } else {
                value_of(&self.values, &field.name).map(str::to_string)
            };

            if let Some(value) = value {
                values.insert(field.name.clone(), value);
            }
        }
        Ok(values)
    }

    /// Validate values for the given state; only visible, editable real fields are checked
    pub fn validate_fields(&self, values: &Values, page_state: PageState) -> Result<FieldErrors> {
        let options = self.expression_options(values, page_state);
        let expressions = ExpressionManager::new(&options);

        let mut errors = FieldErrors::new();
        for field in &self.form_element.fields {
            if field.data_behavior != FieldBehavior::Real
                || !expressions.is_visible(field)?
                || !expressions.is_enabled(field)?
            {
                continue;
            }
            if let Some(message) = FieldValidator::validate(field, value_of(values, &field.name)) {
                errors.insert(field.name.clone(), message);
            }
        }
        Ok(errors)
    }

    /// Load the record identified by the primary key values of `relation_values`.
    /// Returns false when no record matches.
    pub fn load_values_from_pk(&mut self, provider: &dyn RecordProvider, relation_values: &Values) -> Result<bool> {
        let mut pk_values = Values::new();
        for pk in self.form_element.pk_fields() {
            if let Some(value) = value_of(relation_values, &pk.name) {
                pk_values.insert(pk.name.clone(), value.to_string());
            }
        }

        match provider.get_by_pk(self.form_element, &pk_values)? {
            Some(record) => {
                self.values = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save a posted form over the record named by `relation_values`.
    ///
    /// Primary key values always come from `relation_values`. Nothing is written
    /// when validation fails, and a provider failure is reported under `DB`. The
    /// panel keeps the submitted values and the errors for the next render.
    pub fn save(&mut self, provider: &dyn RecordProvider, posted: &Values, relation_values: &Values) -> Result<FieldErrors> {
        self.load_values_from_pk(provider, relation_values)?;

        let mut values = self.form_values(posted)?;
        for pk in self.form_element.pk_fields() {
            if let Some(value) = value_of(relation_values, &pk.name) {
                values.insert(pk.name.clone(), value.to_string());
            }
        }

        let mut errors = self.validate_fields(&values, self.page_state)?;
        if errors.is_empty() {
            if let Err(e) = provider.save(self.form_element, &values) {
                tracing::warn!(name = %self.form_element.name, error = %e, "record not saved");
                errors.insert("DB".to_string(), e.to_string());
            }
        }

        self.values = values;
        self.errors = errors.clone();
        Ok(errors)
    }
}
