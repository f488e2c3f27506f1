//! Builds the input control of a field from its metadata.

use crate::actions::ActionManager;
use crate::components::{
    CheckBox, ComboBox, Control, ControlBase, InputAddon, InputType, LinkButton, Lookup, SearchBox,
    Slider, TextArea, TextBox, TextFile, TextGroup,
};
use crate::dictionary::{FieldAction, FieldBehavior, FormComponent, FormElement, FormElementField, Values};
use crate::error::{Error, Result};
use crate::expression::{ExpressionOptions, PageState};
use crate::translate;

/// Passed to the render hook before an action button is added to a field.
/// Setting `link` to `None` drops the button.
#[derive(Debug)]
pub struct ActionRenderArgs<'a> {
    pub action: &'a FieldAction,
    pub link: Option<LinkButton>,
    pub form_values: &'a Values,
}

pub type RenderActionHook = Box<dyn Fn(&mut ActionRenderArgs<'_>) + Send + Sync>;

pub struct WebControlFactory<'a> {
    pub form_element: &'a FormElement,
    pub expression_options: ExpressionOptions,
    pub panel_name: String,
    /// Replaces `{app.path}` in file folders
    pub app_path: String,
    on_render_action: Option<RenderActionHook>,
}

impl<'a> WebControlFactory<'a> {
    pub fn new(
        form_element: &'a FormElement,
        expression_options: ExpressionOptions,
        panel_name: impl Into<String>,
    ) -> Self {
        Self {
            form_element,
            expression_options,
            panel_name: panel_name.into(),
            app_path: String::new(),
            on_render_action: None,
        }
    }

    /// Hook invoked for every user action button before it is added
    pub fn on_render_action<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut ActionRenderArgs<'_>) + Send + Sync + 'static,
    {
        self.on_render_action = Some(Box::new(hook));
        self
    }

    fn page_state(&self) -> PageState {
        self.expression_options.page_state
    }

    pub fn create_control(&self, field: &FormElementField, value: Option<&str>) -> Result<Control> {
        tracing::trace!(field = %field.name, component = ?field.component, "creating control");
        let page_state = self.page_state();

        let mut control = match field.component {
            FormComponent::ComboBox => {
                let mut combo = ComboBox::new(field.name.as_str(), required(field, field.data_item.clone(), "data_item")?);
                combo.base = ControlBase::from_field(field, value);
                combo.selected_value = value.map(str::to_string);
                Control::ComboBox(combo)
            }
            FormComponent::Search => {
                let mut search = SearchBox::new(field.name.as_str(), required(field, field.data_item.clone(), "data_item")?);
                search.base = ControlBase::from_field(field, value);
                search.selected_value = value.map(str::to_string);
                Control::SearchBox(search)
            }
            FormComponent::Lookup => {
                let mut lookup = Lookup::new(
                    field.name.as_str(),
                    required(field, field.data_element_map.clone(), "data_element_map")?,
                );
                lookup.base = ControlBase::from_field(field, value);
                Control::Lookup(lookup)
            }
            FormComponent::CheckBox => {
                let mut check = CheckBox::new(field.name.as_str());
                check.base = ControlBase::from_field(field, None);
                check.checked = value.is_some_and(CheckBox::is_checked_value);
                if page_state != PageState::List {
                    check.base.text = field.label_or_name().to_string();
                }
                Control::CheckBox(check)
            }
            FormComponent::TextArea => {
                let mut area = TextArea::new(field.name.as_str());
                area.base = ControlBase::from_field(field, value);
                Control::TextArea(area)
            }
            FormComponent::Slider => {
                let mut slider = Slider::new(field.name.as_str());
                slider.base = ControlBase::from_field(field, value);
                slider.min_value = field.min_value.unwrap_or(slider.min_value);
                slider.max_value = field.max_value.unwrap_or(slider.max_value);
                slider.number_of_decimal_places = field.number_of_decimal_places;
                Control::Slider(slider)
            }
            FormComponent::File if page_state == PageState::Filter => {
                Control::TextGroup(create_text_group(field, value))
            }
            FormComponent::File => {
                let mut file = TextFile::new(
                    field,
                    self.form_element,
                    page_state,
                    &self.expression_options.form_values,
                )?;
                file.base.text = value.unwrap_or_default().to_string();
                file.base.css_class = field.css_class.clone().unwrap_or_default();
                file.app_path = self.app_path.clone();
                Control::TextFile(Box::new(file))
            }
            _ => {
                let mut group = create_text_group(field, value);
                self.add_user_actions(&mut group, field)?;
                Control::TextGroup(group)
            }
        };

        control.set_read_only(field.data_behavior == FieldBehavior::ViewOnly && page_state != PageState::Filter);
        Ok(control)
    }

    fn add_user_actions(&self, group: &mut TextGroup, field: &FormElementField) -> Result<()> {
        let filter = self.page_state() == PageState::Filter;
        let manager = ActionManager::new(&self.expression_options, &self.panel_name);

        for action in field.actions.iter().filter(|a| a.visible) {
            if filter && !action.show_in_filter {
                continue;
            }

            let mut args = ActionRenderArgs {
                action,
                link: Some(manager.link_field(action)?),
                form_values: &self.expression_options.form_values,
            };
            if let Some(hook) = &self.on_render_action {
                hook(&mut args);
            }
            if let Some(link) = args.link {
                group.actions.push(link);
            }
        }
        Ok(())
    }
}

fn required<T>(field: &FormElementField, value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| {
        Error::InvalidDictionary(format!(
            "field '{}' uses {:?} but has no {}",
            field.name, field.component, what
        ))
    })
}

/// Text box wrapped with the addon matching the field component
pub fn create_text_group(field: &FormElementField, value: Option<&str>) -> TextGroup {
    let mut text_box = TextBox::new(field.name.as_str());
    text_box.base = ControlBase::from_field(field, value);
    text_box.number_of_decimal_places = field.number_of_decimal_places;
    text_box.min_value = field.min_value;
    text_box.max_value = field.max_value;

    let (input_type, addon) = match field.component {
        FormComponent::Number => (InputType::Number, None),
        FormComponent::Currency => (InputType::Number, Some(InputAddon::Text(translate::key("$")))),
        FormComponent::Email => (InputType::Email, Some(InputAddon::Icon("fa fa-envelope".to_string()))),
        FormComponent::Password => (InputType::Password, Some(InputAddon::Icon("fa fa-key".to_string()))),
        FormComponent::Tel => (InputType::Tel, Some(InputAddon::Icon("fa fa-phone".to_string()))),
        FormComponent::Date => (InputType::Date, Some(InputAddon::Icon("fa fa-calendar".to_string()))),
        FormComponent::DateTime => (
            InputType::DateTimeLocal,
            Some(InputAddon::Icon("fa fa-calendar".to_string())),
        ),
        FormComponent::Hour => (InputType::Time, Some(InputAddon::Icon("fa fa-clock-o".to_string()))),
        _ if field.data_type.is_numeric() => (InputType::Number, None),
        _ => (InputType::Text, None),
    };
    text_box.input_type = input_type;

    let mut group = TextGroup::new(text_box);
    group.addon = addon;
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DataFile, DataItem, DataItemValue, FieldType};

    fn form() -> FormElement {
        let mut form = FormElement::new("Customer");

        let mut id = FormElementField::new("Id", FieldType::Int);
        id.is_pk = true;
        id.data_behavior = FieldBehavior::ViewOnly;
        form.fields.push(id);

        let mut name = FormElementField::new("Name", FieldType::Varchar);
        name.size = 80;
        let mut search = FieldAction::script("find", "find('{Name}');");
        search.icon = Some("fa fa-search".to_string());
        name.actions.push(search);
        let mut clear = FieldAction::script("clear", "clear();");
        clear.show_in_filter = true;
        name.actions.push(clear);
        form.fields.push(name);

        let mut active = FormElementField::new("Active", FieldType::Int);
        active.component = FormComponent::CheckBox;
        active.label = Some("Is active".to_string());
        form.fields.push(active);

        let mut state = FormElementField::new("State", FieldType::Varchar);
        state.component = FormComponent::ComboBox;
        state.data_item = Some(DataItem {
            items: vec![DataItemValue::new("SP", "Sao Paulo")],
            ..Default::default()
        });
        form.fields.push(state);

        let mut docs = FormElementField::new("Docs", FieldType::Varchar);
        docs.component = FormComponent::File;
        docs.data_file = Some(DataFile {
            folder_path: "/files".to_string(),
            ..Default::default()
        });
        form.fields.push(docs);

        form
    }

    fn options(state: PageState) -> ExpressionOptions {
        let mut values = Values::new();
        values.insert("Id".to_string(), "1".to_string());
        values.insert("Name".to_string(), "Ann".to_string());
        ExpressionOptions::new(&Values::new(), values, state)
    }

    #[test]
    fn test_view_only_is_read_only_except_in_filter() {
        let form = form();
        let id = form.field("Id").unwrap();

        let factory = WebControlFactory::new(&form, options(PageState::Update), "pnl");
        assert!(factory.create_control(id, Some("1")).unwrap().base().read_only);

        let factory = WebControlFactory::new(&form, options(PageState::Filter), "pnl");
        assert!(!factory.create_control(id, None).unwrap().base().read_only);
    }

    #[test]
    fn test_user_actions() {
        let form = form();
        let factory = WebControlFactory::new(&form, options(PageState::Update), "pnl");
        let control = factory.create_control(form.field("Name").unwrap(), Some("Ann")).unwrap();

        let Control::TextGroup(group) = &control else {
            panic!("expected a text group");
        };
        assert_eq!(group.actions.len(), 2);
        assert_eq!(group.actions[0].on_client_click.as_deref(), Some("find('Ann');"));
        assert_eq!(group.text_box.base.max_length, 80);
    }

    #[test]
    fn test_filter_keeps_filter_actions_only() {
        let form = form();
        let factory = WebControlFactory::new(&form, options(PageState::Filter), "pnl");
        let control = factory.create_control(form.field("Name").unwrap(), None).unwrap();

        let Control::TextGroup(group) = &control else {
            panic!("expected a text group");
        };
        assert_eq!(group.actions.len(), 1);
        assert_eq!(group.actions[0].name, "pnl_clear");
    }

    #[test]
    fn test_render_hook_can_drop_actions() {
        let form = form();
        let factory = WebControlFactory::new(&form, options(PageState::Update), "pnl").on_render_action(|args| {
            if args.action.name == "find" {
                args.link = None;
            }
        });
        let control = factory.create_control(form.field("Name").unwrap(), None).unwrap();

        let Control::TextGroup(group) = &control else {
            panic!("expected a text group");
        };
        assert_eq!(group.actions.len(), 1);
    }

    #[test]
    fn test_check_box_label_outside_list() {
        let form = form();
        let field = form.field("Active").unwrap();

        let factory = WebControlFactory::new(&form, options(PageState::Insert), "pnl");
        let Control::CheckBox(check) = factory.create_control(field, Some("1")).unwrap() else {
            panic!("expected a check box");
        };
        assert!(check.checked);
        assert_eq!(check.base.text, "Is active");

        let factory = WebControlFactory::new(&form, options(PageState::List), "pnl");
        let Control::CheckBox(check) = factory.create_control(field, Some("0")).unwrap() else {
            panic!("expected a check box");
        };
        assert!(!check.checked);
        assert!(check.base.text.is_empty());
    }

    #[test]
    fn test_combo_and_file() {
        let form = form();
        let factory = WebControlFactory::new(&form, options(PageState::Update), "pnl");

        let combo = factory.create_control(form.field("State").unwrap(), Some("SP")).unwrap();
        assert!(combo.render().unwrap().contains(r#"<option value="SP" selected="selected">"#));

        let file = factory.create_control(form.field("Docs").unwrap(), Some("a.pdf")).unwrap();
        assert!(matches!(file, Control::TextFile(_)));

        let factory = WebControlFactory::new(&form, options(PageState::Filter), "pnl");
        let file = factory.create_control(form.field("Docs").unwrap(), None).unwrap();
        assert!(matches!(file, Control::TextGroup(_)));
    }

    #[test]
    fn test_missing_data_item_is_an_error() {
        let mut form = form();
        form.field_mut("State").unwrap().data_item = None;
        let factory = WebControlFactory::new(&form, options(PageState::Update), "pnl");

        let result = factory.create_control(form.field("State").unwrap(), None);
        assert!(matches!(result, Err(Error::InvalidDictionary(_))));
    }

    #[test]
    fn test_addon_by_component() {
        let mut field = FormElementField::new("Mail", FieldType::Varchar);
        field.component = FormComponent::Email;
        let group = create_text_group(&field, None);

        assert_eq!(group.text_box.input_type, InputType::Email);
        assert_eq!(group.addon, Some(InputAddon::Icon("fa fa-envelope".to_string())));
    }
}
