//! Field actions turned into link buttons.

use crate::components::LinkButton;
use crate::dictionary::{ActionKind, FieldAction};
use crate::error::Result;
use crate::expression::{ExpressionManager, ExpressionOptions};

/// Builds the buttons of user defined field actions
#[derive(Debug, Clone, Copy)]
pub struct ActionManager<'a> {
    options: &'a ExpressionOptions,
    panel_name: &'a str,
}

impl<'a> ActionManager<'a> {
    pub fn new(options: &'a ExpressionOptions, panel_name: &'a str) -> Self {
        Self { options, panel_name }
    }

    /// Link button for `action`, with visibility and enablement resolved against
    /// the current values and placeholders replaced in its script or url
    pub fn link_field(&self, action: &FieldAction) -> Result<LinkButton> {
        let expressions = ExpressionManager::new(self.options);

        let mut link = LinkButton::new(self.link_name(&action.name));
        link.text = action.text.clone().unwrap_or_default();
        link.tooltip = action.tooltip.clone().unwrap_or_default();
        link.icon_class = action.icon.clone();
        link.confirmation_message = action
            .confirmation_message
            .as_deref()
            .map(|m| expressions.parse_placeholders(m, false));
        link.is_group = action.is_group;
        link.show_in_filter = action.show_in_filter;
        link.visible = action.visible && expressions.get_bool(&action.visible_expression, &action.name)?;
        link.enabled = expressions.get_bool(&action.enable_expression, &action.name)?;

        match &action.kind {
            ActionKind::Script { on_client_click } => {
                link.on_client_click = Some(expressions.parse_placeholders(on_client_click, false));
            }
            ActionKind::Url { url_action, new_window } => {
                link.url_action = Some(expressions.parse_placeholders(url_action, false));
                link.new_window = *new_window;
            }
        }

        Ok(link)
    }

    fn link_name(&self, action_name: &str) -> String {
        if self.panel_name.is_empty() {
            action_name.to_string()
        } else {
            format!("{}_{}", self.panel_name, action_name)
        }
    }
}
