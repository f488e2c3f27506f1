//! File field: shows the attached files and opens the upload form.
//!
//! Storing files is handled elsewhere; this control only renders the current
//! file list (a comma separated value) and the parameters the upload form needs.

use super::link_button::{LinkButton, LinkButtonGroup};
use super::text_group::TextGroup;
use super::textbox::TextBox;
use super::ControlBase;
use crate::dictionary::{value_of, DataFile, FormElement, FormElementField, Values};
use crate::error::{Error, Result};
use crate::expression::PageState;
use crate::html::{HtmlElement, HtmlTag};
use crate::translate;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::{Path, MAIN_SEPARATOR};

/// Query parameter for a download served inline
pub const PARAM_DOWNLOAD: &str = "jjdownload";
/// Query parameter for a direct download
pub const PARAM_DIRECT_DOWNLOAD: &str = "jjdirectdownload";

const APP_PATH_MARKER: &str = "{app.path}";

/// Parameters handed to the upload form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFormParameters {
    pub page_state: PageState,
    pub enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk_values: Option<String>,
}

impl UploadFormParameters {
    pub fn encode(&self) -> Result<String> {
        Ok(STANDARD.encode(serde_json::to_vec(self)?))
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let invalid = || Error::InvalidParameters(translate::key("Invalid parameters when opening file upload"));
        let bytes = STANDARD.decode(encoded.trim()).map_err(|_| invalid())?;
        serde_json::from_slice(&bytes).map_err(|_| invalid())
    }
}

#[derive(Debug, Clone)]
pub struct TextFile {
    pub base: ControlBase,
    pub field: FormElementField,
    pub data_file: DataFile,
    pub element_name: String,
    pub pk_fields: Vec<String>,
    pub page_state: PageState,
    pub form_values: Values,
    /// Replaces `{app.path}` in the configured folder
    pub app_path: String,
    /// Page url the download parameters are appended to
    pub base_url: String,
}

impl TextFile {
    pub fn new(
        field: &FormElementField,
        form_element: &FormElement,
        page_state: PageState,
        form_values: &Values,
    ) -> Result<Self> {
        let data_file = field.data_file.clone().ok_or_else(|| Error::Upload {
            field: field.name.clone(),
            reason: translate::key("Upload config not defined"),
        })?;

        let mut base = ControlBase::new(field.name.as_str());
        base.tooltip = field.help_description.clone().unwrap_or_default();
        base.attributes = field.attributes.clone();
        base.read_only = field.data_behavior == crate::dictionary::FieldBehavior::ViewOnly;

        Ok(Self {
            base,
            field: field.clone(),
            data_file,
            element_name: form_element.name.clone(),
            pk_fields: form_element.pk_fields().map(|f| f.name.clone()).collect(),
            page_state,
            form_values: form_values.clone(),
            app_path: String::new(),
            base_url: String::new(),
        })
    }

    /// File names held by the field value
    pub fn files(&self) -> Vec<&str> {
        self.base
            .text
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect()
    }

    pub fn presentation_text(&self) -> String {
        let files = self.files();
        match files.len() {
            0 => String::new(),
            1 => files[0].to_string(),
            n => translate::key_with("{0} Selected Files", &[&n]),
        }
    }

    /// Primary key values joined by `separator`
    pub fn pk_values(&self, separator: char) -> Result<String> {
        if self.pk_fields.is_empty() {
            return Err(self.upload_error(translate::key_with(
                "Error rendering upload! Primary key not defined in {0}",
                &[&self.element_name],
            )));
        }

        let mut values = Vec::with_capacity(self.pk_fields.len());
        for pk in &self.pk_fields {
            let value = value_of(&self.form_values, pk).ok_or_else(|| {
                self.upload_error(translate::key_with(
                    "Error rendering upload! Primary key value {0} not found at {1}",
                    &[pk, &self.element_name],
                ))
            })?;
            if !is_valid_file_name(value) {
                return Err(self.upload_error(translate::key_with(
                    "Error rendering upload! Primary key value {0} contains invalid characters.",
                    &[pk],
                )));
            }
            values.push(value);
        }

        Ok(values.join(&separator.to_string()))
    }

    /// True when every primary key has a value usable as a folder name
    pub fn has_pk(&self) -> bool {
        !self.pk_fields.is_empty()
            && self
                .pk_fields
                .iter()
                .all(|pk| value_of(&self.form_values, pk).is_some_and(is_valid_file_name))
    }

    /// Folder holding the files of the current record, with a trailing separator
    pub fn folder_path(&self) -> Result<String> {
        if self.data_file.folder_path.trim().is_empty() {
            return Err(self.upload_error("folder_path cannot be empty.".to_string()));
        }

        let pk_values = self.pk_values('_')?;
        let folder = self.data_file.folder_path.replace(APP_PATH_MARKER, &self.app_path);
        let mut path = Path::new(&folder).join(pk_values).to_string_lossy().into_owned();
        if !path.ends_with(MAIN_SEPARATOR) {
            path.push(MAIN_SEPARATOR);
        }
        Ok(path)
    }

    /// Script opening the upload form for this field
    pub fn open_upload_form_action(&self) -> Result<String> {
        let pk_values = if self.page_state != PageState::Insert && self.has_pk() {
            Some(self.pk_values('|')?)
        } else {
            None
        };

        let parameters = UploadFormParameters {
            page_state: self.page_state,
            enable: self.base.enabled && !self.base.read_only,
            pk_values,
        };

        let title = self
            .field
            .label
            .as_deref()
            .map(|l| l.replace('\'', "`").replace('"', " "))
            .unwrap_or_else(|| "Manage Files".to_string());

        Ok(format!(
            "jjview.openUploadForm('{}','{}','{}');",
            self.base.name,
            translate::key(&title),
            parameters.encode()?
        ))
    }

    pub fn html_element(&self) -> Result<HtmlElement> {
        let mut text_box = TextBox::new(format!("v_{}", self.base.name));
        text_box.base.read_only = true;
        text_box.base.tooltip = self.base.tooltip.clone();
        text_box.base.attributes = self.base.attributes.clone();
        text_box.base.text = self.presentation_text();

        let mut button = LinkButton::new("");
        button.show_as_button = true;
        button.on_client_click = Some(self.open_upload_form_action()?);
        button.tooltip = "Manage Files".to_string();
        button.icon_class = Some("fa fa-paperclip".to_string());

        let mut group = TextGroup::new(text_box);
        group.css_class = self.base.css_class.clone();
        group.actions.push(button);

        Ok(HtmlElement::new(HtmlTag::Div)
            .append_element(group.html_element())
            .append_hidden_input(&self.base.name, &self.files().join(",")))
    }

    /// Grid cell: one download link, or a dropdown with one link per file
    pub fn html_for_grid(&self) -> Result<HtmlElement> {
        let files = self.files();
        match files.len() {
            0 => Ok(HtmlElement::fragment()),
            1 => Ok(self.download_button(files[0])?.html_element()),
            n => {
                let actions = files
                    .iter()
                    .map(|f| self.download_button(f))
                    .collect::<Result<Vec<_>>>()?;
                let group = LinkButtonGroup {
                    caret_text: Some(format!("{}&nbsp;{}", n, translate::key("Files"))),
                    actions,
                    css_class: String::new(),
                };
                Ok(group.html_element())
            }
        }
    }

    fn download_button(&self, file_name: &str) -> Result<LinkButton> {
        let mut button = LinkButton::new("");
        button.icon_class = Some("fa fa-cloud-download".to_string());
        button.text = file_name.to_string();
        button.url_action = Some(self.download_link(file_name, false)?);
        button.is_group = true;
        Ok(button)
    }

    /// Url that downloads `file_name` from the record folder
    pub fn download_link(&self, file_name: &str, external: bool) -> Result<String> {
        let file_path = format!("{}{}", self.folder_path()?, file_name);
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        let parameter = if external { PARAM_DIRECT_DOWNLOAD } else { PARAM_DOWNLOAD };

        Ok(format!(
            "{}{}{}={}",
            self.base_url,
            separator,
            parameter,
            URL_SAFE_NO_PAD.encode(file_path)
        ))
    }

    fn upload_error(&self, reason: String) -> Error {
        Error::Upload {
            field: self.field.name.clone(),
            reason,
        }
    }
}

/// Rejects names that cannot be used as a file or folder name
pub fn is_valid_file_name(name: &str) -> bool {
    const INVALID: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
    !name.trim().is_empty() && !name.chars().any(|c| c.is_control() || INVALID.contains(&c))
}
