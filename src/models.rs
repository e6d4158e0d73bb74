use crate::condition::ConditionGroup;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A whole form document as fetched for one page anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(rename = "form_name")]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub field_groups: Vec<GroupSchema>,
}

fn default_active() -> bool {
    true
}

impl FormSchema {
    /// Iterate every field of every group in document order
    pub fn fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.field_groups.iter().flat_map(|g| g.fields.iter())
    }

    /// Id of the rendered `<form>`. The hosting anchor already carries the
    /// bare form name as its id.
    pub fn form_id(&self) -> String {
        format!("{}_form", self.name)
    }

    pub fn has_file_field(&self) -> bool {
        self.fields().any(|f| f.field_type == FieldType::File)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSchema {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub fields: Vec<FieldSchema>,
    #[serde(default)]
    pub conditions_groups: Vec<ConditionGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub sel_options: Vec<OptionSchema>,
    #[serde(default)]
    pub conditions_groups: Vec<ConditionGroup>,
}

impl FieldSchema {
    /// Id of the underlying control; labels point at it with `for`.
    pub fn control_id(&self) -> String {
        format!("{}_field", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSchema {
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub conditions_groups: Vec<ConditionGroup>,
}

/// Field types understood by the renderer.
///
/// This is the one place that maps a schema `type` to the control it renders
/// as and to its per-type behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Phone,
    Email,
    Date,
    File,
}

/// The HTML control a field type renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// `<input type="...">`
    Input(&'static str),
    Select,
}

/// What happens when the user changes a rendered control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeHandler {
    Log,
    /// Grow the drop zone and show the chosen file's name
    FilePreview,
}

impl ChangeHandler {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeHandler::Log => "log",
            ChangeHandler::FilePreview => "file-preview",
        }
    }
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Select,
        FieldType::Phone,
        FieldType::Email,
        FieldType::Date,
        FieldType::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Select => "select",
            FieldType::Phone => "phone",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::File => "file",
        }
    }

    pub fn control(self) -> ControlKind {
        match self {
            FieldType::Text => ControlKind::Input("text"),
            FieldType::Select => ControlKind::Select,
            // "phone" is not an HTML input type
            FieldType::Phone => ControlKind::Input("tel"),
            FieldType::Email => ControlKind::Input("email"),
            FieldType::Date => ControlKind::Input("date"),
            FieldType::File => ControlKind::Input("file"),
        }
    }

    /// Whether the control is preceded by a drop-zone image.
    pub fn has_dropzone(self) -> bool {
        matches!(self, FieldType::File)
    }

    /// Whether a `placeholder` attribute means anything on this control.
    pub fn accepts_placeholder(self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Phone | FieldType::Email | FieldType::Date
        )
    }

    pub fn change_handler(self) -> ChangeHandler {
        match self {
            FieldType::File => ChangeHandler::FilePreview,
            _ => ChangeHandler::Log,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown field type '{}'. Expected one of: {}",
                    s,
                    FieldType::ALL
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}
