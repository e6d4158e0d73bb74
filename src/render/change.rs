use super::classes;
use crate::html::Element;
use crate::models::{ChangeHandler, FieldType};

/// Height the drop zone grows to once a file has been chosen.
const FILE_PREVIEW_HEIGHT: &str = "80px";

/// A change on a rendered control, as reported by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeEvent {
    /// New value of a text-like or select control
    pub value: Option<String>,
    /// Names of the files chosen in a file control, first one shown
    pub files: Vec<String>,
}

impl ChangeEvent {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            files: Vec::new(),
        }
    }

    pub fn files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: None,
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

/// Run the change handler of a rendered field wrapper (as produced by
/// `render_field`) against an event.
///
/// Returns false when the element is not a field wrapper the renderer knows.
pub fn apply_change(field_wrap: &mut Element, event: &ChangeEvent) -> bool {
    let Some(field_type) = wrapper_field_type(field_wrap) else {
        return false;
    };

    match field_type.change_handler() {
        ChangeHandler::Log => {
            log::debug!(
                "Field '{}' changed: {:?}",
                field_wrap.id().unwrap_or_default(),
                event
            );
            true
        }
        ChangeHandler::FilePreview => show_file_preview(field_wrap, event),
    }
}

fn wrapper_field_type(field_wrap: &Element) -> Option<FieldType> {
    if !field_wrap.has_class(classes::FIELD_WRAP) {
        return None;
    }
    field_wrap
        .get_attr("class")?
        .split_whitespace()
        .find_map(|c| c.parse::<FieldType>().ok())
}

fn show_file_preview(field_wrap: &mut Element, event: &ChangeEvent) -> bool {
    let Some(container) = field_wrap.find_by_class_mut(classes::FIELD_EXTRA) else {
        return false;
    };

    // One readout per selection: the previous one always goes
    container.remove_by_class(classes::FILENAME);

    match event.files.first() {
        Some(name) => {
            container.set_attr("style", format!("height: {}", FILE_PREVIEW_HEIGHT));
            container.append(Element::new("p").class(classes::FILENAME).text(name));
        }
        None => log::debug!("File selection cleared"),
    }
    true
}
