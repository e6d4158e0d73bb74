use std::fmt;
use thiserror::Error;

/// A schema document could not be obtained for a form anchor.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to fetch schema for form '{form}': {reason}")]
pub struct SchemaFetchError {
    pub form: String,
    pub reason: String,
}

impl SchemaFetchError {
    pub fn new(form: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            form: form.into(),
            reason: reason.to_string(),
        }
    }
}

/// A schema document was obtained but does not describe a renderable form.
///
/// `path` is a JSON path into the document (e.g. `$.field_groups[0].fields[2].type`);
/// `field` names the enclosing field when the problem sits inside one.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct SchemaValidationError {
    pub path: String,
    pub field: Option<String>,
    pub reason: String,
}

impl SchemaValidationError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field: None,
            reason: reason.into(),
        }
    }

    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "invalid form schema at {} (field '{}'): {}",
                self.path, field, self.reason
            ),
            None => write!(f, "invalid form schema at {}: {}", self.path, self.reason),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Fetch(#[from] SchemaFetchError),
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("template error: {0}")]
    Template(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;
