pub mod condition;
pub mod config;
pub mod error;
pub mod fetch;
pub mod html;
pub mod json_parser;
pub mod models;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod templates;

#[cfg(test)]
mod tests;

pub use condition::{Condition, ConditionGroup};
pub use config::{Config, EndpointConfig};
pub use error::{FormError, SchemaFetchError, SchemaValidationError};
pub use fetch::{DirSource, HttpSource, SchemaSource};
pub use html::{Element, Node};
pub use json_parser::{parse_form_json, parse_form_json_value, strip_jsonc, validate_form_json};
pub use models::{FieldSchema, FieldType, FormSchema, GroupSchema, OptionSchema};
pub use pipeline::{render_anchor, render_page, AnchorOutcome, PageRender};
pub use render::{apply_change, ChangeEvent, FormRenderer, RenderOptions};
pub use schema::{get_form_schema, get_schema_description};
