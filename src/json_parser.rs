//! Eager parsing and validation of form schema documents.
//!
//! The whole document is checked before anything is rendered: a missing key,
//! a value of the wrong type or an unknown field type rejects the form with
//! the JSON path of the offending node.

use crate::condition::{json_kind, parse_condition_groups};
use crate::error::SchemaValidationError;
use crate::models::{FieldSchema, FieldType, FormSchema, GroupSchema, OptionSchema};
use serde_json::{Map, Value};
use std::collections::HashSet;

type Result<T> = std::result::Result<T, SchemaValidationError>;

/// Parse a JSON or JSONC schema document into a FormSchema
pub fn parse_form_json(input: &str) -> Result<FormSchema> {
    let cleaned = strip_jsonc(input);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| SchemaValidationError::new("$", format!("invalid JSON: {}", e)))?;
    parse_form_json_value(&value)
}

/// Validate a schema document without keeping the result
pub fn validate_form_json(input: &str) -> Result<()> {
    parse_form_json(input).map(|_| ())
}

/// Parse an already decoded JSON value into a FormSchema
pub fn parse_form_json_value(value: &Value) -> Result<FormSchema> {
    let root = Node::root(value);
    root.object()?;

    let name = root.required_str("form_name")?;
    if name.trim().is_empty() {
        return Err(root.err_at("form_name", "form name must not be empty"));
    }
    let title = root.optional_str("title")?.unwrap_or_default();
    let is_active = root.optional_bool("is_active", true)?;

    let mut form = FormSchema {
        name,
        title,
        is_active,
        field_groups: Vec::new(),
    };

    // The hosting anchor carries the bare form name as its id
    let mut ids = HashSet::from([form.name.clone(), form.form_id()]);
    form.field_groups = root
        .required_array("field_groups")?
        .into_iter()
        .map(|group| parse_group(group, &mut ids))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Parsed form '{}' with {} groups and {} fields",
        form.name,
        form.field_groups.len(),
        form.fields().count()
    );

    Ok(form)
}

/// Every group and field turns into element ids in the rendered page, so
/// each of them must be unique within the form.
fn claim_id(ids: &mut HashSet<String>, id: String, path: String) -> Result<()> {
    if ids.insert(id.clone()) {
        Ok(())
    } else {
        Err(SchemaValidationError::new(
            path,
            format!("duplicate element id '{}'", id),
        ))
    }
}

fn parse_group(node: Node<'_>, ids: &mut HashSet<String>) -> Result<GroupSchema> {
    node.object()?;
    let name = node.required_str("name")?;
    claim_id(ids, name.clone(), node.key_path("name"))?;
    let label = node.optional_str("label")?.unwrap_or_default();

    let fields = node
        .required_array("fields")?
        .into_iter()
        .map(|field| {
            let path = field.key_path("name");
            let field = parse_field(field)?;
            claim_id(ids, field.name.clone(), path.clone())
                .and_then(|_| claim_id(ids, field.control_id(), path))
                .map_err(|e| e.in_field(&field.name))?;
            Ok(field)
        })
        .collect::<Result<Vec<_>>>()?;

    let conditions_groups =
        parse_condition_groups(node.get("conditions_groups"), &node.key_path("conditions_groups"))?;

    Ok(GroupSchema {
        name,
        label,
        fields,
        conditions_groups,
    })
}

fn parse_field(mut node: Node<'_>) -> Result<FieldSchema> {
    node.object()?;
    let name = node.required_str("name")?;
    if name.trim().is_empty() {
        return Err(node.err_at("name", "field name must not be empty"));
    }
    node.field = Some(name.clone());

    let raw_type = node.required_str("type")?;
    let field_type: FieldType = raw_type
        .parse()
        .map_err(|reason: String| node.err_at("type", reason))?;

    let label = node.optional_str("label")?.unwrap_or_default();
    let placeholder = node.optional_str("placeholder")?.unwrap_or_default();
    let is_required = node.optional_bool("is_required", false)?;
    let is_hidden = node.optional_bool("is_hidden", false)?;

    let options = node.optional_array("sel_options")?;
    let sel_options = if field_type == FieldType::Select {
        options
            .into_iter()
            .map(parse_option)
            .collect::<Result<Vec<_>>>()?
    } else {
        if !options.is_empty() {
            log::warn!(
                "Ignoring {} sel_options on non-select field '{}' ({})",
                options.len(),
                name,
                field_type
            );
        }
        Vec::new()
    };

    let conditions_groups =
        parse_condition_groups(node.get("conditions_groups"), &node.key_path("conditions_groups"))
            .map_err(|e| e.in_field(&name))?;

    Ok(FieldSchema {
        name,
        field_type,
        label,
        placeholder,
        is_required,
        is_hidden,
        sel_options,
        conditions_groups,
    })
}

fn parse_option(node: Node<'_>) -> Result<OptionSchema> {
    node.object()?;
    let value = match node.get("value") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(node.err_at(
                "value",
                format!("expected a string or number, found {}", json_kind(other)),
            ))
        }
        None => return Err(node.err_at("value", "missing required key")),
    };
    let label = node.optional_str("label")?.unwrap_or_else(|| value.clone());
    let is_default = node.optional_bool("is_default", false)?;
    let is_disabled = node.optional_bool("is_disabled", false)?;
    let conditions_groups =
        parse_condition_groups(node.get("conditions_groups"), &node.key_path("conditions_groups"))
            .map_err(|e| node.attach_field(e))?;

    Ok(OptionSchema {
        value,
        label,
        is_default,
        is_disabled,
        conditions_groups,
    })
}

/// A position in the document being validated.
struct Node<'a> {
    value: &'a Value,
    path: String,
    field: Option<String>,
}

impl<'a> Node<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: "$".to_string(),
            field: None,
        }
    }

    fn key_path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    fn attach_field(&self, err: SchemaValidationError) -> SchemaValidationError {
        match &self.field {
            Some(field) => err.in_field(field),
            None => err,
        }
    }

    fn err_at(&self, key: &str, reason: impl Into<String>) -> SchemaValidationError {
        self.attach_field(SchemaValidationError::new(self.key_path(key), reason))
    }

    fn object(&self) -> Result<&'a Map<String, Value>> {
        self.value.as_object().ok_or_else(|| {
            self.attach_field(SchemaValidationError::new(
                self.path.clone(),
                format!("expected an object, found {}", json_kind(self.value)),
            ))
        })
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key)
    }

    fn required_str(&self, key: &str) -> Result<String> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.err_at(
                key,
                format!("expected a string, found {}", json_kind(other)),
            )),
            None => Err(self.err_at(key, "missing required key")),
        }
    }

    fn optional_str(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.err_at(
                key,
                format!("expected a string, found {}", json_kind(other)),
            )),
        }
    }

    fn optional_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.err_at(
                key,
                format!("expected a boolean, found {}", json_kind(other)),
            )),
        }
    }

    fn required_array(&self, key: &str) -> Result<Vec<Node<'a>>> {
        match self.get(key) {
            None => Err(self.err_at(key, "missing required key")),
            Some(_) => self.optional_array(key),
        }
    }

    fn optional_array(&self, key: &str) -> Result<Vec<Node<'a>>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, value)| Node {
                    value,
                    path: format!("{}.{}[{}]", self.path, key, i),
                    field: self.field.clone(),
                })
                .collect()),
            Some(other) => Err(self.err_at(
                key,
                format!("expected an array, found {}", json_kind(other)),
            )),
        }
    }
}

/// Remove `//` and `/* */` comments and trailing commas so a JSONC document
/// can be read by a strict JSON parser. Newlines are kept so that syntax
/// error positions still match the source.
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if ch == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
            out.push(ch);
        } else if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if !matches!(next, Some(']') | Some('}')) {
                out.push(ch);
            }
        } else {
            out.push(ch);
        }
        i += 1;
    }

    out
}
