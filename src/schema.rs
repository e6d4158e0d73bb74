//! JSON Schema for form schema documents
//!
//! Lets schema authors validate their `.jsonc` files in an editor before they
//! are served to pages.

use crate::models::FieldType;
use serde_json::json;

/// Get the JSON Schema describing a form document
pub fn get_form_schema() -> serde_json::Value {
    let field_types: Vec<&str> = FieldType::ALL.iter().map(|t| t.as_str()).collect();

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Form",
        "type": "object",
        "properties": {
            "form_name": {
                "type": "string",
                "minLength": 1,
                "description": "Form identifier; becomes the id of the rendered <form>"
            },
            "title": {
                "type": "string",
                "description": "Human readable title"
            },
            "is_active": {
                "type": "boolean",
                "default": true,
                "description": "Inactive forms render with a disabled submit button"
            },
            "field_groups": {
                "type": "array",
                "items": {"$ref": "#/$defs/group"}
            }
        },
        "required": ["form_name", "field_groups"],
        "$defs": {
            "group": {
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Id of the rendered section"},
                    "label": {"type": "string", "description": "Section heading"},
                    "fields": {
                        "type": "array",
                        "items": {"$ref": "#/$defs/field"}
                    },
                    "conditions_groups": {"$ref": "#/$defs/conditions_groups"}
                },
                "required": ["name", "fields"]
            },
            "field": {
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Unique within the form"
                    },
                    "type": {"enum": field_types},
                    "label": {"type": "string"},
                    "placeholder": {"type": "string"},
                    "is_required": {"type": "boolean", "default": false},
                    "is_hidden": {"type": "boolean", "default": false},
                    "sel_options": {
                        "type": "array",
                        "items": {"$ref": "#/$defs/option"},
                        "description": "Only used by select fields"
                    },
                    "conditions_groups": {"$ref": "#/$defs/conditions_groups"}
                },
                "required": ["name", "type"]
            },
            "option": {
                "type": "object",
                "properties": {
                    "value": {"type": ["string", "number"]},
                    "label": {"type": "string", "description": "Defaults to value"},
                    "is_default": {"type": "boolean", "default": false},
                    "is_disabled": {"type": "boolean", "default": false},
                    "conditions_groups": {"$ref": "#/$defs/conditions_groups"}
                },
                "required": ["value"]
            },
            "conditions_groups": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": {"type": "string", "description": "Logical combinator, e.g. AND / OR"},
                        "fields": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": {"type": "string"},
                                    "statement": {"type": "string"},
                                    "value": {}
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Get a human-readable description of the form document format
pub fn get_schema_description() -> &'static str {
    "Form schema (JSON or JSONC):
{
  \"form_name\": \"contact\",
  \"title\": \"Contact us\",
  \"is_active\": true,
  \"field_groups\": [
    {\"name\": \"info\", \"label\": \"Your details\", \"fields\": [
      {\"name\": \"email\", \"type\": \"email\", \"label\": \"Email\", \"is_required\": true},
      {\"name\": \"topic\", \"type\": \"select\", \"label\": \"Topic\", \"sel_options\": [
        {\"value\": \"sales\", \"label\": \"Sales\", \"is_default\": true},
        {\"value\": \"legacy\", \"label\": \"Legacy\", \"is_disabled\": true}
      ]},
      {\"name\": \"cv\", \"type\": \"file\", \"label\": \"Attachment\"}
    ], \"conditions_groups\": [
      {\"type\": \"AND\", \"fields\": [{\"name\": \"topic\", \"statement\": \"equals\", \"value\": \"sales\"}]}
    ]}
  ]
}

Field types: text, select, phone, email, date, file.
Group and field names become element ids and must be unique within a form.
Conditions are carried through but not evaluated."
}
