use crate::json_parser::parse_form_json;
use crate::models::FieldType;

#[test]
fn test_contact_scenario() {
    let json = r#"{
        "form_name": "contact",
        "title": "Contact",
        "is_active": true,
        "field_groups": [{
            "name": "g1",
            "label": "Info",
            "fields": [{
                "name": "email", "type": "email", "label": "Email", "is_required": true,
                "sel_options": [], "conditions_groups": []
            }],
            "conditions_groups": []
        }]
    }"#;

    let form = parse_form_json(json).unwrap();
    assert_eq!(form.name, "contact");
    assert_eq!(form.title, "Contact");
    assert_eq!(form.field_groups.len(), 1);

    let group = &form.field_groups[0];
    assert_eq!(group.label, "Info");
    assert_eq!(group.fields.len(), 1);

    let field = &group.fields[0];
    assert_eq!(field.field_type, FieldType::Email);
    assert!(field.is_required);
    assert!(!field.is_hidden);
    assert_eq!(field.placeholder, "");
}

#[test]
fn test_unknown_field_type_names_field() {
    let json = r#"{
        "form_name": "contact",
        "field_groups": [{
            "name": "g1",
            "fields": [
                {"name": "first", "type": "text"},
                {"name": "email", "type": "unknown", "label": "Email"}
            ]
        }]
    }"#;

    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("email"));
    assert_eq!(err.path, "$.field_groups[0].fields[1].type");
    assert!(err.reason.contains("unknown field type 'unknown'"));
    assert!(err.to_string().contains("'email'"));
}

#[test]
fn test_missing_field_type() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [{"name": "x"}]}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields[0].type");
    assert_eq!(err.field.as_deref(), Some("x"));
    assert!(err.reason.contains("missing required key"));
}

#[test]
fn test_missing_field_name_has_no_field() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [{"type": "text"}]}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields[0].name");
    assert_eq!(err.field, None);
}

#[test]
fn test_group_fields_must_be_array() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": {}}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields");
    assert!(err.reason.contains("expected an array, found an object"));
}

#[test]
fn test_malformed_option_list() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [
        {"name": "size", "type": "select", "sel_options": "s,m,l"}
    ]}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields[0].sel_options");
    assert_eq!(err.field.as_deref(), Some("size"));
}

#[test]
fn test_option_without_value() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [
        {"name": "size", "type": "select", "sel_options": [{"value": "s"}, {"label": "M"}]}
    ]}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields[0].sel_options[1].value");
    assert_eq!(err.field.as_deref(), Some("size"));
}

#[test]
fn test_option_entry_not_object() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [
        {"name": "size", "type": "select", "sel_options": ["s"]}
    ]}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields[0].sel_options[0]");
    assert!(err.reason.contains("expected an object, found a string"));
}

#[test]
fn test_duplicate_field_names_across_groups() {
    let json = r#"{"form_name": "f", "field_groups": [
        {"name": "a", "fields": [{"name": "email", "type": "email"}]},
        {"name": "b", "fields": [{"name": "email", "type": "text"}]}
    ]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("email"));
    assert_eq!(err.path, "$.field_groups[1].fields[0].name");
    assert!(err.reason.contains("duplicate"));
}

#[test]
fn test_group_and_field_share_name() {
    let json = r#"{"form_name": "f", "field_groups": [
        {"name": "email", "fields": [{"name": "email", "type": "email"}]}
    ]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields[0].name");
    assert_eq!(err.field.as_deref(), Some("email"));
    assert!(err.reason.contains("duplicate element id 'email'"));
}

#[test]
fn test_names_clashing_with_form_ids() {
    let anchor = r#"{"form_name": "contact", "field_groups": [
        {"name": "contact", "fields": []}
    ]}"#;
    let err = parse_form_json(anchor).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].name");

    let form = r#"{"form_name": "contact", "field_groups": [
        {"name": "g", "fields": [{"name": "contact_form", "type": "text"}]}
    ]}"#;
    let err = parse_form_json(form).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("contact_form"));
}

#[test]
fn test_field_name_clashing_with_control_id() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [
        {"name": "city", "type": "text"},
        {"name": "city_field", "type": "text"}
    ]}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(err.path, "$.field_groups[0].fields[1].name");
    assert!(err.reason.contains("'city_field'"));
}

#[test]
fn test_options_on_non_select_are_dropped() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [
        {"name": "n", "type": "text", "sel_options": [{"value": "x"}]}
    ]}]}"#;
    let form = parse_form_json(json).unwrap();
    assert!(form.field_groups[0].fields[0].sel_options.is_empty());
}

#[test]
fn test_conditions_parsed_everywhere() {
    let json = r#"{"form_name": "f", "field_groups": [{
        "name": "g",
        "fields": [{
            "name": "size", "type": "select",
            "sel_options": [{"value": "s", "conditions_groups": [{"type": "AND", "fields": [{"name": "a"}]}]}],
            "conditions_groups": [{"type": "OR", "fields": [{"name": "b"}, {"name": "c"}]}]
        }],
        "conditions_groups": [{"type": "AND", "fields": []}]
    }]}"#;
    let form = parse_form_json(json).unwrap();
    let group = &form.field_groups[0];
    assert_eq!(group.conditions_groups[0].kind(), Some("AND"));
    let field = &group.fields[0];
    assert_eq!(field.conditions_groups[0].conditions.len(), 2);
    assert_eq!(
        field.sel_options[0].conditions_groups[0].conditions[0].name(),
        Some("a")
    );
}

#[test]
fn test_condition_group_error_inside_option_names_field() {
    let json = r#"{"form_name": "f", "field_groups": [{"name": "g", "fields": [{
        "name": "size", "type": "select",
        "sel_options": [{"value": "s", "conditions_groups": [{"type": "AND", "fields": 3}]}]
    }]}]}"#;
    let err = parse_form_json(json).unwrap_err();
    assert_eq!(
        err.path,
        "$.field_groups[0].fields[0].sel_options[0].conditions_groups[0].fields"
    );
    assert_eq!(err.field.as_deref(), Some("size"));
}
