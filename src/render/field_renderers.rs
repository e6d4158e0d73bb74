use super::{classes, RenderOptions};
use crate::html::Element;
use crate::models::{ControlKind, FieldSchema, OptionSchema};

/// Build a field wrapper: the visible label plus a container holding the
/// type-specific control.
pub fn render_field(field: &FieldSchema, form_id: &str, options: &RenderOptions) -> Element {
    let type_name = field.field_type.as_str();
    let control_id = field.control_id();

    let mut label_text = field.label.clone();
    if field.is_required {
        label_text.push_str(" *");
    }
    let label = Element::new("label")
        .class(format!("{} {}", classes::FIELD_LABEL, type_name))
        .attr("for", &control_id)
        .text(label_text);

    let mut extra = Element::new("label")
        .class(format!("{} {}", classes::FIELD_EXTRA, type_name))
        .attr("for", &control_id);
    if field.field_type.has_dropzone() {
        extra.append(
            Element::new("img")
                .class(classes::DROPZONE)
                .attr("src", &options.dropzone_image)
                .attr("alt", ""),
        );
    }
    extra.append(render_control(field, form_id));

    Element::new("div")
        .class(format!("{} {}", classes::FIELD_WRAP, type_name))
        .attr("id", &field.name)
        .flag_if("hidden", field.is_hidden)
        .child(label)
        .child(extra)
}

fn render_control(field: &FieldSchema, form_id: &str) -> Element {
    let type_name = field.field_type.as_str();

    let mut control = match field.field_type.control() {
        ControlKind::Input(input_type) => Element::new("input").attr("type", input_type),
        ControlKind::Select => Element::new("select"),
    };
    control.set_attr("class", format!("{} {}", classes::FIELD_CONTROL, type_name));
    control.set_attr("id", field.control_id());
    control.set_attr("name", &field.name);
    // Keeps the control part of its form even when moved elsewhere in the page
    control.set_attr("form", form_id);
    control.set_attr("data-change", field.field_type.change_handler().as_str());

    if field.field_type.accepts_placeholder() && !field.placeholder.is_empty() {
        control.set_attr("placeholder", &field.placeholder);
    }
    // A hidden control the user cannot reach would block submission
    let required = field.is_required && !field.is_hidden;
    if field.is_required && field.is_hidden {
        log::debug!("Hidden field '{}' is not marked required", field.name);
    }
    control.set_flag("required", required);

    if let ControlKind::Select = field.field_type.control() {
        let selected = default_option_index(field);
        for (i, option) in field.sel_options.iter().enumerate() {
            control.append(render_option(option, selected == Some(i)));
        }
    }

    control
}

/// Only one option of a select can be pre-selected: the first one flagged
/// as default.
fn default_option_index(field: &FieldSchema) -> Option<usize> {
    let mut defaults = field
        .sel_options
        .iter()
        .enumerate()
        .filter(|(_, o)| o.is_default)
        .map(|(i, _)| i);
    let first = defaults.next();
    let extra = defaults.count();
    if extra > 0 {
        log::warn!(
            "Field '{}' has {} default options; only the first is selected",
            field.name,
            extra + 1
        );
    }
    first
}

pub fn render_option(option: &OptionSchema, selected: bool) -> Element {
    Element::new("option")
        .attr("value", &option.value)
        .flag_if("selected", selected)
        .flag_if("disabled", option.is_disabled)
        .text(&option.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    fn field(name: &str, field_type: FieldType) -> FieldSchema {
        FieldSchema {
            name: name.to_string(),
            field_type,
            label: "Label".to_string(),
            placeholder: String::new(),
            is_required: false,
            is_hidden: false,
            sel_options: Vec::new(),
            conditions_groups: Vec::new(),
        }
    }

    fn option(value: &str, is_default: bool, is_disabled: bool) -> OptionSchema {
        OptionSchema {
            value: value.to_string(),
            label: value.to_uppercase(),
            is_default,
            is_disabled,
            conditions_groups: Vec::new(),
        }
    }

    #[test]
    fn test_text_field_markup() {
        let mut f = field("first_name", FieldType::Text);
        f.placeholder = "Jane".to_string();
        let html = render_field(&f, "contact", &RenderOptions::default());
        assert_eq!(
            html.to_string(),
            concat!(
                r#"<div class="form_field_wrap text" id="first_name">"#,
                r#"<label class="form_field_label text" for="first_name_field">Label</label>"#,
                r#"<label class="form_field_extra text" for="first_name_field">"#,
                r#"<input type="text" class="form_field text" id="first_name_field" name="first_name" "#,
                r#"form="contact" data-change="log" placeholder="Jane">"#,
                r#"</label></div>"#
            )
        );
    }

    #[test]
    fn test_required_field() {
        let mut f = field("email", FieldType::Email);
        f.is_required = true;
        let html = render_field(&f, "contact", &RenderOptions::default());
        let label = html.find_by_class(classes::FIELD_LABEL).unwrap();
        assert_eq!(label.text_content(), "Label *");
        let input = html.find_all("input")[0];
        assert!(input.has_attr("required"));
        assert_eq!(input.get_attr("type"), Some("email"));
    }

    #[test]
    fn test_hidden_field() {
        let mut f = field("token", FieldType::Text);
        f.is_hidden = true;
        let html = render_field(&f, "contact", &RenderOptions::default());
        assert!(html.has_attr("hidden"));
    }

    #[test]
    fn test_hidden_required_field_does_not_block_submit() {
        let mut f = field("referrer", FieldType::Text);
        f.is_hidden = true;
        f.is_required = true;
        let html = render_field(&f, "contact", &RenderOptions::default());
        assert!(html.has_attr("hidden"));
        assert!(!html.find_all("input")[0].has_attr("required"));
    }

    #[test]
    fn test_file_field_has_dropzone() {
        let options = RenderOptions {
            dropzone_image: "/img/drop.png".to_string(),
            ..RenderOptions::default()
        };
        let html = render_field(&field("cv", FieldType::File), "apply", &options);
        let img = html.find_by_class(classes::DROPZONE).unwrap();
        assert_eq!(img.get_attr("src"), Some("/img/drop.png"));
        let input = html.find_all("input")[0];
        assert_eq!(input.get_attr("type"), Some("file"));
        assert_eq!(input.get_attr("data-change"), Some("file-preview"));
    }

    #[test]
    fn test_placeholder_ignored_on_select() {
        let mut f = field("size", FieldType::Select);
        f.placeholder = "pick".to_string();
        let html = render_field(&f, "order", &RenderOptions::default());
        let select = html.find_all("select")[0];
        assert_eq!(select.get_attr("placeholder"), None);
        assert_eq!(select.get_attr("type"), None);
    }

    #[test]
    fn test_select_options_in_order() {
        let mut f = field("size", FieldType::Select);
        f.sel_options = vec![
            option("s", false, false),
            option("m", true, false),
            option("l", false, true),
        ];
        let html = render_field(&f, "order", &RenderOptions::default());
        let options = html.find_all("option");
        let values: Vec<_> = options.iter().map(|o| o.get_attr("value").unwrap()).collect();
        assert_eq!(values, vec!["s", "m", "l"]);
        assert!(!options[0].has_attr("selected"));
        assert!(options[1].has_attr("selected"));
        assert!(options[2].has_attr("disabled"));
        assert_eq!(options[1].text_content(), "M");
    }

    #[test]
    fn test_only_first_default_selected() {
        let mut f = field("size", FieldType::Select);
        f.sel_options = vec![option("s", true, false), option("m", true, false)];
        let html = render_field(&f, "order", &RenderOptions::default());
        let selected: Vec<_> = html
            .find_all("option")
            .into_iter()
            .filter(|o| o.has_attr("selected"))
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].get_attr("value"), Some("s"));
    }

    #[test]
    fn test_phone_renders_tel_input() {
        let html = render_field(&field("phone", FieldType::Phone), "c", &RenderOptions::default());
        assert_eq!(html.find_all("input")[0].get_attr("type"), Some("tel"));
        assert!(html.has_class("phone"));
    }
}
