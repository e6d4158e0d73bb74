//! Schema to element-tree rendering.
//!
//! Rendering is a single synchronous pass over an already validated
//! `FormSchema`, so groups, fields and options always come out in input order.

use crate::html::Element;
use crate::models::{FormSchema, GroupSchema};
use serde::Deserialize;

mod change;
mod field_renderers;

pub use change::{apply_change, ChangeEvent};
pub use field_renderers::{render_field, render_option};

/// CSS class names emitted by the renderer. Stylesheets key off these.
pub mod classes {
    pub const FORM: &str = "generated_form";
    pub const GROUP: &str = "fields_group";
    pub const GROUP_TITLE: &str = "fields_group_title";
    pub const FIELD_WRAP: &str = "form_field_wrap";
    pub const FIELD_LABEL: &str = "form_field_label";
    pub const FIELD_EXTRA: &str = "form_field_extra";
    pub const FIELD_CONTROL: &str = "form_field";
    pub const DROPZONE: &str = "form_field_dropzone";
    pub const FILENAME: &str = "form_field_filename";
    pub const SUBMIT: &str = "form_submit";
    pub const ERROR: &str = "form_error";
}

/// Knobs for the produced markup, loaded from the `[render]` config section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Class marking placeholder elements in a hosting page
    pub anchor_class: String,
    /// Image shown inside file drop zones
    pub dropzone_image: String,
    /// Where the generated form posts to
    pub submit_action: String,
    pub submit_method: String,
    pub submit_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            anchor_class: "form_anchor".to_string(),
            dropzone_image: "/static/pics/file_dropzone.png".to_string(),
            submit_action: "/forms/submit".to_string(),
            submit_method: "post".to_string(),
            submit_label: "Submit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormRenderer {
    options: RenderOptions,
}

impl FormRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Build the `<form>` element for a whole schema.
    pub fn render_form(&self, form: &FormSchema) -> Element {
        log::debug!(
            "Rendering form '{}' ({} groups)",
            form.name,
            form.field_groups.len()
        );

        let form_id = form.form_id();
        let mut html = Element::new("form")
            .class(classes::FORM)
            .attr("id", &form_id)
            .attr("method", &self.options.submit_method)
            .attr("action", &self.options.submit_action);
        if form.has_file_field() {
            html.set_attr("enctype", "multipart/form-data");
        }
        if !form.title.is_empty() {
            html.set_attr("aria-label", &form.title);
        }
        html.set_attr("data-active", form.is_active.to_string());

        for group in &form.field_groups {
            html.append(self.render_group(group, &form_id));
        }

        html.child(
            Element::new("button")
                .class(classes::SUBMIT)
                .attr("type", "submit")
                .attr("form", &form_id)
                .flag_if("disabled", !form.is_active)
                .text(&self.options.submit_label),
        )
    }

    /// Build the collapsible `<details>` section for one group. Open by default.
    pub fn render_group(&self, group: &GroupSchema, form_id: &str) -> Element {
        let mut html = Element::new("details")
            .class(classes::GROUP)
            .attr("id", &group.name)
            .flag("open")
            .child(
                Element::new("summary")
                    .class(classes::GROUP_TITLE)
                    .text(&group.label),
            );

        for field in &group.fields {
            html.append(render_field(field, form_id, &self.options));
        }
        html
    }

    pub fn render_form_html(&self, form: &FormSchema) -> String {
        self.render_form(form).to_string()
    }
}
